//! Prompt text shown before each input, per session mode.

use chrono::NaiveDate;

use contacts_core::{AddressBook, Mode, Record, State};

use crate::ui::{self, UiContext};

const BIRTHDAY_HINT: &str =
    "Enter birthday (format is 'mm-dd' or 'yyyy-mm-dd', e.g. '05-21' or '1999-01-22'): ";
const PHONES_HINT: &str =
    "Enter a list of 12-digit phone numbers separated by ' ' (e.g. 380501234567): ";

/// Everything printed ahead of the input line for `state`.
pub fn render(
    ctx: &UiContext,
    book: &AddressBook,
    state: &State,
    page_size: usize,
    today: NaiveDate,
) -> String {
    let line = ui::divider(ctx);
    match &state.mode {
        Mode::Main => format!(
            "\n{}\n{}\n1 = Add new contact\n2 = Show all (easy way to select one)\n\
             0 = Exit (Ctrl+C)\n{}\n\
             Select an option or type some symbols to search by name/phone: ",
            contact_count(book),
            line,
            line
        ),
        Mode::AddName if state.draft.is_none() => format!(
            "{}\n{}\nYou are about to add new contact.\n{}\n\
             You may leave the blank field to skip (press Enter),\n\
             Enter '-' command to go back to the previous value\n\
             Ctrl+D (or '}}~') to finish\n\
             Ctrl+C (or '{{~') to exit/main menu\n{}\nEnter a name (required): ",
            contact_count(book),
            line,
            line,
            line
        ),
        Mode::AddName => "Enter a name (required): ".to_string(),
        Mode::AddBirthday => BIRTHDAY_HINT.to_string(),
        Mode::AddEmail => "Enter e-mail: ".to_string(),
        Mode::AddPhone => PHONES_HINT.to_string(),
        Mode::Browse { query, page } => {
            let pages = book.select(page_size, Some(query));
            let records: Vec<&Record> = pages
                .get(*page)
                .unwrap_or_default()
                .iter()
                .filter_map(|name| book.get(name))
                .collect();
            format!(
                "{}\nPress Enter to see next page or type a row number to select \
                 corresponding contact (Ctrl+C to exit): ",
                ui::page_table(ctx, &records, today)
            )
        }
        Mode::EditMenu { name } => {
            let card = book
                .get(name)
                .map(|record| format!("{}\n", ui::contact_card(ctx, record, today)))
                .unwrap_or_default();
            format!(
                "{}1 = Add new phone(s)\n2 = Delete existing phone\n3 = Update e-mail\n\
                 4 = Update birthday\n5 = Delete e-mail\n6 = Delete birthday\n\
                 7 = Delete contact\n0 = Main menu (Ctrl+C)\n{}\nSelect an option: ",
                card, line
            )
        }
        Mode::EditAddPhone { .. } => PHONES_HINT.to_string(),
        Mode::EditDeletePhone { .. } => {
            format!("{}\nEnter row number for the phone to delete: ", line)
        }
        Mode::EditUpdateEmail { .. } => "Enter e-mail: ".to_string(),
        Mode::EditUpdateBirthday { .. } => BIRTHDAY_HINT.to_string(),
        Mode::EditDeleteContact { .. } => {
            "Are you sure you want to delete the selected contact (Y)? ".to_string()
        }
        Mode::Exit => String::new(),
    }
}

fn contact_count(book: &AddressBook) -> String {
    if book.is_empty() {
        "Contact list is empty".to_string()
    } else {
        format!("[{} contacts]", book.len())
    }
}
