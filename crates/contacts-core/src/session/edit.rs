//! Edit menu and its sub-modes.
//!
//! Every change goes to the committed record in the address book, looked up
//! by the name carried in the mode.

use super::{tokens, Mode, SessionInput, State, Turn};
use crate::error::ContactsError;
use crate::fields::{validate_email, validate_phone, Birthday};
use crate::record::Record;

pub(super) fn menu(turn: &mut Turn<'_>, name: String, input: SessionInput) -> State {
    let option = match input {
        SessionInput::Cancel | SessionInput::Finish => return State::main(),
        SessionInput::Text(text) => text,
    };
    if option == tokens::EXIT {
        return State::main();
    }
    let Some(record) = turn.book.get(&name).cloned() else {
        turn.error(ContactsError::NotFound(name));
        return State::main();
    };

    let next = match option.as_str() {
        "1" => Mode::EditAddPhone { name },
        "2" => return delete_phone_menu(turn, name, &record),
        "3" => Mode::EditUpdateEmail { name },
        "4" => Mode::EditUpdateBirthday { name },
        "5" => {
            match &record.email {
                Some(email) => {
                    let message = format!("E-mail '{}' has been deleted.", email);
                    if apply(turn, &name, |r| r.email.take().is_some()) {
                        turn.success(message);
                    }
                }
                None => turn.info("E-mail is not set"),
            }
            Mode::EditMenu { name }
        }
        "6" => {
            match &record.birthday {
                Some(birthday) => {
                    let message = format!("Birthday '{}' has been deleted.", birthday);
                    if apply(turn, &name, |r| r.birthday.take().is_some()) {
                        turn.success(message);
                    }
                }
                None => turn.info("Birthday is not set"),
            }
            Mode::EditMenu { name }
        }
        "7" => Mode::EditDeleteContact { name },
        _ => {
            turn.warning("Unrecognized command");
            Mode::EditMenu { name }
        }
    };
    State::new(next, None)
}

fn delete_phone_menu(turn: &mut Turn<'_>, name: String, record: &Record) -> State {
    match record.phones() {
        [] => turn.info("Phone list is empty"),
        [only] => {
            let message = format!("Phone '{}' has been deleted.", only);
            if apply(turn, &name, |r| r.remove_phone(only)) {
                turn.success(message);
            }
        }
        phones => {
            let listing = phones
                .iter()
                .enumerate()
                .map(|(row, phone)| format!("{} = {}", row, phone))
                .collect::<Vec<_>>()
                .join("\n");
            turn.info(listing);
            return State::new(Mode::EditDeletePhone { name }, None);
        }
    }
    State::new(Mode::EditMenu { name }, None)
}

/// Handle input for an edit sub-mode. Always lands back on the edit menu,
/// except for a confirmed contact deletion.
pub(super) fn sub_mode(turn: &mut Turn<'_>, mode: Mode, input: SessionInput) -> State {
    let Some(name) = mode.selected().map(str::to_string) else {
        return State::main();
    };
    let back = State::new(Mode::edit_menu(&name), None);
    let text = match input {
        SessionInput::Cancel | SessionInput::Finish => return back,
        SessionInput::Text(text) => text,
    };

    match mode {
        Mode::EditAddPhone { .. } => add_phones(turn, &name, &text),
        Mode::EditDeletePhone { .. } => delete_phone_row(turn, &name, &text),
        Mode::EditUpdateEmail { .. } if !text.is_empty() => match validate_email(&text) {
            Ok(email) => {
                let message = format!("E-mail '{}' saved.", email);
                if apply(turn, &name, |r| r.email.replace(email.clone()) != Some(email)) {
                    turn.success(message);
                }
            }
            Err(err) => turn.error(err),
        },
        Mode::EditUpdateBirthday { .. } if !text.is_empty() => {
            match Birthday::parse(&text, turn.session.today) {
                Ok(birthday) => {
                    let message = format!("Birthday '{}' saved.", birthday);
                    if apply(turn, &name, |r| r.birthday.replace(birthday) != Some(birthday)) {
                        turn.success(message);
                    }
                }
                Err(err) => turn.error(err),
            }
        }
        Mode::EditDeleteContact { .. } => {
            if text.eq_ignore_ascii_case("y") {
                if turn.book.delete(&name).is_some() {
                    turn.success(format!("Contact '{}' has been deleted", name));
                }
                return State::main();
            }
            turn.info("Contact was not deleted");
        }
        _ => {}
    }
    if turn.book.contains(&name) {
        back
    } else {
        State::main()
    }
}

// Each token is tried on its own; one bad token does not stop the rest.
fn add_phones(turn: &mut Turn<'_>, name: &str, text: &str) {
    for token in text.split_whitespace() {
        let phone = match validate_phone(token) {
            Ok(phone) => phone,
            Err(err) => {
                turn.error(err);
                continue;
            }
        };
        match turn.book.modify(name, |r| r.add_phone(phone)) {
            Ok(true) => turn.success(format!("Phone '{}' added.", token)),
            Ok(false) => turn.warning(ContactsError::DuplicatePhone(token.to_string()).to_string()),
            Err(err) => {
                turn.error(err);
                return;
            }
        }
    }
}

// Out-of-range or non-numeric rows are ignored.
fn delete_phone_row(turn: &mut Turn<'_>, name: &str, text: &str) {
    let Ok(row) = text.parse::<usize>() else {
        return;
    };
    let Some(phone) = turn
        .book
        .get(name)
        .and_then(|record| record.phones().get(row))
        .cloned()
    else {
        return;
    };
    if apply(turn, name, |r| r.remove_phone(&phone)) {
        turn.success(format!("Phone '{}' has been deleted.", phone));
    }
}

/// Run `change` on the live record, reporting a vanished contact.
fn apply<F>(turn: &mut Turn<'_>, name: &str, change: F) -> bool
where
    F: FnOnce(&mut Record) -> bool,
{
    match turn.book.modify(name, change) {
        Ok(changed) => changed,
        Err(err) => {
            turn.error(err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::super::{Notice, Session};
    use super::*;
    use crate::book::AddressBook;
    use crate::fields::validate_name;
    use crate::storage::MemoryStore;

    fn session() -> Session {
        Session::new(5, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn book_with_ann(phones: &[&str]) -> AddressBook {
        let mut book = AddressBook::load(MemoryStore::new()).unwrap();
        book.add(
            Record::new(validate_name("Ann").unwrap())
                .with_phones(phones.iter().map(|p| validate_phone(p).unwrap())),
        );
        book.flush().unwrap();
        book
    }

    fn at(mode: Mode) -> State {
        State::new(mode, None)
    }

    fn ann_menu() -> State {
        at(Mode::edit_menu("Ann"))
    }

    #[test]
    fn test_unrecognized_option_changes_nothing() {
        let mut book = book_with_ann(&["380501234567"]);
        let step = session().step(&mut book, ann_menu(), SessionInput::text("9"));
        assert_eq!(step.state, ann_menu());
        assert_eq!(
            step.notices,
            vec![Notice::Warning("Unrecognized command".to_string())]
        );
        assert!(!book.is_dirty());
    }

    #[test]
    fn test_delete_single_phone_immediately() {
        let mut book = book_with_ann(&["380501234567"]);
        let step = session().step(&mut book, ann_menu(), SessionInput::text("2"));
        assert_eq!(step.state, ann_menu());
        assert!(book.get("Ann").unwrap().phones().is_empty());
        assert!(book.is_dirty());
    }

    #[test]
    fn test_delete_phone_with_empty_list() {
        let mut book = book_with_ann(&[]);
        let step = session().step(&mut book, ann_menu(), SessionInput::text("2"));
        assert_eq!(step.state, ann_menu());
        assert_eq!(
            step.notices,
            vec![Notice::Info("Phone list is empty".to_string())]
        );
        assert!(!book.is_dirty());
    }

    #[test]
    fn test_delete_phone_by_row_including_zero() {
        let mut book = book_with_ann(&["380501234567", "380507654321", "380661112233"]);
        let session = session();

        let step = session.step(&mut book, ann_menu(), SessionInput::text("2"));
        assert_eq!(
            step.state.mode,
            Mode::EditDeletePhone {
                name: "Ann".to_string()
            }
        );
        assert_eq!(
            step.notices,
            vec![Notice::Info(
                "0 = 380501234567\n1 = 380507654321\n2 = 380661112233".to_string()
            )]
        );

        let step = session.step(&mut book, step.state, SessionInput::text("0"));
        assert_eq!(step.state, ann_menu());
        assert_eq!(
            book.get("Ann").unwrap().phones_joined(","),
            "380507654321,380661112233"
        );
    }

    #[test]
    fn test_delete_phone_bad_row_is_silent() {
        let mut book = book_with_ann(&["380501234567", "380507654321"]);
        let mode = Mode::EditDeletePhone {
            name: "Ann".to_string(),
        };
        for bad in ["2", "-1", "x", ""] {
            let step = session().step(&mut book, at(mode.clone()), SessionInput::text(bad));
            assert_eq!(step.state, ann_menu());
            assert!(step.notices.is_empty(), "{bad:?}");
        }
        assert_eq!(book.get("Ann").unwrap().phones().len(), 2);
    }

    #[test]
    fn test_add_phones_reports_each_token() {
        let mut book = book_with_ann(&["380501234567"]);
        let mode = Mode::EditAddPhone {
            name: "Ann".to_string(),
        };
        let step = session().step(
            &mut book,
            at(mode),
            SessionInput::text("380501234567 bad 380507654321"),
        );

        assert_eq!(step.state, ann_menu());
        assert_eq!(
            step.notices,
            vec![
                Notice::Warning("Phone '380501234567' already exists".to_string()),
                Notice::Error("'bad' is not a valid phone number".to_string()),
                Notice::Success("Phone '380507654321' added.".to_string()),
            ]
        );
        assert_eq!(book.get("Ann").unwrap().phones().len(), 2);
    }

    #[test]
    fn test_update_email_and_delete_it() {
        let mut book = book_with_ann(&[]);
        let session = session();
        let mode = Mode::EditUpdateEmail {
            name: "Ann".to_string(),
        };

        let step = session.step(&mut book, at(mode.clone()), SessionInput::text("not-an-email"));
        assert_eq!(step.state, ann_menu());
        assert!(book.get("Ann").unwrap().email.is_none());
        assert!(!book.is_dirty());

        session.step(&mut book, at(mode), SessionInput::text("ann@example.com"));
        assert_eq!(
            book.get("Ann").unwrap().email.as_ref().unwrap().as_str(),
            "ann@example.com"
        );

        let step = session.step(&mut book, ann_menu(), SessionInput::text("5"));
        assert_eq!(
            step.notices,
            vec![Notice::Success(
                "E-mail 'ann@example.com' has been deleted.".to_string()
            )]
        );
        assert!(book.get("Ann").unwrap().email.is_none());
    }

    #[test]
    fn test_update_and_delete_birthday() {
        let mut book = book_with_ann(&[]);
        let session = session();
        let mode = Mode::EditUpdateBirthday {
            name: "Ann".to_string(),
        };

        session.step(&mut book, at(mode), SessionInput::text("05-21"));
        assert_eq!(book.get("Ann").unwrap().birthday.unwrap().std_str(), "05-21");

        let step = session.step(&mut book, ann_menu(), SessionInput::text("6"));
        assert_eq!(
            step.notices,
            vec![Notice::Success("Birthday '21 May' has been deleted.".to_string())]
        );
        assert!(book.get("Ann").unwrap().birthday.is_none());
    }

    #[test]
    fn test_delete_contact_needs_confirmation() {
        let mut book = book_with_ann(&[]);
        book.add(Record::new(validate_name("Bob").unwrap()));
        let session = session();
        let mode = Mode::EditDeleteContact {
            name: "Ann".to_string(),
        };

        let step = session.step(&mut book, at(mode.clone()), SessionInput::text("n"));
        assert_eq!(step.state, ann_menu());
        assert!(book.contains("Ann"));

        let step = session.step(&mut book, at(mode), SessionInput::text("Y"));
        assert_eq!(step.state, State::main());
        assert!(!book.contains("Ann"));
    }

    #[test]
    fn test_deleting_last_contact_reenters_wizard() {
        let mut book = book_with_ann(&[]);
        let mode = Mode::EditDeleteContact {
            name: "Ann".to_string(),
        };
        let step = session().step(&mut book, at(mode), SessionInput::text("y"));
        assert_eq!(step.state.mode, Mode::AddName);
    }

    #[test]
    fn test_menu_zero_and_cancel_return_to_main() {
        let mut book = book_with_ann(&[]);
        let session = session();
        for input in [SessionInput::text("0"), SessionInput::Cancel, SessionInput::Finish] {
            let step = session.step(&mut book, ann_menu(), input);
            assert_eq!(step.state, State::main());
        }
    }
}
