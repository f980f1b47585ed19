//! Rendering primitives for CLI output.

use chrono::NaiveDate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};

use contacts_core::{Email, Notice, Record, ROW_WIDTHS};

use super::context::UiContext;
use super::format::{center, truncate};
use super::theme::{styled, styles, Badge};

const COLUMNS: [&str; 4] = ["User", "Birthday", "e-mail", "Phone number(s)"];

/// Render a divider line.
pub fn divider(ctx: &UiContext) -> String {
    if ctx.mode.is_pretty() {
        let line = if ctx.unicode { "\u{2500}" } else { "-" };
        styled(&line.repeat(ctx.width.min(30)), styles::dim(), ctx.color)
    } else {
        "-".repeat(30)
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let badge_text = kind.display(ctx.unicode);
    let colored_badge = styled(badge_text, kind.style(), ctx.color);

    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Column header of the fixed-width contact rows.
pub fn record_header() -> String {
    let [name_w, birthday_w, email_w, phones_w] = ROW_WIDTHS;
    let titles = format!(
        "## {} {} {} {}",
        center(COLUMNS[0], name_w),
        center(COLUMNS[1], birthday_w),
        center(COLUMNS[2], email_w),
        center(COLUMNS[3], phones_w),
    );
    let rules = format!(
        "-- {} {} {} {}",
        "-".repeat(name_w),
        "-".repeat(birthday_w),
        "-".repeat(email_w),
        "-".repeat(phones_w),
    );
    format!("{}\n{}", titles, rules)
}

/// A single contact with a header row.
pub fn contact_card(ctx: &UiContext, record: &Record, today: NaiveDate) -> String {
    if ctx.mode.is_pretty() {
        contacts_table(ctx, &[record], today, false)
    } else {
        format!("{}\n   {}", record_header(), record.row(today))
    }
}

/// One browse page: header plus rows numbered from 0.
pub fn page_table(ctx: &UiContext, records: &[&Record], today: NaiveDate) -> String {
    if ctx.mode.is_pretty() {
        return contacts_table(ctx, records, today, true);
    }
    let mut lines = vec![record_header()];
    lines.extend(
        records
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{:>2} {}", i, record.row(today))),
    );
    lines.join("\n")
}

fn contacts_table(
    ctx: &UiContext,
    records: &[&Record],
    today: NaiveDate,
    numbered: bool,
) -> String {
    let mut table = ComfyTable::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(ctx.width.min(u16::MAX as usize) as u16);

    let mut headers: Vec<Cell> = Vec::new();
    if numbered {
        headers.push(Cell::new("#"));
    }
    headers.extend(COLUMNS.iter().map(|title| {
        let cell = Cell::new(title);
        if ctx.color {
            cell.add_attribute(Attribute::Bold)
        } else {
            cell
        }
    }));
    table.set_header(headers);

    let [name_w, _, email_w, _] = ROW_WIDTHS;
    for (i, record) in records.iter().enumerate() {
        let mut row = Vec::new();
        if numbered {
            row.push(i.to_string());
        }
        row.push(truncate(record.name.as_str(), name_w));
        row.push(
            record
                .birthday
                .map(|b| b.display_with_countdown(today))
                .unwrap_or_default(),
        );
        row.push(truncate(
            record.email.as_ref().map(Email::as_str).unwrap_or_default(),
            email_w,
        ));
        row.push(record.phones_joined("\n"));
        table.add_row(row);
    }

    table.to_string()
}

/// Render one session notice.
pub fn notice(ctx: &UiContext, notice: &Notice, today: NaiveDate) -> String {
    match notice {
        Notice::Success(text) => badge(ctx, Badge::Ok, text),
        Notice::Warning(text) => badge(ctx, Badge::Warn, text),
        Notice::Error(text) => badge(ctx, Badge::Err, text),
        Notice::Info(text) => text.clone(),
        Notice::Contact(record) => contact_card(ctx, record, today),
        Notice::Divider => divider(ctx),
    }
}

/// Format an error message.
///
/// Pretty mode: "[ERR] message" badge
/// Plain mode: "error=message"
pub fn error_message(ctx: &UiContext, message: &str) -> String {
    if ctx.mode.is_pretty() {
        badge(ctx, Badge::Err, message)
    } else {
        format!("error={}", message)
    }
}

/// Print an error message to stderr.
pub fn print_error(ctx: &UiContext, message: &str) {
    eprintln!("{}", error_message(ctx, message));
}
