//! Main menu and paged browsing.

use super::{tokens, Mode, SessionInput, State, Turn};

pub(super) fn main_menu(turn: &mut Turn<'_>, input: SessionInput) -> State {
    let text = match input {
        SessionInput::Cancel | SessionInput::Finish => return turn.exit(),
        SessionInput::Text(text) => text,
    };

    match text.as_str() {
        tokens::ADD => State::new(Mode::AddName, None),
        tokens::EXIT => turn.exit(),
        name if turn.book.contains(name) => {
            turn.info(format!("Contact '{}' selected", name));
            State::new(Mode::edit_menu(name), None)
        }
        tokens::BROWSE => start_browse(turn, String::new()),
        query if query.chars().count() > 1 => start_browse(turn, query.to_string()),
        _ => {
            turn.warning("Unrecognized command");
            State::main()
        }
    }
}

fn start_browse(turn: &mut Turn<'_>, query: String) -> State {
    if query.is_empty() {
        turn.info("Show all contacts");
    } else {
        turn.info(format!("Search pattern = '{}'", query));
    }
    if turn.book.select(turn.session.page_size, Some(&query)).is_empty() {
        turn.warning("No contacts found");
        return State::main();
    }
    State::new(Mode::Browse { query, page: 0 }, None)
}

/// One page is on screen; a row number selects, anything else pages on.
pub(super) fn browse(
    turn: &mut Turn<'_>,
    query: String,
    page: usize,
    input: SessionInput,
) -> State {
    if input == SessionInput::Cancel {
        return State::main();
    }

    let pages = turn.book.select(turn.session.page_size, Some(&query));
    let Some(names) = pages.get(page) else {
        return State::main();
    };

    if let SessionInput::Text(text) = &input {
        if let Some(name) = text.parse::<usize>().ok().and_then(|row| names.get(row)) {
            turn.info(format!("Contact '{}' selected", name));
            return State::new(Mode::edit_menu(name), None);
        }
    }

    if page + 1 < pages.len() {
        State::new(
            Mode::Browse {
                query,
                page: page + 1,
            },
            None,
        )
    } else {
        turn.notices.push(super::Notice::Divider);
        State::main()
    }
}
