//! The add wizard: name, birthday, e-mail, phones, then commit.

use super::{tokens, Mode, SessionInput, State, Turn};
use crate::fields::{validate_email, validate_name, validate_phone, Birthday};
use crate::record::Record;

pub(super) fn step(
    turn: &mut Turn<'_>,
    mode: Mode,
    draft: Option<Record>,
    input: SessionInput,
) -> State {
    let text = match input {
        SessionInput::Cancel => return abandon(turn),
        SessionInput::Finish => {
            return match draft {
                Some(record) => commit(turn, record),
                None => abandon(turn),
            }
        }
        SessionInput::Text(text) => text,
    };

    if text == tokens::BACK {
        return match mode {
            Mode::AddPhone => State::new(Mode::AddEmail, draft),
            Mode::AddEmail => State::new(Mode::AddBirthday, draft),
            Mode::AddBirthday => State::new(Mode::AddName, draft),
            _ => abandon(turn),
        };
    }

    if mode == Mode::AddName {
        return enter_name(turn, draft, &text);
    }

    let Some(mut record) = draft else {
        return State::new(Mode::AddName, None);
    };

    if text.is_empty() {
        return match mode {
            Mode::AddBirthday => State::new(Mode::AddEmail, Some(record)),
            Mode::AddEmail => State::new(Mode::AddPhone, Some(record)),
            _ => commit(turn, record),
        };
    }

    match mode {
        Mode::AddBirthday => match Birthday::parse(&text, turn.session.today) {
            Ok(birthday) => {
                record.birthday = Some(birthday);
                turn.show(&record);
                State::new(Mode::AddEmail, Some(record))
            }
            Err(err) => {
                turn.error(err);
                State::new(mode, Some(record))
            }
        },
        Mode::AddEmail => match validate_email(&text) {
            Ok(email) => {
                record.email = Some(email);
                turn.show(&record);
                State::new(Mode::AddPhone, Some(record))
            }
            Err(err) => {
                turn.error(err);
                State::new(mode, Some(record))
            }
        },
        _ => {
            // Tokens accepted before an invalid one stay on the draft.
            for token in text.split_whitespace() {
                match validate_phone(token) {
                    Ok(phone) => {
                        record.add_phone(phone);
                    }
                    Err(err) => {
                        turn.error(err);
                        return State::new(Mode::AddPhone, Some(record));
                    }
                }
            }
            commit(turn, record)
        }
    }
}

fn enter_name(turn: &mut Turn<'_>, draft: Option<Record>, text: &str) -> State {
    let name = match validate_name(text) {
        Ok(name) => name,
        Err(_) => {
            turn.warning("Name cannot be skipped");
            return State::new(Mode::AddName, draft);
        }
    };
    if let Err(err) = turn.book.check_available(&name) {
        turn.error(err);
        return State::new(Mode::AddName, draft);
    }

    let record = match draft {
        Some(mut record) => {
            record.name = name;
            turn.show(&record);
            record
        }
        None => Record::new(name),
    };
    State::new(Mode::AddBirthday, Some(record))
}

fn commit(turn: &mut Turn<'_>, record: Record) -> State {
    turn.success(format!(
        "Contact '{}' successfully added.",
        record.name.as_str()
    ));
    turn.show(&record);
    turn.book.add(record);
    State::main()
}

// Leaving the wizard on an empty book leaves nothing to go back to.
fn abandon(turn: &mut Turn<'_>) -> State {
    if turn.book.is_empty() {
        turn.exit()
    } else {
        State::main()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::super::{Notice, Session};
    use super::*;
    use crate::book::AddressBook;
    use crate::storage::MemoryStore;

    fn session() -> Session {
        Session::new(5, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn run(book: &mut AddressBook, state: State, lines: &[&str]) -> State {
        let session = session();
        lines.iter().fold(state, |state, line| {
            session
                .step(book, state, SessionInput::from_line(line))
                .state
        })
    }

    fn empty_book() -> AddressBook {
        AddressBook::load(MemoryStore::new()).unwrap()
    }

    fn book_with_bob() -> AddressBook {
        let mut book = empty_book();
        book.add(Record::new(validate_name("Bob").unwrap()));
        book
    }

    #[test]
    fn test_full_wizard_commits() {
        let mut book = empty_book();
        let start = State::initial(&book);
        let state = run(
            &mut book,
            start,
            &["Ann", "1990-05-21", "ann@example.com", "380501234567 380507654321"],
        );

        assert_eq!(state.mode, Mode::Main);
        let ann = book.get("Ann").unwrap();
        assert_eq!(ann.birthday.unwrap().std_str(), "1990-05-21");
        assert_eq!(ann.email.as_ref().unwrap().as_str(), "ann@example.com");
        assert_eq!(ann.phones().len(), 2);
    }

    #[test]
    fn test_empty_name_reprompts() {
        let mut book = empty_book();
        let start = State::initial(&book);
        let step = session().step(&mut book, start, SessionInput::text(""));
        assert_eq!(step.state.mode, Mode::AddName);
        assert_eq!(
            step.notices,
            vec![Notice::Warning("Name cannot be skipped".to_string())]
        );
    }

    #[test]
    fn test_existing_name_rejected() {
        let mut book = book_with_bob();
        let state = run(&mut book, State::new(Mode::AddName, None), &["Bob"]);
        assert_eq!(state.mode, Mode::AddName);
        assert!(state.draft.is_none());
    }

    #[test]
    fn test_skipping_fields_commits_name_only() {
        let mut book = empty_book();
        let start = State::initial(&book);
        let state = run(&mut book, start, &["Ann", "", "", ""]);
        assert_eq!(state.mode, Mode::Main);
        let ann = book.get("Ann").unwrap();
        assert!(ann.birthday.is_none());
        assert!(ann.email.is_none());
        assert!(ann.phones().is_empty());
    }

    #[test]
    fn test_invalid_birthday_stays() {
        let mut book = empty_book();
        let start = State::initial(&book);
        let state = run(&mut book, start, &["Ann", "31-31"]);
        assert_eq!(state.mode, Mode::AddBirthday);
        assert_eq!(state.draft.unwrap().name.as_str(), "Ann");
    }

    #[test]
    fn test_back_keeps_values_and_allows_rename() {
        let mut book = empty_book();
        let start = State::initial(&book);
        let state = run(
            &mut book,
            start,
            &["Ann", "05-21", "-", "-", "Anna"],
        );
        assert_eq!(state.mode, Mode::AddBirthday);
        let draft = state.draft.unwrap();
        assert_eq!(draft.name.as_str(), "Anna");
        assert_eq!(draft.birthday.unwrap().std_str(), "05-21");
        assert!(book.is_empty());
    }

    #[test]
    fn test_invalid_phone_keeps_earlier_tokens() {
        let mut book = empty_book();
        let start = State::initial(&book);
        let state = run(
            &mut book,
            start,
            &["Ann", "", "", "380501234567 12345 380507654321"],
        );
        assert_eq!(state.mode, Mode::AddPhone);
        let draft = state.draft.clone().unwrap();
        assert_eq!(draft.phones_joined(","), "380501234567");
        assert!(book.is_empty());

        let state = run(&mut book, state, &["380507654321"]);
        assert_eq!(state.mode, Mode::Main);
        assert_eq!(book.get("Ann").unwrap().phones().len(), 2);
    }

    #[test]
    fn test_finish_commits_early() {
        let mut book = empty_book();
        let start = State::initial(&book);
        let state = run(&mut book, start, &["Ann", "}~"]);
        assert_eq!(state.mode, Mode::Main);
        assert!(book.contains("Ann"));
    }

    #[test]
    fn test_cancel_on_empty_book_ends_session() {
        let mut book = empty_book();
        let start = State::initial(&book);
        let state = run(&mut book, start, &["Ann", "{~"]);
        assert!(state.is_exit());
        assert!(book.is_empty());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut book = book_with_bob();
        let state = run(&mut book, State::new(Mode::AddName, None), &["Ann", "05-21", "{~"]);
        assert_eq!(state, State::main());
        assert!(!book.contains("Ann"));
    }
}
