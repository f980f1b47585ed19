//! The interactive session as an explicit state machine.
//!
//! The driver feeds one [`SessionInput`] per turn to [`Session::step`], which
//! mutates the [`AddressBook`] and returns the next [`State`] together with
//! the [`Notice`]s to show. Prompt text and rendering belong to the caller.
//!
//! ```text
//! MAIN ──1──▶ ADD_NAME ─▶ ADD_BIRTHDAY ─▶ ADD_EMAIL ─▶ ADD_PHONE ─▶ commit ─▶ MAIN
//!   │  ◀──────────────── "-" steps back one field ───────────────┘
//!   ├─name──────────────▶ EDIT_MENU ─1..7─▶ sub-mode ─▶ EDIT_MENU
//!   └─2 / query ─▶ BROWSE ─row─▶ EDIT_MENU
//! ```

mod edit;
mod menu;
mod wizard;

use chrono::NaiveDate;
use tracing::debug;

use crate::book::AddressBook;
use crate::record::Record;

/// Text tokens understood by the session.
pub mod tokens {
    /// Main menu: start the add wizard.
    pub const ADD: &str = "1";
    /// Main menu: browse all contacts.
    pub const BROWSE: &str = "2";
    /// Main menu: exit. Edit menu: back to the main menu.
    pub const EXIT: &str = "0";
    /// Add wizard: go back to the previous field.
    pub const BACK: &str = "-";
    /// Typed stand-in for an interrupt (Ctrl+C).
    pub const CANCEL: &str = "{~";
    /// Typed stand-in for end of input (Ctrl+Z / Ctrl+D).
    pub const FINISH: &str = "}~";
}

/// One line of user input, already classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Text(String),
    /// Abort the current flow.
    Cancel,
    /// Commit the current flow.
    Finish,
}

impl SessionInput {
    /// Classify a raw line. Surrounding whitespace is dropped.
    pub fn from_line(line: &str) -> Self {
        match line.trim() {
            tokens::CANCEL => Self::Cancel,
            tokens::FINISH => Self::Finish,
            text => Self::Text(text.to_string()),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Where the session is. Edit modes carry the name of the selected contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Main,
    AddName,
    AddBirthday,
    AddEmail,
    AddPhone,
    Browse { query: String, page: usize },
    EditMenu { name: String },
    EditAddPhone { name: String },
    EditDeletePhone { name: String },
    EditUpdateEmail { name: String },
    EditUpdateBirthday { name: String },
    EditDeleteContact { name: String },
    Exit,
}

impl Mode {
    /// Name of the contact an edit mode works on.
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::EditMenu { name }
            | Self::EditAddPhone { name }
            | Self::EditDeletePhone { name }
            | Self::EditUpdateEmail { name }
            | Self::EditUpdateBirthday { name }
            | Self::EditDeleteContact { name } => Some(name),
            _ => None,
        }
    }

    pub fn edit_menu(name: &str) -> Self {
        Self::EditMenu {
            name: name.to_string(),
        }
    }
}

/// Session state: the mode plus the record the add wizard is building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub mode: Mode,
    pub draft: Option<Record>,
}

impl State {
    pub fn new(mode: Mode, draft: Option<Record>) -> Self {
        Self { mode, draft }
    }

    /// Starting state for `book`.
    pub fn initial(book: &AddressBook) -> Self {
        Self::new(Mode::Main, None).settle(book)
    }

    pub fn main() -> Self {
        Self::new(Mode::Main, None)
    }

    pub fn is_exit(&self) -> bool {
        self.mode == Mode::Exit
    }

    // There is no main menu without contacts: it becomes the add wizard.
    fn settle(self, book: &AddressBook) -> Self {
        if self.mode == Mode::Main && book.is_empty() {
            Self::new(Mode::AddName, None)
        } else {
            self
        }
    }
}

/// Something the session wants shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
    Info(String),
    /// A contact card (header plus row).
    Contact(Record),
    /// End of a listing.
    Divider,
}

/// Outcome of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: State,
    pub notices: Vec<Notice>,
}

/// Session settings shared by every turn.
#[derive(Debug, Clone)]
pub struct Session {
    pub page_size: usize,
    pub today: NaiveDate,
}

impl Session {
    pub fn new(page_size: usize, today: NaiveDate) -> Self {
        Self {
            page_size: page_size.max(1),
            today,
        }
    }

    /// Advance the session by one input.
    pub fn step(&self, book: &mut AddressBook, state: State, input: SessionInput) -> Step {
        debug!(mode = ?state.mode, input = ?input, "session step");
        let mut turn = Turn {
            session: self,
            book,
            notices: Vec::new(),
        };
        let State { mode, draft } = state;
        let next = match mode {
            Mode::Exit => State::new(Mode::Exit, None),
            Mode::Main => menu::main_menu(&mut turn, input),
            Mode::Browse { query, page } => menu::browse(&mut turn, query, page, input),
            Mode::AddName | Mode::AddBirthday | Mode::AddEmail | Mode::AddPhone => {
                wizard::step(&mut turn, mode, draft, input)
            }
            Mode::EditMenu { name } => edit::menu(&mut turn, name, input),
            other => edit::sub_mode(&mut turn, other, input),
        };
        let state = next.settle(turn.book);
        Step {
            state,
            notices: turn.notices,
        }
    }
}

/// Working context for one turn.
struct Turn<'a> {
    session: &'a Session,
    book: &'a mut AddressBook,
    notices: Vec<Notice>,
}

impl Turn<'_> {
    fn success(&mut self, text: impl Into<String>) {
        self.notices.push(Notice::Success(text.into()));
    }

    fn warning(&mut self, text: impl Into<String>) {
        self.notices.push(Notice::Warning(text.into()));
    }

    fn error(&mut self, text: impl ToString) {
        self.notices.push(Notice::Error(text.to_string()));
    }

    fn info(&mut self, text: impl Into<String>) {
        self.notices.push(Notice::Info(text.into()));
    }

    fn show(&mut self, record: &Record) {
        self.notices.push(Notice::Contact(record.clone()));
    }

    /// Flush the book and end the session.
    fn exit(&mut self) -> State {
        match self.book.flush() {
            Ok(true) => {
                let location = self.book.location().display().to_string();
                self.info(format!("Contacts saved to {}", location));
            }
            Ok(false) => {}
            Err(err) => self.error(err),
        }
        self.info("Good bye!");
        State::new(Mode::Exit, None)
    }
}
