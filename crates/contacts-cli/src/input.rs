//! Line sources feeding the session one input per turn.

use std::io::{self, BufRead, Write};

use dialoguer::console::{Key, Term};

use contacts_core::SessionInput;

/// Supplies one classified input line per turn.
pub trait LineSource {
    /// Show `prompt` and read the next input.
    fn next_input(&mut self, prompt: &str) -> anyhow::Result<SessionInput>;
}

/// Whether the key-by-key terminal source can be used.
///
/// Keys are read from the tty and echoed to stdout, so both must be
/// terminals. Stderr carries logs only and does not matter.
pub fn interactive(stdin_is_tty: bool, stdout_is_tty: bool) -> bool {
    stdin_is_tty && stdout_is_tty
}

/// Effect of one key on the line being edited.
#[derive(Debug, PartialEq, Eq)]
enum Edit {
    Continue,
    Echo(char),
    Erase,
    Done(SessionInput),
}

/// Apply `key` to `line`.
///
/// Ctrl+C cancels and Ctrl+D on an empty line finishes, like the
/// `{~` and `}~` tokens.
fn apply_key(line: &mut String, key: Key) -> Edit {
    match key {
        Key::Enter => Edit::Done(SessionInput::from_line(&std::mem::take(line))),
        Key::CtrlC | Key::Char('\u{3}') => Edit::Done(SessionInput::Cancel),
        Key::Char('\u{4}') if line.is_empty() => Edit::Done(SessionInput::Finish),
        Key::Backspace => match line.pop() {
            Some(_) => Edit::Erase,
            None => Edit::Continue,
        },
        Key::Char(c) if !c.is_control() => {
            line.push(c);
            Edit::Echo(c)
        }
        _ => Edit::Continue,
    }
}

/// Session input for a failed key read, if the error has one.
fn classify_read_error(err: &io::Error) -> Option<SessionInput> {
    match err.kind() {
        io::ErrorKind::Interrupted => Some(SessionInput::Cancel),
        io::ErrorKind::UnexpectedEof => Some(SessionInput::Finish),
        _ => None,
    }
}

/// Interactive terminal input, read key by key in raw mode.
///
/// Ctrl+C becomes [`SessionInput::Cancel`] instead of a signal, so the
/// session still gets to write the book. Ctrl+D on an empty line or end
/// of input becomes [`SessionInput::Finish`].
pub struct TerminalSource {
    term: Term,
}

impl TerminalSource {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for TerminalSource {
    fn next_input(&mut self, prompt: &str) -> anyhow::Result<SessionInput> {
        if !self.term.is_term() {
            anyhow::bail!("stdout is not a terminal");
        }
        self.term.write_str(prompt)?;
        self.term.flush()?;

        let mut line = String::new();
        loop {
            let key = match self.term.read_key_raw() {
                Ok(key) => key,
                Err(err) => match classify_read_error(&err) {
                    Some(input) => {
                        self.term.write_line("")?;
                        return Ok(input);
                    }
                    None => return Err(err.into()),
                },
            };
            match apply_key(&mut line, key) {
                Edit::Continue => {}
                Edit::Echo(c) => self.term.write_str(c.encode_utf8(&mut [0; 4]))?,
                Edit::Erase => self.term.clear_chars(1)?,
                Edit::Done(input) => {
                    self.term.write_line("")?;
                    return Ok(input);
                }
            }
            self.term.flush()?;
        }
    }
}

/// Line-by-line input from any reader, used for piped stdin.
///
/// Prompts go to `out`; end of input becomes [`SessionInput::Finish`].
pub struct ReaderSource<R, W> {
    reader: R,
    out: W,
}

impl<R: BufRead, W: Write> ReaderSource<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self { reader, out }
    }
}

impl<R: BufRead, W: Write> LineSource for ReaderSource<R, W> {
    fn next_input(&mut self, prompt: &str) -> anyhow::Result<SessionInput> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(SessionInput::Finish);
        }
        // Echo keeps transcripts readable when stdin is not a terminal.
        writeln!(self.out, "{}", line.trim_end())?;
        Ok(SessionInput::from_line(&line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_source_classifies_lines() {
        let input = b"  Ann \n{~\n}~\n" as &[u8];
        let mut out = Vec::new();
        let mut source = ReaderSource::new(input, &mut out);

        assert_eq!(
            source.next_input("Name: ").unwrap(),
            SessionInput::text("Ann")
        );
        assert_eq!(source.next_input("> ").unwrap(), SessionInput::Cancel);
        assert_eq!(source.next_input("> ").unwrap(), SessionInput::Finish);
        assert_eq!(source.next_input("> ").unwrap(), SessionInput::Finish);

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.starts_with("Name:   Ann\n"));
    }

    fn type_keys(keys: Vec<Key>) -> (Vec<Edit>, String) {
        let mut line = String::new();
        let edits = keys.into_iter().map(|k| apply_key(&mut line, k)).collect();
        (edits, line)
    }

    #[test]
    fn test_ctrl_c_cancels_instead_of_exiting() {
        let (edits, _) = type_keys(vec![Key::Char('A'), Key::CtrlC]);
        assert_eq!(edits[1], Edit::Done(SessionInput::Cancel));

        let mut line = String::from("Ann");
        assert_eq!(
            apply_key(&mut line, Key::Char('\u{3}')),
            Edit::Done(SessionInput::Cancel)
        );
    }

    #[test]
    fn test_ctrl_d_finishes_on_empty_line_only() {
        let mut line = String::new();
        assert_eq!(
            apply_key(&mut line, Key::Char('\u{4}')),
            Edit::Done(SessionInput::Finish)
        );

        let mut line = String::from("Ann");
        assert_eq!(apply_key(&mut line, Key::Char('\u{4}')), Edit::Continue);
        assert_eq!(line, "Ann");
    }

    #[test]
    fn test_typed_line_with_backspace() {
        let (edits, line) = type_keys(vec![
            Key::Char('A'),
            Key::Char('x'),
            Key::Backspace,
            Key::Char('n'),
            Key::Char('n'),
            Key::ArrowLeft,
            Key::Enter,
        ]);
        assert_eq!(edits[0], Edit::Echo('A'));
        assert_eq!(edits[2], Edit::Erase);
        assert_eq!(edits[5], Edit::Continue);
        assert_eq!(edits[6], Edit::Done(SessionInput::text("Ann")));
        assert!(line.is_empty());
    }

    #[test]
    fn test_backspace_on_empty_line_is_ignored() {
        let mut line = String::new();
        assert_eq!(apply_key(&mut line, Key::Backspace), Edit::Continue);
    }

    #[test]
    fn test_typed_tokens_are_classified() {
        let (edits, _) = type_keys(vec![Key::Char('}'), Key::Char('~'), Key::Enter]);
        assert_eq!(edits[2], Edit::Done(SessionInput::Finish));
    }

    #[test]
    fn test_read_errors() {
        let interrupted = io::Error::new(io::ErrorKind::Interrupted, "read interrupted");
        let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "Reached end of file");
        let other = io::Error::new(io::ErrorKind::Other, "boom");
        assert_eq!(classify_read_error(&interrupted), Some(SessionInput::Cancel));
        assert_eq!(classify_read_error(&eof), Some(SessionInput::Finish));
        assert_eq!(classify_read_error(&other), None);
    }

    #[test]
    fn test_terminal_source_needs_both_ttys() {
        assert!(interactive(true, true));
        assert!(!interactive(true, false));
        assert!(!interactive(false, true));
    }

    #[test]
    fn test_reader_source_empty_line_is_empty_text() {
        let mut out = Vec::new();
        let mut source = ReaderSource::new(b"\n" as &[u8], &mut out);
        assert_eq!(source.next_input("").unwrap(), SessionInput::text(""));
    }
}
