//! Line-oriented dialog presenter for terminals.
//!
//! Used by the standalone `writerai-host` binary in place of a native toolkit
//! window.  Each field is prompted for in schema order; pressing Enter keeps
//! the current value.  A final `Confirm? [Y/n]` prompt chooses between confirm
//! and cancel.  End of input at any prompt closes the dialog, which the
//! session treats as a cancel.

use std::io::{self, BufRead, BufReader, Write};
use std::sync::Mutex;

use writerai_core::{DialogSession, FieldKind, FieldValue};

use crate::application::collaborators::{DialogPresenter, PresenterError};

/// Line that ends a multi-line text entry.
const MULTILINE_TERMINATOR: &str = ".";

/// Presenter reading answers from `input` and writing prompts to `output`.
pub struct ConsolePresenter {
    input: Mutex<Box<dyn BufRead + Send>>,
    output: Mutex<Box<dyn Write + Send>>,
}

impl ConsolePresenter {
    pub fn new(input: impl BufRead + Send + 'static, output: impl Write + Send + 'static) -> Self {
        Self {
            input: Mutex::new(Box::new(input)),
            output: Mutex::new(Box::new(output)),
        }
    }

    /// Presenter bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl DialogPresenter for ConsolePresenter {
    fn present(&self, session: &mut DialogSession) -> Result<(), PresenterError> {
        let mut input = self
            .input
            .lock()
            .map_err(|_| PresenterError::Unavailable("console input lock poisoned".into()))?;
        let mut out = self
            .output
            .lock()
            .map_err(|_| PresenterError::Unavailable("console output lock poisoned".into()))?;

        writeln!(out, "== {} ==", session.schema().title())?;
        let fields = session.schema().fields().to_vec();
        for field in &fields {
            let current = session.value(&field.id).cloned().unwrap_or_else(|| field.initial.clone());
            match &field.kind {
                FieldKind::SingleLineText { masked, .. } => {
                    let text = current.as_text().unwrap_or_default();
                    let shown = if *masked { mask(text) } else { text.to_string() };
                    write!(out, "{} [{}] ", field.label, shown)?;
                    out.flush()?;
                    match read_line(&mut **input)? {
                        None => return Ok(()),
                        Some(line) if line.is_empty() => {}
                        Some(line) => session.set_text(&field.id, &line)?,
                    }
                }
                FieldKind::MultiLineText => {
                    writeln!(
                        out,
                        "{} (end with a line containing only '{MULTILINE_TERMINATOR}', empty keeps current)",
                        field.label
                    )?;
                    out.flush()?;
                    let mut lines = Vec::new();
                    loop {
                        match read_line(&mut **input)? {
                            None => return Ok(()),
                            Some(line) if line == MULTILINE_TERMINATOR => break,
                            Some(line) => lines.push(line),
                        }
                    }
                    if !lines.is_empty() {
                        session.set_text(&field.id, &lines.join("\n"))?;
                    }
                }
                FieldKind::SingleSelect { options } => {
                    writeln!(out, "{}", field.label)?;
                    for (i, option) in options.iter().enumerate() {
                        let marker = if current == FieldValue::Selection(Some(i)) { '*' } else { ' ' };
                        writeln!(out, " {marker} {}) {option}", i + 1)?;
                    }
                    write!(out, "Choice [1-{}] ", options.len())?;
                    out.flush()?;
                    match read_line(&mut **input)? {
                        None => return Ok(()),
                        Some(line) if line.is_empty() => {}
                        Some(line) => match parse_choice(&line, options.len()) {
                            Some(index) => session.select(&field.id, Some(index))?,
                            None => writeln!(out, "invalid choice {line:?}; keeping current")?,
                        },
                    }
                }
            }
        }

        write!(out, "Confirm? [Y/n] ")?;
        out.flush()?;
        match read_line(&mut **input)? {
            None => Ok(()),
            Some(answer) if is_yes(&answer) => Ok(session.confirm()?),
            Some(_) => Ok(session.cancel()?),
        }
    }

    fn notify(&self, title: &str, message: &str) {
        if let Ok(mut out) = self.output.lock() {
            let _ = writeln!(out, "[{title}] {message}");
            let _ = out.flush();
        }
    }
}

/// Reads one line without its terminator; `None` at end of input.
fn read_line(input: &mut (dyn BufRead + Send)) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Parses a 1-based option number.
fn parse_choice(raw: &str, options: usize) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=options).contains(n))
        .map(|n| n - 1)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

fn mask(text: &str) -> String {
    "*".repeat(text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use writerai_core::{DialogSchema, SessionState};

    /// Cloneable in-memory writer so tests can read what was printed.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn presenter(input: &str) -> (ConsolePresenter, SharedBuffer) {
        let out = SharedBuffer::default();
        let p = ConsolePresenter::new(Cursor::new(input.as_bytes().to_vec()), out.clone());
        (p, out)
    }

    fn settings_session() -> DialogSession {
        let schema = DialogSchema::builder("Settings")
            .select_field(
                "model",
                "Model:",
                vec!["Alpha".into(), "Beta".into(), "Gamma".into()],
                Some(0),
            )
            .masked_field("api_key", "API key:", "secret")
            .build()
            .unwrap();
        let mut session = DialogSession::new(schema);
        session.activate().unwrap();
        session
    }

    #[test]
    fn test_answers_are_applied_and_confirmed() {
        // Arrange
        let (p, out) = presenter("3\nsk-new\ny\n");
        let mut session = settings_session();

        // Act
        p.present(&mut session).unwrap();

        // Assert
        let result = session.result().expect("confirmed");
        assert_eq!(result.selection("model"), Some(2));
        assert_eq!(result.text("api_key"), Some("sk-new"));
        let printed = out.contents();
        assert!(printed.contains("== Settings =="));
        assert!(printed.contains(" * 1) Alpha"));
        assert!(printed.contains("[******]"), "masked value must not be echoed");
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_empty_answers_keep_current_values() {
        let (p, _) = presenter("\n\n\n");
        let mut session = settings_session();
        p.present(&mut session).unwrap();
        let result = session.result().expect("confirmed");
        assert_eq!(result.selection("model"), Some(0));
        assert_eq!(result.text("api_key"), Some("secret"));
    }

    #[test]
    fn test_negative_answer_cancels() {
        let (p, _) = presenter("2\nsk\nn\n");
        let mut session = settings_session();
        p.present(&mut session).unwrap();
        assert_eq!(session.state(), SessionState::Cancelled);
    }

    #[test]
    fn test_end_of_input_leaves_session_open() {
        let (p, _) = presenter("2\n");
        let mut session = settings_session();
        p.present(&mut session).unwrap();
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_invalid_choice_keeps_selection() {
        let (p, out) = presenter("9\n\ny\n");
        let mut session = settings_session();
        p.present(&mut session).unwrap();
        assert_eq!(session.result().unwrap().selection("model"), Some(0));
        assert!(out.contents().contains("invalid choice"));
    }

    #[test]
    fn test_multiline_field_collects_until_terminator() {
        let schema = DialogSchema::builder("Notes")
            .multiline_field("notes", "Notes:", "")
            .build()
            .unwrap();
        let mut session = DialogSession::new(schema);
        session.activate().unwrap();
        let (p, _) = presenter("line one\nline two\n.\ny\n");

        p.present(&mut session).unwrap();

        assert_eq!(
            session.result().unwrap().text("notes"),
            Some("line one\nline two")
        );
    }

    #[test]
    fn test_notify_prints_title_and_message() {
        let (p, out) = presenter("");
        p.notify("WriterAI", "could not save");
        assert_eq!(out.contents(), "[WriterAI] could not save\n");
    }

    #[test]
    fn test_parse_choice_is_one_based_and_bounded() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice(" 3 ", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("two", 3), None);
    }
}
