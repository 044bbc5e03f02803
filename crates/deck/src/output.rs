//! Status reporting on stderr.
//!
//! stdout carries converted decks, so every message goes to stderr. Messages
//! about one input are prefixed with its name.

use console::{Style, Term};

/// How a status line is colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tone {
    Plain,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Error => Style::new().red(),
        }
    }
}

pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    pub(crate) fn success(&self, msg: &str) {
        self.emit(Tone::Success, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.emit(Tone::Error, msg);
    }

    /// Report something about one input, `source: msg`.
    pub(crate) fn about(&self, tone: Tone, source: &str, msg: &str) {
        self.emit(tone, &attributed(source, msg));
    }

    fn emit(&self, tone: Tone, msg: &str) {
        let _ = self.term.write_line(&tone.style().apply_to(msg).to_string());
    }
}

fn attributed(source: &str, msg: &str) -> String {
    format!("{source}: {msg}")
}
