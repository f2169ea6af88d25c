use std::fmt;

use rtc_ir::Span;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// One reported problem.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    /// Where the problem is.
    pub span: Span,
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Error at `span`, with the code's description as its message.
    pub fn error(code: ErrorCode, span: Span) -> Self {
        Diagnostic::new(code, Severity::Error, span)
    }

    pub fn warning(code: ErrorCode, span: Span) -> Self {
        Diagnostic::new(code, Severity::Warning, span)
    }

    fn new(code: ErrorCode, severity: Severity, span: Span) -> Self {
        Diagnostic {
            code,
            severity,
            message: code.description().to_owned(),
            span,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] at {:?}: {}", self.severity, self.code, self.span, self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
