use std::fmt;

/// Error codes for front-end diagnostics.
///
/// Format: E#### where the first digit is the phase:
/// - E2xxx: desugaring
/// - E9xxx: diagnostics about diagnostics
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ErrorCode {
    /// `def EXPR.name` where `EXPR` is not `self`
    E2001,
    /// Integer literal does not fit in 64 bits
    E2002,
    /// Integer literal text is not a valid number
    E2003,
    /// Error limit reached
    E9002,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 4] = [
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E9002,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// One-line summary, used when no specific message is given.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E2001 => "invalid singleton method definition",
            ErrorCode::E2002 => "integer literal out of range",
            ErrorCode::E2003 => "malformed integer literal",
            ErrorCode::E9002 => "too many errors",
        }
    }

    pub fn is_desugar_error(self) -> bool {
        matches!(self, ErrorCode::E2001 | ErrorCode::E2002 | ErrorCode::E2003)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
