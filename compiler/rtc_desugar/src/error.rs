use rtc_ir::Span;
use thiserror::Error;

/// Constructs the desugarer cannot lower at all.
///
/// Unlike a "not supported" marker these abort the whole run: there is no
/// canonical node that could stand in for them without changing meaning.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DesugarError {
    /// A construct with no canonical counterpart (`for`, `BEGIN`, `END`).
    #[error("not implemented: `{construct}` at {span:?}")]
    Unimplemented { construct: &'static str, span: Span },

    /// A known construct applied to a target shape it cannot express,
    /// e.g. `&&=` on a constant.
    #[error("not implemented: `{construct}` with a `{target}` target at {span:?}")]
    UnsupportedTarget {
        construct: &'static str,
        target: &'static str,
        span: Span,
    },
}

impl DesugarError {
    pub fn span(&self) -> Span {
        match self {
            DesugarError::Unimplemented { span, .. } | DesugarError::UnsupportedTarget { span, .. } => {
                *span
            }
        }
    }
}
