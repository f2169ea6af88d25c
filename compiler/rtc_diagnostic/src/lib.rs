//! Recoverable diagnostics for the rtc front end.
//!
//! Passes report user-facing problems into a [`DiagnosticQueue`] and keep
//! going; rendering is left to the driver. Each [`Diagnostic`] carries an
//! [`ErrorCode`], a [`Severity`], a message and the primary [`Span`].
//!
//! [`Span`]: rtc_ir::Span

mod diagnostic;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
