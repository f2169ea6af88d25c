use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builder_defaults_to_code_description() {
    let diag = Diagnostic::error(ErrorCode::E2002, Span::new(4, 10));
    assert_eq!(diag.message, "integer literal out of range");
    assert!(diag.is_error());
    assert!(diag.notes.is_empty());
}

#[test]
fn display_includes_code_and_notes() {
    let diag = Diagnostic::warning(ErrorCode::E2001, Span::new(0, 3))
        .with_message("odd def")
        .with_note("use `def self.name`");
    assert!(!diag.is_error());
    let shown = diag.to_string();
    assert!(shown.starts_with("warning[E2001]"), "got {shown}");
    assert!(shown.ends_with("odd def\n  note: use `def self.name`"), "got {shown}");
}
