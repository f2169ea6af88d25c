use super::*;
use pretty_assertions::assert_eq;

#[test]
fn codes_render_as_their_names() {
    for code in ErrorCode::ALL {
        assert_eq!(code.to_string(), format!("{code:?}"));
        assert!(!code.description().is_empty());
    }
}

#[test]
fn phase_classification() {
    assert!(ErrorCode::E2001.is_desugar_error());
    assert!(ErrorCode::E2002.is_desugar_error());
    assert!(ErrorCode::E2003.is_desugar_error());
    assert!(!ErrorCode::E9002.is_desugar_error());
}

#[test]
fn integer_codes_describe_distinct_failures() {
    assert_eq!(ErrorCode::E2002.description(), "integer literal out of range");
    assert_eq!(ErrorCode::E2003.description(), "malformed integer literal");
}
