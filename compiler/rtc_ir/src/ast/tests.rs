use super::*;
use pretty_assertions::assert_eq;

fn span() -> Span {
    Span::new(3, 9)
}

#[test]
fn references_copy_with_new_span() {
    let local = Expr::unresolved(span(), VarKind::Local, NameId::from_raw(40));
    let copy = local.copy_reference(Span::new(0, 1));
    assert_eq!(
        copy,
        Some(Expr::unresolved(Span::new(0, 1), VarKind::Local, NameId::from_raw(40)))
    );

    let bound = Expr::ident(span(), SymbolId::ROOT);
    assert!(bound.is_reference());
    assert_eq!(bound.copy_reference(span()), Some(bound.clone()));
}

#[test]
fn non_references_do_not_copy() {
    let call = Expr::send0(span(), Expr::new(span(), ExprKind::SelfRef), NameId::CALL);
    assert!(!call.is_reference());
    assert_eq!(call.copy_reference(span()), None);
    assert_eq!(Expr::int(span(), 1).copy_reference(span()), None);
}

#[test]
fn definitions_are_not_values() {
    let def = Expr::new(
        span(),
        ExprKind::MethodDef(Box::new(MethodDef {
            symbol: SymbolId::TODO,
            name: NameId::INITIALIZE,
            args: Vec::new(),
            rhs: Expr::empty(span()),
            is_self: false,
        })),
    );
    assert!(!def.is_value());
    assert!(Expr::empty(span()).is_value());
    assert_eq!(def.kind.name(), "MethodDef");
}

#[test]
fn send_helpers() {
    let mut call = Expr::send1(
        span(),
        Expr::ident(span(), SymbolId::NIL),
        NameId::SQUARE_BRACKETS,
        Expr::int(span(), 0),
    );
    let send = call.as_send_mut().map(|send| {
        send.flags |= SendFlags::PRIVATE_OK;
        send.args.len()
    });
    assert_eq!(send, Some(1));
    assert_eq!(call.as_send().map(|s| s.flags), Some(SendFlags::PRIVATE_OK));
}
