//! Debug-build validation of the lowered tree.
//!
//! Walks the canonical AST once after lowering and panics if the lowering
//! produced a shape no later phase expects:
//! - hash key and value lists have the same length
//! - `PRIVATE_OK` sends have an implicit `self` receiver
//! - bound identifiers name a symbol that exists in the table
//! - class and method definitions still carry the `TODO` placeholder
//!
//! The tree is returned unchanged.

use rtc_ir::ast::{Expr, ExprKind, SendFlags};
use rtc_ir::{map_tree, Context, SymbolId, TreeMap};

/// Check `tree` against the canonical invariants.
///
/// # Panics
/// Panics with an `internal error:` message on the first violation.
pub(crate) fn verify(ctx: &mut Context<'_>, tree: Expr) -> Expr {
    map_tree(&mut Verifier, ctx, tree)
}

struct Verifier;

impl TreeMap for Verifier {
    fn post_hash(&mut self, _ctx: &mut Context<'_>, expr: Expr) -> Expr {
        if let ExprKind::Hash { keys, values } = &expr.kind {
            assert!(
                keys.len() == values.len(),
                "internal error: hash at {:?} has {} keys but {} values",
                expr.span,
                keys.len(),
                values.len(),
            );
        }
        expr
    }

    fn post_send(&mut self, _ctx: &mut Context<'_>, expr: Expr) -> Expr {
        if let Some(send) = expr.as_send() {
            assert!(
                !send.flags.contains(SendFlags::PRIVATE_OK)
                    || matches!(send.recv.kind, ExprKind::SelfRef),
                "internal error: private send at {:?} has a `{}` receiver",
                expr.span,
                send.recv.kind.name(),
            );
        }
        expr
    }

    fn post_ident(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        if let ExprKind::Ident(symbol) = expr.kind {
            let len = ctx.state().symbols.len();
            assert!(
                symbol.index() < len,
                "internal error: identifier at {:?} refers to {symbol:?}, table has {len} symbols",
                expr.span,
            );
        }
        expr
    }

    fn post_class_def(&mut self, _ctx: &mut Context<'_>, expr: Expr) -> Expr {
        if let ExprKind::ClassDef(class) = &expr.kind {
            check_placeholder("class", expr.span, class.symbol);
        }
        expr
    }

    fn post_method_def(&mut self, _ctx: &mut Context<'_>, expr: Expr) -> Expr {
        if let ExprKind::MethodDef(method) = &expr.kind {
            check_placeholder("method", expr.span, method.symbol);
        }
        expr
    }
}

fn check_placeholder(what: &str, span: rtc_ir::Span, symbol: SymbolId) {
    assert!(
        symbol == SymbolId::TODO,
        "internal error: {what} definition at {span:?} already bound to {symbol:?}",
    );
}
