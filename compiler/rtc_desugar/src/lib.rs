//! Desugaring: raw parse tree to canonical AST.
//!
//! [`desugar`] lowers one parse tree in a single recursive pass. Surface
//! sugar is rewritten into a small node set (see [`rtc_ir::ast`]):
//!
//! - `a && b` / `a || b` become conditionals, with a hidden temporary when
//!   `a` is not a plain reference so it is evaluated once
//! - `x.y &&= v` / `x.y ||= v` capture `x` once and call the getter and
//!   setter on the captured value
//! - `a, b = rhs` evaluates `rhs` once and indexes into it per target
//! - `"a#{b}"` becomes `to_s` and `concat` sends
//! - `{a: 1, **h}` becomes a `merge` chain
//! - `return`/`break`/`next`/`yield` with several values pack them in an array
//!
//! Constructs with no lowering become [`ExprKind::NotSupported`] markers and
//! the pass continues. A few constructs (`for`, `BEGIN`, `END`) abort with a
//! [`DesugarError`]. User mistakes that still allow lowering, such as
//! `def obj.name`, are reported to the [`DiagnosticQueue`].
//!
//! [`ExprKind::NotSupported`]: rtc_ir::ast::ExprKind::NotSupported

mod error;
mod lower;
#[cfg(debug_assertions)]
mod verify;

use std::sync::Once;

use rtc_diagnostic::DiagnosticQueue;
use rtc_ir::ast::Expr;
use rtc_ir::parse_tree::Node;
use rtc_ir::Context;

pub use error::DesugarError;

use lower::Lowerer;

/// Lower `node` into the canonical AST.
///
/// Temporaries are declared under `ctx.owner()`. In debug builds the
/// finished tree is checked for internal consistency before it is returned.
pub fn desugar(
    ctx: Context<'_>,
    node: &Node,
    diagnostics: &mut DiagnosticQueue,
) -> Result<Expr, DesugarError> {
    tracing::debug!(owner = ?ctx.owner(), span = ?node.span, root = node.name(), "desugar");
    let mut lowerer = Lowerer::new(ctx, diagnostics);
    let tree = lowerer.lower(node)?;

    #[cfg(debug_assertions)]
    let tree = verify::verify(lowerer.ctx(), tree);

    Ok(tree)
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
/// Enable with e.g. `RUST_LOG=rtc_desugar=debug,rtc_ir=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
