//! Parse tree to canonical AST lowering.
//!
//! One method per family of constructs:
//! - `expr`: dispatch, literals, variables, calls
//! - `control`: short-circuit operators, conditional assignment, loops, jumps
//! - `collections`: interpolation, arrays, hashes, multiple assignment
//! - `defs`: classes, modules, methods, formal arguments, blocks

mod collections;
mod control;
mod defs;
mod expr;

use rtc_diagnostic::DiagnosticQueue;
use rtc_ir::ast::{Expr, ExprKind};
use rtc_ir::parse_tree::Node;
use rtc_ir::{Context, NameId, Span, SymbolId, UniqueNameKind};
use rtc_stack::ensure_sufficient_stack;

use crate::DesugarError;

type LowerResult = Result<Expr, DesugarError>;

/// State for lowering one tree.
pub(crate) struct Lowerer<'ctx, 'diag> {
    ctx: Context<'ctx>,
    diagnostics: &'diag mut DiagnosticQueue,
}

impl<'ctx, 'diag> Lowerer<'ctx, 'diag> {
    pub(crate) fn new(ctx: Context<'ctx>, diagnostics: &'diag mut DiagnosticQueue) -> Self {
        Lowerer { ctx, diagnostics }
    }

    #[cfg(debug_assertions)]
    pub(crate) fn ctx(&mut self) -> &mut Context<'ctx> {
        &mut self.ctx
    }

    /// Lower one node. Never yields an absent result: missing pieces become
    /// `EmptyTree`, unknown constructs become `NotSupported`.
    pub(crate) fn lower(&mut self, node: &Node) -> LowerResult {
        ensure_sufficient_stack(|| self.lower_node(node))
    }

    /// Lower an optional child; absent children become `EmptyTree` at `span`.
    fn lower_opt(&mut self, node: Option<&Node>, span: Span) -> LowerResult {
        match node {
            Some(node) => self.lower(node),
            None => Ok(Expr::empty(span)),
        }
    }

    fn lower_all(&mut self, nodes: &[Node]) -> Result<Vec<Expr>, DesugarError> {
        nodes.iter().map(|node| self.lower(node)).collect()
    }

    /// Hidden variable declared under the current owner.
    fn new_temporary(&mut self, base: NameId) -> SymbolId {
        self.ctx.new_temporary(UniqueNameKind::Desugar, base)
    }

    fn not_supported(node: &Node) -> Expr {
        tracing::warn!(
            construct = node.name(),
            span = ?node.span,
            "construct not supported, lowering to marker"
        );
        Expr::new(node.span, ExprKind::NotSupported(node.name()))
    }
}
