//! Classes, modules, methods, formal arguments and literal blocks.

use rtc_diagnostic::ErrorCode;
use rtc_ir::ast::{Block, ClassDef, ClassDefKind, Expr, ExprKind, MethodDef, VarKind};
use rtc_ir::parse_tree::{Node, NodeKind};
use rtc_ir::{NameId, Span, SymbolId};

use super::{LowerResult, Lowerer};
use crate::DesugarError;

fn local(span: Span, name: NameId) -> Expr {
    Expr::unresolved(span, VarKind::Local, name)
}

fn wrap(span: Span, inner: Expr, kind: fn(Box<Expr>) -> ExprKind) -> Expr {
    Expr::new(span, kind(Box::new(inner)))
}

impl Lowerer<'_, '_> {
    pub(super) fn lower_module(
        &mut self,
        span: Span,
        name: &Node,
        body: Option<&Node>,
    ) -> LowerResult {
        self.lower_class_like(span, ClassDefKind::Module, name, None, body)
    }

    pub(super) fn lower_class(
        &mut self,
        span: Span,
        name: &Node,
        superclass: Option<&Node>,
        body: Option<&Node>,
    ) -> LowerResult {
        self.lower_class_like(span, ClassDefKind::Class, name, superclass, body)
    }

    /// Class and module bodies are flattened: a `begin` body contributes its
    /// statements directly. The symbol stays a placeholder for the namer.
    fn lower_class_like(
        &mut self,
        span: Span,
        kind: ClassDefKind,
        name: &Node,
        superclass: Option<&Node>,
        body: Option<&Node>,
    ) -> LowerResult {
        let name = self.lower(name)?;
        let ancestors = match superclass {
            Some(superclass) => vec![self.lower(superclass)?],
            None => Vec::new(),
        };
        let rhs = match body {
            Some(Node {
                kind: NodeKind::Begin(stmts),
                ..
            }) => self.lower_all(stmts)?,
            other => vec![self.lower_opt(other, span)?],
        };
        Ok(Expr::new(
            span,
            ExprKind::ClassDef(Box::new(ClassDef {
                symbol: SymbolId::TODO,
                name,
                ancestors,
                rhs,
                kind,
            })),
        ))
    }

    /// One formal argument. The name becomes a local reference, wrapped to
    /// keep its calling-convention role.
    pub(super) fn lower_formal_arg(&mut self, node: &Node) -> LowerResult {
        let span = node.span;
        Ok(match &node.kind {
            NodeKind::Arg(name) => local(span, *name),
            NodeKind::Restarg(name) => wrap(span, local(span, *name), ExprKind::RestArg),
            NodeKind::Kwarg(name) => wrap(span, local(span, *name), ExprKind::KeywordArg),
            NodeKind::Kwrestarg(name) => {
                let keyword = wrap(span, local(span, *name), ExprKind::KeywordArg);
                wrap(span, keyword, ExprKind::RestArg)
            }
            NodeKind::Blockarg(name) => wrap(span, local(span, *name), ExprKind::BlockArg),
            NodeKind::Shadowarg(name) => wrap(span, local(span, *name), ExprKind::ShadowArg),
            NodeKind::Optarg { name, default } => {
                let default = self.lower(default)?;
                Expr::new(
                    span,
                    ExprKind::OptionalArg {
                        expr: Box::new(local(span, *name)),
                        default: Box::new(default),
                    },
                )
            }
            NodeKind::Kwoptarg { name, default } => {
                let default = self.lower(default)?;
                let keyword = wrap(span, local(span, *name), ExprKind::KeywordArg);
                Expr::new(
                    span,
                    ExprKind::OptionalArg {
                        expr: Box::new(keyword),
                        default: Box::new(default),
                    },
                )
            }
            _ => Self::not_supported(node),
        })
    }

    /// Lower an `args` list. `None` means the construct takes no arguments.
    fn lower_formal_args(
        &mut self,
        construct: &'static str,
        args: Option<&Node>,
    ) -> Result<Vec<Expr>, DesugarError> {
        match args {
            None => Ok(Vec::new()),
            Some(Node {
                kind: NodeKind::Args(list),
                ..
            }) => self.lower_all(list),
            Some(other) => Err(DesugarError::UnsupportedTarget {
                construct,
                target: other.name(),
                span: other.span,
            }),
        }
    }

    pub(super) fn lower_def(
        &mut self,
        span: Span,
        name: NameId,
        args: Option<&Node>,
        body: Option<&Node>,
        is_self: bool,
    ) -> LowerResult {
        let construct = if is_self { "DefS" } else { "DefMethod" };
        let args = self.lower_formal_args(construct, args)?;
        let rhs = self.lower_opt(body, span)?;
        Ok(Expr::new(
            span,
            ExprKind::MethodDef(Box::new(MethodDef {
                symbol: SymbolId::TODO,
                name,
                args,
                rhs,
                is_self,
            })),
        ))
    }

    /// `def self.name`. Any other singleton is reported and dropped.
    pub(super) fn lower_defs(
        &mut self,
        span: Span,
        singleton: &Node,
        name: NameId,
        args: Option<&Node>,
        body: Option<&Node>,
    ) -> LowerResult {
        if !matches!(singleton.kind, NodeKind::SelfNode) {
            self.diagnostics.error(
                span,
                ErrorCode::E2001,
                "`def EXPRESSION.method` is only supported for `def self.method`",
            );
            return Ok(Expr::empty(span));
        }
        self.lower_def(span, name, args, body, true)
    }

    /// `recv.m(args) { |params| body }`: the block attaches to the send.
    /// A block on anything else (`super`, `->`) lowers to a `Block` marker.
    pub(super) fn lower_block(
        &mut self,
        node: &Node,
        send: &Node,
        args: Option<&Node>,
        body: Option<&Node>,
    ) -> LowerResult {
        let mut call = self.lower(send)?;
        let Some(target) = call.as_send_mut() else {
            return Ok(Self::not_supported(node));
        };
        target.block = Some(Block {
            span: node.span,
            args: self.lower_formal_args("Block", args)?,
            body: self.lower_opt(body, node.span)?,
        });
        Ok(call)
    }
}
