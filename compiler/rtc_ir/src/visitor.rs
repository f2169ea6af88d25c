//! Tree rewriting over the canonical AST.
//!
//! Later phases implement [`TreeMap`] and override only the hooks they
//! care about; every hook defaults to a no-op. [`map_tree`] drives the walk:
//!
//! 1. the node's `pre_*` hook runs on `&mut Expr` and may edit it in place
//!    (including replacing it with a different variant),
//! 2. the children of whatever node is now there are rewritten, in source
//!    order,
//! 3. the node's `post_*` hook receives the rebuilt node by value and
//!    returns its replacement.
//!
//! Class and method bodies are walked with a context whose owner is the
//! definition's symbol. `EmptyTree`, `Nil` and `NotSupported` are leaves
//! with no hooks.
//!
//! # Example
//!
//! ```text
//! struct CountSends(usize);
//!
//! impl TreeMap for CountSends {
//!     fn post_send(&mut self, _ctx: &mut Context<'_>, expr: Expr) -> Expr {
//!         self.0 += 1;
//!         expr
//!     }
//! }
//! ```

use rtc_stack::ensure_sufficient_stack;

use crate::ast::{Block, ClassDef, Expr, ExprKind, MethodDef, Send};
use crate::context::Context;

/// Per-node-kind rewrite hooks.
#[expect(unused_variables, reason = "default hooks ignore their arguments")]
pub trait TreeMap {
    fn pre_class_def(&mut self, ctx: &mut Context<'_>, expr: &mut Expr) {}
    fn post_class_def(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn pre_method_def(&mut self, ctx: &mut Context<'_>, expr: &mut Expr) {}
    fn post_method_def(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn pre_if(&mut self, ctx: &mut Context<'_>, expr: &mut Expr) {}
    fn post_if(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn pre_while(&mut self, ctx: &mut Context<'_>, expr: &mut Expr) {}
    fn post_while(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_break(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_next(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn pre_return(&mut self, ctx: &mut Context<'_>, expr: &mut Expr) {}
    fn post_return(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn pre_yield(&mut self, ctx: &mut Context<'_>, expr: &mut Expr) {}
    fn post_yield(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn pre_ins_seq(&mut self, ctx: &mut Context<'_>, expr: &mut Expr) {}
    fn post_ins_seq(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_ident(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_unresolved_ident(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn pre_assign(&mut self, ctx: &mut Context<'_>, expr: &mut Expr) {}
    fn post_assign(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn pre_send(&mut self, ctx: &mut Context<'_>, expr: &mut Expr) {}
    fn post_send(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_super(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_self(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_bool_lit(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_int_lit(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_float_lit(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_string_lit(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_symbol_lit(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn post_constant_lit(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn pre_array(&mut self, ctx: &mut Context<'_>, expr: &mut Expr) {}
    fn post_array(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    fn pre_hash(&mut self, ctx: &mut Context<'_>, expr: &mut Expr) {}
    fn post_hash(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }

    /// Any of the argument wrappers (optional, keyword, rest, block, shadow).
    fn post_arg(&mut self, ctx: &mut Context<'_>, expr: Expr) -> Expr {
        expr
    }
}

/// Rewrite `expr` with `map`, visiting every node in source order.
pub fn map_tree<M: TreeMap + ?Sized>(map: &mut M, ctx: &mut Context<'_>, expr: Expr) -> Expr {
    ensure_sufficient_stack(|| {
        let mut expr = expr;
        pre(map, ctx, &mut expr);
        let expr = walk_children(map, ctx, expr);
        post(map, ctx, expr)
    })
}

fn pre<M: TreeMap + ?Sized>(map: &mut M, ctx: &mut Context<'_>, expr: &mut Expr) {
    match expr.kind {
        ExprKind::ClassDef(_) => map.pre_class_def(ctx, expr),
        ExprKind::MethodDef(_) => map.pre_method_def(ctx, expr),
        ExprKind::If { .. } => map.pre_if(ctx, expr),
        ExprKind::While { .. } => map.pre_while(ctx, expr),
        ExprKind::Return(_) => map.pre_return(ctx, expr),
        ExprKind::Yield(_) => map.pre_yield(ctx, expr),
        ExprKind::InsSeq { .. } => map.pre_ins_seq(ctx, expr),
        ExprKind::Assign { .. } => map.pre_assign(ctx, expr),
        ExprKind::Send(_) => map.pre_send(ctx, expr),
        ExprKind::Array(_) => map.pre_array(ctx, expr),
        ExprKind::Hash { .. } => map.pre_hash(ctx, expr),
        _ => {}
    }
}

fn post<M: TreeMap + ?Sized>(map: &mut M, ctx: &mut Context<'_>, expr: Expr) -> Expr {
    match expr.kind {
        ExprKind::ClassDef(_) => map.post_class_def(ctx, expr),
        ExprKind::MethodDef(_) => map.post_method_def(ctx, expr),
        ExprKind::If { .. } => map.post_if(ctx, expr),
        ExprKind::While { .. } => map.post_while(ctx, expr),
        ExprKind::Break(_) => map.post_break(ctx, expr),
        ExprKind::Next(_) => map.post_next(ctx, expr),
        ExprKind::Return(_) => map.post_return(ctx, expr),
        ExprKind::Yield(_) => map.post_yield(ctx, expr),
        ExprKind::InsSeq { .. } => map.post_ins_seq(ctx, expr),
        ExprKind::Ident(_) => map.post_ident(ctx, expr),
        ExprKind::UnresolvedIdent { .. } => map.post_unresolved_ident(ctx, expr),
        ExprKind::Assign { .. } => map.post_assign(ctx, expr),
        ExprKind::Send(_) => map.post_send(ctx, expr),
        ExprKind::Super(_) => map.post_super(ctx, expr),
        ExprKind::SelfRef => map.post_self(ctx, expr),
        ExprKind::BoolLit(_) => map.post_bool_lit(ctx, expr),
        ExprKind::IntLit(_) => map.post_int_lit(ctx, expr),
        ExprKind::FloatLit(_) => map.post_float_lit(ctx, expr),
        ExprKind::StringLit(_) => map.post_string_lit(ctx, expr),
        ExprKind::SymbolLit(_) => map.post_symbol_lit(ctx, expr),
        ExprKind::ConstantLit { .. } => map.post_constant_lit(ctx, expr),
        ExprKind::Array(_) => map.post_array(ctx, expr),
        ExprKind::Hash { .. } => map.post_hash(ctx, expr),
        ExprKind::OptionalArg { .. }
        | ExprKind::KeywordArg(_)
        | ExprKind::RestArg(_)
        | ExprKind::BlockArg(_)
        | ExprKind::ShadowArg(_) => map.post_arg(ctx, expr),
        ExprKind::EmptyTree | ExprKind::Nil | ExprKind::NotSupported(_) => expr,
    }
}

fn walk_children<M: TreeMap + ?Sized>(map: &mut M, ctx: &mut Context<'_>, expr: Expr) -> Expr {
    let Expr { span, kind } = expr;
    let kind = match kind {
        ExprKind::ClassDef(def) => {
            let ClassDef {
                symbol,
                name,
                ancestors,
                rhs,
                kind,
            } = *def;
            let name = map_tree(map, ctx, name);
            let ancestors = map_all(map, ctx, ancestors);
            let rhs = map_all(map, &mut ctx.with_owner(symbol), rhs);
            ExprKind::ClassDef(Box::new(ClassDef {
                symbol,
                name,
                ancestors,
                rhs,
                kind,
            }))
        }
        ExprKind::MethodDef(def) => {
            let MethodDef {
                symbol,
                name,
                args,
                rhs,
                is_self,
            } = *def;
            let mut inner = ctx.with_owner(symbol);
            let args = map_all(map, &mut inner, args);
            let rhs = map_tree(map, &mut inner, rhs);
            ExprKind::MethodDef(Box::new(MethodDef {
                symbol,
                name,
                args,
                rhs,
                is_self,
            }))
        }
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => ExprKind::If {
            cond: map_boxed(map, ctx, cond),
            then_branch: map_boxed(map, ctx, then_branch),
            else_branch: map_boxed(map, ctx, else_branch),
        },
        ExprKind::While { cond, body } => ExprKind::While {
            cond: map_boxed(map, ctx, cond),
            body: map_boxed(map, ctx, body),
        },
        ExprKind::Break(value) => ExprKind::Break(map_boxed(map, ctx, value)),
        ExprKind::Next(value) => ExprKind::Next(map_boxed(map, ctx, value)),
        ExprKind::Return(value) => ExprKind::Return(map_boxed(map, ctx, value)),
        ExprKind::Yield(value) => ExprKind::Yield(map_boxed(map, ctx, value)),
        ExprKind::InsSeq { stats, expr } => ExprKind::InsSeq {
            stats: map_all(map, ctx, stats),
            expr: map_boxed(map, ctx, expr),
        },
        ExprKind::Assign { lhs, rhs } => ExprKind::Assign {
            lhs: map_boxed(map, ctx, lhs),
            rhs: map_boxed(map, ctx, rhs),
        },
        ExprKind::Send(send) => {
            let Send {
                recv,
                fun,
                args,
                block,
                flags,
            } = *send;
            let recv = map_tree(map, ctx, recv);
            let args = map_all(map, ctx, args);
            let block = block.map(|block| Block {
                span: block.span,
                args: map_all(map, ctx, block.args),
                body: map_tree(map, ctx, block.body),
            });
            ExprKind::Send(Box::new(Send {
                recv,
                fun,
                args,
                block,
                flags,
            }))
        }
        ExprKind::Super(args) => ExprKind::Super(map_all(map, ctx, args)),
        ExprKind::ConstantLit { scope, name } => ExprKind::ConstantLit {
            scope: map_boxed(map, ctx, scope),
            name,
        },
        ExprKind::Array(elems) => ExprKind::Array(map_all(map, ctx, elems)),
        ExprKind::Hash { keys, values } => {
            debug_assert_eq!(
                keys.len(),
                values.len(),
                "internal error: hash keys and values out of step"
            );
            let mut new_keys = Vec::with_capacity(keys.len());
            let mut new_values = Vec::with_capacity(values.len());
            for (key, value) in keys.into_iter().zip(values) {
                new_keys.push(map_tree(map, ctx, key));
                new_values.push(map_tree(map, ctx, value));
            }
            ExprKind::Hash {
                keys: new_keys,
                values: new_values,
            }
        }
        ExprKind::OptionalArg { expr, default } => ExprKind::OptionalArg {
            expr: map_boxed(map, ctx, expr),
            default: map_boxed(map, ctx, default),
        },
        ExprKind::KeywordArg(inner) => ExprKind::KeywordArg(map_boxed(map, ctx, inner)),
        ExprKind::RestArg(inner) => ExprKind::RestArg(map_boxed(map, ctx, inner)),
        ExprKind::BlockArg(inner) => ExprKind::BlockArg(map_boxed(map, ctx, inner)),
        ExprKind::ShadowArg(inner) => ExprKind::ShadowArg(map_boxed(map, ctx, inner)),
        leaf @ (ExprKind::Ident(_)
        | ExprKind::UnresolvedIdent { .. }
        | ExprKind::SelfRef
        | ExprKind::BoolLit(_)
        | ExprKind::IntLit(_)
        | ExprKind::FloatLit(_)
        | ExprKind::StringLit(_)
        | ExprKind::SymbolLit(_)
        | ExprKind::Nil
        | ExprKind::EmptyTree
        | ExprKind::NotSupported(_)) => leaf,
    };
    Expr { span, kind }
}

fn map_boxed<M: TreeMap + ?Sized>(map: &mut M, ctx: &mut Context<'_>, expr: Box<Expr>) -> Box<Expr> {
    Box::new(map_tree(map, ctx, *expr))
}

fn map_all<M: TreeMap + ?Sized>(map: &mut M, ctx: &mut Context<'_>, exprs: Vec<Expr>) -> Vec<Expr> {
    exprs.into_iter().map(|expr| map_tree(map, ctx, expr)).collect()
}
