//! Dispatch, literals, variables and calls.

use std::num::IntErrorKind;

use rtc_diagnostic::ErrorCode;
use rtc_ir::ast::{Expr, ExprKind, SendFlags, VarKind};
use rtc_ir::parse_tree::{Node, NodeKind};
use rtc_ir::{NameId, Span, SymbolId};

use super::{LowerResult, Lowerer};
use crate::DesugarError;

impl Lowerer<'_, '_> {
    pub(super) fn lower_node(&mut self, node: &Node) -> LowerResult {
        let span = node.span;
        match &node.kind {
            NodeKind::And { left, right } => self.lower_and(span, left, right),
            NodeKind::Or { left, right } => self.lower_or(span, left, right),
            NodeKind::AndAsgn { left, right } => self.lower_and_asgn(span, left, right),
            NodeKind::OrAsgn { left, right } => self.lower_or_asgn(span, left, right),

            NodeKind::Send {
                receiver,
                method,
                args,
            } => self.lower_send(span, receiver.as_deref(), *method, args),
            NodeKind::Super(args) => Ok(Expr::new(span, ExprKind::Super(self.lower_all(args)?))),
            NodeKind::Block { send, args, body } => {
                self.lower_block(node, send, args.as_deref(), body.as_deref())
            }

            NodeKind::SelfNode => Ok(Expr::new(span, ExprKind::SelfRef)),
            NodeKind::Nil => Ok(Expr::new(span, ExprKind::Nil)),
            NodeKind::True => Ok(Expr::new(span, ExprKind::BoolLit(true))),
            NodeKind::False => Ok(Expr::new(span, ExprKind::BoolLit(false))),
            NodeKind::Integer(text) => Ok(self.lower_integer(node, text)),
            NodeKind::Float(text) => Ok(lower_float(node, text)),
            NodeKind::String(value) => Ok(Expr::new(span, ExprKind::StringLit(*value))),
            NodeKind::Symbol(value) => Ok(Expr::new(span, ExprKind::SymbolLit(*value))),
            NodeKind::FileLiteral => Ok(Expr::new(span, ExprKind::StringLit(NameId::CURRENT_FILE))),
            NodeKind::DString(parts) => self.lower_dstring(span, parts),
            NodeKind::Array(elems) => Ok(Expr::new(span, ExprKind::Array(self.lower_all(elems)?))),
            NodeKind::Hash(entries) => self.lower_hash(span, entries),

            NodeKind::Const { scope, name } | NodeKind::ConstLhs { scope, name } => {
                let scope = self.lower_opt(scope.as_deref(), span)?;
                Ok(Expr::new(
                    span,
                    ExprKind::ConstantLit {
                        scope: Box::new(scope),
                        name: *name,
                    },
                ))
            }
            NodeKind::Cbase => Ok(Expr::ident(span, SymbolId::ROOT)),
            NodeKind::LVar(name) | NodeKind::LVarLhs(name) => {
                Ok(Expr::unresolved(span, VarKind::Local, *name))
            }
            NodeKind::IVar(name) | NodeKind::IVarLhs(name) => {
                Ok(Expr::unresolved(span, VarKind::Instance, *name))
            }
            NodeKind::GVar(name) | NodeKind::GVarLhs(name) => {
                Ok(Expr::unresolved(span, VarKind::Global, *name))
            }
            NodeKind::CVar(name) | NodeKind::CVarLhs(name) => {
                Ok(Expr::unresolved(span, VarKind::Class, *name))
            }
            NodeKind::Assign { lhs, rhs } => {
                let lhs = self.lower(lhs)?;
                let rhs = self.lower(rhs)?;
                Ok(Expr::assign(span, lhs, rhs))
            }
            NodeKind::Masgn { lhs, rhs } => self.lower_masgn(span, lhs, rhs),

            NodeKind::Begin(stmts) | NodeKind::Kwbegin(stmts) => self.lower_begin(span, stmts),

            NodeKind::Module { name, body } => self.lower_module(span, name, body.as_deref()),
            NodeKind::Class {
                name,
                superclass,
                body,
            } => self.lower_class(span, name, superclass.as_deref(), body.as_deref()),
            NodeKind::Def { name, args, body } => {
                self.lower_def(span, *name, args.as_deref(), body.as_deref(), false)
            }
            NodeKind::Defs {
                singleton,
                name,
                args,
                body,
            } => self.lower_defs(span, singleton, *name, args.as_deref(), body.as_deref()),

            NodeKind::Arg(_)
            | NodeKind::Optarg { .. }
            | NodeKind::Restarg(_)
            | NodeKind::Kwarg(_)
            | NodeKind::Kwoptarg { .. }
            | NodeKind::Kwrestarg(_)
            | NodeKind::Blockarg(_)
            | NodeKind::Shadowarg(_) => self.lower_formal_arg(node),

            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.lower_if(span, cond, then_branch.as_deref(), else_branch.as_deref()),
            NodeKind::While { cond, body } => self.lower_while(span, cond, body.as_deref(), false),
            NodeKind::WhilePost { cond, body } => self.lower_while(span, cond, Some(body), false),
            NodeKind::Until { cond, body } => self.lower_while(span, cond, body.as_deref(), true),
            NodeKind::UntilPost { cond, body } => self.lower_while(span, cond, Some(body), true),
            NodeKind::Return(values) => {
                let value = self.lower_jump_value(span, values)?;
                Ok(Expr::new(span, ExprKind::Return(Box::new(value))))
            }
            NodeKind::Break(values) => {
                let value = self.lower_jump_value(span, values)?;
                Ok(Expr::new(span, ExprKind::Break(Box::new(value))))
            }
            NodeKind::Next(values) => {
                let value = self.lower_jump_value(span, values)?;
                Ok(Expr::new(span, ExprKind::Next(Box::new(value))))
            }
            NodeKind::Yield(values) => {
                let value = self.lower_jump_value(span, values)?;
                Ok(Expr::new(span, ExprKind::Yield(Box::new(value))))
            }

            NodeKind::For { .. } | NodeKind::Preexe(_) | NodeKind::Postexe(_) => {
                Err(DesugarError::Unimplemented {
                    construct: node.name(),
                    span,
                })
            }

            _ => Ok(Self::not_supported(node)),
        }
    }

    /// A call. With no receiver the call goes to `self` and may reach
    /// private methods.
    fn lower_send(
        &mut self,
        span: Span,
        receiver: Option<&Node>,
        method: NameId,
        args: &[Node],
    ) -> LowerResult {
        let (recv, flags) = match receiver {
            Some(receiver) => (self.lower(receiver)?, SendFlags::empty()),
            None => (Expr::new(span, ExprKind::SelfRef), SendFlags::PRIVATE_OK),
        };
        let args = self.lower_all(args)?;
        Ok(Expr::send(span, recv, method, args, flags))
    }

    /// Integer literals must parse and fit in `i64`. Anything else is
    /// reported (E2002 out of range, E2003 malformed) and lowered to a
    /// marker so the rest of the tree still lowers.
    fn lower_integer(&mut self, node: &Node, text: &str) -> Expr {
        match parse_integer(text) {
            Ok(value) => Expr::int(node.span, value),
            Err(kind) => {
                let (code, message) = match kind {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => (
                        ErrorCode::E2002,
                        format!("integer literal `{text}` does not fit in 64 bits"),
                    ),
                    _ => (
                        ErrorCode::E2003,
                        format!("malformed integer literal `{text}`"),
                    ),
                };
                self.diagnostics.error(node.span, code, message);
                Self::not_supported(node)
            }
        }
    }
}

fn lower_float(node: &Node, text: &str) -> Expr {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    match cleaned.parse::<f64>() {
        Ok(value) => Expr::new(node.span, ExprKind::FloatLit(value.to_bits())),
        Err(_) => Lowerer::not_supported(node),
    }
}

/// Parse Ruby integer literal text: optional sign, `_` separators, and
/// `0x`/`0o`/`0b`/`0d` or leading-`0` octal prefixes.
pub(super) fn parse_integer(text: &str) -> Result<i64, IntErrorKind> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let (sign, unsigned) = match cleaned.as_bytes().first() {
        Some(b'-') => ("-", &cleaned[1..]),
        Some(b'+') => ("", &cleaned[1..]),
        _ => ("", cleaned.as_str()),
    };
    let lower = unsigned.to_ascii_lowercase();
    let (radix, digits) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = lower.strip_prefix("0d") {
        (10, rest)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };
    if digits.is_empty() || digits.starts_with(['-', '+']) {
        return Err(IntErrorKind::InvalidDigit);
    }
    i64::from_str_radix(&format!("{sign}{digits}"), radix).map_err(|err| err.kind().clone())
}
