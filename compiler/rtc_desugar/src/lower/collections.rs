//! Interpolated strings, arrays, hashes and multiple assignment.

use rtc_ir::ast::{Expr, ExprKind};
use rtc_ir::parse_tree::{Node, NodeKind};
use rtc_ir::{NameId, Span};

use super::{LowerResult, Lowerer};
use crate::DesugarError;

/// Literal pairs collected since the last `**splat`.
#[derive(Default)]
struct PendingPairs {
    keys: Vec<Expr>,
    values: Vec<Expr>,
}

impl PendingPairs {
    fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn take(&mut self, span: Span) -> Expr {
        let keys = std::mem::take(&mut self.keys);
        let values = std::mem::take(&mut self.values);
        Expr::new(span, ExprKind::Hash { keys, values })
    }
}

/// `acc.merge(other)`, or `other` alone when nothing has been merged yet.
fn merge_into(span: Span, acc: Option<Expr>, other: Expr) -> Expr {
    match acc {
        Some(acc) => Expr::send1(span, acc, NameId::MERGE, other),
        None => other,
    }
}

impl Lowerer<'_, '_> {
    /// `"a#{b}c"` folds left to right: every segment that is not already a
    /// string literal goes through `to_s`, and results join with `concat`.
    pub(super) fn lower_dstring(&mut self, span: Span, parts: &[Node]) -> LowerResult {
        let mut acc: Option<Expr> = None;
        for part in parts {
            let piece = self.lower(part)?;
            let piece = if piece.is_string_lit() {
                piece
            } else {
                let piece_span = piece.span;
                Expr::send0(piece_span, piece, NameId::TO_S)
            };
            acc = Some(match acc {
                Some(acc) => Expr::send1(span, acc, NameId::CONCAT, piece),
                None => piece,
            });
        }
        match acc {
            Some(acc) => Ok(acc),
            None => {
                let empty = self.ctx.enter_name_utf8("");
                Ok(Expr::new(span, ExprKind::StringLit(empty)))
            }
        }
    }

    /// Hash literal. Literal pairs accumulate until a `**splat`, which
    /// flushes them into the running merge and then merges the splat, so
    /// entries are evaluated left to right and later keys win.
    pub(super) fn lower_hash(&mut self, span: Span, entries: &[Node]) -> LowerResult {
        let mut pending = PendingPairs::default();
        let mut merged: Option<Expr> = None;

        for entry in entries {
            match &entry.kind {
                NodeKind::Pair { key, value } => {
                    pending.keys.push(self.lower(key)?);
                    pending.values.push(self.lower(value)?);
                }
                NodeKind::Kwsplat(inner) => {
                    if !pending.is_empty() {
                        let literal = pending.take(span);
                        merged = Some(merge_into(span, merged, literal));
                    }
                    let splat = self.lower(inner)?;
                    merged = Some(merge_into(span, merged, splat));
                }
                _ => {
                    return Err(DesugarError::UnsupportedTarget {
                        construct: "Hash",
                        target: entry.name(),
                        span: entry.span,
                    })
                }
            }
        }

        Ok(match merged {
            Some(merged) if pending.is_empty() => merged,
            Some(merged) => {
                let literal = pending.take(span);
                Expr::send1(span, merged, NameId::MERGE, literal)
            }
            None => pending.take(span),
        })
    }

    /// `a, b.c = rhs` evaluates `rhs` once into a temporary, then assigns
    /// `temp[i]` to each target in order. The value is the temporary.
    pub(super) fn lower_masgn(&mut self, span: Span, lhs: &Node, rhs: &Node) -> LowerResult {
        let NodeKind::Mlhs(targets) = &lhs.kind else {
            return Err(DesugarError::UnsupportedTarget {
                construct: "Masgn",
                target: lhs.name(),
                span,
            });
        };

        let value = self.lower(rhs)?;
        let temp = self.new_temporary(NameId::ASSIGN_TEMP);
        let mut stats = Vec::with_capacity(targets.len() + 1);
        stats.push(Expr::assign(span, Expr::ident(span, temp), value));

        for (index, target) in (0_i64..).zip(targets) {
            let target_span = target.span;
            let element = Expr::send1(
                target_span,
                Expr::ident(target_span, temp),
                NameId::SQUARE_BRACKETS,
                Expr::int(target_span, index),
            );
            let mut lowered = self.lower(target)?;
            if let Some(send) = lowered.as_send_mut() {
                // `a.b, c = ...`: the parser hands over the setter call
                // without its value.
                if !send.args.is_empty() {
                    return Err(DesugarError::UnsupportedTarget {
                        construct: "Masgn",
                        target: "Send with arguments",
                        span: target_span,
                    });
                }
                send.args.push(element);
                stats.push(lowered);
            } else if lowered.is_reference() {
                stats.push(Expr::assign(target_span, lowered, element));
            } else if matches!(lowered.kind, ExprKind::NotSupported(_)) {
                stats.push(lowered);
            } else {
                return Err(DesugarError::UnsupportedTarget {
                    construct: "Masgn",
                    target: lowered.kind.name(),
                    span: target_span,
                });
            }
        }

        Ok(Expr::ins_seq(span, stats, Expr::ident(span, temp)))
    }
}
