//! Short-circuit operators, conditional assignment, loops and jumps.

use rtc_ir::ast::{Expr, ExprKind};
use rtc_ir::parse_tree::Node;
use rtc_ir::{NameId, Span};

use super::{LowerResult, Lowerer};
use crate::DesugarError;

/// Which conditional assignment is being lowered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CondAssign {
    /// `&&=`: write only when the current value is truthy.
    And,
    /// `||=`: write only when the current value is falsy.
    Or,
}

impl CondAssign {
    fn construct(self) -> &'static str {
        match self {
            CondAssign::And => "AndAsgn",
            CondAssign::Or => "OrAsgn",
        }
    }

    /// Arrange the write and keep arms for a conditional on the current value.
    fn branches(self, write: Expr, keep: Expr) -> (Expr, Expr) {
        match self {
            CondAssign::And => (write, keep),
            CondAssign::Or => (keep, write),
        }
    }
}

impl Lowerer<'_, '_> {
    /// `a && b`. A reference on the left is re-read in the else arm; anything
    /// else is captured in a temporary first.
    pub(super) fn lower_and(&mut self, span: Span, left: &Node, right: &Node) -> LowerResult {
        let lhs = self.lower(left)?;
        let rhs = self.lower(right)?;
        if let Some(copy) = lhs.copy_reference(span) {
            return Ok(Expr::if_(span, lhs, rhs, copy));
        }
        let temp = self.new_temporary(NameId::AND_AND);
        let assign = Expr::assign(span, Expr::ident(span, temp), lhs);
        let cond = Expr::if_(span, Expr::ident(span, temp), rhs, Expr::ident(span, temp));
        Ok(Expr::ins_seq1(span, assign, cond))
    }

    /// `a || b`, mirroring [`Self::lower_and`] with the arms swapped.
    pub(super) fn lower_or(&mut self, span: Span, left: &Node, right: &Node) -> LowerResult {
        let lhs = self.lower(left)?;
        let rhs = self.lower(right)?;
        if let Some(copy) = lhs.copy_reference(span) {
            return Ok(Expr::if_(span, lhs, copy, rhs));
        }
        let temp = self.new_temporary(NameId::OR_OR);
        let assign = Expr::assign(span, Expr::ident(span, temp), lhs);
        let cond = Expr::if_(span, Expr::ident(span, temp), Expr::ident(span, temp), rhs);
        Ok(Expr::ins_seq1(span, assign, cond))
    }

    pub(super) fn lower_and_asgn(&mut self, span: Span, left: &Node, right: &Node) -> LowerResult {
        self.lower_cond_assign(CondAssign::And, span, left, right)
    }

    pub(super) fn lower_or_asgn(&mut self, span: Span, left: &Node, right: &Node) -> LowerResult {
        self.lower_cond_assign(CondAssign::Or, span, left, right)
    }

    fn lower_cond_assign(
        &mut self,
        op: CondAssign,
        span: Span,
        left: &Node,
        right: &Node,
    ) -> LowerResult {
        let target = self.lower(left)?;
        let value = self.lower(right)?;

        if let Some(cond) = target.copy_reference(span) {
            let keep = cond.clone();
            let write = Expr::assign(span, target, value);
            let (then_branch, else_branch) = op.branches(write, keep);
            return Ok(Expr::if_(span, cond, then_branch, else_branch));
        }

        let target_kind = target.kind.name();
        let ExprKind::Send(send) = target.kind else {
            return Err(DesugarError::UnsupportedTarget {
                construct: op.construct(),
                target: target_kind,
                span,
            });
        };
        if !send.args.is_empty() {
            return Err(DesugarError::UnsupportedTarget {
                construct: op.construct(),
                target: "Send with arguments",
                span,
            });
        }

        // `recv.fun op= value`: evaluate `recv` once, then read through the
        // getter and write through the setter on the captured receiver.
        let fun = send.fun;
        let setter = self.ctx.state_mut().names.add_eq(fun);
        let temp = self.new_temporary(fun);
        let capture = Expr::assign(span, Expr::ident(span, temp), send.recv);
        let cond = Expr::send0(span, Expr::ident(span, temp), fun);
        let write = Expr::send1(span, Expr::ident(span, temp), setter, value);
        let keep = Expr::ident(span, temp);
        let (then_branch, else_branch) = op.branches(write, keep);
        Ok(Expr::ins_seq1(
            span,
            capture,
            Expr::if_(span, cond, then_branch, else_branch),
        ))
    }

    /// `while`/`until` in both pre- and post-test forms. `until c` is
    /// `while !c`.
    pub(super) fn lower_while(
        &mut self,
        span: Span,
        cond: &Node,
        body: Option<&Node>,
        negate: bool,
    ) -> LowerResult {
        let mut cond = self.lower(cond)?;
        if negate {
            let cond_span = cond.span;
            cond = Expr::send0(cond_span, cond, NameId::BANG);
        }
        let body = self.lower_opt(body, span)?;
        Ok(Expr::new(
            span,
            ExprKind::While {
                cond: Box::new(cond),
                body: Box::new(body),
            },
        ))
    }

    pub(super) fn lower_if(
        &mut self,
        span: Span,
        cond: &Node,
        then_branch: Option<&Node>,
        else_branch: Option<&Node>,
    ) -> LowerResult {
        let cond = self.lower(cond)?;
        let then_branch = self.lower_opt(then_branch, span)?;
        let else_branch = self.lower_opt(else_branch, span)?;
        Ok(Expr::if_(span, cond, then_branch, else_branch))
    }

    /// Statement group. The last statement is the value unless it is a
    /// definition, in which case the group's value is `EmptyTree`.
    pub(super) fn lower_begin(&mut self, span: Span, stmts: &[Node]) -> LowerResult {
        let Some((last, leading)) = stmts.split_last() else {
            return Ok(Expr::empty(span));
        };
        let mut stats = self.lower_all(leading)?;
        let last = self.lower(last)?;
        let value = if last.is_value() {
            last
        } else {
            stats.push(last);
            Expr::empty(span)
        };
        Ok(Expr::ins_seq(span, stats, value))
    }

    /// Operand of `return`/`break`/`next`/`yield`: nothing, the single
    /// value, or all values packed into an array.
    pub(super) fn lower_jump_value(&mut self, span: Span, values: &[Node]) -> LowerResult {
        match values {
            [] => Ok(Expr::empty(span)),
            [single] => self.lower(single),
            many => Ok(Expr::new(span, ExprKind::Array(self.lower_all(many)?))),
        }
    }
}
