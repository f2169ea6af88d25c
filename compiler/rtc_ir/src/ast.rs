//! Canonical AST produced by desugaring.
//!
//! A small, orthogonal node family: sugar such as `&&`, `||=`, multiple
//! assignment, string interpolation and hash splats has already been
//! rewritten into sends, conditionals and instruction sequences.
//!
//! The tree is owned top-down: each parent owns its children through
//! `Box`/`Vec`. There is no null child; "nothing here" is an explicit
//! [`ExprKind::EmptyTree`], and an unlowered construct is an explicit
//! [`ExprKind::NotSupported`] carrying the construct's name.

use bitflags::bitflags;

use crate::names::NameId;
use crate::symbols::SymbolId;
use crate::Span;

/// One canonical expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub span: Span,
    pub kind: ExprKind,
}

/// Scope of a variable whose binding is decided by a later phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VarKind {
    Local,
    Instance,
    Global,
    Class,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassDefKind {
    Class,
    Module,
}

bitflags! {
    /// Flag bits on a [`Send`].
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct SendFlags: u8 {
        /// Implicit-self call; private methods are reachable.
        const PRIVATE_OK = 1 << 0;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    // Definitions
    ClassDef(Box<ClassDef>),
    MethodDef(Box<MethodDef>),

    // Control
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    While {
        cond: Box<Expr>,
        body: Box<Expr>,
    },
    Break(Box<Expr>),
    Next(Box<Expr>),
    Return(Box<Expr>),
    Yield(Box<Expr>),
    /// Statements evaluated in order, then `expr` as the value.
    InsSeq {
        stats: Vec<Expr>,
        expr: Box<Expr>,
    },

    // References
    Ident(SymbolId),
    UnresolvedIdent {
        kind: VarKind,
        name: NameId,
    },
    Assign {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    // Calls
    Send(Box<Send>),
    Super(Vec<Expr>),
    SelfRef,

    // Literals
    BoolLit(bool),
    IntLit(i64),
    /// IEEE-754 bits of the value.
    FloatLit(u64),
    StringLit(NameId),
    SymbolLit(NameId),
    ConstantLit {
        scope: Box<Expr>,
        name: NameId,
    },
    Nil,
    Array(Vec<Expr>),
    /// Parallel key and value lists.
    Hash {
        keys: Vec<Expr>,
        values: Vec<Expr>,
    },

    // Argument forms
    OptionalArg {
        expr: Box<Expr>,
        default: Box<Expr>,
    },
    KeywordArg(Box<Expr>),
    RestArg(Box<Expr>),
    BlockArg(Box<Expr>),
    ShadowArg(Box<Expr>),

    // Markers
    EmptyTree,
    NotSupported(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDef {
    /// Placeholder until the namer runs.
    pub symbol: SymbolId,
    pub name: Expr,
    pub ancestors: Vec<Expr>,
    pub rhs: Vec<Expr>,
    pub kind: ClassDefKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDef {
    pub symbol: SymbolId,
    pub name: NameId,
    pub args: Vec<Expr>,
    pub rhs: Expr,
    /// `def self.name`.
    pub is_self: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Send {
    pub recv: Expr,
    pub fun: NameId,
    pub args: Vec<Expr>,
    pub block: Option<Block>,
    pub flags: SendFlags,
}

/// Literal block attached to a send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub span: Span,
    pub args: Vec<Expr>,
    pub body: Expr,
}

impl Expr {
    #[inline]
    pub fn new(span: Span, kind: ExprKind) -> Self {
        Expr { span, kind }
    }

    pub fn empty(span: Span) -> Self {
        Expr::new(span, ExprKind::EmptyTree)
    }

    pub fn ident(span: Span, symbol: SymbolId) -> Self {
        Expr::new(span, ExprKind::Ident(symbol))
    }

    pub fn unresolved(span: Span, kind: VarKind, name: NameId) -> Self {
        Expr::new(span, ExprKind::UnresolvedIdent { kind, name })
    }

    pub fn int(span: Span, value: i64) -> Self {
        Expr::new(span, ExprKind::IntLit(value))
    }

    pub fn assign(span: Span, lhs: Expr, rhs: Expr) -> Self {
        Expr::new(
            span,
            ExprKind::Assign {
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
        )
    }

    pub fn if_(span: Span, cond: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::new(
            span,
            ExprKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
        )
    }

    pub fn ins_seq(span: Span, stats: Vec<Expr>, expr: Expr) -> Self {
        Expr::new(
            span,
            ExprKind::InsSeq {
                stats,
                expr: Box::new(expr),
            },
        )
    }

    pub fn ins_seq1(span: Span, stat: Expr, expr: Expr) -> Self {
        Expr::ins_seq(span, vec![stat], expr)
    }

    pub fn send(span: Span, recv: Expr, fun: NameId, args: Vec<Expr>, flags: SendFlags) -> Self {
        Expr::new(
            span,
            ExprKind::Send(Box::new(Send {
                recv,
                fun,
                args,
                block: None,
                flags,
            })),
        )
    }

    pub fn send0(span: Span, recv: Expr, fun: NameId) -> Self {
        Expr::send(span, recv, fun, Vec::new(), SendFlags::empty())
    }

    pub fn send1(span: Span, recv: Expr, fun: NameId, arg: Expr) -> Self {
        Expr::send(span, recv, fun, vec![arg], SendFlags::empty())
    }

    /// Bound or unresolved identifier: re-reading it has no side effects.
    pub fn is_reference(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Ident(_) | ExprKind::UnresolvedIdent { .. }
        )
    }

    /// Fresh copy of a reference at `span`; `None` for anything else.
    pub fn copy_reference(&self, span: Span) -> Option<Expr> {
        match self.kind {
            ExprKind::Ident(symbol) => Some(Expr::ident(span, symbol)),
            ExprKind::UnresolvedIdent { kind, name } => Some(Expr::unresolved(span, kind, name)),
            _ => None,
        }
    }

    pub fn is_empty_tree(&self) -> bool {
        matches!(self.kind, ExprKind::EmptyTree)
    }

    pub fn is_string_lit(&self) -> bool {
        matches!(self.kind, ExprKind::StringLit(_))
    }

    /// Whether the node yields a value, as opposed to only declaring
    /// something. Definitions are the only non-value nodes.
    pub fn is_value(&self) -> bool {
        !matches!(self.kind, ExprKind::ClassDef(_) | ExprKind::MethodDef(_))
    }

    pub fn as_send(&self) -> Option<&Send> {
        match &self.kind {
            ExprKind::Send(send) => Some(send),
            _ => None,
        }
    }

    pub fn as_send_mut(&mut self) -> Option<&mut Send> {
        match &mut self.kind {
            ExprKind::Send(send) => Some(send),
            _ => None,
        }
    }
}

impl ExprKind {
    /// Variant name, for debug output and internal errors.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::ClassDef(_) => "ClassDef",
            ExprKind::MethodDef(_) => "MethodDef",
            ExprKind::If { .. } => "If",
            ExprKind::While { .. } => "While",
            ExprKind::Break(_) => "Break",
            ExprKind::Next(_) => "Next",
            ExprKind::Return(_) => "Return",
            ExprKind::Yield(_) => "Yield",
            ExprKind::InsSeq { .. } => "InsSeq",
            ExprKind::Ident(_) => "Ident",
            ExprKind::UnresolvedIdent { .. } => "UnresolvedIdent",
            ExprKind::Assign { .. } => "Assign",
            ExprKind::Send(_) => "Send",
            ExprKind::Super(_) => "Super",
            ExprKind::SelfRef => "Self",
            ExprKind::BoolLit(_) => "BoolLit",
            ExprKind::IntLit(_) => "IntLit",
            ExprKind::FloatLit(_) => "FloatLit",
            ExprKind::StringLit(_) => "StringLit",
            ExprKind::SymbolLit(_) => "SymbolLit",
            ExprKind::ConstantLit { .. } => "ConstantLit",
            ExprKind::Nil => "Nil",
            ExprKind::Array(_) => "Array",
            ExprKind::Hash { .. } => "Hash",
            ExprKind::OptionalArg { .. } => "OptionalArg",
            ExprKind::KeywordArg(_) => "KeywordArg",
            ExprKind::RestArg(_) => "RestArg",
            ExprKind::BlockArg(_) => "BlockArg",
            ExprKind::ShadowArg(_) => "ShadowArg",
            ExprKind::EmptyTree => "EmptyTree",
            ExprKind::NotSupported(_) => "NotSupported",
        }
    }
}

#[cfg(test)]
mod tests;
