//! Raw parse tree handed to the desugarer.
//!
//! This mirrors the node set produced by the Ruby parser front end. Names
//! (identifiers, method names, string and symbol contents) are interned by
//! the parser before the tree reaches us, so every textual payload is a
//! [`NameId`]. Numeric literals keep their source text; their value is only
//! decided during lowering.
//!
//! Optional children are `None` where the grammar allows them to be
//! absent (`if` without `else`, an empty method body, a `return` with no
//! value, ...).

use crate::names::NameId;
use crate::Span;

/// One parse-tree node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub span: Span,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(span: Span, kind: NodeKind) -> Self {
        Node { span, kind }
    }

    pub fn boxed(span: Span, kind: NodeKind) -> Box<Self> {
        Box::new(Node::new(span, kind))
    }

    /// Construct name, as shown in "not supported" markers.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

type Child = Box<Node>;
type OptChild = Option<Box<Node>>;

/// Every construct the parser can produce.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    // Short-circuit operators
    And { left: Child, right: Child },
    Or { left: Child, right: Child },
    AndAsgn { left: Child, right: Child },
    OrAsgn { left: Child, right: Child },
    OpAsgn { left: Child, op: NameId, right: Child },

    // Calls
    Send { receiver: OptChild, method: NameId, args: Vec<Node> },
    CSend { receiver: Child, method: NameId, args: Vec<Node> },
    Super(Vec<Node>),
    ZSuper,
    Block { send: Child, args: OptChild, body: OptChild },
    BlockPass(OptChild),
    Lambda,

    // Literals
    SelfNode,
    Nil,
    True,
    False,
    Integer(String),
    Float(String),
    Rational(String),
    Complex(String),
    String(NameId),
    DString(Vec<Node>),
    XString(Vec<Node>),
    Symbol(NameId),
    DSymbol(Vec<Node>),
    Regexp { parts: Vec<Node>, options: Option<String> },
    FileLiteral,
    LineLiteral,
    Array(Vec<Node>),
    Hash(Vec<Node>),
    Pair { key: Child, value: Child },
    Kwsplat(Child),
    Splat(OptChild),
    IRange { from: OptChild, to: OptChild },
    ERange { from: OptChild, to: OptChild },

    // Constants and variables
    Const { scope: OptChild, name: NameId },
    ConstLhs { scope: OptChild, name: NameId },
    Cbase,
    LVar(NameId),
    IVar(NameId),
    GVar(NameId),
    CVar(NameId),
    LVarLhs(NameId),
    IVarLhs(NameId),
    GVarLhs(NameId),
    CVarLhs(NameId),
    Backref(NameId),
    NthRef(u32),
    Assign { lhs: Child, rhs: Child },
    Masgn { lhs: Child, rhs: Child },
    Mlhs(Vec<Node>),
    Defined(Child),

    // Statement groups
    Begin(Vec<Node>),
    Kwbegin(Vec<Node>),

    // Definitions
    Module { name: Child, body: OptChild },
    Class { name: Child, superclass: OptChild, body: OptChild },
    SClass { expr: Child, body: OptChild },
    Def { name: NameId, args: OptChild, body: OptChild },
    Defs { singleton: Child, name: NameId, args: OptChild, body: OptChild },
    Alias { from: Child, to: Child },
    Undef(Vec<Node>),

    // Formal arguments
    Args(Vec<Node>),
    Arg(NameId),
    Optarg { name: NameId, default: Child },
    Restarg(NameId),
    Kwarg(NameId),
    Kwoptarg { name: NameId, default: Child },
    Kwrestarg(NameId),
    Blockarg(NameId),
    Shadowarg(NameId),

    // Control flow
    If { cond: Child, then_branch: OptChild, else_branch: OptChild },
    Case { subject: OptChild, whens: Vec<Node>, else_branch: OptChild },
    When { patterns: Vec<Node>, body: OptChild },
    While { cond: Child, body: OptChild },
    WhilePost { cond: Child, body: Child },
    Until { cond: Child, body: OptChild },
    UntilPost { cond: Child, body: Child },
    For { var: Child, iter: Child, body: OptChild },
    Return(Vec<Node>),
    Break(Vec<Node>),
    Next(Vec<Node>),
    Yield(Vec<Node>),
    Redo,
    Retry,
    Rescue { body: OptChild, handlers: Vec<Node>, else_branch: OptChild },
    Resbody { exceptions: OptChild, var: OptChild, body: OptChild },
    Ensure { body: OptChild, ensure: OptChild },

    // BEGIN { } / END { }
    Preexe(OptChild),
    Postexe(OptChild),
}

impl NodeKind {
    /// Construct name, as shown in "not supported" markers.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::And { .. } => "And",
            NodeKind::Or { .. } => "Or",
            NodeKind::AndAsgn { .. } => "AndAsgn",
            NodeKind::OrAsgn { .. } => "OrAsgn",
            NodeKind::OpAsgn { .. } => "OpAsgn",
            NodeKind::Send { .. } => "Send",
            NodeKind::CSend { .. } => "CSend",
            NodeKind::Super(_) => "Super",
            NodeKind::ZSuper => "ZSuper",
            NodeKind::Block { .. } => "Block",
            NodeKind::BlockPass(_) => "BlockPass",
            NodeKind::Lambda => "Lambda",
            NodeKind::SelfNode => "Self",
            NodeKind::Nil => "Nil",
            NodeKind::True => "True",
            NodeKind::False => "False",
            NodeKind::Integer(_) => "Integer",
            NodeKind::Float(_) => "Float",
            NodeKind::Rational(_) => "Rational",
            NodeKind::Complex(_) => "Complex",
            NodeKind::String(_) => "String",
            NodeKind::DString(_) => "DString",
            NodeKind::XString(_) => "XString",
            NodeKind::Symbol(_) => "Symbol",
            NodeKind::DSymbol(_) => "DSymbol",
            NodeKind::Regexp { .. } => "Regexp",
            NodeKind::FileLiteral => "FileLiteral",
            NodeKind::LineLiteral => "LineLiteral",
            NodeKind::Array(_) => "Array",
            NodeKind::Hash(_) => "Hash",
            NodeKind::Pair { .. } => "Pair",
            NodeKind::Kwsplat(_) => "Kwsplat",
            NodeKind::Splat(_) => "Splat",
            NodeKind::IRange { .. } => "IRange",
            NodeKind::ERange { .. } => "ERange",
            NodeKind::Const { .. } => "Const",
            NodeKind::ConstLhs { .. } => "ConstLhs",
            NodeKind::Cbase => "Cbase",
            NodeKind::LVar(_) => "LVar",
            NodeKind::IVar(_) => "IVar",
            NodeKind::GVar(_) => "GVar",
            NodeKind::CVar(_) => "CVar",
            NodeKind::LVarLhs(_) => "LVarLhs",
            NodeKind::IVarLhs(_) => "IVarLhs",
            NodeKind::GVarLhs(_) => "GVarLhs",
            NodeKind::CVarLhs(_) => "CVarLhs",
            NodeKind::Backref(_) => "Backref",
            NodeKind::NthRef(_) => "NthRef",
            NodeKind::Assign { .. } => "Assign",
            NodeKind::Masgn { .. } => "Masgn",
            NodeKind::Mlhs(_) => "Mlhs",
            NodeKind::Defined(_) => "Defined",
            NodeKind::Begin(_) => "Begin",
            NodeKind::Kwbegin(_) => "Kwbegin",
            NodeKind::Module { .. } => "Module",
            NodeKind::Class { .. } => "Class",
            NodeKind::SClass { .. } => "SClass",
            NodeKind::Def { .. } => "DefMethod",
            NodeKind::Defs { .. } => "DefS",
            NodeKind::Alias { .. } => "Alias",
            NodeKind::Undef(_) => "Undef",
            NodeKind::Args(_) => "Args",
            NodeKind::Arg(_) => "Arg",
            NodeKind::Optarg { .. } => "Optarg",
            NodeKind::Restarg(_) => "Restarg",
            NodeKind::Kwarg(_) => "Kwarg",
            NodeKind::Kwoptarg { .. } => "Kwoptarg",
            NodeKind::Kwrestarg(_) => "Kwrestarg",
            NodeKind::Blockarg(_) => "Blockarg",
            NodeKind::Shadowarg(_) => "Shadowarg",
            NodeKind::If { .. } => "If",
            NodeKind::Case { .. } => "Case",
            NodeKind::When { .. } => "When",
            NodeKind::While { .. } => "While",
            NodeKind::WhilePost { .. } => "WhilePost",
            NodeKind::Until { .. } => "Until",
            NodeKind::UntilPost { .. } => "UntilPost",
            NodeKind::For { .. } => "For",
            NodeKind::Return(_) => "Return",
            NodeKind::Break(_) => "Break",
            NodeKind::Next(_) => "Next",
            NodeKind::Yield(_) => "Yield",
            NodeKind::Redo => "Redo",
            NodeKind::Retry => "Retry",
            NodeKind::Rescue { .. } => "Rescue",
            NodeKind::Resbody { .. } => "Resbody",
            NodeKind::Ensure { .. } => "Ensure",
            NodeKind::Preexe(_) => "Preexe",
            NodeKind::Postexe(_) => "Postexe",
        }
    }
}
