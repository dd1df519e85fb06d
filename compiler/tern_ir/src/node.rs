//! Syntax nodes and the program-graph annotations attached to them.

use std::fmt;

use smallvec::SmallVec;

use crate::{Name, NodeId, ScopeId, TypeId};

/// Binary operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    BitAnd,
    BitOr,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    LogicalAnd,
    LogicalOr,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Quo => "/",
            BinaryOp::Rem => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
        }
    }

    /// Comparison and logical operators produce `bool` regardless of operand type.
    pub fn yields_bool(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::Gt
                | BinaryOp::LtEq
                | BinaryOp::GtEq
                | BinaryOp::LogicalAnd
                | BinaryOp::LogicalOr
        )
    }
}

/// Unary operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
    /// `&x`
    Addr,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IncDec {
    Inc,
    Dec,
}

/// Closed set of syntax node kinds.
///
/// Child layout is positional; the shapes that analysis depends on are:
///
/// | Kind         | Children                                       |
/// |--------------|------------------------------------------------|
/// | `File`       | `[Ident package, decls...]`                    |
/// | `ImportSpec` | `[Ident alias?, BasicLit path]`                |
/// | `TypeSpec`   | `[Ident name, type expr]`                      |
/// | `FuncDecl`   | `[FieldList recv, Ident name, FuncType, BlockStmt?]` |
/// | `FuncType`   | `[FieldList params, FieldList results?]`       |
/// | `Field`      | `[Ident names..., type expr]`                  |
/// | `Define`     | `[Ident name, type-or-value?...]`              |
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    File,
    Ident,
    BasicLit,
    ImportSpec,
    TypeSpec,
    FuncDecl,
    FuncType,
    FieldList,
    Field,
    BlockStmt,
    /// `*T` in type position, `*p` in value position.
    StarExpr,
    ArrayType,
    StructType,
    CompositeLit,
    /// A comma-grouped declaration: `var a, b int`.
    DeclGroup,
    Define,
    BinaryExpr(BinaryOp),
    UnaryExpr(UnaryOp),
    CallExpr,
    IndexExpr,
    SelectorExpr,
    ParenExpr,
    AssignStmt,
    IncDecStmt(IncDec),
    ExprStmt,
    ReturnStmt,
    IfStmt,
    ForStmt,
    RangeStmt,
    SwitchStmt,
    CaseClause,
}

/// Literal payload of a `BasicLit`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Str(Name),
}

impl Literal {
    /// Type of the literal.
    pub fn type_id(self) -> TypeId {
        match self {
            Literal::Int(_) => TypeId::INT,
            Literal::Bool(_) => TypeId::BOOL,
            Literal::Str(_) => TypeId::STRING,
        }
    }
}

/// Runtime operation selected for a node when the program graph is built.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Action {
    #[default]
    Nop,
    Add,
    Sub,
    Mul,
    And,
    Equal,
    Greater,
    Lower,
    Land,
    Lor,
    Inc,
    Dec,
    Assign,
    AssignX,
    ArrayLit,
    GetIndex,
    Range,
    Case,
    Call,
    Return,
    Define,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Nop => "nop",
            Action::Add => "add",
            Action::Sub => "sub",
            Action::Mul => "mul",
            Action::And => "and",
            Action::Equal => "equal",
            Action::Greater => "greater",
            Action::Lower => "lower",
            Action::Land => "land",
            Action::Lor => "lor",
            Action::Inc => "inc",
            Action::Dec => "dec",
            Action::Assign => "assign",
            Action::AssignX => "assignx",
            Action::ArrayLit => "arraylit",
            Action::GetIndex => "getindex",
            Action::Range => "range",
            Action::Case => "case",
            Action::Call => "call",
            Action::Return => "return",
            Action::Define => "define",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage location of a node's value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Slot {
    /// Index into the current activation frame.
    Local(u32),
    /// Package-level variable: slot `index` of the package scope's frame.
    Global { scope: ScopeId, index: u32 },
}

/// A syntax node.
///
/// The structural half is written by the parser. The annotation half is
/// written afterwards: `typ`, `scope` and global slots by type analysis,
/// the rest by the CFG builder.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: SmallVec<[NodeId; 4]>,
    pub parent: Option<NodeId>,
    pub val: Option<Literal>,
    pub name: Option<Name>,

    pub typ: Option<TypeId>,
    pub scope: Option<ScopeId>,

    pub slot: Option<Slot>,
    pub action: Action,
    pub tnext: Option<NodeId>,
    pub fnext: Option<NodeId>,
    /// Entry node of a function body.
    pub start: Option<NodeId>,
    /// Number of frame slots a function activation needs.
    pub frame_len: Option<u32>,
    /// Resolved function declaration of a call.
    pub callee: Option<NodeId>,
    /// Switch tag compared by a case clause.
    pub scrutinee: Option<NodeId>,
    /// Hidden frame slot (range cursor).
    pub aux: Option<u32>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            children: SmallVec::new(),
            parent: None,
            val: None,
            name: None,
            typ: None,
            scope: None,
            slot: None,
            action: Action::Nop,
            tnext: None,
            fnext: None,
            start: None,
            frame_len: None,
            callee: None,
            scrutinee: None,
            aux: None,
        }
    }

    #[inline]
    pub fn child(&self, i: usize) -> Option<NodeId> {
        self.children.get(i).copied()
    }

    #[inline]
    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind == kind
    }
}
