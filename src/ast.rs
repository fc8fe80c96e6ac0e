//! Abstract syntax tree shared by the parser and the interpreter.
//!
//! Nodes own their data (names are `String`s, not token borrows) so a parsed
//! program can outlive the source buffer; this matters for closures created in
//! one REPL entry and called from a later one. Nodes that can fail at runtime
//! keep the [`Position`] of the token that produced them.

use std::rc::Rc;

use crate::token::Position;

/// A **literal constant** that appears directly in the source code.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Numeric literal, stored as IEEE‑754 `f64`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    True,
    False,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`, truthiness negation
    Not,

    /// `-`, numeric negation
    Negate,
}

/// Postfix `++` / `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncDecOp {
    Increment,
    Decrement,
}

impl IncDecOp {
    pub fn symbol(self) -> &'static str {
        match self {
            IncDecOp::Increment => "++",
            IncDecOp::Decrement => "--",
        }
    }

    pub fn delta(self) -> f64 {
        match self {
            IncDecOp::Increment => 1.0,
            IncDecOp::Decrement => -1.0,
        }
    }
}

/// Built-in methods callable on a list variable with `name.method(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMethod {
    /// `xs.push(v)` appends `v`.
    Push,

    /// `xs.pop()` removes and yields the last element.
    Pop,

    /// `xs.remove(i)` removes and yields the element at `i`.
    Remove,

    /// `xs.insertAt(i, v)` inserts `v` before position `i`.
    InsertAt,

    /// `xs.index(v)` yields the position of the first element equal to `v`, or -1.
    Index,

    /// `xs.len()`
    Len,

    /// `xs.sort()` sorts ascending and yields the sorted list.
    Sort,
}

impl ListMethod {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "push" => Some(ListMethod::Push),
            "pop" => Some(ListMethod::Pop),
            "remove" => Some(ListMethod::Remove),
            "insertAt" => Some(ListMethod::InsertAt),
            "index" => Some(ListMethod::Index),
            "len" => Some(ListMethod::Len),
            "sort" => Some(ListMethod::Sort),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ListMethod::Push => "push",
            ListMethod::Pop => "pop",
            ListMethod::Remove => "remove",
            ListMethod::InsertAt => "insertAt",
            ListMethod::Index => "index",
            ListMethod::Len => "len",
            ListMethod::Sort => "sort",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            ListMethod::Pop | ListMethod::Len | ListMethod::Sort => 0,
            ListMethod::Push | ListMethod::Remove | ListMethod::Index => 1,
            ListMethod::InsertAt => 2,
        }
    }

    /// Whether the method writes a new list back to the receiver.
    pub fn mutates(self) -> bool {
        !matches!(self, ListMethod::Index | ListMethod::Len)
    }
}

/// Every kind of *expression* in Sprig.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `name = value`, right‑associative.
    Assign {
        name: String,
        value: Box<Expr>,
        position: Position,
    },

    /// Short‑circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: LogicalOp,
        right: Box<Expr>,
    },

    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        position: Position,
    },

    Unary {
        operator: UnaryOp,
        right: Box<Expr>,
        position: Position,
    },

    /// `name++` / `name--`. Yields the value held *before* the update.
    PostfixIncDec {
        name: String,
        operator: IncDecOp,
        position: Position,
    },

    /// `left in right` / `left not in right`.
    Membership {
        left: Box<Expr>,
        negated: bool,
        right: Box<Expr>,
        position: Position,
    },

    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
        /// Position of the opening `(`.
        position: Position,
    },

    /// `object[index]` on a list or string.
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        /// Position of the `[`.
        position: Position,
    },

    /// `object[start:end]`, both bounds inclusive and optional.
    Slice {
        object: Box<Expr>,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
        position: Position,
    },

    /// `name.method(arguments)` on the list bound to `name`.
    MethodCall {
        receiver: String,
        method: ListMethod,
        arguments: Vec<Expr>,
        /// Position of the method name.
        position: Position,
    },

    /// `[a, b, c]`
    List {
        items: Vec<Expr>,
        position: Position,
    },

    Literal(LiteralValue),

    Variable {
        name: String,
        position: Position,
    },

    /// Parenthesised sub‑expression.
    Grouping(Box<Expr>),
}

impl Expr {
    /// Best source position for diagnostics about this expression.
    pub fn position(&self) -> Option<Position> {
        match self {
            Expr::Assign { position, .. }
            | Expr::Binary { position, .. }
            | Expr::Unary { position, .. }
            | Expr::PostfixIncDec { position, .. }
            | Expr::Membership { position, .. }
            | Expr::Call { position, .. }
            | Expr::Index { position, .. }
            | Expr::Slice { position, .. }
            | Expr::MethodCall { position, .. }
            | Expr::List { position, .. }
            | Expr::Variable { position, .. } => Some(*position),
            Expr::Logical { left, .. } => left.position(),
            Expr::Grouping(inner) => inner.position(),
            Expr::Literal(_) => None,
        }
    }
}

/// A `def` declaration. Shared (`Rc`) between the AST and every closure
/// created from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub position: Position,
}

/// One `elif condition: body` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ElifClause {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

/// **Statement** nodes. Every `Vec<Stmt>` body is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Function(Rc<FunctionDecl>),

    /// `let name (= initializer)?;`
    Var {
        name: String,
        initializer: Option<Expr>,
    },

    Expression(Expr),

    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        elif_branches: Vec<ElifClause>,
        else_branch: Option<Vec<Stmt>>,
    },

    Print(Expr),

    Return {
        value: Option<Expr>,
        /// Position of the `return` keyword.
        position: Position,
    },

    While {
        condition: Expr,
        body: Vec<Stmt>,
    },

    /// `for variable in iterable (step step)?: body`
    For {
        variable: String,
        iterable: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>,
        /// Position of the `for` keyword.
        position: Position,
    },
}

impl Stmt {
    pub fn position(&self) -> Option<Position> {
        match self {
            Stmt::Function(decl) => Some(decl.position),
            Stmt::Var { initializer, .. } => initializer.as_ref().and_then(Expr::position),
            Stmt::Expression(expr) | Stmt::Print(expr) => expr.position(),
            Stmt::If { condition, .. } | Stmt::While { condition, .. } => condition.position(),
            Stmt::Return { position, .. } | Stmt::For { position, .. } => Some(*position),
        }
    }
}
