// ABOUTME: AST node definitions produced by the parser and consumed by the evaluator

/// A full program: a flat list of top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `:> expr, expr, ...`
    Print(Vec<Expr>),
    /// `$name <- expr`
    Assign { name: String, value: Expr },
    /// `? cond { ... } else { ... }`
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    /// `~ cond { ... }`
    While { cond: Expr, body: Vec<Stmt> },
    /// `@> $var in iter { ... }`
    ForLoop {
        var: String,
        iter: Expr,
        body: Vec<Stmt>,
    },
    /// `@ name(params) { ... }`
    FuncDef {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    /// `!> expr`
    Return(Expr),
    Break,
    Continue,
    /// A bare expression evaluated for its side effects (e.g. a call statement).
    ExprStmt(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Str(String),
    Bool(bool),
    ListLit(Vec<Expr>),
    Var(String),
    Index(Box<Expr>, Box<Expr>),
    Call(String, Vec<Expr>),
    BinOp(BinOp, Box<Expr>, Box<Expr>),
    Compare(CmpOp, Box<Expr>, Box<Expr>),
    /// `and`/`or` need short-circuit access to the unevaluated right side.
    Logical(LogicOp, Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}
