use crate::parser::token::Token;

/// Root of the tree. Items are kept in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<TopItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TopItem {
    /// int x = 5;
    VarDecl(VarDecl),
    /// call show(x); / x + 1 = x; / if (...) { ... }
    Stmt(Stmt),
    /// func int add(int a, int b) { ... }
    Func(FuncDef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: Token,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Token,
    pub ty: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Int,
    Float,
    Char,
    String,
    Bool,
    Void,
}

impl TypeKind {
    pub fn name(self) -> &'static str {
        match self {
            TypeKind::Int => "int",
            TypeKind::Float => "float",
            TypeKind::Char => "char",
            TypeKind::String => "string",
            TypeKind::Bool => "bool",
            TypeKind::Void => "void",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    /// `None` only for the implicit void return of `func name(...)`.
    pub token: Option<Token>,
    /// Number of `[]` pairs; 0 for scalars.
    pub array_rank: usize,
}

impl Type {
    pub fn implicit_void() -> Self {
        Self {
            kind: TypeKind::Void,
            token: None,
            array_rank: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// 10
    Literal { token: Token, value: i64 },
    /// x
    Ident { name: Token },
    /// m[i][j]
    Index { name: Token, indices: Vec<Expr> },
    /// (a + b)
    Grouping { inner: Box<Expr> },
    /// call add(1, 2)
    Call(CallExpr),
    /// a + b, a < b
    Binary {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    /// The `call` keyword itself, kept for its position.
    pub call: Token,
    pub callee: Token,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: Type,
    /// Dimension sizes, outermost first. Empty for scalars.
    pub dims: Vec<Expr>,
    pub names: Vec<Token>,
    /// Initializer of the first name.
    pub init: Option<Initializer>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Initializer {
    Expr(Expr),
    /// One brace level per array dimension.
    List(Vec<Initializer>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LValue {
    pub name: Token,
    pub indices: Vec<Expr>,
}

/// `value = target;` The value flows left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub value: Expr,
    pub target: LValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfArm {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub arm: IfArm,
    /// `or if` arms, in source order.
    pub alternates: Vec<IfArm>,
    pub otherwise: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDecl),
    /// return x;
    Return { value: Expr },
    Assign(Assign),
    /// call show(x);
    Call(CallExpr),
    If(IfStmt),
    /// for (i moves from 1 to 10) { ... }
    For {
        var: Token,
        from: Expr,
        to: Expr,
        body: Vec<Stmt>,
    },
    /// for (int i = 0; i < n; i + 1 = i) { ... }
    ForClassic {
        init: VarDecl,
        condition: Expr,
        step: Assign,
        body: Vec<Stmt>,
    },
    /// while (x > 0) { ... }
    While { condition: Expr, body: Vec<Stmt> },
}
