use crate::span::Spanned;

/// One node of a parsed expression. The set of variants is closed: passes
/// dispatch with `match` (or the `visit` module) rather than by subclassing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Operator {
        op: BinOp,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },
    UnaryOperator {
        op: UnaryOp,
        factor: Box<Spanned<Expr>>,
    },
    /// Parenthesized expression. The span includes the parentheses.
    SubExpression(Box<Spanned<Expr>>),
    /// Numeric literal, kept as written.
    Number(String),
    /// String literal (unescaped value). The span includes the quotes.
    Text(String),
    Identifier(String),
    /// `Name` followed by at least one accessor: `Name.child`, `Name[expr]`.
    Variable {
        name: String,
        child: Option<Box<Spanned<Expr>>>,
    },
    /// `.name` in a variable accessor chain.
    VariableAccessor {
        name: String,
        child: Option<Box<Spanned<Expr>>>,
    },
    /// `[expr]` in a variable accessor chain.
    VariableBracketAccessor {
        expr: Box<Spanned<Expr>>,
        child: Option<Box<Spanned<Expr>>>,
    },
    /// `Object.Behavior::Function` written without an argument list.
    ObjectFunctionName {
        object_name: Spanned<String>,
        behavior_name: Option<Spanned<String>>,
        function_name: Spanned<String>,
    },
    FunctionCall(FunctionCall),
    /// A missing operand or argument.
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Object the call acts on; `None` for a free function.
    pub object_name: Option<Spanned<String>>,
    pub behavior_name: Option<Spanned<String>>,
    pub function_name: Spanned<String>,
    pub args: Vec<Spanned<Expr>>,
}

impl FunctionCall {
    pub fn is_object_function(&self) -> bool {
        self.object_name.is_some()
    }

    pub fn object_name(&self) -> Option<&str> {
        self.object_name.as_ref().map(|n| n.node.as_str())
    }

    pub fn behavior_name(&self) -> Option<&str> {
        self.behavior_name.as_ref().map(|n| n.node.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Neq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "=",
            BinOp::Neq => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::LtEq => "<=",
            BinOp::GtEq => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
        };
        f.write_str(s)
    }
}
