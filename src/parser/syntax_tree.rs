//! The abstract syntax tree produced by the parser and consumed by the transpiler.
//!
//! Nodes are plain owned data. Once the parser has built a node nothing modifies it again: in
//! particular whether an expression was wrapped in parentheses is fixed when the node is built,
//! see [`Expr::parenthesize`].
use super::token::TokenType;


/// An ordered sequence of statements. The root of every program is a block with no enclosing
/// braces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub body: Vec<Stmt>
}


impl Block {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}


#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    If(IfStmt),
    // trimmed comment text, without the leading `//`
    Comment(String),
    Expr(Expr)
}


impl From<Expr> for Stmt {
    fn from(expr: Expr) -> Self {
        Stmt::Expr(expr)
    }
}


impl From<IfStmt> for Stmt {
    fn from(stmt: IfStmt) -> Self {
        Stmt::If(stmt)
    }
}


/// `if (condition) body else else_body`. An `else if` is stored as an else block holding exactly
/// one nested [`IfStmt`].
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub body: Block,
    pub else_body: Option<Block>
}


impl IfStmt {
    pub fn new(condition: Expr, body: Block, else_body: Option<Block>) -> Self {
        Self { condition, body, else_body }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equality,
    Greater,
    Lesser,
    GreaterEq,
    LesserEq,
    And,
    Or
}


impl BinaryOperator {
    /// Returns the operator a token stands for when it appears between two operands.
    pub fn from_token(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Plus => Some(Self::Add),
            TokenType::Minus => Some(Self::Subtract),
            TokenType::Star => Some(Self::Multiply),
            TokenType::Slash => Some(Self::Divide),
            TokenType::Percent => Some(Self::Modulo),
            TokenType::Equality => Some(Self::Equality),
            TokenType::Greater => Some(Self::Greater),
            TokenType::Lesser => Some(Self::Lesser),
            TokenType::GreaterEq => Some(Self::GreaterEq),
            TokenType::LesserEq => Some(Self::LesserEq),
            TokenType::And => Some(Self::And),
            TokenType::Or => Some(Self::Or),
            _ => None
        }
    }


    /// `*`, `/` and `%` bind tighter than every other binary operator, which all share one tier.
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, Self::Multiply | Self::Divide | Self::Modulo)
    }


    /// The spelling of the operator in source text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Equality => "==",
            Self::Greater => ">",
            Self::Lesser => "<",
            Self::GreaterEq => ">=",
            Self::LesserEq => "<=",
            Self::And => "&&",
            Self::Or => "||"
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreUnaryOperator {
    Not,
    Negate
}


impl PreUnaryOperator {
    pub fn from_token(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Exclamation => Some(Self::Not),
            TokenType::Minus => Some(Self::Negate),
            _ => None
        }
    }


    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Negate => "-"
        }
    }
}


/// Operators written after their operand. The language currently has none, so no value of this
/// type can exist; the parser still runs the postfix stage so that adding a variant is enough to
/// support one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostUnaryOperator {}


impl PostUnaryOperator {
    pub fn from_token(_token_type: TokenType) -> Option<Self> {
        None
    }


    pub fn as_str(&self) -> &'static str {
        match *self {}
    }
}


/// One `key: value` entry of a dictionary literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: Expr,
    pub value: Expr
}


impl Property {
    pub fn new(key: Expr, value: Expr) -> Self {
        Self { key, value }
    }
}


#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Identifier(String),
    // the literal's text as written; never converted to a numeric value
    Number(String),
    // contents between the quotes, escape sequences left as written
    Str(String),
    Boolean(bool),
    // target name, value
    Assignment(String, Box<Expr>),
    // left, right, operator
    Binary(Box<Expr>, Box<Expr>, BinaryOperator),
    PreUnary(PreUnaryOperator, Box<Expr>),
    PostUnary(PostUnaryOperator, Box<Expr>),
    // caller, arguments
    Call(Box<Expr>, Vec<Expr>),
    // indexed value, index
    Index(Box<Expr>, Box<Expr>),
    // value, member name
    Method(Box<Expr>, String),
    Dictionary(Vec<Property>),
    List(Vec<Expr>)
}


/// An expression together with whether the source wrapped it in parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub parenthesized: bool
}


impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self { kind, parenthesized: false }
    }


    /// Marks the expression as written inside parentheses. Nested parentheses collapse into a
    /// single layer, so applying this twice is the same as applying it once.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyless::parser::syntax_tree::Expr;
    ///
    /// let expr = Expr::identifier("a").parenthesize();
    /// assert_eq!(expr.clone().parenthesize(), expr);
    /// assert!(expr.parenthesized);
    /// ```
    pub fn parenthesize(self) -> Self {
        Self { parenthesized: true, ..self }
    }


    /// Only a bare identifier may appear on the left of `=`.
    pub fn as_assignment_target(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(name) if !self.parenthesized => Some(name),
            _ => None
        }
    }


    pub fn identifier(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Identifier(name.into()))
    }


    pub fn number(text: impl Into<String>) -> Self {
        Self::new(ExprKind::Number(text.into()))
    }


    pub fn string(content: impl Into<String>) -> Self {
        Self::new(ExprKind::Str(content.into()))
    }


    pub fn boolean(value: bool) -> Self {
        Self::new(ExprKind::Boolean(value))
    }


    pub fn assignment(target: impl Into<String>, value: Expr) -> Self {
        Self::new(ExprKind::Assignment(target.into(), Box::new(value)))
    }


    pub fn binary(left: Expr, right: Expr, operator: BinaryOperator) -> Self {
        Self::new(ExprKind::Binary(Box::new(left), Box::new(right), operator))
    }


    pub fn pre_unary(operator: PreUnaryOperator, operand: Expr) -> Self {
        Self::new(ExprKind::PreUnary(operator, Box::new(operand)))
    }


    pub fn post_unary(operator: PostUnaryOperator, operand: Expr) -> Self {
        Self::new(ExprKind::PostUnary(operator, Box::new(operand)))
    }


    pub fn call(caller: Expr, args: Vec<Expr>) -> Self {
        Self::new(ExprKind::Call(Box::new(caller), args))
    }


    pub fn index(indexable: Expr, index: Expr) -> Self {
        Self::new(ExprKind::Index(Box::new(indexable), Box::new(index)))
    }


    pub fn method(value: Expr, member: impl Into<String>) -> Self {
        Self::new(ExprKind::Method(Box::new(value), member.into()))
    }


    pub fn dictionary(properties: Vec<Property>) -> Self {
        Self::new(ExprKind::Dictionary(properties))
    }


    pub fn list(elements: Vec<Expr>) -> Self {
        Self::new(ExprKind::List(elements))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn assignment_targets() {
        assert_eq!(Expr::identifier("a").as_assignment_target(), Some("a"));
        assert_eq!(Expr::identifier("a").parenthesize().as_assignment_target(), None);
        assert_eq!(Expr::number("1").as_assignment_target(), None);
        assert_eq!(Expr::boolean(true).as_assignment_target(), None);
    }

    #[test]
    fn operator_tables_agree() {
        for token_type in [TokenType::Plus, TokenType::Or, TokenType::LesserEq, TokenType::Percent] {
            let op = BinaryOperator::from_token(token_type).unwrap();
            assert!(!op.as_str().is_empty());
        }
        assert_eq!(BinaryOperator::from_token(TokenType::Equal), None);
        assert!(BinaryOperator::Modulo.is_multiplicative());
        assert!(!BinaryOperator::Subtract.is_multiplicative());
        assert_eq!(PreUnaryOperator::from_token(TokenType::Minus), Some(PreUnaryOperator::Negate));
        assert_eq!(PreUnaryOperator::from_token(TokenType::Plus), None);
        assert_eq!(PostUnaryOperator::from_token(TokenType::Plus), None);
        assert_eq!(PreUnaryOperator::Negate.as_str(), "-");
        assert_eq!(PreUnaryOperator::Not.as_str(), "!");
    }
}
