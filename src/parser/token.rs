//! Provides a representation of the tokens of the language which include debugging information
//! which can be used to display useful error messages, and the data needed to produce the abstract
//! syntax tree.
use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;


/// All the possible types of tokens that a token may take.
///
/// Unlike literal-carrying token enums, the text of every token lives in [`Token::lexeme`], so the
/// type is a plain tag which can be compared and copied freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Number,
    String,
    Comment,
    Symbol,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,

    Comma,
    Dot,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Equal,
    Colon,
    Walrus,
    Exclamation,

    Equality,
    Greater,
    Lesser,
    GreaterEq,
    LesserEq,
    And,
    Or,

    DoubleColon,

    Function,
    If,
    Else,

    Eof
}


/// Punctuation and operator spellings, longest first so that the lexer always prefers `==` over
/// `=` and `:=` over `:`.
pub static SYMBOL_TOKENS: LazyLock<IndexMap<&'static str, TokenType>> = LazyLock::new(|| {
    let mut symbols: IndexMap<&'static str, TokenType> = IndexMap::from([
        ("[", TokenType::OpenBracket),
        ("]", TokenType::CloseBracket),
        ("(", TokenType::OpenParen),
        (")", TokenType::CloseParen),
        ("{", TokenType::OpenBrace),
        ("}", TokenType::CloseBrace),
        (",", TokenType::Comma),
        (".", TokenType::Dot),
        ("+", TokenType::Plus),
        ("-", TokenType::Minus),
        ("*", TokenType::Star),
        ("/", TokenType::Slash),
        ("%", TokenType::Percent),
        ("=", TokenType::Equal),
        (":", TokenType::Colon),
        ("==", TokenType::Equality),
        (":=", TokenType::Walrus),
        (">", TokenType::Greater),
        ("<", TokenType::Lesser),
        (">=", TokenType::GreaterEq),
        ("<=", TokenType::LesserEq),
        ("&&", TokenType::And),
        ("||", TokenType::Or),
        ("!", TokenType::Exclamation),
        ("::", TokenType::DoubleColon),
    ]);

    // stable sort, so equal-length spellings keep their declaration order
    symbols.sort_by(|a, _, b, _| b.len().cmp(&a.len()));
    symbols
});


/// Letter runs which are keywords rather than identifiers.
pub static KEYWORD_TOKENS: LazyLock<IndexMap<&'static str, TokenType>> = LazyLock::new(|| {
    IndexMap::from([
        ("fn", TokenType::Function),
        ("if", TokenType::If),
        ("else", TokenType::Else),
    ])
});


/// Metadata for tokens required for parsing and debugging/error messages
///
/// `position` is the zero-based `(row, col)` of the first character of the token, counted in
/// characters. The end-of-file sentinel is the only token without a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub position: Option<(usize, usize)>
}


impl Token {
    /// Creates a new token from the information passed as arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyless::parser::token::{Token, TokenType};
    ///
    /// let token = Token::new(TokenType::Symbol, "my_id", 5, 20);
    /// assert_eq!(token.position, Some((5, 20)));
    /// ```
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            position: Some((row, col))
        }
    }


    /// The end-of-file sentinel which terminates every token stream handed to the parser.
    pub fn eof() -> Self {
        Self {
            token_type: TokenType::Eof,
            lexeme: "EOF".to_owned(),
            position: None
        }
    }


    /// Returns the 1-indexed `(line, column)` of this token, as shown to users in error messages,
    /// or `None` for the end-of-file sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyless::parser::token::{Token, TokenType};
    ///
    /// let token = Token::new(TokenType::Comma, ",", 0, 5);
    /// assert_eq!(token.line_col(), Some((1, 6)));
    /// assert_eq!(Token::eof().line_col(), None);
    /// ```
    pub fn line_col(&self) -> Option<(usize, usize)> {
        match self.token_type {
            TokenType::Eof => None,
            _ => self.position.map(|(row, col)| (row + 1, col + 1))
        }
    }


    /// Returns true if this token is of any of the given types.
    pub fn is_any(&self, types: &[TokenType]) -> bool {
        types.contains(&self.token_type)
    }
}


impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.line_col() {
            Some((line, col)) => write!(f, "{:?} '{}' at ({}, {})", self.token_type, self.lexeme, line, col),
            None => write!(f, "{:?}", self.token_type)
        }
    }
}
