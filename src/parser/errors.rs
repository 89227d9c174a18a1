use thiserror::Error;

use super::token::Token;


/// Raised by the scanner when part of a line matches no token pattern.
///
/// Every character is expected to be covered by the token tables, so this signals a gap in those
/// tables rather than a mistake in the program being transpiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexingError {
    #[error("Could not recognize token `{text}` on line {line} and column {col}")]
    UnrecognizedToken { text: String, line: usize, col: usize }
}


/// A syntax error. Lines and columns are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsingError {
    #[error("SyntaxError: Unexpected Token `{lexeme}` on line {line} and column {col}")]
    UnexpectedToken { lexeme: String, line: usize, col: usize },

    #[error("SyntaxError: Unexpected End of File")]
    UnexpectedEof,

    #[error("SyntaxError: Expected `{expected}` on line {line} and column {col}")]
    ExpectedToken { expected: &'static str, line: usize, col: usize },

    #[error("SyntaxError: Expected Identifier on line {line} and column {col}")]
    ExpectedIdentifier { line: usize, col: usize },

    #[error("SyntaxError: Invalid left hand of assignment on line {line} and column {col}")]
    InvalidAssignmentTarget { line: usize, col: usize },

    #[error("SyntaxError: Unexpected Comment on line {line} and column {col}")]
    UnexpectedComment { line: usize, col: usize },

    #[error("SyntaxError: Expression nested too deeply on line {line} and column {col}")]
    NestingTooDeep { line: usize, col: usize },

    #[error(transparent)]
    Lexing(#[from] LexingError)
}


impl ParsingError {
    /// Builds an error located at `token`. Running into the end of the input always reports
    /// [`ParsingError::UnexpectedEof`], whatever the parser was looking for.
    pub(crate) fn at(token: &Token, build: impl FnOnce(usize, usize) -> Self) -> Self {
        match token.line_col() {
            Some((line, col)) => build(line, col),
            None => Self::UnexpectedEof
        }
    }


    pub(crate) fn unexpected(token: &Token) -> Self {
        Self::at(token, |line, col| Self::UnexpectedToken { lexeme: token.lexeme.clone(), line, col })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::TokenType;
    use test_log::test;

    #[test]
    fn eof_has_no_position() {
        let err = ParsingError::at(&Token::eof(), |line, col| ParsingError::ExpectedIdentifier { line, col });
        assert_eq!(err, ParsingError::UnexpectedEof);
        assert_eq!(err.to_string(), "SyntaxError: Unexpected End of File");
    }

    #[test]
    fn unexpected_token_message() {
        let err = ParsingError::unexpected(&Token::new(TokenType::Plus, "+", 0, 0));
        assert_eq!(err.to_string(), "SyntaxError: Unexpected Token `+` on line 1 and column 1");
    }

    #[test]
    fn lexing_errors_pass_through() {
        let err: ParsingError = LexingError::UnrecognizedToken { text: "@".to_owned(), line: 2, col: 4 }.into();
        assert_eq!(err.to_string(), "Could not recognize token `@` on line 2 and column 4");
    }
}
