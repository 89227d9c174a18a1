//! Provides a struct `Scanner` for lexical analysis of source text into a `Vec<Token>`.
//!
//! The scanner works line by line: every line is matched against a single regular expression
//! whose alternatives are, in priority order, a line comment, a string literal, a run of letters
//! (keyword or identifier), a number, and one of the known punctuation symbols. Anything else
//! that is not whitespace is an error.
//!
//! # Examples
//!
//! ```
//! use pyless::parser::lexing::Scanner;
//!
//! let scanner = Scanner::new("a = 1 // set a").unwrap();
//! assert_eq!(scanner.tokens.len(), 4);
//! ```
use std::sync::LazyLock;

use log::debug;
use regex::{Captures, Regex};

use super::errors::LexingError;
use super::token::*;


static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let symbols = SYMBOL_TOKENS.keys()
                               .map(|symbol| regex::escape(symbol))
                               .collect::<Vec<String>>()
                               .join("|");

    let pattern = format!(
        r#"//(?P<comment>.*)|(?P<string>"[^"]*")|(?P<word>[a-zA-Z]+)|(?P<number>[0-9]+(?:\.[0-9]+)?(?:e-?[0-9]+)?)|(?P<symbol>{symbols})|(?P<unknown>\S)"#
    );
    Regex::new(&pattern).expect("token pattern is built from escaped table entries")
});


/// Contains the data required to lexically analyse source text, the output of which is in the
/// public `tokens` attribute.
///
/// The [`Scanner::new()`] method performs the whole analysis up front. Lexing is done
/// line-by-line and the line currently being lexed is tracked by the `line` attribute, which is
/// 0-indexed like the positions stored on the tokens.
pub struct Scanner {
    pub tokens: Vec<Token>, // tokens in source order, without the end-of-file sentinel
    line: usize // the current line in the source text being processed
}


impl Scanner {
    /// Performs lexical analysis of `source`, turning it into a stream of tokens.
    ///
    /// Windows line endings are normalised before the text is split into lines.
    ///
    /// # Errors
    ///
    /// Returns a [`LexingError`] if any non-whitespace text cannot be categorized.
    pub fn new(source: &str) -> Result<Self, LexingError> {
        let mut scanner: Self = Self {
            tokens: Vec::new(),
            line: 0
        };

        let source = source.replace("\r\n", "\n");
        for line in source.split('\n') {
            scanner.scan_line(line)?;
            scanner.line += 1;
        }

        debug!("scanned {} tokens from {} lines", scanner.tokens.len(), scanner.line);
        Ok(scanner)
    }


    /// Lexically analyses a single line and places the tokens therein into `self.tokens`.
    fn scan_line(&mut self, line: &str) -> Result<(), LexingError> {
        // byte offset and character column of the previous match, so each character is counted once
        let mut offset = 0;
        let mut col = 0;
        for captures in TOKEN_PATTERN.captures_iter(line) {
            let start = captures.get(0).map_or(offset, |m| m.start());
            col += line[offset..start].chars().count();
            offset = start;

            if let Some(token) = self.categorize_token(&captures, col)? {
                self.tokens.push(token);
            }
        }

        Ok(())
    }


    /// Turns one regex match into a token. Comments with nothing in them produce no token.
    fn categorize_token(&self, captures: &Captures, col: usize) -> Result<Option<Token>, LexingError> {
        if let Some(comment) = captures.name("comment") {
            let content = comment.as_str().trim();
            if content.is_empty() {
                return Ok(None);
            }
            return Ok(Some(Token::new(TokenType::Comment, content, self.line, col)));
        }

        if let Some(string) = captures.name("string") {
            return Ok(Some(Token::new(TokenType::String, string.as_str(), self.line, col)));
        }

        if let Some(word) = captures.name("word") {
            let token_type = KEYWORD_TOKENS.get(word.as_str()).copied().unwrap_or(TokenType::Symbol);
            return Ok(Some(Token::new(token_type, word.as_str(), self.line, col)));
        }

        if let Some(number) = captures.name("number") {
            return Ok(Some(Token::new(TokenType::Number, number.as_str(), self.line, col)));
        }

        if let Some(symbol) = captures.name("symbol") {
            if let Some(token_type) = SYMBOL_TOKENS.get(symbol.as_str()) {
                return Ok(Some(Token::new(*token_type, symbol.as_str(), self.line, col)));
            }
        }

        Err(LexingError::UnrecognizedToken {
            text: captures.get(0).map_or("", |m| m.as_str()).to_owned(),
            line: self.line + 1,
            col: col + 1
        })
    }
}


/// Tokenizes `source`, appending the end-of-file sentinel when `include_eof` is set.
///
/// # Examples
///
/// ```
/// use pyless::parser::lexing::tokenize;
/// use pyless::parser::token::TokenType;
///
/// let tokens = tokenize("1 + 1", true).unwrap();
/// assert_eq!(tokens.last().unwrap().token_type, TokenType::Eof);
/// ```
pub fn tokenize(source: &str, include_eof: bool) -> Result<Vec<Token>, LexingError> {
    let mut tokens = Scanner::new(source)?.tokens;
    if include_eof {
        tokens.push(Token::eof());
    }

    Ok(tokens)
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn lex(source: &str) -> Vec<Token> {
        tokenize(source, false).unwrap_or_else(|e| panic!("{e}"))
    }

    fn token(token_type: TokenType, row: usize, col: usize, lexeme: &str) -> Token {
        Token::new(token_type, lexeme, row, col)
    }

    #[test]
    fn basic() {
        assert_eq!(lex("1 + 1"), vec![
            token(TokenType::Number, 0, 0, "1"),
            token(TokenType::Plus, 0, 2, "+"),
            token(TokenType::Number, 0, 4, "1"),
        ]);
    }

    #[test]
    fn long_symbol() {
        assert_eq!(
            lex("veryLongSymbolForNoReason"),
            vec![token(TokenType::Symbol, 0, 0, "veryLongSymbolForNoReason")]
        );
    }

    #[test]
    fn list() {
        assert_eq!(lex("[1,2,3]"), vec![
            token(TokenType::OpenBracket, 0, 0, "["),
            token(TokenType::Number, 0, 1, "1"),
            token(TokenType::Comma, 0, 2, ","),
            token(TokenType::Number, 0, 3, "2"),
            token(TokenType::Comma, 0, 4, ","),
            token(TokenType::Number, 0, 5, "3"),
            token(TokenType::CloseBracket, 0, 6, "]"),
        ]);
    }

    #[test]
    fn multiline() {
        assert_eq!(lex("hello\n12"), vec![
            token(TokenType::Symbol, 0, 0, "hello"),
            token(TokenType::Number, 1, 0, "12"),
        ]);
        assert_eq!(lex("a\r\nb\r\nc"), vec![
            token(TokenType::Symbol, 0, 0, "a"),
            token(TokenType::Symbol, 1, 0, "b"),
            token(TokenType::Symbol, 2, 0, "c"),
        ]);
    }

    #[test]
    fn keywords() {
        assert_eq!(lex("fn hello"), vec![
            token(TokenType::Function, 0, 0, "fn"),
            token(TokenType::Symbol, 0, 3, "hello"),
        ]);
        assert_eq!(lex("if else iff"), vec![
            token(TokenType::If, 0, 0, "if"),
            token(TokenType::Else, 0, 3, "else"),
            token(TokenType::Symbol, 0, 8, "iff"),
        ]);
    }

    #[test]
    fn number_method() {
        assert_eq!(lex("1.hello"), vec![
            token(TokenType::Number, 0, 0, "1"),
            token(TokenType::Dot, 0, 1, "."),
            token(TokenType::Symbol, 0, 2, "hello"),
        ]);
    }

    #[test]
    fn negative_numbers_are_prefix_minus() {
        assert_eq!(lex("-1-2"), vec![
            token(TokenType::Minus, 0, 0, "-"),
            token(TokenType::Number, 0, 1, "1"),
            token(TokenType::Minus, 0, 2, "-"),
            token(TokenType::Number, 0, 3, "2"),
        ]);
    }

    #[test]
    fn floating_point() {
        assert_eq!(lex("10.11 12.1934"), vec![
            token(TokenType::Number, 0, 0, "10.11"),
            token(TokenType::Number, 0, 6, "12.1934"),
        ]);
        assert_eq!(lex("10.11.12.1934"), vec![
            token(TokenType::Number, 0, 0, "10.11"),
            token(TokenType::Dot, 0, 5, "."),
            token(TokenType::Number, 0, 6, "12.1934"),
        ]);
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(lex("1e10"), vec![token(TokenType::Number, 0, 0, "1e10")]);
        assert_eq!(lex("4e-10"), vec![token(TokenType::Number, 0, 0, "4e-10")]);
        assert_eq!(lex("4e1.4"), vec![
            token(TokenType::Number, 0, 0, "4e1"),
            token(TokenType::Dot, 0, 3, "."),
            token(TokenType::Number, 0, 4, "4"),
        ]);
    }

    #[test]
    fn multiple_numbers() {
        assert_eq!(lex("11 2 333 4"), vec![
            token(TokenType::Number, 0, 0, "11"),
            token(TokenType::Number, 0, 3, "2"),
            token(TokenType::Number, 0, 5, "333"),
            token(TokenType::Number, 0, 9, "4"),
        ]);
    }

    #[test]
    fn strings_are_raw() {
        assert_eq!(lex(r#""Hello World""#), vec![token(TokenType::String, 0, 0, r#""Hello World""#)]);
        assert_eq!(lex(r#""\t\r\n""#), vec![token(TokenType::String, 0, 0, r#""\t\r\n""#)]);
        assert_eq!(lex("\"\t\""), vec![token(TokenType::String, 0, 0, "\"\t\"")]);
    }

    #[test]
    fn comments() {
        assert_eq!(lex("// hello world"), vec![token(TokenType::Comment, 0, 0, "hello world")]);
        assert_eq!(lex("1 + 1 // hello world\na + b // another"), vec![
            token(TokenType::Number, 0, 0, "1"),
            token(TokenType::Plus, 0, 2, "+"),
            token(TokenType::Number, 0, 4, "1"),
            token(TokenType::Comment, 0, 6, "hello world"),
            token(TokenType::Symbol, 1, 0, "a"),
            token(TokenType::Plus, 1, 2, "+"),
            token(TokenType::Symbol, 1, 4, "b"),
            token(TokenType::Comment, 1, 6, "another"),
        ]);
    }

    #[test]
    fn empty_comment_is_dropped() {
        assert_eq!(lex("1 + 1 //"), vec![
            token(TokenType::Number, 0, 0, "1"),
            token(TokenType::Plus, 0, 2, "+"),
            token(TokenType::Number, 0, 4, "1"),
        ]);
    }

    #[test]
    fn multi_character_symbols() {
        let types: Vec<TokenType> = lex("a := b == c >= d <= e && f || g :: h")
            .into_iter()
            .map(|t| t.token_type)
            .filter(|t| *t != TokenType::Symbol)
            .collect();
        assert_eq!(types, vec![
            TokenType::Walrus,
            TokenType::Equality,
            TokenType::GreaterEq,
            TokenType::LesserEq,
            TokenType::And,
            TokenType::Or,
            TokenType::DoubleColon,
        ]);
    }

    #[test]
    fn columns_count_characters() {
        assert_eq!(lex("\"é\" x"), vec![
            token(TokenType::String, 0, 0, "\"é\""),
            token(TokenType::Symbol, 0, 4, "x"),
        ]);
    }

    #[test]
    fn long_line_columns() {
        let count = 50_000;
        let tokens = lex(&vec!["a"; count].join(" + "));
        assert_eq!(tokens.len(), 2 * count - 1);
        assert_eq!(tokens.last(), Some(&token(TokenType::Symbol, 0, (count - 1) * 4, "a")));

        let tokens = lex(&vec!["\"é\""; 1_000].join(" "));
        assert_eq!(tokens[999].position, Some((0, 999 * 4)));
    }

    #[test]
    fn eof_appended_once() {
        let tokens = tokenize("a", true).unwrap();
        assert_eq!(tokens, vec![token(TokenType::Symbol, 0, 0, "a"), Token::eof()]);
        assert_eq!(tokenize("", true).unwrap(), vec![Token::eof()]);
    }

    #[test]
    fn unrecognized_character() {
        assert_eq!(
            tokenize("a = 1\nb @ 2", true),
            Err(LexingError::UnrecognizedToken { text: "@".to_owned(), line: 2, col: 3 })
        );
        assert!(matches!(tokenize("\"open", true), Err(LexingError::UnrecognizedToken { .. })));
    }
}
