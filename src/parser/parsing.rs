use log::{debug, trace};

use super::errors::ParsingError;
use super::lexing::tokenize;
use super::syntax_tree::*;
use super::token::*;


/// How many expressions or if statements may be nested inside each other before parsing gives up,
/// well before the recursion could exhaust a thread's stack.
pub const MAX_NESTING_DEPTH: usize = 128;


/// Consumes the next token, returning it if it has the given type and otherwise returning an
/// "Expected `spelling`" error located at the token that was found instead.
macro_rules! expect_token {
    ($self:ident, $token_type:ident, $spelling:expr) => {{
        let token = $self.next();
        match token.token_type {
            TokenType::$token_type => token,
            _ => return Err(ParsingError::at(&token, |line, col| {
                ParsingError::ExpectedToken { expected: $spelling, line, col }
            }))
        }
    }};
}


/// Recursive descent parser over an owned token stream.
///
/// The tokens are never modified; `cursor` is the index of the next token to be consumed. The
/// stream always ends in an [`TokenType::Eof`] token and the cursor never moves past it, so
/// looking ahead is always possible.
pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize // how many nested rules are currently being parsed, see `nested`
}


impl Parser {
    /// Creates a parser over `tokens`, adding the end-of-file sentinel if it is missing.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |token| token.token_type != TokenType::Eof) {
            tokens.push(Token::eof());
        }

        Parser { tokens, cursor: 0, depth: 0 }
    }


    /// Parses statements until the end of the input, returning them as the root block.
    ///
    /// # Errors
    ///
    /// Stops at the first syntax error.
    pub fn parse(&mut self) -> Result<Block, ParsingError> {
        let mut body: Vec<Stmt> = vec![];
        while !self.check(&[TokenType::Eof]) {
            body.push(self.parse_statement()?);
        }

        debug!("parsed {} top level statements", body.len());
        Ok(Block::new(body))
    }


    fn peek(&self) -> &Token {
        &self.tokens[self.cursor]
    }


    /// Consumes the current token. At the end of input the sentinel is returned again without
    /// moving.
    fn next(&mut self) -> Token {
        let token = self.tokens[self.cursor].clone();
        if token.token_type != TokenType::Eof {
            self.cursor += 1;
        }
        token
    }


    fn check(&self, types: &[TokenType]) -> bool {
        self.peek().is_any(types)
    }


    /// Runs a rule one nesting level deeper than the current one.
    ///
    /// # Errors
    ///
    /// Fails at the current token once [`MAX_NESTING_DEPTH`] levels are open.
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> Result<T, ParsingError>) -> Result<T, ParsingError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParsingError::at(self.peek(), |line, col| ParsingError::NestingTooDeep { line, col }));
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }


    /// ```text
    /// statement ::= if_statement | <comment> | expression
    /// ```
    fn parse_statement(&mut self) -> Result<Stmt, ParsingError> {
        match self.peek().token_type {
            TokenType::If => Ok(Stmt::If(self.nested(Self::parse_selection)?)),
            TokenType::Comment => Ok(Stmt::Comment(self.next().lexeme)),
            _ => {
                let expr = self.parse_expression()?;
                trace!("parsed expression statement {:?}", expr.kind);
                Ok(Stmt::Expr(expr))
            }
        }
    }


    /// ```text
    /// if_statement ::= 'if' '(' expression ')' block ['else' block]
    /// ```
    ///
    /// Since a block may be a single statement without braces, `else if` needs no rule of its
    /// own: the else block simply holds one if statement.
    fn parse_selection(&mut self) -> Result<IfStmt, ParsingError> {
        expect_token!(self, If, "if");
        expect_token!(self, OpenParen, "(");
        let condition = self.parse_expression()?;
        expect_token!(self, CloseParen, ")");

        let body = self.parse_block()?;
        let else_body = match self.peek().token_type {
            TokenType::Else => {
                self.next();
                Some(self.parse_block()?)
            }
            _ => None
        };

        trace!("parsed if statement, else branch: {}", else_body.is_some());
        Ok(IfStmt::new(condition, body, else_body))
    }


    /// ```text
    /// block ::= '{' {statement} '}' | statement
    /// ```
    fn parse_block(&mut self) -> Result<Block, ParsingError> {
        if !self.check(&[TokenType::OpenBrace]) {
            return Ok(Block::new(vec![self.parse_statement()?]));
        }

        expect_token!(self, OpenBrace, "{");
        let mut body: Vec<Stmt> = vec![];
        while !self.check(&[TokenType::CloseBrace]) {
            body.push(self.parse_statement()?);
        }
        expect_token!(self, CloseBrace, "}");

        Ok(Block::new(body))
    }


    /// Expressions, from loosest to tightest binding:
    ///
    /// 1. assignment (right associative)
    /// 2. binary operators, with `*`, `/` and `%` binding tighter than the rest
    /// 3. postfix unary operators
    /// 4. prefix unary operators
    /// 5. calls, indexing and member access
    /// 6. primary expressions
    fn parse_expression(&mut self) -> Result<Expr, ParsingError> {
        self.nested(Self::parse_assignment)
    }


    fn parse_assignment(&mut self) -> Result<Expr, ParsingError> {
        let target_token = self.peek().clone();
        let target = self.parse_binary()?;
        if !self.check(&[TokenType::Equal]) {
            return Ok(target);
        }

        let name = match target.as_assignment_target() {
            Some(name) => name.to_owned(),
            None => return Err(ParsingError::at(&target_token, |line, col| {
                ParsingError::InvalidAssignmentTarget { line, col }
            }))
        };

        self.next();
        let value = self.parse_expression()?;
        Ok(Expr::assignment(name, value))
    }


    /// Every binary operator other than `*`, `/` and `%` shares one left associative tier, so
    /// `a == b + c` is `(a == b) + c`.
    ///
    /// The multiplicative operators are split out of the otherwise flat tier so that `1 + 2 * 3`
    /// nests the product as the right operand; DESIGN.md records why only they are.
    fn parse_binary(&mut self) -> Result<Expr, ParsingError> {
        let mut left = self.parse_factor()?;
        while let Some(operator) = BinaryOperator::from_token(self.peek().token_type) {
            self.next();
            let right = self.parse_factor()?;
            left = Expr::binary(left, right, operator);
        }

        Ok(left)
    }


    fn parse_factor(&mut self) -> Result<Expr, ParsingError> {
        let mut left = self.parse_pre_unary()?;
        loop {
            match BinaryOperator::from_token(self.peek().token_type) {
                Some(operator) if operator.is_multiplicative() => {
                    self.next();
                    let right = self.parse_pre_unary()?;
                    left = Expr::binary(left, right, operator);
                }
                _ => break
            }
        }

        Ok(left)
    }


    fn parse_pre_unary(&mut self) -> Result<Expr, ParsingError> {
        match PreUnaryOperator::from_token(self.peek().token_type) {
            Some(operator) => {
                self.next();
                let operand = self.nested(Self::parse_pre_unary)?;
                Ok(Expr::pre_unary(operator, operand))
            }
            None => self.parse_post_unary()
        }
    }


    fn parse_post_unary(&mut self) -> Result<Expr, ParsingError> {
        let mut expr = self.parse_call()?;
        while let Some(operator) = PostUnaryOperator::from_token(self.peek().token_type) {
            self.next();
            expr = Expr::post_unary(operator, expr);
        }

        Ok(expr)
    }


    /// Calls, indexing and member access may follow each other in any order and associate to the
    /// left, so `a.b(c)[0]` is an index of a call of a member access.
    fn parse_call(&mut self) -> Result<Expr, ParsingError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek().token_type {
                TokenType::OpenParen => {
                    self.next();
                    let args = self.parse_expression_list(TokenType::CloseParen)?;
                    expect_token!(self, CloseParen, ")");
                    expr = Expr::call(expr, args);
                }

                TokenType::OpenBracket => {
                    self.next();
                    let index = self.parse_expression()?;
                    expect_token!(self, CloseBracket, "]");
                    expr = Expr::index(expr, index);
                }

                TokenType::Dot => {
                    self.next();
                    let member = self.next();
                    match member.token_type {
                        TokenType::Symbol => expr = Expr::method(expr, member.lexeme),
                        _ => return Err(ParsingError::at(&member, |line, col| {
                            ParsingError::ExpectedIdentifier { line, col }
                        }))
                    }
                }

                _ => break
            }
        }

        Ok(expr)
    }


    /// Parses a literal, identifier, parenthesized expression, dictionary or list.
    fn parse_primary(&mut self) -> Result<Expr, ParsingError> {
        let token = self.next();
        match token.token_type {
            TokenType::Number => Ok(Expr::number(token.lexeme)),
            TokenType::String => Ok(Expr::string(strip_quotes(&token.lexeme))),
            TokenType::Symbol if token.lexeme == "T" => Ok(Expr::boolean(true)),
            TokenType::Symbol if token.lexeme == "F" => Ok(Expr::boolean(false)),
            TokenType::Symbol => Ok(Expr::identifier(token.lexeme)),

            TokenType::OpenParen => {
                let expr = self.parse_expression()?;
                expect_token!(self, CloseParen, ")");
                Ok(expr.parenthesize())
            }

            TokenType::OpenBrace => self.parse_dictionary(),

            TokenType::OpenBracket => {
                let elements = self.parse_expression_list(TokenType::CloseBracket)?;
                expect_token!(self, CloseBracket, "]");
                Ok(Expr::list(elements))
            }

            TokenType::Comment => Err(ParsingError::at(&token, |line, col| {
                ParsingError::UnexpectedComment { line, col }
            })),

            _ => Err(ParsingError::unexpected(&token))
        }
    }


    /// Parses comma separated expressions up to, but not including, `close`.
    fn parse_expression_list(&mut self, close: TokenType) -> Result<Vec<Expr>, ParsingError> {
        let mut exprs: Vec<Expr> = vec![];
        if self.check(&[close]) {
            return Ok(exprs);
        }

        exprs.push(self.parse_expression()?);
        while self.check(&[TokenType::Comma]) {
            self.next();
            exprs.push(self.parse_expression()?);
        }

        Ok(exprs)
    }


    /// Parses the entries of a dictionary literal, assuming the opening `{` has been consumed.
    ///
    /// Each entry starts with a key expression, and the token after it decides what the entry is:
    ///
    /// - `,` or `}`: shorthand. `{c}` means `{"c": c}` and `{1}` means `{1: 1}`.
    /// - `:`: string keyed. An identifier key is turned into the string of its name.
    /// - `:=`: identifier keyed. The key must be an identifier and is kept as one.
    fn parse_dictionary(&mut self) -> Result<Expr, ParsingError> {
        let mut properties: Vec<Property> = vec![];
        while !self.check(&[TokenType::CloseBrace]) {
            let key_token = self.peek().clone();
            let key = self.parse_expression()?;
            let string_key = match &key.kind {
                ExprKind::Identifier(name) => Some(Expr::string(name.clone())),
                _ => None
            };

            if self.check(&[TokenType::Comma, TokenType::CloseBrace]) {
                if self.check(&[TokenType::Comma]) {
                    self.next();
                }
                properties.push(Property::new(string_key.unwrap_or_else(|| key.clone()), key));
                continue;
            }

            let separator = self.next();
            let string_keyed = match separator.token_type {
                TokenType::Colon => true,
                TokenType::Walrus => false,
                _ => return Err(ParsingError::unexpected(&separator))
            };

            let value = self.parse_expression()?;
            let key = match (string_keyed, string_key) {
                (true, Some(string_key)) => string_key,
                (true, None) => key,
                (false, Some(_)) => key,
                (false, None) => return Err(ParsingError::at(&key_token, |line, col| {
                    ParsingError::ExpectedIdentifier { line, col }
                }))
            };
            properties.push(Property::new(key, value));

            if !self.check(&[TokenType::CloseBrace]) {
                expect_token!(self, Comma, ",");
            }
        }

        expect_token!(self, CloseBrace, "}");
        Ok(Expr::dictionary(properties))
    }
}


fn strip_quotes(lexeme: &str) -> &str {
    lexeme.strip_prefix('"')
          .and_then(|s| s.strip_suffix('"'))
          .unwrap_or(lexeme)
}


/// Tokenizes and parses `source`, returning the root block of the program.
///
/// # Examples
///
/// ```
/// use pyless::parser::parsing::parse;
/// use pyless::parser::syntax_tree::{BinaryOperator, Expr, Stmt};
///
/// let program = parse("1 + 1").unwrap();
/// assert_eq!(program.body, vec![Stmt::Expr(Expr::binary(
///     Expr::number("1"), Expr::number("1"), BinaryOperator::Add
/// ))]);
/// ```
pub fn parse(source: &str) -> Result<Block, ParsingError> {
    let tokens = tokenize(source, true)?;
    Parser::new(tokens).parse().inspect_err(|e| debug!("parse failed: {e}"))
}
