//! Translates an AST into Python-style source text.
//!
//! The [`Emitter`] walks the tree top-down and never modifies it. Parentheses are only written
//! where the source had them (see [`Expr::parenthesize`]), so the output keeps the grouping the
//! programmer chose rather than one derived from operator precedence.
//!
//! Rendering cannot fail: every node kind the parser can build has a rendering.
//!
//! # Examples
//!
//! ```
//! use pyless::parser::parsing::parse;
//! use pyless::transpiler::transpile_py::Emitter;
//!
//! let program = parse("if (a) {b = 1} else if (c) d").unwrap();
//! assert_eq!(Emitter::new().render_program(&program), "if a: b = 1\nelif c: d");
//! ```
use log::trace;

use crate::parser::syntax_tree::*;


/// Settings for the text produced by an [`Emitter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    pub indent_unit: String // written once per indentation level at the start of a line
}


impl Default for EmitterConfig {
    fn default() -> Self {
        Self { indent_unit: "    ".to_owned() }
    }
}


#[derive(Debug, Clone, Default)]
pub struct Emitter {
    config: EmitterConfig
}


impl Emitter {
    /// Creates an emitter which indents with four spaces.
    pub fn new() -> Self {
        Self::default()
    }


    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }


    fn indent(&self, level: usize) -> String {
        self.config.indent_unit.repeat(level)
    }


    /// Renders the root block of a program, whose statements are not indented.
    pub fn render_program(&self, program: &Block) -> String {
        self.render_block(program, 0)
    }


    /// Renders a block whose statements sit at `indent_level`.
    ///
    /// A block of exactly one statement is rendered inline without any indentation, which is what
    /// allows `if a: b`. Otherwise every statement starts its own indented line, except that a
    /// comment directly after a statement is appended to that statement's line.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyless::parser::parsing::parse;
    /// use pyless::transpiler::transpile_py::Emitter;
    ///
    /// let block = parse("a = 1 // one\nb").unwrap();
    /// assert_eq!(Emitter::new().render_block(&block, 1), "    a = 1 # one\n    b");
    /// ```
    pub fn render_block(&self, block: &Block, indent_level: usize) -> String {
        if let [stmt] = block.body.as_slice() {
            return self.render(stmt, indent_level, true);
        }

        trace!("rendering block of {} statements at level {}", block.body.len(), indent_level);
        let mut lines: Vec<String> = Vec::with_capacity(block.body.len());
        let mut stmts = block.body.iter().peekable();
        while let Some(stmt) = stmts.next() {
            let mut line = self.indent(indent_level) + &self.render(stmt, indent_level, true);
            if let Some(Stmt::Comment(text)) = stmts.next_if(|next| matches!(next, Stmt::Comment(_))) {
                line += &format!(" # {}", text);
            }
            lines.push(line);
        }

        lines.join("\n")
    }


    /// Renders one statement. The first line of the result is never indented, since the caller
    /// decides where the statement starts; any further lines are indented relative to
    /// `indent_level`.
    ///
    /// `top_level` is true when the statement stands on its own rather than inside another
    /// expression, which decides the form assignments take.
    pub fn render(&self, stmt: &Stmt, indent_level: usize, top_level: bool) -> String {
        match stmt {
            Stmt::If(if_stmt) => self.render_if(if_stmt, indent_level),
            Stmt::Comment(text) => format!("# {}", text),
            Stmt::Expr(expr) => self.render_expr(expr, top_level)
        }
    }


    fn render_if(&self, stmt: &IfStmt, indent_level: usize) -> String {
        let mut text = format!(
            "if {}:{}",
            self.render_expr(&stmt.condition, false),
            self.render_body(&stmt.body, indent_level)
        );

        if let Some(else_body) = &stmt.else_body {
            text += "\n";
            text += &self.indent(indent_level);
            match else_body.body.as_slice() {
                [Stmt::If(nested)] => text += &format!("el{}", self.render_if(nested, indent_level)),
                _ => text += &format!("else:{}", self.render_body(else_body, indent_level))
            }
        }

        text
    }


    /// The part of an `if`/`else` after the colon: inline for a single statement, otherwise an
    /// indented block on the following lines.
    fn render_body(&self, body: &Block, indent_level: usize) -> String {
        let separator = if body.body.len() == 1 { " " } else { "\n" };
        separator.to_owned() + &self.render_block(body, indent_level + 1)
    }


    /// Renders an expression, wrapping it in parentheses if the source did.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyless::parser::syntax_tree::{BinaryOperator, Expr};
    /// use pyless::transpiler::transpile_py::Emitter;
    ///
    /// let sum = Expr::binary(Expr::number("1"), Expr::number("1"), BinaryOperator::Add);
    /// let expr = Expr::binary(sum.parenthesize(), Expr::number("3"), BinaryOperator::Multiply);
    /// assert_eq!(Emitter::new().render_expr(&expr, false), "(1 + 1) * 3");
    /// ```
    pub fn render_expr(&self, expr: &Expr, top_level: bool) -> String {
        // assignments carry their own parentheses in expression position
        if let ExprKind::Assignment(target, value) = &expr.kind {
            return self.render_assignment(target, value, top_level);
        }

        let text = self.render_kind(&expr.kind);
        match expr.parenthesized {
            true => format!("({})", text),
            false => text
        }
    }


    /// `target = value` as a statement, `(target := value)` anywhere else. A chain of statement
    /// assignments stays in statement form, `a = b = 1`.
    fn render_assignment(&self, target: &str, value: &Expr, top_level: bool) -> String {
        if !top_level {
            return format!("({} := {})", target, self.render_expr(value, false));
        }

        let chained = matches!(value.kind, ExprKind::Assignment(..)) && !value.parenthesized;
        format!("{} = {}", target, self.render_expr(value, chained))
    }


    fn render_kind(&self, kind: &ExprKind) -> String {
        match kind {
            ExprKind::Identifier(name) => name.clone(),
            ExprKind::Number(text) => text.clone(),
            ExprKind::Str(content) => format!("\"{}\"", content),
            ExprKind::Boolean(true) => "True".to_owned(),
            ExprKind::Boolean(false) => "False".to_owned(),
            ExprKind::Assignment(target, value) => self.render_assignment(target, value, false),

            ExprKind::Binary(left, right, operator) => format!(
                "{} {} {}",
                self.render_expr(left, false),
                binary_spelling(*operator),
                self.render_expr(right, false)
            ),

            ExprKind::PreUnary(operator, operand) => {
                format!("{}{}", pre_unary_spelling(*operator), self.render_expr(operand, false))
            }
            ExprKind::PostUnary(operator, operand) => {
                format!("{}{}", self.render_expr(operand, false), operator.as_str())
            }

            ExprKind::Call(caller, args) => {
                format!("{}({})", self.render_expr(caller, false), self.render_list(args))
            }
            ExprKind::Index(indexable, index) => {
                format!("{}[{}]", self.render_expr(indexable, false), self.render_expr(index, false))
            }
            // an assignment receiver already brings its own parentheses
            ExprKind::Method(value, member) => match &value.kind {
                ExprKind::Assignment(..) => format!("{}.{}", self.render_kind(&value.kind), member),
                kind => format!("({}).{}", self.render_kind(kind), member)
            },

            ExprKind::Dictionary(properties) if properties.is_empty() => "{}".to_owned(),
            ExprKind::Dictionary(properties) => {
                let entries = properties.iter()
                                        .map(|prop| format!(
                                            "{}: {}",
                                            self.render_expr(&prop.key, false),
                                            self.render_expr(&prop.value, false)
                                        ))
                                        .collect::<Vec<String>>()
                                        .join(", ");
                format!("{{ {} }}", entries)
            }

            ExprKind::List(elements) => format!("[{}]", self.render_list(elements))
        }
    }


    fn render_list(&self, exprs: &[Expr]) -> String {
        exprs.iter()
             .map(|expr| self.render_expr(expr, false))
             .collect::<Vec<String>>()
             .join(", ")
    }
}


/// Operators spelled differently in the target; everything else is written as in the source.
fn binary_spelling(operator: BinaryOperator) -> &'static str {
    match operator {
        BinaryOperator::And => "and",
        BinaryOperator::Or => "or",
        _ => operator.as_str()
    }
}


fn pre_unary_spelling(operator: PreUnaryOperator) -> &'static str {
    match operator {
        PreUnaryOperator::Not => "not ",
        _ => operator.as_str()
    }
}


/// Renders a single statement with the default [`EmitterConfig`].
///
/// # Examples
///
/// ```
/// use pyless::parser::syntax_tree::{Expr, Stmt};
/// use pyless::transpiler::transpile_py::render;
///
/// let stmt = Stmt::Expr(Expr::assignment("a", Expr::number("1")));
/// assert_eq!(render(&stmt, 0, true), "a = 1");
/// assert_eq!(render(&stmt, 0, false), "(a := 1)");
/// ```
pub fn render(stmt: &Stmt, indent_level: usize, top_level: bool) -> String {
    Emitter::new().render(stmt, indent_level, top_level)
}
