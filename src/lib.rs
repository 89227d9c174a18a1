//! A transpiler from a small brace-delimited scripting language to Python-style source text.
//!
//! Transpiling happens in three stages, each of which can be used on its own:
//!
//! 1. [`parser::lexing`] splits source text into tokens,
//! 2. [`parser::parsing`] builds an abstract syntax tree from those tokens,
//! 3. [`transpiler::transpile_py`] renders the tree as target text.
//!
//! The program is never evaluated or type checked; only its syntax is translated.
//!
//! # Examples
//!
//! ```
//! let python = pyless::transpile("total = price * (1 + tax)\nif (total > 100) discount = T").unwrap();
//! assert_eq!(python, "total = price * (1 + tax)\nif total > 100: discount = True");
//! ```
pub mod parser;
pub mod transpiler;

pub use parser::errors::{LexingError, ParsingError};
pub use parser::parsing::parse;
pub use parser::syntax_tree::{Block, Expr, ExprKind, Stmt};
pub use transpiler::transpile_py::{Emitter, EmitterConfig};


/// Parses `source` and renders it with the default [`EmitterConfig`].
///
/// # Errors
///
/// Returns the first lexical or syntax error in `source`.
pub fn transpile(source: &str) -> Result<String, ParsingError> {
    let program = parse(source)?;
    Ok(Emitter::new().render_program(&program))
}
