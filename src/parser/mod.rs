//! This module contains everything necessary to go from source text to an abstract syntax tree
//! (AST) of that source text. That AST can then be rendered in the target syntax by the
//! [`crate::transpiler`] module.

pub mod errors;
pub mod lexing;
pub mod parsing;
pub mod syntax_tree;
pub mod token;
