//! Renders a parsed program in the target syntax.

pub mod transpile_py;
