//! Lexical analysis of JavaScript source.
//!
//! This module turns source text into tokens. It handles:
//!
//! - Character level scanning of literals, operators and comments
//! - Keyword recognition per language version
//! - Telling division apart from regular expression literals
//! - Bracket balance tracking

pub mod lexer;
pub mod scanner;
pub mod tokens;

#[cfg(test)]
mod tests;
