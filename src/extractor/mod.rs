//! Locating function bodies inside player scripts.
//!
//! This module combines the lexer with plain text anchors:
//!
//! - [`extractor::locate`] returns the parameter list and body following
//!   an anchor, balanced by the lexer rather than by counting characters
//! - [`extractor::JavaScriptExtractor`] wraps it for named functions
//! - [`matcher`] finds function names with regular expressions

pub mod extractor;
pub mod matcher;
