//! Error types and error handling for the extractor.
//!
//! This module defines the error types raised while scanning and
//! matching JavaScript source. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexical and matching failures
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
