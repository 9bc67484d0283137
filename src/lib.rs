#![allow(clippy::module_inception)]

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod extractor;
pub mod lexer;
pub mod macros;

extern crate regex;

pub use errors::errors::ErrorImpl;
pub use extractor::extractor::{locate, JavaScriptExtractor};
pub use extractor::matcher::{find_function_name, match_group1};
pub use lexer::lexer::{tokenize, Lexer};
pub use lexer::tokens::{LanguageVersion, Token, TokenKind};

/// Number of source bytes shown before an error position.
const CONTEXT_LENGTH: usize = 50;

/// Absolute byte offset into the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start: Position(start),
            end: Position(end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.0 - self.start.0
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns up to `CONTEXT_LENGTH` bytes of `source` ending at `position`,
/// clamped to char boundaries.
pub fn context_before(source: &str, position: usize) -> String {
    let mut end = position.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let mut start = end.saturating_sub(CONTEXT_LENGTH);
    while !source.is_char_boundary(start) {
        start += 1;
    }
    String::from(&source[start..end])
}

/// Finds the line containing `position`.
///
/// Returns the 1-based line number, the text of the line, and the byte
/// column of `position` within it. Positions at or past the end of the
/// source resolve to the last line.
pub fn get_line_at_position(source: &str, position: usize) -> (usize, String, usize) {
    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&position) {
            return (line_number, line.to_string(), position - start);
        }

        if end == source.len() {
            return (line_number, line.to_string(), line.len());
        }

        start = end;
        line_number += 1;
    }

    (line_number, String::new(), 0)
}

/// Renders `error` against the source it was raised for.
///
/// ```text
/// Error: UnterminatedLiteral (tip)
///   |
/// 3 | var s = "abc
///   | --------^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
