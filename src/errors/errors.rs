use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    context: Option<String>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
            context: None,
        }
    }

    /// Attaches an excerpt of the source preceding the error position.
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::MarkerNotFound { .. } => "MarkerNotFound",
            ErrorImpl::UnterminatedLiteral { .. } => "UnterminatedLiteral",
            ErrorImpl::IllegalCharacter { .. } => "IllegalCharacter",
            ErrorImpl::NumberFormatError { .. } => "NumberFormatError",
            ErrorImpl::InvalidUnicodeEscape => "InvalidUnicodeEscape",
            ErrorImpl::InvalidRegexFlag { .. } => "InvalidRegexFlag",
            ErrorImpl::UnbalancedBrackets { .. } => "UnbalancedBrackets",
            ErrorImpl::PatternNotMatched { .. } => "PatternNotMatched",
            ErrorImpl::InvalidPattern { .. } => "InvalidPattern",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::MarkerNotFound { marker } => ErrorTip::Suggestion(format!(
                "`{}` does not occur in the script, has the player code changed?",
                marker
            )),
            ErrorImpl::UnterminatedLiteral { literal } => ErrorTip::Suggestion(format!(
                "The {} is never closed before the end of the line or input",
                literal
            )),
            ErrorImpl::IllegalCharacter { .. } => ErrorTip::None,
            ErrorImpl::NumberFormatError { reason } => {
                ErrorTip::Suggestion(format!("Invalid number literal: {}", reason))
            }
            ErrorImpl::InvalidUnicodeEscape => ErrorTip::Suggestion(String::from(
                "A `\\u` escape must be followed by exactly 4 hex digits",
            )),
            ErrorImpl::InvalidRegexFlag { flag } => ErrorTip::Suggestion(format!(
                "`{}` is not a regular expression flag, expected one of `gimysu`",
                flag
            )),
            ErrorImpl::UnbalancedBrackets { message } => {
                ErrorTip::Suggestion(format!("Brackets do not match: {}", message))
            }
            ErrorImpl::PatternNotMatched { .. } => ErrorTip::None,
            ErrorImpl::InvalidPattern { message, .. } => {
                ErrorTip::Suggestion(format!("The pattern does not compile: {}", message))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.internal_error, self.position.0)?;
        if let Some(context) = &self.context {
            write!(f, ", after {:?}", context)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("start marker {marker:?} not found")]
    MarkerNotFound { marker: String },
    #[error("unterminated {literal}")]
    UnterminatedLiteral { literal: &'static str },
    #[error("illegal character: {character:?}")]
    IllegalCharacter { character: char },
    #[error("number format error: {reason}")]
    NumberFormatError { reason: &'static str },
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    #[error("invalid regular expression flag: {flag:?}")]
    InvalidRegexFlag { flag: char },
    #[error("unbalanced brackets: {message}")]
    UnbalancedBrackets { message: String },
    #[error("pattern {pattern:?} did not match")]
    PatternNotMatched { pattern: String },
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}
