use tracing::{debug, instrument};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{LanguageVersion, TokenKind},
    },
    Position,
};

/// Cuts function definitions out of a script.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptExtractor {
    version: LanguageVersion,
}

impl JavaScriptExtractor {
    pub fn new(version: LanguageVersion) -> Self {
        JavaScriptExtractor { version }
    }

    pub fn version(&self) -> LanguageVersion {
        self.version
    }

    /// Returns the text following the first occurrence of `start`, up to and
    /// including the brace closing the first block opened after it.
    ///
    /// Brackets inside string, template and regular expression literals do
    /// not count. The anchor itself is not part of the result, so for
    /// `start = "f=function"` the result is `"(params){body}"`.
    #[instrument(level = "debug", skip(self, source), fields(len = source.len()))]
    pub fn match_to_closing_brace<'a>(&self, source: &'a str, start: &str) -> Result<&'a str, Error> {
        let Some(index) = source.find(start) else {
            return Err(Error::new(
                ErrorImpl::MarkerNotFound {
                    marker: start.to_string(),
                },
                Position(0),
            ));
        };
        let body_start = index + start.len();
        debug!(offset = index, "found start marker");

        let mut lex = Lexer::starting_at(source, body_start, self.version);
        let mut visited_open_brace = false;

        loop {
            let token = lex.next_token()?;

            if token.kind == TokenKind::OpenCurly {
                visited_open_brace = true;
            } else if visited_open_brace && lex.is_balanced() {
                let end = token.span.end.0;
                debug!(start = body_start, end, "matched closing brace");
                return Ok(&source[body_start..end]);
            } else if token.kind == TokenKind::EOF {
                return Err(Error::new(
                    ErrorImpl::UnbalancedBrackets {
                        message: String::from("could not find matching braces"),
                    },
                    token.span.start,
                ));
            }
        }
    }

    /// Returns the definition of the function assigned to `name`, as
    /// `name=function(params){body}`.
    pub fn extract_function(&self, source: &str, name: &str) -> Result<String, Error> {
        let anchor = format!("{}=function", name);
        let body = self.match_to_closing_brace(source, &anchor)?;
        Ok(anchor + body)
    }
}

/// Locates the parameter list and body that follow `anchor` in `source`.
///
/// ```
/// let source = "Wka=function(d){return d/2;}//rest";
/// assert_eq!(jsextractor::locate(source, "Wka=function").unwrap(), "(d){return d/2;}");
/// ```
pub fn locate<'a>(source: &'a str, anchor: &str) -> Result<&'a str, Error> {
    JavaScriptExtractor::default().match_to_closing_brace(source, anchor)
}
