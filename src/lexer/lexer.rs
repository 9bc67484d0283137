use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::{
    scanner::Scanner,
    tokens::{LanguageVersion, Token, TokenKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParenInfo {
    /// The parens hold the parameters of a function expression.
    pub is_func_expr: bool,
    /// The parens hold the test of `if`, `while`, `for`, ...
    pub is_conditional: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BraceInfo {
    /// A statement block rather than an object literal.
    pub is_block: bool,
    /// The parens closed right before the brace opened.
    pub paren: Option<ParenInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Paren(ParenInfo),
    Brace(BraceInfo),
}

#[derive(Debug, Clone, Copy)]
struct MetaToken {
    kind: TokenKind,
    line: u32,
    bracket: Option<Bracket>,
}

impl MetaToken {
    fn paren(&self) -> Option<ParenInfo> {
        match self.bracket {
            Some(Bracket::Paren(paren)) => Some(paren),
            _ => None,
        }
    }

    fn brace(&self) -> Option<BraceInfo> {
        match self.bracket {
            Some(Bracket::Brace(brace)) => Some(brace),
            _ => None,
        }
    }
}

/// The last three significant tokens, most recent first.
#[derive(Debug, Default)]
struct LookBehind {
    list: [Option<MetaToken>; 3],
}

impl LookBehind {
    fn push(&mut self, token: MetaToken) {
        self.list.rotate_right(1);
        self.list[0] = Some(token);
    }

    fn one(&self) -> Option<&MetaToken> {
        self.list[0].as_ref()
    }

    fn two(&self) -> Option<&MetaToken> {
        self.list[1].as_ref()
    }

    fn three(&self) -> Option<&MetaToken> {
        self.list[2].as_ref()
    }

    fn one_is(&self, kind: TokenKind) -> bool {
        self.one().is_some_and(|t| t.kind == kind)
    }

    fn two_is(&self, kind: TokenKind) -> bool {
        self.two().is_some_and(|t| t.kind == kind)
    }
}

/// JavaScript lexer returning significant tokens and tracking bracket
/// balance.
///
/// The last three tokens and the role of each open paren and brace decide
/// whether a `/` starts a division or a regular expression literal.
pub struct Lexer<'a> {
    stream: Scanner<'a>,
    last_three: LookBehind,
    brace_stack: Vec<BraceInfo>,
    paren_stack: Vec<ParenInfo>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_version(source, LanguageVersion::default())
    }

    pub fn with_version(source: &'a str, version: LanguageVersion) -> Self {
        Self::from_scanner(Scanner::new(source, version))
    }

    /// Creates a lexer whose first token starts at byte `offset` of
    /// `source`. Token spans stay absolute.
    pub fn starting_at(source: &'a str, offset: usize, version: LanguageVersion) -> Self {
        Self::from_scanner(Scanner::starting_at(source, offset, version))
    }

    fn from_scanner(stream: Scanner<'a>) -> Self {
        Lexer {
            stream,
            last_three: LookBehind::default(),
            brace_stack: vec![],
            paren_stack: vec![],
        }
    }

    /// Equal amount of open and closed parentheses and braces.
    pub fn is_balanced(&self) -> bool {
        self.brace_stack.is_empty() && self.paren_stack.is_empty()
    }

    /// Flags of the last regular expression literal returned.
    pub fn regexp_flags(&self) -> &str {
        self.stream.regexp_flags()
    }

    /// Continues lexing and returns the next significant token.
    ///
    /// Line ends and comments are skipped. The EOF token is returned once
    /// input is exhausted, and again on every further call.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        let mut kind = self.stream.next_raw_token()?;
        while kind.is_trivia() {
            kind = self.stream.next_raw_token()?;
        }

        if matches!(kind, TokenKind::Slash | TokenKind::SlashEquals) && self.is_regex_start() {
            self.stream.read_regexp(kind)?;
            kind = TokenKind::RegExp;
        }

        let value = match kind {
            TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::TemplateLiteral
            | TokenKind::RegExp => String::from(self.stream.string()),
            _ => String::from(self.stream.token_raw()),
        };

        let token = MK_TOKEN!(
            kind,
            value,
            self.stream.token_beg(),
            self.stream.token_end()
        );
        self.keep_books(&token)?;
        Ok(token)
    }

    /// Updates the look-behind and the bracket stacks with `token`.
    fn keep_books(&mut self, token: &Token) -> Result<(), Error> {
        match token.kind {
            TokenKind::OpenParen => self.handle_open_paren_books(),
            TokenKind::OpenCurly => self.handle_open_brace_books(),
            TokenKind::CloseParen => self.handle_close_paren_books(token.span.start.0)?,
            TokenKind::CloseCurly => self.handle_close_brace_books(token.span.start.0)?,
            kind => self.last_three.push(MetaToken {
                kind,
                line: self.stream.line(),
                bracket: None,
            }),
        }
        Ok(())
    }

    fn handle_open_paren_books(&mut self) {
        let mut is_func_expr = false;
        if self.last_three.one_is(TokenKind::Function) {
            is_func_expr = self.last_three.two().is_some_and(|t| check_for_expression(t.kind));
        } else if self.last_three.two_is(TokenKind::Function) {
            is_func_expr = self.last_three.three().is_some_and(|t| check_for_expression(t.kind));
        }
        let is_conditional = self.last_three.one().is_some_and(|t| t.kind.is_conditional());

        let paren = ParenInfo {
            is_func_expr,
            is_conditional,
        };
        trace!(?paren, depth = self.paren_stack.len(), "open paren");
        self.paren_stack.push(paren);
        self.last_three.push(MetaToken {
            kind: TokenKind::OpenParen,
            line: self.stream.line(),
            bracket: Some(Bracket::Paren(paren)),
        });
    }

    fn handle_open_brace_books(&mut self) {
        let line = self.stream.line();
        let is_block = match self.last_three.one() {
            None => true,
            Some(last) => match last.kind {
                TokenKind::OpenParen | TokenKind::OpenCurly | TokenKind::Case => false,
                TokenKind::Colon => self.brace_stack.last().is_some_and(|brace| brace.is_block),
                // An object literal returned on the same line.
                TokenKind::Return | TokenKind::Yield => last.line != line,
                kind => !kind.is_op(),
            },
        };

        let paren = self
            .last_three
            .one()
            .filter(|t| t.kind == TokenKind::CloseParen)
            .and_then(MetaToken::paren);

        let brace = BraceInfo { is_block, paren };
        trace!(?brace, depth = self.brace_stack.len(), "open brace");
        self.brace_stack.push(brace);
        self.last_three.push(MetaToken {
            kind: TokenKind::OpenCurly,
            line,
            bracket: Some(Bracket::Brace(brace)),
        });
    }

    fn handle_close_paren_books(&mut self, start: usize) -> Result<(), Error> {
        let Some(paren) = self.paren_stack.pop() else {
            return Err(unbalanced("unmatched closing paren", start));
        };
        trace!(?paren, depth = self.paren_stack.len(), "close paren");
        self.last_three.push(MetaToken {
            kind: TokenKind::CloseParen,
            line: self.stream.line(),
            bracket: Some(Bracket::Paren(paren)),
        });
        Ok(())
    }

    fn handle_close_brace_books(&mut self, start: usize) -> Result<(), Error> {
        let Some(brace) = self.brace_stack.pop() else {
            return Err(unbalanced("unmatched closing brace", start));
        };
        trace!(?brace, depth = self.brace_stack.len(), "close brace");
        self.last_three.push(MetaToken {
            kind: TokenKind::CloseCurly,
            line: self.stream.line(),
            bracket: Some(Bracket::Brace(brace)),
        });
        Ok(())
    }

    /// Whether the `/` just scanned starts a regular expression literal
    /// rather than a division.
    fn is_regex_start(&self) -> bool {
        let Some(last) = self.last_three.one() else {
            return true;
        };

        let is_regex = if last.kind.is_keyword() {
            last.kind != TokenKind::This
        } else if let Some(paren) = last.paren().filter(|_| last.kind == TokenKind::CloseParen) {
            paren.is_conditional
        } else if let Some(brace) = last.brace().filter(|_| last.kind == TokenKind::CloseCurly) {
            // Only a block that is not the body of a function expression.
            brace.is_block && !brace.paren.is_some_and(|paren| paren.is_func_expr)
        } else if last.kind.is_punct() {
            last.kind != TokenKind::CloseBracket
        } else {
            false
        };

        trace!(previous = %last.kind, is_regex, "slash");
        is_regex
    }
}

/// Tokens after which `function` starts a function expression.
fn check_for_expression(kind: TokenKind) -> bool {
    kind.is_op() || kind == TokenKind::Return || kind == TokenKind::Case
}

fn unbalanced(message: &str, start: usize) -> Error {
    Error::new(
        ErrorImpl::UnbalancedBrackets {
            message: format!("{} at {}", message, start),
        },
        Position(start),
    )
}

/// Lexes the whole of `source`.
///
/// The returned tokens end with the EOF token. Brackets still open at the
/// end of input are an error.
pub fn tokenize(source: &str, version: LanguageVersion) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::with_version(source, version);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let at_eof = token.kind == TokenKind::EOF;
        tokens.push(token);
        if at_eof {
            break;
        }
    }

    if !lex.is_balanced() {
        return Err(unbalanced("unclosed brackets at end of input", source.len()));
    }

    Ok(tokens)
}
