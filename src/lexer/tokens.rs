use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

/// Whether the ES6 keyword table also reserves the strict-mode words.
pub const STRICT_MODE: bool = false;

lazy_static! {
    /// JavaScript 1.8 and earlier.
    pub static ref LEGACY_KEYWORD_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("break", TokenKind::Break);
        map.insert("case", TokenKind::Case);
        map.insert("continue", TokenKind::Continue);
        map.insert("default", TokenKind::Default);
        map.insert("delete", TokenKind::Delete);
        map.insert("do", TokenKind::Do);
        map.insert("else", TokenKind::Else);
        map.insert("export", TokenKind::Export);
        map.insert("false", TokenKind::False);
        map.insert("for", TokenKind::For);
        map.insert("function", TokenKind::Function);
        map.insert("if", TokenKind::If);
        map.insert("in", TokenKind::In);
        map.insert("let", TokenKind::Let);
        map.insert("new", TokenKind::New);
        map.insert("null", TokenKind::Null);
        map.insert("return", TokenKind::Return);
        map.insert("switch", TokenKind::Switch);
        map.insert("this", TokenKind::This);
        map.insert("true", TokenKind::True);
        map.insert("typeof", TokenKind::Typeof);
        map.insert("var", TokenKind::Var);
        map.insert("void", TokenKind::Void);
        map.insert("while", TokenKind::While);
        map.insert("with", TokenKind::With);
        map.insert("yield", TokenKind::Yield);
        map.insert("throw", TokenKind::Throw);
        map.insert("catch", TokenKind::Catch);
        map.insert("const", TokenKind::Const);
        map.insert("debugger", TokenKind::Debugger);
        map.insert("finally", TokenKind::Finally);
        map.insert("instanceof", TokenKind::Instanceof);
        map.insert("try", TokenKind::Try);
        for word in [
            "abstract", "boolean", "byte", "char", "class", "double", "enum", "extends", "final",
            "float", "goto", "implements", "import", "int", "interface", "long", "native",
            "package", "private", "protected", "public", "short", "static", "super",
            "synchronized", "throws", "transient", "volatile",
        ] {
            map.insert(word, TokenKind::Reserved);
        }
        map
    };

    /// ECMAScript 6 and later.
    pub static ref ES_KEYWORD_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("break", TokenKind::Break);
        map.insert("case", TokenKind::Case);
        map.insert("catch", TokenKind::Catch);
        map.insert("const", TokenKind::Const);
        map.insert("continue", TokenKind::Continue);
        map.insert("debugger", TokenKind::Debugger);
        map.insert("default", TokenKind::Default);
        map.insert("delete", TokenKind::Delete);
        map.insert("do", TokenKind::Do);
        map.insert("else", TokenKind::Else);
        map.insert("export", TokenKind::Export);
        map.insert("finally", TokenKind::Finally);
        map.insert("for", TokenKind::For);
        map.insert("function", TokenKind::Function);
        map.insert("if", TokenKind::If);
        map.insert("import", TokenKind::Import);
        map.insert("in", TokenKind::In);
        map.insert("instanceof", TokenKind::Instanceof);
        map.insert("new", TokenKind::New);
        map.insert("return", TokenKind::Return);
        map.insert("switch", TokenKind::Switch);
        map.insert("this", TokenKind::This);
        map.insert("throw", TokenKind::Throw);
        map.insert("try", TokenKind::Try);
        map.insert("typeof", TokenKind::Typeof);
        map.insert("var", TokenKind::Var);
        map.insert("void", TokenKind::Void);
        map.insert("while", TokenKind::While);
        map.insert("with", TokenKind::With);
        map.insert("yield", TokenKind::Yield);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map.insert("true", TokenKind::True);
        map.insert("let", TokenKind::Let);
        for word in ["class", "extends", "super", "await", "enum"] {
            map.insert(word, TokenKind::Reserved);
        }
        map
    };

    /// Words the ES6 table reserves only in strict mode.
    pub static ref ES_STRICT_RESERVED: Vec<&'static str> = vec![
        "implements", "interface", "package", "private", "protected", "public", "static",
    ];
}

/// JavaScript language level, selecting the keyword table and the
/// lexical features that only exist in later versions.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default)]
pub enum LanguageVersion {
    /// JavaScript before 1.7: `let` and `yield` are plain names.
    #[default]
    Legacy,
    /// JavaScript 1.7 and 1.8.
    Js17,
    /// ECMAScript 6: binary/octal prefixes, BigInt, `**`, ES keyword table.
    Es6,
}

/// Looks `name` up in the keyword table of `version`.
///
/// Returns `None` for plain identifiers.
pub fn keyword_kind(name: &str, version: LanguageVersion, is_strict: bool) -> Option<TokenKind> {
    if version < LanguageVersion::Es6 {
        return LEGACY_KEYWORD_LOOKUP.get(name).copied();
    }

    if let Some(kind) = ES_KEYWORD_LOOKUP.get(name) {
        return Some(*kind);
    }

    if is_strict && ES_STRICT_RESERVED.contains(&name) {
        return Some(TokenKind::Reserved);
    }

    None
}

pub fn is_keyword(name: &str, version: LanguageVersion, is_strict: bool) -> bool {
    keyword_kind(name, version, is_strict).is_some()
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    EOL,
    Number,
    String,
    TemplateLiteral,
    RegExp,
    Identifier,
    LineComment,
    BlockComment,

    Tilde,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment,      // =
    Equals,          // ==
    StrictEquals,    // ===
    Not,             // !
    NotEquals,       // !=
    StrictNotEquals, // !==

    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,

    Or,
    And,
    Pipe,
    Caret,
    Ampersand,

    Dot,
    Semicolon,
    Colon,
    Question,
    Comma,
    Arrow, // =>

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    SlashEquals,
    StarEquals,
    PercentEquals,
    StarStarEquals,
    PipeEquals,
    CaretEquals,
    AmpersandEquals,
    ShiftLeftEquals,
    ShiftRightEquals,
    UnsignedShiftRightEquals,

    Plus,
    Dash,
    Slash,
    Star,
    StarStar,
    Percent,

    // Reserved
    Break,
    Case,
    Catch,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Export,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    Let,
    New,
    Return,
    Switch,
    This,
    Throw,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,
    Yield,
    Reserved,

    // Literal words
    True,
    False,
    Null,
}

impl TokenKind {
    /// Symbol tokens: brackets, separators and every symbolic operator.
    pub fn is_punct(self) -> bool {
        matches!(
            self,
            TokenKind::Tilde
                | TokenKind::OpenBracket
                | TokenKind::CloseBracket
                | TokenKind::OpenCurly
                | TokenKind::CloseCurly
                | TokenKind::OpenParen
                | TokenKind::CloseParen
                | TokenKind::Dot
                | TokenKind::Semicolon
                | TokenKind::Colon
                | TokenKind::Question
                | TokenKind::Comma
                | TokenKind::Arrow
        ) || (self.is_op() && !self.is_keyword())
    }

    /// Tokens after which an expression is still expected.
    pub fn is_op(self) -> bool {
        matches!(
            self,
            TokenKind::Tilde
                | TokenKind::Assignment
                | TokenKind::Equals
                | TokenKind::StrictEquals
                | TokenKind::Not
                | TokenKind::NotEquals
                | TokenKind::StrictNotEquals
                | TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
                | TokenKind::ShiftLeft
                | TokenKind::ShiftRight
                | TokenKind::UnsignedShiftRight
                | TokenKind::Or
                | TokenKind::And
                | TokenKind::Pipe
                | TokenKind::Caret
                | TokenKind::Ampersand
                | TokenKind::Colon
                | TokenKind::Question
                | TokenKind::Comma
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::SlashEquals
                | TokenKind::StarEquals
                | TokenKind::PercentEquals
                | TokenKind::StarStarEquals
                | TokenKind::PipeEquals
                | TokenKind::CaretEquals
                | TokenKind::AmpersandEquals
                | TokenKind::ShiftLeftEquals
                | TokenKind::ShiftRightEquals
                | TokenKind::UnsignedShiftRightEquals
                | TokenKind::Plus
                | TokenKind::Dash
                | TokenKind::Slash
                | TokenKind::Star
                | TokenKind::StarStar
                | TokenKind::Percent
                | TokenKind::Delete
                | TokenKind::In
                | TokenKind::Instanceof
                | TokenKind::New
                | TokenKind::Typeof
                | TokenKind::Void
                | TokenKind::Yield
        )
    }

    /// Keywords and reserved words. `true`, `false` and `null` are literals.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Break
                | TokenKind::Case
                | TokenKind::Catch
                | TokenKind::Const
                | TokenKind::Continue
                | TokenKind::Debugger
                | TokenKind::Default
                | TokenKind::Delete
                | TokenKind::Do
                | TokenKind::Else
                | TokenKind::Export
                | TokenKind::Finally
                | TokenKind::For
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::Import
                | TokenKind::In
                | TokenKind::Instanceof
                | TokenKind::Let
                | TokenKind::New
                | TokenKind::Return
                | TokenKind::Switch
                | TokenKind::This
                | TokenKind::Throw
                | TokenKind::Try
                | TokenKind::Typeof
                | TokenKind::Var
                | TokenKind::Void
                | TokenKind::While
                | TokenKind::With
                | TokenKind::Yield
                | TokenKind::Reserved
        )
    }

    /// Keywords followed by a parenthesized test or header.
    pub fn is_conditional(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Switch
                | TokenKind::With
                | TokenKind::Catch
        )
    }

    /// Tokens the lexer drops from its public stream.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::EOL | TokenKind::LineComment | TokenKind::BlockComment
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    /// The exact lexeme in the source the token was scanned from.
    pub fn raw<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start.0..self.span.end.0]
    }
}
