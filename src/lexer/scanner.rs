//! Character-level JavaScript scanner.
//!
//! [`Scanner`] walks the source one character at a time and classifies one
//! raw token per call to [`Scanner::next_raw_token`], including line breaks
//! and comments. Whether a `/` starts a regular expression is not decided
//! here: the [`Lexer`](super::lexer::Lexer) asks for
//! [`Scanner::read_regexp`] once it has made that call.

use crate::{
    context_before,
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::tokens::{is_keyword, keyword_kind, LanguageVersion, TokenKind, STRICT_MODE};

const BYTE_ORDER_MARK: char = '\u{FEFF}';
const NUMERIC_SEPARATOR: char = '_';
const REGEXP_FLAGS: &str = "gimysu";
const MAX_PUSHBACK: usize = 3;

/// One character handed out by `get_char_with`.
#[derive(Debug, Clone, Copy)]
struct Read {
    c: char,
    /// Bytes the read advanced over, skipped format characters and the
    /// `\n` of a `\r\n` pair included.
    consumed: usize,
    /// Source bytes of the character itself.
    width: usize,
}

const EMPTY_READ: Read = Read {
    c: '\0',
    consumed: 0,
    width: 0,
};

pub struct Scanner<'a> {
    source: &'a str,
    version: LanguageVersion,
    /// Byte index of the next character not yet read from `source`.
    source_cursor: usize,
    /// Byte index of the next character to be consumed, pushback included.
    cursor: usize,
    unget_buffer: [Read; MAX_PUSHBACK],
    unget_cursor: usize,
    /// The latest reads not pushed back, most recent last.
    recent_reads: [Read; MAX_PUSHBACK],
    recent_len: usize,
    line: u32,
    /// The raw line terminator last read, until the next line starts.
    line_end_char: Option<char>,
    /// Whether anything but whitespace or `-` was seen on the current line.
    dirty_line: bool,
    buffer: String,
    string: String,
    regexp_flags: String,
    token_beg: usize,
    token_end: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, version: LanguageVersion) -> Self {
        Self::starting_at(source, 0, version)
    }

    /// Creates a scanner whose first token starts at byte `offset`.
    ///
    /// Token offsets stay absolute to `source`. `offset` is clamped to a
    /// char boundary.
    pub fn starting_at(source: &'a str, offset: usize, version: LanguageVersion) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }

        Scanner {
            source,
            version,
            source_cursor: offset,
            cursor: offset,
            unget_buffer: [EMPTY_READ; MAX_PUSHBACK],
            unget_cursor: 0,
            recent_reads: [EMPTY_READ; MAX_PUSHBACK],
            recent_len: 0,
            line: 0,
            line_end_char: None,
            dirty_line: false,
            buffer: String::with_capacity(128),
            string: String::new(),
            regexp_flags: String::new(),
            token_beg: offset,
            token_end: offset,
        }
    }

    /// Byte offset of the next unread character.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Zero-based line of the cursor.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Absolute start offset of the last scanned token.
    pub fn token_beg(&self) -> usize {
        self.token_beg
    }

    /// Absolute end offset of the last scanned token.
    pub fn token_end(&self) -> usize {
        self.token_end
    }

    /// Decoded value of the last identifier, keyword, number, string,
    /// template literal or regular expression body.
    pub fn string(&self) -> &str {
        &self.string
    }

    /// Flags of the last regular expression literal.
    pub fn regexp_flags(&self) -> &str {
        &self.regexp_flags
    }

    pub fn token_raw(&self) -> &'a str {
        &self.source[self.token_beg..self.token_end]
    }

    /// Scans the next token, including line ends and comments.
    pub fn next_raw_token(&mut self) -> Result<TokenKind, Error> {
        // Eat whitespace, stopping at line ends.
        let c = loop {
            match self.get_char() {
                None => {
                    self.token_beg = self.cursor;
                    self.token_end = self.cursor;
                    return Ok(TokenKind::EOF);
                }
                Some('\n') => {
                    self.dirty_line = false;
                    self.token_beg = self.cursor - self.last_width();
                    self.token_end = self.cursor;
                    return Ok(TokenKind::EOL);
                }
                Some(ch) if is_js_space(ch) => continue,
                Some(ch) => {
                    if ch != '-' {
                        self.dirty_line = true;
                    }
                    break ch;
                }
            }
        };

        // Assume the token will be 1 char, fixed up below.
        self.token_beg = self.cursor - self.last_width();
        self.token_end = self.cursor;

        // Identifier or keyword, possibly starting with an escape.
        if c == '\\' {
            let next = self.get_char();
            if next == Some('u') {
                self.buffer.clear();
                return self.scan_identifier(true);
            }
            self.unget_char(next);
        } else if is_identifier_start(c) {
            self.buffer.clear();
            self.buffer.push(c);
            return self.scan_identifier(false);
        }

        if c.is_ascii_digit() || (c == '.' && self.peek_char().is_some_and(|d| d.is_ascii_digit())) {
            return self.scan_number(c);
        }

        if c == '"' || c == '\'' || c == '`' {
            return self.scan_string(c);
        }

        let kind = match c {
            ';' => TokenKind::Semicolon,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '{' => TokenKind::OpenCurly,
            '}' => TokenKind::CloseCurly,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            ',' => TokenKind::Comma,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '~' => TokenKind::Tilde,
            '|' => {
                if self.match_char('|') {
                    TokenKind::Or
                } else if self.match_char('=') {
                    TokenKind::PipeEquals
                } else {
                    TokenKind::Pipe
                }
            }
            '^' => {
                if self.match_char('=') {
                    TokenKind::CaretEquals
                } else {
                    TokenKind::Caret
                }
            }
            '&' => {
                if self.match_char('&') {
                    TokenKind::And
                } else if self.match_char('=') {
                    TokenKind::AmpersandEquals
                } else {
                    TokenKind::Ampersand
                }
            }
            '=' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        TokenKind::StrictEquals
                    } else {
                        TokenKind::Equals
                    }
                } else if self.match_char('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Assignment
                }
            }
            '!' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        TokenKind::StrictNotEquals
                    } else {
                        TokenKind::NotEquals
                    }
                } else {
                    TokenKind::Not
                }
            }
            '<' => {
                // HTML comment start runs to the end of the line.
                if self.match_char('!') {
                    if self.match_char('-') {
                        if self.match_char('-') {
                            self.skip_line();
                            return Ok(TokenKind::LineComment);
                        }
                        self.unget_char_ignore_line_end(Some('-'));
                    }
                    self.unget_char_ignore_line_end(Some('!'));
                    self.token_end = self.cursor;
                }
                if self.match_char('<') {
                    if self.match_char('=') {
                        TokenKind::ShiftLeftEquals
                    } else {
                        TokenKind::ShiftLeft
                    }
                } else if self.match_char('=') {
                    TokenKind::LessEquals
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.match_char('>') {
                    if self.match_char('>') {
                        if self.match_char('=') {
                            TokenKind::UnsignedShiftRightEquals
                        } else {
                            TokenKind::UnsignedShiftRight
                        }
                    } else if self.match_char('=') {
                        TokenKind::ShiftRightEquals
                    } else {
                        TokenKind::ShiftRight
                    }
                } else if self.match_char('=') {
                    TokenKind::GreaterEquals
                } else {
                    TokenKind::Greater
                }
            }
            '*' => {
                if self.version >= LanguageVersion::Es6 && self.match_char('*') {
                    if self.match_char('=') {
                        TokenKind::StarStarEquals
                    } else {
                        TokenKind::StarStar
                    }
                } else if self.match_char('=') {
                    TokenKind::StarEquals
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.match_char('/') {
                    self.skip_line();
                    return Ok(TokenKind::LineComment);
                }
                if self.match_char('*') {
                    return self.skip_block_comment();
                }
                if self.match_char('=') {
                    TokenKind::SlashEquals
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.match_char('=') {
                    TokenKind::PercentEquals
                } else {
                    TokenKind::Percent
                }
            }
            '+' => {
                if self.match_char('=') {
                    TokenKind::PlusEquals
                } else if self.match_char('+') {
                    TokenKind::PlusPlus
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                let mut kind = TokenKind::Dash;
                if self.match_char('=') {
                    kind = TokenKind::MinusEquals;
                } else if self.match_char('-') {
                    // HTML comment end after only whitespace on this line.
                    if !self.dirty_line && self.match_char('>') {
                        self.skip_line();
                        return Ok(TokenKind::LineComment);
                    }
                    kind = TokenKind::MinusMinus;
                }
                self.dirty_line = true;
                kind
            }
            _ => {
                return Err(self.error_at(
                    ErrorImpl::IllegalCharacter { character: c },
                    self.token_beg,
                ));
            }
        };

        Ok(kind)
    }

    fn scan_identifier(&mut self, escape_start: bool) -> Result<TokenKind, Error> {
        let mut escape_pending = escape_start;
        let mut contains_escape = escape_start;

        loop {
            if escape_pending {
                let value = self.read_hex_digits(4);
                let decoded = value.and_then(char::from_u32);
                let Some(decoded) = decoded else {
                    return Err(self.error_at(ErrorImpl::InvalidUnicodeEscape, self.cursor));
                };
                self.buffer.push(decoded);
                escape_pending = false;
                continue;
            }

            let c = self.get_char();
            match c {
                Some('\\') => {
                    let next = self.get_char();
                    if next != Some('u') {
                        return Err(self.error_at(
                            ErrorImpl::IllegalCharacter {
                                character: next.unwrap_or('\\'),
                            },
                            self.cursor,
                        ));
                    }
                    escape_pending = true;
                    contains_escape = true;
                }
                Some(ch) if ch != BYTE_ORDER_MARK && is_identifier_part(ch) => self.buffer.push(ch),
                other => {
                    self.unget_char(other);
                    break;
                }
            }
        }

        self.token_end = self.cursor;
        let mut name = std::mem::take(&mut self.buffer);

        if !contains_escape {
            if let Some(kind) = keyword_kind(&name, self.version, STRICT_MODE) {
                let kind = match kind {
                    TokenKind::Let | TokenKind::Yield if self.version < LanguageVersion::Js17 => {
                        TokenKind::Identifier
                    }
                    kind => kind,
                };
                // Legacy scripts may use reserved words as identifiers.
                if kind != TokenKind::Reserved || self.version >= LanguageVersion::Es6 {
                    self.string = name;
                    return Ok(kind);
                }
            }
        } else if is_keyword(&name, self.version, STRICT_MODE) {
            name = convert_last_char_to_hex(&name);
        }

        self.string = name;
        Ok(TokenKind::Identifier)
    }

    fn scan_number(&mut self, first: char) -> Result<TokenKind, Error> {
        self.buffer.clear();
        let es6 = self.version >= LanguageVersion::Es6;
        let mut base = 10;
        let mut is_old_octal = false;
        let mut c = Some(first);

        if first == '0' {
            c = self.get_char();
            match c {
                Some('x' | 'X') => {
                    base = 16;
                    c = self.get_char();
                }
                Some('o' | 'O') if es6 => {
                    base = 8;
                    c = self.get_char();
                }
                Some('b' | 'B') if es6 => {
                    base = 2;
                    c = self.get_char();
                }
                Some(d) if d.is_ascii_digit() => {
                    base = 8;
                    is_old_octal = true;
                }
                _ => self.buffer.push('0'),
            }
        }

        let empty_detector = self.buffer.len();
        if !is_old_octal {
            c = self.read_digits(base, c)?;
        } else {
            while let Some(d) = c.filter(char::is_ascii_digit) {
                // 08 and 09 are read as decimal numbers.
                if d >= '8' {
                    base = 10;
                    c = self.read_digits(base, c)?;
                    break;
                }
                self.buffer.push(d);
                c = self.get_char();
            }
        }

        if self.buffer.len() == empty_detector && base != 10 {
            return Err(self.number_error("missing digits after base prefix"));
        }

        if es6 && c == Some('n') {
            c = self.get_char();
        } else if base == 10 && matches!(c, Some('.' | 'e' | 'E')) {
            if c == Some('.') {
                self.buffer.push('.');
                c = self.get_char();
                c = self.read_digits(base, c)?;
            }
            if let Some(e @ ('e' | 'E')) = c {
                self.buffer.push(e);
                c = self.get_char();
                if let Some(sign @ ('+' | '-')) = c {
                    self.buffer.push(sign);
                    c = self.get_char();
                }
                if !c.is_some_and(|d| d.is_ascii_digit()) {
                    return Err(self.number_error("missing exponent"));
                }
                c = self.read_digits(base, c)?;
            }
        }

        self.unget_char(c);
        self.token_end = self.cursor;
        self.string = std::mem::take(&mut self.buffer);
        Ok(TokenKind::Number)
    }

    /// Reads digits of `base` starting with `first`, skipping separators.
    ///
    /// Returns the first character that is not part of the digit run. A
    /// separator followed by a non-digit is handed back unconsumed.
    fn read_digits(&mut self, base: u32, first: Option<char>) -> Result<Option<char>, Error> {
        let Some(first) = first.filter(|&d| d.is_digit(base)) else {
            return Ok(first);
        };
        self.buffer.push(first);

        let mut c = self.get_char();
        loop {
            match c {
                Some(NUMERIC_SEPARATOR) => {
                    c = self.get_char();
                    match c {
                        None | Some('\n') => {
                            return Err(self.number_error("numeric separator at end of line"));
                        }
                        Some(d) if d.is_digit(base) => {}
                        other => {
                            self.unget_char(other);
                            return Ok(Some(NUMERIC_SEPARATOR));
                        }
                    }
                }
                Some(d) if d.is_digit(base) => {
                    self.buffer.push(d);
                    c = self.get_char();
                }
                other => return Ok(other),
            }
        }
    }

    fn scan_string(&mut self, quote: char) -> Result<TokenKind, Error> {
        let literal = if quote == '`' {
            "template literal"
        } else {
            "string literal"
        };
        self.buffer.clear();
        let mut high_surrogate = None;
        let mut c = self.get_char_with(false, true);

        loop {
            let ch = match c {
                None => return Err(self.unterminated(literal)),
                Some(ch) if ch == quote => break,
                Some('\n') => match self.line_end_char {
                    // Line and paragraph separators are kept as they are.
                    Some(separator @ ('\u{2028}' | '\u{2029}')) => separator,
                    _ if quote == '`' => '\n',
                    _ => return Err(self.unterminated(literal)),
                },
                Some('\\') => {
                    c = self.get_char();
                    match c {
                        None => return Err(self.unterminated(literal)),
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('v') => '\u{b}',
                        Some('u') => {
                            let Some(unit) = self.read_hex_digits(4) else {
                                return Err(self.error_at(ErrorImpl::InvalidUnicodeEscape, self.cursor));
                            };
                            self.push_code_unit(unit, &mut high_surrogate);
                            c = self.get_char_with(false, false);
                            continue;
                        }
                        Some('x') => {
                            // Without two hex digits the escape stays literal text.
                            c = self.get_char();
                            self.flush_surrogate(&mut high_surrogate);
                            let Some(high) = c.and_then(|d| d.to_digit(16)) else {
                                self.buffer.push('x');
                                continue;
                            };
                            let first = c;
                            c = self.get_char();
                            let Some(low) = c.and_then(|d| d.to_digit(16)) else {
                                self.buffer.push('x');
                                self.buffer.extend(first);
                                continue;
                            };
                            char::from_u32(high * 16 + low).unwrap_or(char::REPLACEMENT_CHARACTER)
                        }
                        Some('\n') => {
                            // Line continuation.
                            c = self.get_char();
                            continue;
                        }
                        Some(d @ '0'..='7') => {
                            let mut value = octal_value(d);
                            c = self.get_char();
                            if let Some(d @ '0'..='7') = c {
                                value = 8 * value + octal_value(d);
                                c = self.get_char();
                                // Three digits only while the value stays <= 0o377.
                                if let Some(d @ '0'..='7') = c.filter(|_| value <= 31) {
                                    value = 8 * value + octal_value(d);
                                    c = self.get_char();
                                }
                            }
                            self.unget_char(c);
                            char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
                        }
                        Some(other) => other,
                    }
                }
                Some(ch) => ch,
            };

            self.flush_surrogate(&mut high_surrogate);
            self.buffer.push(ch);
            c = self.get_char_with(false, false);
        }

        self.flush_surrogate(&mut high_surrogate);
        self.token_end = self.cursor;
        self.string = std::mem::take(&mut self.buffer);

        if quote == '`' {
            Ok(TokenKind::TemplateLiteral)
        } else {
            Ok(TokenKind::String)
        }
    }

    /// Appends a UTF-16 code unit, pairing surrogates where possible.
    fn push_code_unit(&mut self, unit: u32, high_surrogate: &mut Option<u32>) {
        match unit {
            0xD800..=0xDBFF => {
                self.flush_surrogate(high_surrogate);
                *high_surrogate = Some(unit);
            }
            0xDC00..=0xDFFF => match high_surrogate.take() {
                Some(high) => {
                    let scalar = 0x10000 + ((high - 0xD800) << 10) + (unit - 0xDC00);
                    self.buffer
                        .push(char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                None => self.buffer.push(char::REPLACEMENT_CHARACTER),
            },
            _ => {
                self.flush_surrogate(high_surrogate);
                self.buffer
                    .push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
    }

    fn flush_surrogate(&mut self, high_surrogate: &mut Option<u32>) {
        if high_surrogate.take().is_some() {
            self.buffer.push(char::REPLACEMENT_CHARACTER);
        }
    }

    /// Scans a regular expression literal whose opening `/` (or `/=`) was
    /// just returned as `start_kind`.
    pub fn read_regexp(&mut self, start_kind: TokenKind) -> Result<(), Error> {
        self.buffer.clear();
        self.regexp_flags.clear();

        if start_kind == TokenKind::SlashEquals {
            // Miss-scanned /=
            self.buffer.push('=');
        } else {
            debug_assert_eq!(start_kind, TokenKind::Slash);
            if self.peek_char() == Some('*') {
                return Err(self.unterminated("regular expression literal"));
            }
        }

        let mut in_char_set = false;
        loop {
            let c = self.get_char();
            match c {
                Some('/') if !in_char_set => break,
                None | Some('\n') => return Err(self.unterminated("regular expression literal")),
                Some('\\') => {
                    self.buffer.push('\\');
                    match self.get_char() {
                        None | Some('\n') => {
                            return Err(self.unterminated("regular expression literal"));
                        }
                        Some(escaped) => self.buffer.push(escaped),
                    }
                }
                Some(ch) => {
                    if ch == '[' {
                        in_char_set = true;
                    } else if ch == ']' {
                        in_char_set = false;
                    }
                    self.buffer.push(ch);
                }
            }
        }

        loop {
            let c = self.get_char_with(true, true);
            match c {
                Some(flag) if REGEXP_FLAGS.contains(flag) => self.regexp_flags.push(flag),
                Some(flag) if flag.is_alphabetic() => {
                    let offset = self.cursor - self.last_width();
                    return Err(self.error_at(ErrorImpl::InvalidRegexFlag { flag }, offset));
                }
                other => {
                    self.unget_char_ignore_line_end(other);
                    break;
                }
            }
        }

        self.token_end = self.cursor;
        self.string = std::mem::take(&mut self.buffer);
        Ok(())
    }

    fn skip_block_comment(&mut self) -> Result<TokenKind, Error> {
        let mut look_for_slash = self.match_char('*');
        loop {
            match self.get_char() {
                None => {
                    self.token_end = self.cursor;
                    return Err(self.unterminated("block comment"));
                }
                Some('*') => look_for_slash = true,
                Some('/') if look_for_slash => {
                    self.token_end = self.cursor;
                    return Ok(TokenKind::BlockComment);
                }
                Some(_) => look_for_slash = false,
            }
        }
    }

    fn skip_line(&mut self) {
        let mut c;
        loop {
            c = self.get_char();
            if c.is_none() || c == Some('\n') {
                break;
            }
        }
        self.unget_char(c);
        self.token_end = self.cursor;
    }

    /// Reads exactly `count` hex digits and returns their value.
    fn read_hex_digits(&mut self, count: usize) -> Option<u32> {
        let mut value = 0;
        for _ in 0..count {
            let digit = self.get_char()?.to_digit(16)?;
            value = value * 16 + digit;
        }
        Some(value)
    }

    fn match_char(&mut self, test: char) -> bool {
        let c = self.get_char_with(true, true);
        if c == Some(test) {
            self.token_end = self.cursor;
            true
        } else {
            self.unget_char_ignore_line_end(c);
            false
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        let c = self.get_char();
        self.unget_char(c);
        c
    }

    fn get_char(&mut self) -> Option<char> {
        self.get_char_with(true, false)
    }

    /// Reads the next character, folding every line terminator into `\n`.
    ///
    /// `\r\n` counts as one line end. Unless `ignore_line_end` is set, the
    /// line counter advances on the first read after a line end.
    fn get_char_with(&mut self, skip_formatting_chars: bool, ignore_line_end: bool) -> Option<char> {
        if self.unget_cursor != 0 {
            self.unget_cursor -= 1;
            let read = self.unget_buffer[self.unget_cursor];
            self.cursor += read.consumed;
            self.remember(read);
            return Some(read.c);
        }

        let start = self.source_cursor;
        let c = loop {
            let Some(c) = self.source[self.source_cursor..].chars().next() else {
                // Format characters skipped before the end still count.
                self.cursor += self.source_cursor - start;
                return None;
            };
            self.source_cursor += c.len_utf8();

            if !ignore_line_end {
                if let Some(line_end) = self.line_end_char {
                    if line_end == '\r' && c == '\n' {
                        self.line_end_char = Some('\n');
                        continue;
                    }
                    self.line_end_char = None;
                    self.line += 1;
                }
            }

            if is_line_terminator(c) {
                self.line_end_char = Some(c);
                break c;
            }
            if c == BYTE_ORDER_MARK {
                // Treated as whitespace.
                break c;
            }
            if skip_formatting_chars && is_format_char(c) {
                continue;
            }
            break c;
        };

        let consumed = self.source_cursor - start;
        self.cursor += consumed;
        let read = Read {
            c: if is_line_terminator(c) { '\n' } else { c },
            consumed,
            width: c.len_utf8(),
        };
        self.remember(read);
        Some(read.c)
    }

    fn remember(&mut self, read: Read) {
        if self.recent_len == MAX_PUSHBACK {
            self.recent_reads.rotate_left(1);
            self.recent_len -= 1;
        }
        self.recent_reads[self.recent_len] = read;
        self.recent_len += 1;
    }

    /// Source bytes of the character last returned by `get_char_with`.
    fn last_width(&self) -> usize {
        match self.recent_len {
            0 => 0,
            len => self.recent_reads[len - 1].width,
        }
    }

    fn unget_char(&mut self, c: Option<char>) {
        // Can not unread across a line boundary.
        debug_assert!(
            self.unget_cursor == 0 || self.unget_buffer[self.unget_cursor - 1].c != '\n',
            "pushback across a line boundary"
        );
        self.unget_char_ignore_line_end(c);
    }

    fn unget_char_ignore_line_end(&mut self, c: Option<char>) {
        // EOF is always the furthest read, so it never needs replaying.
        let Some(c) = c else {
            return;
        };
        debug_assert!(self.unget_cursor < MAX_PUSHBACK, "pushback buffer overflow");
        debug_assert!(self.recent_len > 0, "pushback of a character never read");
        let read = match self.recent_len {
            0 => Read {
                c,
                consumed: c.len_utf8(),
                width: c.len_utf8(),
            },
            len => {
                self.recent_len -= 1;
                self.recent_reads[len - 1]
            }
        };
        debug_assert_eq!(read.c, c, "pushback out of order");
        self.unget_buffer[self.unget_cursor] = read;
        self.unget_cursor += 1;
        self.cursor -= read.consumed;
    }

    fn error_at(&self, error: ErrorImpl, offset: usize) -> Error {
        Error::new(error, Position(offset)).with_context(context_before(self.source, offset))
    }

    fn unterminated(&self, literal: &'static str) -> Error {
        self.error_at(ErrorImpl::UnterminatedLiteral { literal }, self.token_beg)
    }

    fn number_error(&self, reason: &'static str) -> Error {
        self.error_at(ErrorImpl::NumberFormatError { reason }, self.cursor)
    }
}

fn octal_value(d: char) -> u32 {
    d as u32 - '0' as u32
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_js_space(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\u{B}'
            | '\u{C}'
            | '\u{A0}'
            | BYTE_ORDER_MARK
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Invisible format characters dropped outside literals. ZWNJ and ZWJ are
/// kept since identifiers may contain them.
fn is_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{AD}'
            | '\u{600}'..='\u{605}'
            | '\u{61C}'
            | '\u{180E}'
            | '\u{200B}'
            | '\u{200E}'
            | '\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
    )
}

fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && unicode_ident::is_xid_start(c))
}

fn is_identifier_part(c: char) -> bool {
    c == '$'
        || c == '_'
        || c == '\u{200C}'
        || c == '\u{200D}'
        || c.is_ascii_alphanumeric()
        || (!c.is_ascii() && unicode_ident::is_xid_continue(c))
}

/// Re-encodes the last character as `\uXXXX` so an escaped keyword stays
/// an identifier.
fn convert_last_char_to_hex(name: &str) -> String {
    let mut chars = name.chars();
    let Some(last) = chars.next_back() else {
        return String::new();
    };
    format!("{}\\u{:04x}", chars.as_str(), last as u32)
}
