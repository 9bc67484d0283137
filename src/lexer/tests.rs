//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords per language version and identifiers
//! - Numeric, string, template and regular expression literals
//! - Division versus regular expression disambiguation
//! - Comments, including HTML-like comments
//! - Bracket balance and error cases

use super::{
    lexer::{tokenize, Lexer},
    scanner::Scanner,
    tokens::{LanguageVersion, TokenKind},
};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str, version: LanguageVersion) -> Vec<TokenKind> {
    tokenize(source, version)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn values(source: &str, version: LanguageVersion) -> Vec<String> {
    tokenize(source, version)
        .unwrap()
        .into_iter()
        .filter(|token| token.kind != TokenKind::EOF)
        .map(|token| token.value)
        .collect()
}

/// Every raw token up to and including EOF, with its exact lexeme.
fn raw_tokens(source: &str) -> Vec<(TokenKind, &str)> {
    let mut scanner = Scanner::new(source, LanguageVersion::Legacy);
    let mut tokens = vec![];
    loop {
        let kind = scanner.next_raw_token().unwrap();
        tokens.push((kind, scanner.token_raw()));
        if kind == TokenKind::EOF {
            return tokens;
        }
    }
}

fn error_kind(source: &str, version: LanguageVersion) -> ErrorImpl {
    tokenize(source, version).unwrap_err().kind().clone()
}

#[test]
fn test_tokenize_keywords_legacy() {
    let tokens = kinds(
        "var function return if this let yield class",
        LanguageVersion::Legacy,
    );

    assert_eq!(
        tokens,
        vec![
            TokenKind::Var,
            TokenKind::Function,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::This,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_keywords_per_version() {
    assert_eq!(
        kinds("let yield", LanguageVersion::Js17),
        vec![TokenKind::Let, TokenKind::Yield, TokenKind::EOF]
    );
    assert_eq!(
        kinds("class import let", LanguageVersion::Es6),
        vec![
            TokenKind::Reserved,
            TokenKind::Import,
            TokenKind::Let,
            TokenKind::EOF
        ]
    );
    assert_eq!(
        kinds("true false null", LanguageVersion::Legacy),
        vec![
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = r"foo $bar _baz q\u0041z café";
    let tokens = tokenize(source, LanguageVersion::Legacy).unwrap();

    assert!(tokens[..5]
        .iter()
        .all(|token| token.kind == TokenKind::Identifier));
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "$bar");
    assert_eq!(tokens[2].value, "_baz");
    assert_eq!(tokens[3].value, "qAz");
    assert_eq!(tokens[3].raw(source), r"q\u0041z");
    assert_eq!(tokens[4].value, "café");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_escaped_keyword_is_identifier() {
    let tokens = tokenize(r"\u0069f", LanguageVersion::Legacy).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, r"i\u0066");
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0x1F 017 08 .5 1e3 2.5E-2 0";
    let tokens = tokenize(source, LanguageVersion::Legacy).unwrap();

    assert!(tokens[..9].iter().all(|token| token.kind == TokenKind::Number));
    assert_eq!(
        values(source, LanguageVersion::Legacy),
        vec!["42", "3.14", "1F", "17", "8", ".5", "1e3", "2.5E-2", "0"]
    );
    assert_eq!(tokens[2].raw(source), "0x1F");
    assert_eq!(tokens[4].raw(source), "08");
}

#[test]
fn test_tokenize_numeric_separators() {
    assert_eq!(
        values("1_000 1_000_000", LanguageVersion::Legacy),
        vec!["1000", "1000000"]
    );

    // A separator not followed by a digit ends the number.
    let tokens = tokenize("1_a", LanguageVersion::Legacy).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "1");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "_a");
}

#[test]
fn test_tokenize_number_errors() {
    for source in ["1_", "1_\n2", "1e", "1e+;", "0x"] {
        assert!(
            matches!(
                error_kind(source, LanguageVersion::Legacy),
                ErrorImpl::NumberFormatError { .. }
            ),
            "{:?} should not lex",
            source
        );
    }
}

#[test]
fn test_tokenize_es6_numbers() {
    assert_eq!(
        values("0b101 0o17 10n", LanguageVersion::Es6),
        vec!["101", "17", "10"]
    );
    assert_eq!(
        kinds("10n", LanguageVersion::Legacy),
        vec![TokenKind::Number, TokenKind::Identifier, TokenKind::EOF]
    );
    assert_eq!(
        kinds("2 ** 3", LanguageVersion::Es6),
        vec![
            TokenKind::Number,
            TokenKind::StarStar,
            TokenKind::Number,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_strings() {
    let source = r#""a\tb" 'it\'s' "\x41\u0042" "\101" "\x4""#;
    let tokens = tokenize(source, LanguageVersion::Legacy).unwrap();

    assert!(tokens[..5].iter().all(|token| token.kind == TokenKind::String));
    assert_eq!(tokens[0].value, "a\tb");
    assert_eq!(tokens[1].value, "it's");
    assert_eq!(tokens[2].value, "AB");
    assert_eq!(tokens[3].value, "A");
    assert_eq!(tokens[4].value, "x4");
    assert_eq!(tokens[1].raw(source), r"'it\'s'");
}

#[test]
fn test_tokenize_string_surrogates_and_continuations() {
    let tokens = tokenize(
        "\"\\uD83D\\uDE00\" \"\\uD83Dx\" \"a\\\nb\"",
        LanguageVersion::Legacy,
    )
    .unwrap();

    assert_eq!(tokens[0].value, "😀");
    assert_eq!(tokens[1].value, "\u{FFFD}x");
    assert_eq!(tokens[2].value, "ab");
}

#[test]
fn test_tokenize_string_errors() {
    assert_eq!(
        error_kind(r#""\u00G1""#, LanguageVersion::Legacy),
        ErrorImpl::InvalidUnicodeEscape
    );

    let error = tokenize(r#"var s = "abc"#, LanguageVersion::Legacy).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorImpl::UnterminatedLiteral { .. }
    ));
    assert_eq!(error.get_position().0, 8);
    assert_eq!(error.get_context(), Some("var s = "));

    assert!(matches!(
        error_kind("'ab\ncd'", LanguageVersion::Legacy),
        ErrorImpl::UnterminatedLiteral { .. }
    ));
}

#[test]
fn test_tokenize_template_literal() {
    let tokens = tokenize("`a\nb`", LanguageVersion::Es6).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::TemplateLiteral);
    assert_eq!(tokens[0].value, "a\nb");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_division() {
    assert_eq!(
        kinds("a/b/g", LanguageVersion::Legacy),
        vec![
            TokenKind::Identifier,
            TokenKind::Slash,
            TokenKind::Identifier,
            TokenKind::Slash,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );

    for source in ["(a)/2", "this/2", "x[0]/2", "10/2", "x /= 2"] {
        let tokens = kinds(source, LanguageVersion::Legacy);
        assert!(
            !tokens.contains(&TokenKind::RegExp),
            "{:?} lexed a regular expression",
            source
        );
    }
}

#[test]
fn test_tokenize_regexp() {
    let source = "return /x/g";
    let tokens = tokenize(source, LanguageVersion::Legacy).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Return);
    assert_eq!(tokens[1].kind, TokenKind::RegExp);
    assert_eq!(tokens[1].value, "x");
    assert_eq!(tokens[1].raw(source), "/x/g");
    assert_eq!(tokens[2].kind, TokenKind::EOF);

    let mut lex = Lexer::new("/ab+c/i");
    let token = lex.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::RegExp);
    assert_eq!(token.value, "ab+c");
    assert_eq!(lex.regexp_flags(), "i");
}

#[test]
fn test_tokenize_regexp_contexts() {
    for (source, body) in [
        ("x = /[/]/", "[/]"),
        ("x = /=a/", "=a"),
        ("if (a) /re/.test(b)", "re"),
        ("f(/a\\/b/)", "a\\/b"),
        ("{}\n/foo/", "foo"),
        ("function f(){}\n/foo/", "foo"),
        ("x = [/,,/]", ",,"),
    ] {
        let tokens = tokenize(source, LanguageVersion::Legacy).unwrap();
        let regexp = tokens
            .iter()
            .find(|token| token.kind == TokenKind::RegExp)
            .unwrap_or_else(|| panic!("{:?} lexed no regular expression", source));
        assert_eq!(regexp.value, body);
    }
}

#[test]
fn test_tokenize_brace_after_function_expression() {
    // The body of a function expression ends an expression.
    assert!(kinds("x = function(){} / 2", LanguageVersion::Legacy).contains(&TokenKind::Slash));
    // An object literal ends an expression.
    assert!(kinds("a = {} / 1", LanguageVersion::Legacy).contains(&TokenKind::Slash));
}

#[test]
fn test_tokenize_brace_after_return() {
    assert_eq!(
        kinds("return\n{}\n/x/", LanguageVersion::Legacy),
        vec![
            TokenKind::Return,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::RegExp,
            TokenKind::EOF,
        ]
    );
    assert_eq!(
        kinds("return {}/x/g", LanguageVersion::Legacy),
        vec![
            TokenKind::Return,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Slash,
            TokenKind::Identifier,
            TokenKind::Slash,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_regexp_errors() {
    assert_eq!(
        error_kind("x = /a/gq", LanguageVersion::Legacy),
        ErrorImpl::InvalidRegexFlag { flag: 'q' }
    );
    assert!(matches!(
        error_kind("x = /abc\n/", LanguageVersion::Legacy),
        ErrorImpl::UnterminatedLiteral { .. }
    ));
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        values("a // c\n/* b */ b", LanguageVersion::Legacy),
        vec!["a", "b"]
    );
    assert_eq!(
        values("x\n--> comment\ny", LanguageVersion::Legacy),
        vec!["x", "y"]
    );
    assert_eq!(values("<!-- hi\nx", LanguageVersion::Legacy), vec!["x"]);
    assert!(matches!(
        error_kind("/* abc", LanguageVersion::Legacy),
        ErrorImpl::UnterminatedLiteral { .. }
    ));
}

#[test]
fn test_tokenize_html_comment_lookalikes() {
    assert_eq!(
        kinds("a-->b", LanguageVersion::Legacy),
        vec![
            TokenKind::Identifier,
            TokenKind::MinusMinus,
            TokenKind::Greater,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
    assert_eq!(
        kinds("a<!b", LanguageVersion::Legacy),
        vec![
            TokenKind::Identifier,
            TokenKind::Less,
            TokenKind::Not,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_operators() {
    let source = "=== !== >>>= => && || ++ -- <= <<";
    assert_eq!(
        kinds(source, LanguageVersion::Legacy),
        vec![
            TokenKind::StrictEquals,
            TokenKind::StrictNotEquals,
            TokenKind::UnsignedShiftRightEquals,
            TokenKind::Arrow,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::LessEquals,
            TokenKind::ShiftLeft,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_whitespace_and_line_ends() {
    let source = "a\u{A0}b\r\nc\u{2028}d";
    assert_eq!(
        values(source, LanguageVersion::Legacy),
        vec!["a", "b", "c", "d"]
    );

    let tokens = tokenize(source, LanguageVersion::Legacy).unwrap();
    assert_eq!(tokens[2].raw(source), "c");
    assert_eq!(tokens[3].raw(source), "d");
}

#[test]
fn test_tokenize_illegal_character() {
    let error = tokenize("a # b", LanguageVersion::Legacy).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::IllegalCharacter { character: '#' });
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_unbalanced_brackets() {
    let error = tokenize("f(a))", LanguageVersion::Legacy).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorImpl::UnbalancedBrackets { .. }
    ));
    assert_eq!(error.get_position().0, 4);

    assert!(matches!(
        error_kind("}", LanguageVersion::Legacy),
        ErrorImpl::UnbalancedBrackets { .. }
    ));
    assert!(matches!(
        error_kind("f(a", LanguageVersion::Legacy),
        ErrorImpl::UnbalancedBrackets { .. }
    ));
}

#[test]
fn test_lexer_balance_tracking() {
    let mut lex = Lexer::new("f({a: [1]})");
    assert!(lex.is_balanced());

    let mut balance = vec![];
    loop {
        let token = lex.next_token().unwrap();
        if token.kind == TokenKind::EOF {
            break;
        }
        balance.push(lex.is_balanced());
    }

    // f ( { a : [ 1 ] } )
    assert_eq!(
        balance,
        vec![true, false, false, false, false, false, false, false, false, true]
    );
}

#[test]
fn test_lexer_eof_repeats() {
    let mut lex = Lexer::new("a");
    assert_eq!(lex.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lex.next_token().unwrap().kind, TokenKind::EOF);
    assert_eq!(lex.next_token().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_lexer_starting_at_keeps_absolute_spans() {
    let source = "xx{a}";
    let mut lex = Lexer::starting_at(source, 2, LanguageVersion::Legacy);

    let token = lex.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::OpenCurly);
    assert_eq!(token.span.start.0, 2);
    assert_eq!(token.span.end.0, 3);
    assert_eq!(token.raw(source), "{");
}

#[test]
fn test_scanner_reports_line_ends_and_comments() {
    assert_eq!(
        raw_tokens("a\n// c\n/* b */x"),
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::EOL, "\n"),
            (TokenKind::LineComment, "// c"),
            (TokenKind::EOL, "\n"),
            (TokenKind::BlockComment, "/* b */"),
            (TokenKind::Identifier, "x"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_scanner_line_terminators() {
    let source = "a\r\nb\u{2028}c";
    assert_eq!(
        raw_tokens(source),
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::EOL, "\r"),
            (TokenKind::Identifier, "b"),
            (TokenKind::EOL, "\u{2028}"),
            (TokenKind::Identifier, "c"),
            (TokenKind::EOF, ""),
        ]
    );

    let mut scanner = Scanner::new(source, LanguageVersion::Legacy);
    while scanner.next_raw_token().unwrap() != TokenKind::EOF {}
    assert_eq!(scanner.line(), 2);
    assert_eq!(scanner.cursor(), source.len());
}

#[test]
fn test_scanner_cursor_after_pushback() {
    let mut scanner = Scanner::new("ab c", LanguageVersion::Legacy);

    assert_eq!(scanner.next_raw_token().unwrap(), TokenKind::Identifier);
    assert_eq!(scanner.cursor(), 2);
    assert_eq!(scanner.token_end(), 2);
}

#[test]
fn test_scanner_format_chars_inside_tokens() {
    let source = "a\u{AD}b = c =\u{200B}=";
    let mut scanner = Scanner::new(source, LanguageVersion::Legacy);

    assert_eq!(scanner.next_raw_token().unwrap(), TokenKind::Identifier);
    assert_eq!(scanner.token_raw(), "a\u{AD}b");
    assert_eq!(scanner.string(), "ab");

    assert_eq!(
        raw_tokens(source),
        vec![
            (TokenKind::Identifier, "a\u{AD}b"),
            (TokenKind::Assignment, "="),
            (TokenKind::Identifier, "c"),
            (TokenKind::Equals, "=\u{200B}="),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_scanner_format_chars_in_rolled_back_html_comment() {
    assert_eq!(
        raw_tokens("a<!\u{AD}b"),
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::Less, "<"),
            (TokenKind::Not, "!"),
            (TokenKind::Identifier, "b"),
            (TokenKind::EOF, ""),
        ]
    );
    assert_eq!(
        raw_tokens("<!\u{200B}?"),
        vec![
            (TokenKind::Less, "<"),
            (TokenKind::Not, "!"),
            (TokenKind::Question, "?"),
            (TokenKind::EOF, ""),
        ]
    );
    assert_eq!(
        raw_tokens("<!-\u{AD}x"),
        vec![
            (TokenKind::Less, "<"),
            (TokenKind::Not, "!"),
            (TokenKind::Dash, "-"),
            (TokenKind::Identifier, "x"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_scanner_format_chars_inside_comment_starts() {
    assert_eq!(
        raw_tokens("/\u{AD}/ c\nx"),
        vec![
            (TokenKind::LineComment, "/\u{AD}/ c"),
            (TokenKind::EOL, "\n"),
            (TokenKind::Identifier, "x"),
            (TokenKind::EOF, ""),
        ]
    );
    assert_eq!(
        raw_tokens("<\u{200B}!--x\ny"),
        vec![
            (TokenKind::LineComment, "<\u{200B}!--x"),
            (TokenKind::EOL, "\n"),
            (TokenKind::Identifier, "y"),
            (TokenKind::EOF, ""),
        ]
    );
    assert_eq!(
        raw_tokens("/\u{AD}* b */"),
        vec![
            (TokenKind::BlockComment, "/\u{AD}* b */"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_tokenize_non_ascii_regexp_flag() {
    let error = tokenize("x = /a/\u{E9}", LanguageVersion::Legacy).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::InvalidRegexFlag { flag: '\u{E9}' });
    assert_eq!(error.get_position().0, 7);
}
