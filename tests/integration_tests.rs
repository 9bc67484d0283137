//! Integration tests for end-to-end extraction.
//!
//! These tests verify that the complete pipeline works correctly from
//! a player-like script through tokenization, function location and
//! error rendering.

use jsextractor::{
    find_function_name, locate, render_error, tokenize, ErrorImpl, JavaScriptExtractor,
    LanguageVersion, Lexer, TokenKind,
};

const PLAYER_SAMPLE: &str = include_str!("fixtures/player_sample.js");

#[test]
fn test_locate_worked_example() {
    let source = "Wka=function(d){var x = [/,,/,913,/(,)}/g,\"abcdef}\\\"\",];var y = 10/2/1;return x[1][y];}//some={}random-padding+;";
    let result = locate(source, "Wka=function").unwrap();

    assert_eq!(
        result,
        "(d){var x = [/,,/,913,/(,)}/g,\"abcdef}\\\"\",];var y = 10/2/1;return x[1][y];}"
    );
}

#[test]
fn test_tokenize_player_sample() {
    let tokens = tokenize(PLAYER_SAMPLE, LanguageVersion::Legacy).unwrap();

    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EOF));
    assert!(tokens.iter().all(|token| !token.kind.is_trivia()));

    let regexps: Vec<&str> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::RegExp)
        .map(|token| token.value.as_str())
        .collect();
    assert_eq!(regexps, vec![r"[a-z]{2,}\/(\d+)", "x", "(,)}"]);

    for token in &tokens {
        if token.kind == TokenKind::Slash {
            let raw = token.raw(PLAYER_SAMPLE);
            assert_eq!(raw, "/");
        }
    }
}

#[test]
fn test_lexer_balanced_after_player_sample() {
    let mut lex = Lexer::new(PLAYER_SAMPLE);
    loop {
        let token = lex.next_token().unwrap();
        if token.kind == TokenKind::EOF {
            break;
        }
    }

    assert!(lex.is_balanced());
}

#[test]
fn test_extract_named_function_from_player_sample() {
    let name = find_function_name(
        PLAYER_SAMPLE,
        &[
            r"\bsig=([a-zA-Z0-9$]+)\(",
            r#"([a-zA-Z0-9$]+)=function\(d\)\{d=d\.split\(""\)"#,
        ],
    )
    .unwrap();
    assert_eq!(name, "Wka");

    let function = JavaScriptExtractor::default()
        .extract_function(PLAYER_SAMPLE, &name)
        .unwrap();
    assert_eq!(
        function,
        r#"Wka=function(d){d=d.split("");Xza.Dw(d,52);Xza.VP(d,2);Xza.Xs(d,40);return d.join("")}"#
    );
}

#[test]
fn test_locate_multiline_function_in_player_sample() {
    let body = locate(PLAYER_SAMPLE, "var nsig = function").unwrap();

    assert!(body.starts_with("(a) {\n"));
    assert!(body.ends_with("return b.join(\"\")\n    }"));
    assert!(body.contains("/(,)}/g"));
    assert!(body.contains("return \"enhanced_except_\" + a"));
}

#[test]
fn test_missing_function() {
    let error = JavaScriptExtractor::default()
        .extract_function(PLAYER_SAMPLE, "Missing")
        .unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::MarkerNotFound {
            marker: String::from("Missing=function")
        }
    );
}

#[test]
fn test_render_lexical_error() {
    let source = "var a = 1;\nvar s = 'abc\n";
    let error = tokenize(source, LanguageVersion::Legacy).unwrap_err();
    assert_eq!(error.get_position().0, 19);

    let rendered = render_error(&error, source);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines[0],
        "Error: UnterminatedLiteral (The string literal is never closed before the end of the line or input)"
    );
    assert_eq!(lines[1], "  |");
    assert_eq!(lines[2], "2 | var s = 'abc");
    assert_eq!(lines[3], "  | --------^");
}
