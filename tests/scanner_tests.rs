use pretty_assertions::assert_eq;
use rstest::rstest;

use emberlang::scanner::options::{ConcurrencyMode, ScanOptions};
use emberlang::scanner::token::{Literal, TokenKind};
use emberlang::{ScanError, scan, scan_with};

const PROGRAM: &str = include_str!("../fixtures/program.em");

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source).tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn fixture_program_scans_cleanly() {
    let output = scan(PROGRAM);
    assert!(output.is_ok(), "unexpected errors: {:?}", output.errors);
    let tokens = output.tokens;
    assert_eq!(tokens[0].kind, TokenKind::Val);
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(tokens.last().map(|t| t.line), Some(19));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::AmperAmper));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::PipePipe));
    assert!(
        tokens
            .iter()
            .any(|t| t.literal == Some(Literal::Float(2.5)))
    );
}

#[test]
fn lines_never_decrease() {
    let tokens = scan(PROGRAM).tokens;
    assert!(tokens.windows(2).all(|w| w[0].line <= w[1].line));
}

#[test]
fn lexemes_and_skipped_text_rebuild_the_source() {
    let tokens = scan(PROGRAM).tokens;
    let mut rebuilt = String::new();
    let mut cursor = 0;
    for token in &tokens {
        let gap = &PROGRAM[cursor..token.span.offset];
        // whatever lies between tokens is whitespace or comments
        assert_eq!(
            scan(gap).tokens.len(),
            1,
            "gap {gap:?} before {token} produced tokens"
        );
        rebuilt.push_str(gap);
        assert_eq!(&PROGRAM[token.span.offset..token.span.end()], token.lexeme);
        rebuilt.push_str(&token.lexeme);
        cursor = token.span.end();
    }
    rebuilt.push_str(&PROGRAM[cursor..]);
    assert_eq!(rebuilt, PROGRAM);
}

#[test]
fn scanning_is_idempotent() {
    let dump = |source: &str| {
        let output = scan(source);
        let tokens = serde_json::to_string(&output.tokens).expect("tokens serialize");
        let errors: Vec<String> = output.errors.iter().map(|e| e.to_string()).collect();
        (tokens, errors)
    };
    let noisy = "var s = \"open 1.2.3 & @";
    assert_eq!(dump(PROGRAM), dump(PROGRAM));
    assert_eq!(dump(noisy), dump(noisy));
}

#[rstest]
#[case(ConcurrencyMode::Sequential)]
#[case(ConcurrencyMode::Threaded)]
fn both_modes_agree_on_fixture(#[case] mode: ConcurrencyMode) {
    let options = ScanOptions::default().with_concurrency(mode);
    assert_eq!(scan_with(PROGRAM, &options).tokens, scan(PROGRAM).tokens);
}

#[test]
fn keyword_inside_longer_identifier() {
    assert_eq!(kinds("for"), vec![TokenKind::For, TokenKind::Eof]);
    let tokens = scan("fort").tokens;
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].literal, Some(Literal::String("fort".to_string())));
}

#[test]
fn numbers_match_their_literals() {
    let tokens = scan("0").tokens;
    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].literal, Some(Literal::Int(0)));
    let tokens = scan("0.1").tokens;
    assert_eq!(tokens[0].kind, TokenKind::Float);
    assert_eq!(tokens[0].literal, Some(Literal::Float(0.1)));
}

#[test]
fn identifier_after_blank_line() {
    let tokens = scan("   \nfoo").tokens;
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 1);
}

#[rstest]
#[case("\"abc")]
#[case("x = \"abc")]
fn unterminated_string_is_one_error(#[case] source: &str) {
    let output = scan(source);
    assert!(!output.tokens.iter().any(|t| t.kind == TokenKind::String));
    assert_eq!(output.errors.len(), 1);
    assert!(matches!(output.errors[0], ScanError::UnterminatedString { .. }));
}

#[test]
fn lone_ampersand() {
    let output = scan("&");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(output.errors.len(), 1);
    assert!(matches!(output.errors[0], ScanError::LoneOperator { ch: '&', .. }));
    assert_eq!(kinds("&&"), vec![TokenKind::AmperAmper, TokenKind::Eof]);
}

#[test]
fn errors_do_not_stop_later_tokens() {
    let output = scan("1.2.3 @ print \"x");
    assert_eq!(output.errors.len(), 3);
    let kinds: Vec<TokenKind> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Int, TokenKind::Print, TokenKind::Eof]);
}

#[test]
fn rendered_diagnostic_names_the_source() {
    let options = ScanOptions::default().with_source_name("demo.em");
    let output = scan_with("val x = 1 | 2", &options);
    let report = miette::Report::new(output.errors.into_iter().next().expect("one error"));
    let rendered = format!("{report:?}");
    assert!(rendered.contains("demo.em"), "{rendered}");
}

#[test]
fn tracing_init_is_repeatable() {
    emberlang::init_tracing();
    emberlang::init_tracing();
    assert!(scan("x").is_ok());
}
