// tests/lexer_tests.rs

use rust_decimal::Decimal;
use std::str::FromStr;
use where_lang::ast::TokenKind;
use where_lang::error::LexError;
use where_lang::lexer::Lexer;
use where_lang::value::Number;
use yare::parameterized;

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn single(input: &str) -> TokenKind {
    let mut lexer = Lexer::new(input);
    let token = lexer.next_token().unwrap();
    assert_eq!(
        lexer.next_token().unwrap().kind,
        TokenKind::Eof,
        "trailing tokens for input: {}",
        input
    );
    token.kind
}

// ============================================================================
// Symbols
// ============================================================================

#[parameterized(
    pipe = { "|", TokenKind::Pipe },
    ampersand = { "&", TokenKind::Ampersand },
    exclamation = { "!", TokenKind::Exclamation },
    eq = { "=", TokenKind::Eq },
    gt = { ">", TokenKind::Gt },
    lt = { "<", TokenKind::Lt },
    tilde = { "~", TokenKind::Tilde },
    hash = { "#", TokenKind::Hash },
    at = { "@", TokenKind::At },
    lparen = { "(", TokenKind::LParen },
    rparen = { ")", TokenKind::RParen },
    lbrace = { "{", TokenKind::LBrace },
    rbrace = { "}", TokenKind::RBrace },
    lbracket = { "[", TokenKind::LBracket },
    rbracket = { "]", TokenKind::RBracket },
    comma = { ",", TokenKind::Comma },
    colon = { ":", TokenKind::Colon },
)]
fn single_char_tokens(input: &str, expected: TokenKind) {
    assert_eq!(single(input), expected);
}

#[parameterized(
    not_eq = { "!=", TokenKind::NotEq },
    gt_eq = { ">=", TokenKind::GtEq },
    lt_eq = { "<=", TokenKind::LtEq },
    tilde_star = { "~*", TokenKind::TildeStar },
)]
fn two_char_tokens(input: &str, expected: TokenKind) {
    assert_eq!(single(input), expected);
}

#[test]
fn test_ilike_is_one_token() {
    assert_eq!(
        kinds("a~*b"),
        vec![
            TokenKind::Identifier("a".into()),
            TokenKind::TildeStar,
            TokenKind::Identifier("b".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_split_two_char_operators() {
    assert_eq!(kinds("> ="), vec![TokenKind::Gt, TokenKind::Eq, TokenKind::Eof]);
    assert_eq!(kinds("< ="), vec![TokenKind::Lt, TokenKind::Eq, TokenKind::Eof]);
    assert_eq!(
        kinds("! ="),
        vec![TokenKind::Exclamation, TokenKind::Eq, TokenKind::Eof]
    );
}

#[test]
fn test_not_before_group() {
    assert_eq!(
        kinds("!(a=1)"),
        vec![
            TokenKind::Exclamation,
            TokenKind::LParen,
            TokenKind::Identifier("a".into()),
            TokenKind::Eq,
            TokenKind::Number(Number::Integer(1)),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_not_eq_wins_over_not() {
    assert_eq!(
        kinds("a!=1"),
        vec![
            TokenKind::Identifier("a".into()),
            TokenKind::NotEq,
            TokenKind::Number(Number::Integer(1)),
            TokenKind::Eof,
        ]
    );
}

// ============================================================================
// Keywords and Identifiers
// ============================================================================

#[parameterized(
    true_kw = { "true", TokenKind::Boolean(true) },
    false_kw = { "false", TokenKind::Boolean(false) },
    null_kw = { "null", TokenKind::Null },
)]
fn keywords(input: &str, expected: TokenKind) {
    assert_eq!(single(input), expected);
}

#[parameterized(
    capitalised_true = { "True" },
    upper_null = { "NULL" },
    truth = { "truth" },
    nullable = { "nullable" },
    false_positive = { "false_positive" },
    underscore = { "_private" },
    dunder = { "__dunder__" },
    digits = { "a1b2c3" },
    camel = { "camelCase" },
)]
fn identifiers(input: &str) {
    assert_eq!(single(input), TokenKind::Identifier(input.to_string()));
}

#[test]
fn test_non_ascii_identifier_rejected() {
    let err = Lexer::new("é=1").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedCharacter {
            character: 'é',
            offset: 0
        }
    );
}

// ============================================================================
// Numbers
// ============================================================================

#[parameterized(
    zero = { "0", Number::Integer(0) },
    positive = { "42", Number::Integer(42) },
    negative = { "-17", Number::Integer(-17) },
    exponent = { "2e3", Number::Integer(2000) },
)]
fn integers(input: &str, expected: Number) {
    assert_eq!(single(input), TokenKind::Number(expected));
}

#[parameterized(
    simple = { "3.25", "3.25" },
    negative = { "-0.5", "-0.5" },
    trailing_zero = { "1.50", "1.50" },
    negative_exponent = { "5e-2", "0.05" },
    fraction_and_exponent = { "1.25e1", "12.5" },
)]
fn decimals(input: &str, expected: &str) {
    assert_eq!(
        single(input),
        TokenKind::Number(Number::Decimal(Decimal::from_str(expected).unwrap()))
    );
}

#[test]
fn test_large_whole_number_stays_exact() {
    assert_eq!(
        single("79228162514264337593543950335"),
        TokenKind::Number(Number::Decimal(Decimal::MAX))
    );
}

#[test]
fn test_large_whole_number_is_not_rounded() {
    let err = where_lang::parse("a=99999999999999999999999999999999").unwrap_err();
    assert_eq!(
        err,
        where_lang::ParseError::Lex(LexError::MalformedNumber {
            text: "99999999999999999999999999999999".to_string(),
            offset: 2
        })
    );
}

#[test]
fn test_minus_without_digit_is_unexpected() {
    let err = Lexer::new("a=-x").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedCharacter {
            character: '-',
            offset: 2
        }
    );
}

#[parameterized(
    dangling_point = { "1.", "1." },
    dangling_exponent = { "2e", "2e" },
    signed_exponent_only = { "3e+", "3e+" },
    infinite = { "1e999", "1e999" },
    integer_beyond_decimal = {
        "99999999999999999999999999999999",
        "99999999999999999999999999999999"
    },
    negative_integer_beyond_decimal = {
        "-99999999999999999999999999999999",
        "-99999999999999999999999999999999"
    },
)]
fn malformed_numbers(input: &str, text: &str) {
    let err = Lexer::new(input).tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::MalformedNumber {
            text: text.to_string(),
            offset: 0
        }
    );
}

// ============================================================================
// Strings
// ============================================================================

#[parameterized(
    plain = { r#""hello world""#, "hello world" },
    empty = { r#""""#, "" },
    quote = { r#""say \"hi\"""#, "say \"hi\"" },
    backslash = { r#""a\\b""#, "a\\b" },
    slash = { r#""a\/b""#, "a/b" },
    controls = { r#""\b\f\n\r\t""#, "\u{8}\u{c}\n\r\t" },
    unicode = { r#""\u00e9""#, "é" },
    surrogate_pair = { r#""\ud83d\ude00""#, "😀" },
    raw_unicode = { r#""naïve""#, "naïve" },
    operators_inside = { r#""a=1&b""#, "a=1&b" },
)]
fn strings(input: &str, expected: &str) {
    assert_eq!(single(input), TokenKind::String(expected.to_string()));
}

#[test]
fn test_string_token_keeps_raw_text() {
    let tokens = Lexer::new(r#"name="a\nb""#).tokenize().unwrap();
    assert_eq!(tokens[2].text, r#""a\nb""#);
    assert_eq!(tokens[2].kind, TokenKind::String("a\nb".into()));
}

#[test]
fn test_unterminated_string() {
    let err = Lexer::new(r#"a="open"#).tokenize().unwrap_err();
    assert_eq!(err, LexError::UnterminatedString { offset: 2 });
}

#[test]
fn test_backslash_at_end_is_unterminated() {
    let err = Lexer::new("\"abc\\").tokenize().unwrap_err();
    assert_eq!(err, LexError::UnterminatedString { offset: 0 });
}

#[parameterized(
    unknown_letter = { r#""\q""#, r"\q" },
    short_unicode = { r#""\u12""#, "\\u12\"" },
    bad_hex = { r#""\u12zz""#, r"\u12z" },
    lone_low_surrogate = { r#""\udc00""#, r"\udc00" },
    unpaired_high_surrogate = { r#""\ud83dx""#, r"\ud83d" },
)]
fn invalid_escapes(input: &str, sequence: &str) {
    let err = Lexer::new(input).tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::InvalidEscape {
            sequence: sequence.to_string(),
            offset: 1
        }
    );
}

// ============================================================================
// Whitespace, offsets, errors
// ============================================================================

#[test]
fn test_whitespace_is_skipped() {
    assert_eq!(kinds(" \t a \n = \r 1 "), kinds("a=1"));
}

#[test]
fn test_offsets_are_bytes() {
    let tokens = Lexer::new(r#"name="é" & age>=18"#).tokenize().unwrap();
    let offsets: Vec<_> = tokens.iter().map(|t| t.offset).collect();
    // "é" is two bytes in UTF-8
    assert_eq!(offsets, vec![0, 4, 5, 10, 12, 15, 17, 19]);
    assert!(tokens.last().unwrap().kind == TokenKind::Eof);
}

#[test]
fn test_tokenize_empty_input() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
    assert_eq!(kinds("   "), vec![TokenKind::Eof]);
}

#[parameterized(
    dollar = { "a=$", '$', 2 },
    percent = { "%", '%', 0 },
    single_quote = { "a='x'", '\'', 2 },
    dot = { "a.b=1", '.', 1 },
    star = { "a*b", '*', 1 },
)]
fn unexpected_characters(input: &str, character: char, offset: usize) {
    let err = Lexer::new(input).tokenize().unwrap_err();
    assert_eq!(err, LexError::UnexpectedCharacter { character, offset });
    assert_eq!(err.offset(), offset);
}
