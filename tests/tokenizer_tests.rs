// tests/tokenizer_tests.rs

use tally_lang::ast::{CompareOp, Token, TokenKind, ValueExpr};
use tally_lang::lexer::{identify, match_tokens, parse_function_call, scan_n, scan_until_terminator};
use tally_lang::parser::ParseError;

fn words(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_terminators() {
    for word in ["into", "filter", "where", "sort", "calculate"] {
        assert_eq!(identify(word).unwrap(), Token::Terminator(word.to_string()));
    }
}

#[test]
fn test_operators() {
    assert_eq!(identify("not").unwrap(), Token::Not);
    assert_eq!(identify("eq").unwrap(), Token::Compare(CompareOp::Equals));
    assert_eq!(identify("contains").unwrap(), Token::Compare(CompareOp::Contains));
    assert_eq!(identify("icontains").unwrap(), Token::Compare(CompareOp::IContains));
}

#[test]
fn test_field_prefixes() {
    for word in [
        "h.name",
        "header.name",
        "c.name",
        "column.name",
        "p.summary",
        "property.summary",
    ] {
        assert_eq!(identify(word).unwrap(), Token::Value(ValueExpr::field(word)));
    }
}

#[test]
fn test_literals() {
    assert_eq!(identify(".4").unwrap(), Token::Value(ValueExpr::literal("4")));
    assert_eq!(identify(".a.b").unwrap(), Token::Value(ValueExpr::literal("a.b")));
    assert_eq!(identify(".").unwrap(), Token::Value(ValueExpr::literal("")));
}

#[test]
fn test_unknown_prefix() {
    assert_eq!(identify("x.name"), Err(ParseError::UnknownToken("x.name".into())));
    assert_eq!(identify("table"), Err(ParseError::UnknownToken("table".into())));
}

// ============================================================================
// Function calls
// ============================================================================

#[test]
fn test_function_without_arguments() {
    assert_eq!(
        identify("f.count").unwrap(),
        Token::Value(ValueExpr::function("count", vec![]))
    );
}

#[test]
fn test_function_with_arguments() {
    assert_eq!(
        parse_function_call("func.as[h.subject,.Topic]").unwrap(),
        ValueExpr::function(
            "as",
            vec![ValueExpr::field("h.subject"), ValueExpr::literal("Topic")]
        )
    );
}

#[test]
fn test_nested_function_argument() {
    assert_eq!(
        parse_function_call("f.year[f.as]").unwrap(),
        ValueExpr::function("year", vec![ValueExpr::function("as", vec![])])
    );
}

#[test]
fn test_unterminated_bracket() {
    assert!(matches!(
        identify("f.year["),
        Err(ParseError::InvalidFunctionExpression(w)) if w == "f.year["
    ));
    assert!(matches!(
        identify("f.sum[h.a"),
        Err(ParseError::InvalidFunctionExpression(_))
    ));
}

#[test]
fn test_bad_argument() {
    assert!(matches!(
        identify("f.sum[eq]"),
        Err(ParseError::UnknownToken(_))
    ));
}

// ============================================================================
// Scanning
// ============================================================================

#[test]
fn test_bounded_scan_stops_at_terminator() {
    let args = words("h.a eq into table h.b");
    let (tokens, rest) = scan_n(&args, 3).unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(rest, &args[2..]);
    assert_eq!(rest[0], "into");
}

#[test]
fn test_bounded_scan_respects_limit() {
    let args = words("h.a eq .b h.c");
    let (tokens, rest) = scan_n(&args, 3).unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(rest, &["h.c".to_string()]);
}

#[test]
fn test_unbounded_scan() {
    let args = words("h.name f.count .x sort c.name");
    let (tokens, rest) = scan_until_terminator(&args).unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(rest, &words("sort c.name")[..]);

    let (tokens, rest) = scan_until_terminator(&rest[1..]).unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(rest.is_empty());
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_match_alternation() {
    let args = words(".x icontains h.a");
    let (tokens, _) = scan_n(&args, 3).unwrap();

    let operand: &[TokenKind] = &[TokenKind::Field, TokenKind::Literal];
    let comparison: &[TokenKind] = &[TokenKind::Equals, TokenKind::Contains, TokenKind::IContains];
    assert_eq!(
        match_tokens(&tokens, &[operand, comparison, operand]),
        Some(vec![TokenKind::Literal, TokenKind::IContains, TokenKind::Field])
    );
}

#[test]
fn test_match_short_input() {
    let args = words("h.a eq");
    let (tokens, _) = scan_n(&args, 3).unwrap();

    assert_eq!(
        match_tokens(&tokens, &[&[TokenKind::Field], &[TokenKind::Equals], &[TokenKind::Literal]]),
        None
    );
}

#[test]
fn test_match_first_mismatch() {
    let args = words("f.count eq .1");
    let (tokens, _) = scan_n(&args, 3).unwrap();

    assert_eq!(match_tokens(&tokens, &[&[TokenKind::Not]]), None);
    assert_eq!(
        match_tokens(&tokens, &[&[TokenKind::Function]]),
        Some(vec![TokenKind::Function])
    );
}
