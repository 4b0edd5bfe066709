use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{CompareOp, Token, TokenKind, ValueExpr};
use crate::parser::ParseError;

static FUNCTION_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(f|func)\.([^\[]+)(\[([^\]]+)\])?$").expect("function call pattern is valid")
});

/// Classify a single query word by the prefix before its first `.`.
///
/// # Examples
///
/// ```
/// use tally_lang::ast::{Token, ValueExpr};
/// use tally_lang::lexer::identify;
///
/// assert_eq!(identify("into").unwrap(), Token::Terminator("into".into()));
/// assert_eq!(identify(".Kmail").unwrap(), Token::Value(ValueExpr::literal("Kmail")));
/// assert!(identify("x.y").is_err());
/// ```
pub fn identify(word: &str) -> Result<Token, ParseError> {
    let (prefix, rest) = match word.split_once('.') {
        Some((prefix, rest)) => (prefix, Some(rest)),
        None => (word, None),
    };

    match (prefix, rest) {
        ("into" | "filter" | "where" | "sort" | "calculate", _) => {
            Ok(Token::Terminator(word.to_string()))
        }
        ("not", _) => Ok(Token::Not),
        ("eq", _) => Ok(Token::Compare(CompareOp::Equals)),
        ("contains", _) => Ok(Token::Compare(CompareOp::Contains)),
        ("icontains", _) => Ok(Token::Compare(CompareOp::IContains)),
        ("h" | "header" | "c" | "column" | "p" | "property" | "sz" | "sized", Some(_)) => {
            Ok(Token::Value(ValueExpr::Field(word.to_string())))
        }
        ("f" | "func", Some(_)) => parse_function_call(word).map(Token::Value),
        ("", Some(text)) => Ok(Token::Value(ValueExpr::Literal(text.to_string()))),
        _ => Err(ParseError::UnknownToken(word.to_string())),
    }
}

/// Parse `f.name` or `f.name[arg,arg,...]`.
///
/// Arguments are split on every comma and classified recursively; a comma
/// inside a nested call's brackets is not respected.
pub fn parse_function_call(word: &str) -> Result<ValueExpr, ParseError> {
    let caps = FUNCTION_CALL
        .captures(word)
        .ok_or_else(|| ParseError::InvalidFunctionExpression(word.to_string()))?;

    let name = caps[2].to_string();
    let mut args = Vec::new();
    if let Some(list) = caps.get(4) {
        for arg in list.as_str().split(',') {
            args.push(identify_argument(arg)?);
        }
    }
    Ok(ValueExpr::Function { name, args })
}

fn identify_argument(word: &str) -> Result<ValueExpr, ParseError> {
    match identify(word)? {
        Token::Value(expr) => Ok(expr),
        _ => Err(ParseError::UnknownToken(word.to_string())),
    }
}

/// Scan at most `n` words, stopping before a terminator.
///
/// Returns the tokens and the words that were not scanned.
pub fn scan_n(args: &[String], n: usize) -> Result<(Vec<Token>, &[String]), ParseError> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < n && i < args.len() {
        let token = identify(&args[i])?;
        if matches!(token, Token::Terminator(_)) {
            break;
        }
        tokens.push(token);
        i += 1;
    }
    Ok((tokens, &args[i..]))
}

/// Scan words until a terminator or the end of input, stopping before the
/// terminator.
pub fn scan_until_terminator(args: &[String]) -> Result<(Vec<Token>, &[String]), ParseError> {
    scan_n(args, args.len())
}

/// Match tokens positionally against a pattern of acceptable kinds.
///
/// Each pattern position lists the kinds accepted there. Returns the matched
/// kinds, or `None` on the first mismatch or when input runs out first.
/// Input beyond the pattern is ignored.
pub fn match_tokens(tokens: &[Token], pattern: &[&[TokenKind]]) -> Option<Vec<TokenKind>> {
    let mut matched = Vec::with_capacity(pattern.len());
    for (i, accepted) in pattern.iter().enumerate() {
        let kind = tokens.get(i)?.kind();
        if !accepted.contains(&kind) {
            return None;
        }
        matched.push(kind);
    }
    Some(matched)
}

#[test]
fn test_keywords() {
    assert_eq!(identify("where").unwrap(), Token::Terminator("where".into()));
    assert_eq!(identify("calculate").unwrap(), Token::Terminator("calculate".into()));
    assert_eq!(identify("not").unwrap(), Token::Not);
    assert_eq!(identify("icontains").unwrap(), Token::Compare(CompareOp::IContains));
}

#[test]
fn test_nested_function_argument() {
    let expr = parse_function_call("f.year[f.as[h.date,.When]]");
    assert!(matches!(expr, Err(ParseError::InvalidFunctionExpression(_))));

    let expr = parse_function_call("func.count[f.month]").unwrap();
    assert_eq!(
        expr,
        ValueExpr::function("count", vec![ValueExpr::function("month", vec![])])
    );
}
