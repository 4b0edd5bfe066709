// tests/parser_tests.rs

use tally_lang::ast::{BoolExpr, ColumnExpr, CompareOp, Operation, ValueExpr};
use tally_lang::funcs::FunctionRegistry;
use tally_lang::parser::{ParseError, Parser};

fn words(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

fn parse(s: &str) -> Result<Operation, ParseError> {
    let functions = FunctionRegistry::new();
    Parser::new(&functions).parse_operations(&words(s))
}

fn eq(field: &str, literal: &str) -> BoolExpr {
    BoolExpr::Compare {
        op: CompareOp::Equals,
        lhs: ValueExpr::field(field),
        rhs: ValueExpr::literal(literal),
    }
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_single_filter() {
    assert_eq!(
        parse("filter h.numberrange eq .4").unwrap(),
        Operation::Filter(eq("h.numberrange", "4"))
    );
}

#[test]
fn test_not_filter() {
    assert_eq!(
        parse("filter not h.agent icontains .Kmail").unwrap(),
        Operation::Filter(BoolExpr::Not(Box::new(BoolExpr::Compare {
            op: CompareOp::IContains,
            lhs: ValueExpr::field("h.agent"),
            rhs: ValueExpr::literal("Kmail"),
        })))
    );
}

#[test]
fn test_double_not() {
    let op = parse("filter not not h.a eq .b").unwrap();
    assert_eq!(
        op,
        Operation::Filter(BoolExpr::Not(Box::new(BoolExpr::Not(Box::new(eq("h.a", "b"))))))
    );
}

#[test]
fn test_chained_filters() {
    let expected = Operation::Compound(vec![
        Operation::Filter(eq("h.a", "1")),
        Operation::Filter(eq("h.b", "2")),
        Operation::Filter(eq("h.c", "3")),
    ]);
    assert_eq!(parse("filter h.a eq .1 where h.b eq .2 filter h.c eq .3").unwrap(), expected);
    assert_eq!(parse("filter h.a eq .1 h.b eq .2 h.c eq .3").unwrap(), expected);
}

#[test]
fn test_literal_on_the_left() {
    assert_eq!(
        parse("filter .x contains h.a").unwrap(),
        Operation::Filter(BoolExpr::Compare {
            op: CompareOp::Contains,
            lhs: ValueExpr::literal("x"),
            rhs: ValueExpr::field("h.a"),
        })
    );
}

#[test]
fn test_incomplete_filter() {
    assert!(matches!(parse("filter h.a eq"), Err(ParseError::NothingFound(_))));
    assert!(matches!(parse("filter h.a eq into table h.a"), Err(ParseError::NothingFound(_))));
    assert!(matches!(parse("filter not"), Err(ParseError::NothingFound(_))));
}

#[test]
fn test_function_operand_is_rejected() {
    assert!(matches!(parse("filter f.count eq .1"), Err(ParseError::NothingFound(_))));
}

// ============================================================================
// Terminators
// ============================================================================

#[test]
fn test_filter_stops_at_into() {
    let functions = FunctionRegistry::new();
    let parser = Parser::new(&functions);
    let args = words("h.a eq .1 into table h.b");

    let (op, rest) = parser.parse_filters(&args).unwrap();
    assert_eq!(op, Operation::Filter(eq("h.a", "1")));
    assert_eq!(rest, &words("into table h.b")[..]);
}

#[test]
fn test_filter_stops_at_sort() {
    let functions = FunctionRegistry::new();
    let parser = Parser::new(&functions);
    let args = words("h.a eq .1 sort c.a");

    let (_, rest) = parser.parse_filters(&args).unwrap();
    assert_eq!(rest, &words("sort c.a")[..]);
}

#[test]
fn test_filter_then_table() {
    assert_eq!(
        parse("filter h.a eq .1 into table h.b").unwrap(),
        Operation::Compound(vec![
            Operation::Filter(eq("h.a", "1")),
            Operation::Table(vec![ColumnExpr::new("b", ValueExpr::field("h.b"))]),
        ])
    );
}

// ============================================================================
// Projections
// ============================================================================

#[test]
fn test_into_table_column_names() {
    let op = parse("into table h.User-Agent .Hello f.year[h.date] f.as[h.subject,.Topic]").unwrap();
    let Operation::Table(columns) = op else {
        panic!("expected table, got {:?}", op);
    };
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["User-Agent", "Hello", "year-date", "Topic"]);
}

#[test]
fn test_into_requires_target() {
    assert_eq!(
        parse("into chart h.a"),
        Err(ParseError::UnknownIntoTarget("chart".into()))
    );
    assert!(matches!(parse("into"), Err(ParseError::UnknownIntoTarget(_))));
}

#[test]
fn test_empty_column_list() {
    assert!(matches!(parse("into table"), Err(ParseError::NothingFound(_))));
    assert!(matches!(parse("into table sort c.a"), Err(ParseError::NothingFound(_))));
}

#[test]
fn test_summary_without_calculate() {
    assert_eq!(
        parse("into summary h.numberrange").unwrap(),
        Operation::Group(vec![ColumnExpr::new(
            "numberrange",
            ValueExpr::field("h.numberrange")
        )])
    );
}

#[test]
fn test_summary_with_calculate() {
    let op = parse("into summary h.numberrange calculate f.count f.sum[h.numberrange]").unwrap();
    assert_eq!(
        op,
        Operation::Compound(vec![
            Operation::Group(vec![ColumnExpr::new(
                "numberrange",
                ValueExpr::field("h.numberrange")
            )]),
            Operation::Table(vec![
                ColumnExpr::new("numberrange", ValueExpr::field("c.numberrange")),
                ColumnExpr::new("count", ValueExpr::function("count", vec![])),
                ColumnExpr::new(
                    "sum-numberrange",
                    ValueExpr::function("sum", vec![ValueExpr::field("h.numberrange")])
                ),
            ]),
        ])
    );
}

#[test]
fn test_summary_with_empty_calculate_collapses() {
    assert_eq!(
        parse("into summary h.a calculate sort c.a").unwrap(),
        Operation::Compound(vec![
            Operation::Group(vec![ColumnExpr::new("a", ValueExpr::field("h.a"))]),
            Operation::Sort(vec![ValueExpr::field("c.a")]),
        ])
    );
}

// ============================================================================
// Sort and top level
// ============================================================================

#[test]
fn test_sort_keys() {
    assert_eq!(
        parse("sort c.year c.month").unwrap(),
        Operation::Sort(vec![ValueExpr::field("c.year"), ValueExpr::field("c.month")])
    );
}

#[test]
fn test_empty_query() {
    assert_eq!(parse("").unwrap(), Operation::Compound(vec![]));
}

#[test]
fn test_unknown_leading_word() {
    assert_eq!(parse("h.a"), Err(ParseError::UnknownExpression("h.a".into())));
    assert_eq!(parse("table h.a"), Err(ParseError::UnknownExpression("table".into())));
}

#[test]
fn test_unknown_function() {
    assert_eq!(
        parse("into table f.median[h.a]"),
        Err(ParseError::UnknownFunction("median".into()))
    );
    assert_eq!(
        parse("sort f.year[f.nope]"),
        Err(ParseError::UnknownFunction("nope".into()))
    );
}

#[test]
fn test_full_pipeline_is_flat() {
    let op = parse("filter h.a eq .1 where h.b eq .2 into table h.a sort c.a").unwrap();
    let Operation::Compound(children) = op else {
        panic!("expected compound");
    };
    assert_eq!(children.len(), 4);
    assert!(matches!(children[0], Operation::Filter(_)));
    assert!(matches!(children[1], Operation::Filter(_)));
    assert!(matches!(children[2], Operation::Table(_)));
    assert!(matches!(children[3], Operation::Sort(_)));
}

#[test]
fn test_simplify_is_idempotent() {
    let op = parse("filter h.a eq .1 into summary h.a calculate f.count sort c.count").unwrap();
    assert_eq!(op.clone().simplify(), op);
}
