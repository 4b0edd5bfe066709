// tests/funcs_tests.rs

use std::rc::Rc;

use tally_lang::ast::ValueExpr;
use tally_lang::data::{Data, Entry, GroupRow, Headers, NilRow, Row, TableData};
use tally_lang::funcs::{ArgType, Function, FunctionRegistry, Signature};
use tally_lang::{EvalError, Evaluator, Value};

fn call(name: &str, args: Vec<ValueExpr>, entry: &dyn Entry) -> Result<Value, EvalError> {
    let functions = FunctionRegistry::new();
    Evaluator::new(&functions).eval_value(&ValueExpr::function(name, args), entry)
}

fn row(pairs: &[(&str, &str)]) -> Row {
    let headers = Rc::new(Headers::new(pairs.iter().map(|(k, _)| *k)));
    Row::new(headers, pairs.iter().map(|(_, v)| Value::from(*v)).collect())
}

/// A group row whose members each carry one `size` value.
fn group(values: &[&str]) -> GroupRow {
    let headers = Rc::new(Headers::new(["size"]));
    let members: TableData = values
        .iter()
        .map(|v| Row::new(Rc::clone(&headers), vec![Value::from(*v)]))
        .collect();
    GroupRow::new(Rc::new(Headers::new(["k"])), vec!["key".into()], Box::new(members))
}

fn field(key: &str) -> ValueExpr {
    ValueExpr::field(key)
}

// ============================================================================
// count
// ============================================================================

#[test]
fn test_count_members() {
    let g = group(&["1", "2", "3"]);
    assert_eq!(call("count", vec![], &g).unwrap(), Value::Integer(3));
}

#[test]
fn test_count_truthy() {
    let g = group(&["1", "", "3", ""]);
    assert_eq!(call("count", vec![field("h.size")], &g).unwrap(), Value::Integer(2));
}

#[test]
fn test_count_single_row() {
    let r = row(&[("size", "10")]);
    assert_eq!(call("count", vec![], &r).unwrap(), Value::Integer(1));
}

// ============================================================================
// sum
// ============================================================================

#[test]
fn test_sum_members() {
    let g = group(&["10", "20", " 12 "]);
    assert_eq!(call("sum", vec![field("h.size")], &g).unwrap(), Value::Integer(42));
}

#[test]
fn test_sum_skips_non_numeric() {
    let g = group(&["10", "ten", "", "-3"]);
    assert_eq!(call("sum", vec![field("h.size")], &g).unwrap(), Value::Integer(7));
}

#[test]
fn test_sum_outside_group() {
    let r = row(&[("size", "10")]);
    assert_eq!(call("sum", vec![field("h.size")], &r).unwrap(), Value::Integer(1));
}

#[test]
fn test_sum_requires_argument() {
    let g = group(&["1"]);
    assert!(matches!(
        call("sum", vec![], &g),
        Err(EvalError::ExpectingArguments { function, .. }) if function == "sum"
    ));
}

#[test]
fn test_sum_member_error_propagates() {
    let g = group(&["1"]);
    assert_eq!(
        call("sum", vec![field("h.missing")], &g),
        Err(EvalError::KeyNotFound("h.missing".into()))
    );
}

// ============================================================================
// year / month
// ============================================================================

#[test]
fn test_year_month_from_date_string() {
    let r = row(&[("date", "2023-02-08")]);
    assert_eq!(call("year", vec![field("h.date")], &r).unwrap(), Value::Integer(2023));
    assert_eq!(call("month", vec![field("h.date")], &r).unwrap(), Value::Integer(2));
}

#[test]
fn test_year_month_from_mail_date() {
    let r = row(&[("date", "Wed, 8 Feb 2023 19:00:46 +1100 (AEDT)")]);
    assert_eq!(call("year", vec![field("h.date")], &r).unwrap(), Value::Integer(2023));
    assert_eq!(call("month", vec![field("h.date")], &r).unwrap(), Value::Integer(2));
}

#[test]
fn test_wall_clock_date_is_kept() {
    // Still 2022-12-31 in UTC
    let r = row(&[("date", "Sun, 01 Jan 2023 05:00:00 +1100")]);
    assert_eq!(call("year", vec![field("h.date")], &r).unwrap(), Value::Integer(2023));
    assert_eq!(call("month", vec![field("h.date")], &r).unwrap(), Value::Integer(1));
}

#[test]
fn test_year_month_from_other_layouts() {
    for input in [
        "Wed Feb  8 19:00:46 2023",
        "20230208",
        "20230208T190046Z",
        "20230208T190046",
        "8 February 2023",
        "8 February 2023 19:00:46",
        "February 8, 2023",
        "2023/02/08 19:00:46",
    ] {
        let r = row(&[("date", input)]);
        assert_eq!(
            call("year", vec![field("h.date")], &r).unwrap(),
            Value::Integer(2023),
            "year of {:?}",
            input
        );
        assert_eq!(
            call("month", vec![field("h.date")], &r).unwrap(),
            Value::Integer(2),
            "month of {:?}",
            input
        );
    }
}

#[test]
fn test_year_from_epoch_string() {
    let r = row(&[("date", "1675843200")]);
    assert_eq!(call("year", vec![field("h.date")], &r).unwrap(), Value::Integer(2023));
}

#[test]
fn test_year_from_integer() {
    let headers = Rc::new(Headers::new(["when"]));
    let r = Row::new(headers, vec![Value::Integer(0)]);
    assert_eq!(call("year", vec![field("h.when")], &r).unwrap(), Value::Integer(1970));
    assert_eq!(call("month", vec![field("h.when")], &r).unwrap(), Value::Integer(1));
}

#[test]
fn test_missing_dates_are_nil() {
    let r = row(&[("date", "")]);
    assert_eq!(call("year", vec![field("h.date")], &r).unwrap(), Value::Nil);
    assert_eq!(call("month", vec![field("h.anything")], &NilRow).unwrap(), Value::Nil);
}

#[test]
fn test_unparseable_date() {
    let r = row(&[("date", "next tuesday")]);
    assert!(matches!(
        call("year", vec![field("h.date")], &r),
        Err(EvalError::DateParse { function, input, .. }) if function == "year" && input == "next tuesday"
    ));
}

#[test]
fn test_year_arity() {
    let r = row(&[("date", "2023-02-08")]);
    assert!(matches!(
        call("year", vec![], &r),
        Err(EvalError::ExpectingArguments { .. })
    ));
    assert!(matches!(
        call("month", vec![field("h.date"), field("h.date")], &r),
        Err(EvalError::ExpectingArguments { .. })
    ));
}

#[test]
fn test_year_over_group_members() {
    // On a group row a non-key field is the list of member values
    let g = group(&["2023-02-08"]);
    assert_eq!(call("year", vec![field("h.size")], &g).unwrap(), Value::Nil);
}

// ============================================================================
// as
// ============================================================================

#[test]
fn test_as_value_and_name() {
    let functions = FunctionRegistry::new();
    let expr = ValueExpr::function("as", vec![field("h.subject"), ValueExpr::literal("Topic")]);
    let r = row(&[("subject", "Lunch")]);

    assert_eq!(Evaluator::new(&functions).eval_value(&expr, &r).unwrap(), Value::from("Lunch"));
    assert_eq!(expr.column_name(&functions), "Topic");
}

#[test]
fn test_as_name_must_be_text() {
    let r = row(&[("subject", "Lunch")]);
    assert_eq!(
        call("as", vec![field("h.subject"), ValueExpr::function("count", vec![])], &r),
        Err(EvalError::UnsupportedType {
            function: "as".into(),
            found: "integer".into(),
        })
    );
    assert!(matches!(
        call("as", vec![field("h.subject"), field("h.subject")], &r),
        Err(EvalError::UnsupportedType { found, .. }) if found == "nil"
    ));
}

#[test]
fn test_as_without_name() {
    let functions = FunctionRegistry::new();
    let expr = ValueExpr::function("as", vec![field("h.subject")]);
    assert_eq!(expr.column_name(&functions), "as-subject");
}

// ============================================================================
// Registry
// ============================================================================

struct Shout;

impl Function for Shout {
    fn name(&self) -> &'static str {
        "shout"
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::new(vec![ArgType::String], "Upper-cases its argument")]
    }

    fn run(&self, evaluator: &Evaluator<'_>, entry: &dyn Entry, args: &[ValueExpr]) -> Result<Value, EvalError> {
        let value = evaluator.eval_value(&args[0], entry)?;
        Ok(Value::String(value.to_string().to_uppercase()))
    }
}

#[test]
fn test_builtin_names() {
    let functions = FunctionRegistry::new();
    let names: Vec<&str> = functions.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["as", "count", "month", "sum", "year"]);
}

#[test]
fn test_register_custom_function() {
    let mut functions = FunctionRegistry::new();
    functions.register(Box::new(Shout));

    let r = row(&[("name", "Felix Sutton")]);
    let expr = ValueExpr::function("shout", vec![field("h.name")]);
    assert_eq!(
        Evaluator::new(&functions).eval_value(&expr, &r).unwrap(),
        Value::from("FELIX SUTTON")
    );
    assert_eq!(expr.column_name(&functions), "shout-name");
}

#[test]
fn test_signature_usage() {
    let functions = FunctionRegistry::new();
    let count = functions.get("count").unwrap();
    let usages: Vec<String> = count.signatures().iter().map(|s| s.usage("count")).collect();
    assert_eq!(usages, vec!["f.count", "f.count[any]"]);
}

#[test]
fn test_group_contents_are_data() {
    let g = group(&["1", "2"]);
    let contents: &dyn Data = g.contents().unwrap();
    assert_eq!(contents.len(), 2);
}
