//! Help text for the tally CLI

use super::CliError;
use crate::funcs::FunctionRegistry;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTopic {
    Fields,
    Filters,
    Projections,
    Sorting,
}

impl DocTopic {
    /// Parse topic name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fields" | "field" | "values" => Some(Self::Fields),
            "filters" | "filter" | "where" => Some(Self::Filters),
            "projections" | "into" | "table" | "summary" => Some(Self::Projections),
            "sorting" | "sort" => Some(Self::Sorting),
            _ => None,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"TALLY QUERY SYNTAX

A query is a flat list of words. Clauses start with a keyword and run in
order, each one working on the result of the clause before it.

  filter <condition> [filter|where <condition>]...
  into table <columns>
  into summary <columns> [calculate <columns>]
  sort <keys>

TOPICS

  fields            Field references, literals and function calls
  filters           Conditions: eq, contains, icontains, not
  projections       into table, into summary, calculate
  sorting           Multi-key sorting

QUICK REFERENCE

  h.name            Field of the input record
  c.name            Column of a table or summary row
  .text             Literal text
  f.count           Function call
  f.sum[h.size]     Function call with arguments

Run 'tally syntax <topic>' for details.
Run 'tally functions' for the function list.
"#
}

/// Get documentation for a specific topic
pub fn get_doc_topic(name: &str) -> Result<&'static str, CliError> {
    match DocTopic::from_name(name) {
        Some(DocTopic::Fields) => Ok(FIELDS_DOC),
        Some(DocTopic::Filters) => Ok(FILTERS_DOC),
        Some(DocTopic::Projections) => Ok(PROJECTIONS_DOC),
        Some(DocTopic::Sorting) => Ok(SORTING_DOC),
        None => Err(CliError::UnknownTopic(name.to_string())),
    }
}

/// List every registered function with its call forms.
pub fn function_list(functions: &FunctionRegistry) -> String {
    let mut out = String::from("FUNCTIONS\n");
    for function in functions.iter() {
        out.push('\n');
        for signature in function.signatures() {
            out.push_str(&format!(
                "  {:<24}{}\n",
                signature.usage(function.name()),
                signature.description
            ));
        }
    }
    out
}

const FIELDS_DOC: &str = r#"FIELDS - Values in a query

FIELD REFERENCES
  h.<name>   header.<name>
  c.<name>   column.<name>
  p.<name>   property.<name>
    The value of a field of the current record. Names are matched exactly
    first, then ignoring ASCII case.

    Example:
      Query:  into table h.name
      Output: one column called "name"

SIZE
  sz.   sized.
    The number of cells of a table row, or the number of member rows of a
    summary row.

LITERALS
  .<text>
    Everything after the leading dot, taken as text.

    Example:
      filter h.numberrange eq .4

FUNCTION CALLS
  f.<name>   f.<name>[arg,arg,...]
    Arguments are fields, literals or nested calls, separated by commas.
    Commas inside a nested call's brackets are not supported.

    Example:
      f.year[h.date]
      f.as[h.subject,.Topic]

COLUMN NAMES
  Projected columns are named after their expression: a field uses its name,
  a literal its text (non-letters become "-"), and a call joins the function
  name with its argument names, e.g. f.sum[h.size] becomes "sum-size".
  f.as[value,.name] names its column explicitly.
"#;

const FILTERS_DOC: &str = r#"FILTERS - Keeping matching records

CONDITIONS
  <operand> eq <operand>          Equal text
  <operand> contains <operand>    Left side contains right side
  <operand> icontains <operand>   Same, ignoring case
  not <condition>                 Negation

  Operands are field references or literals. Values are compared as text.

CHAINING
  filter h.a eq .x where h.b contains .y
    Every condition must hold. "filter" and "where" are interchangeable.

  Example:
    filter not h.agent icontains .Kmail
"#;

const PROJECTIONS_DOC: &str = r#"PROJECTIONS - Building new rows

INTO TABLE
  into table <columns>
    One output row per record with one cell per column.

    Example:
      into table h.name f.year[h.date]

INTO SUMMARY
  into summary <columns>
    One output row per distinct combination of column values, in the order
    the combinations were first seen.

  into summary <columns> calculate <columns>
    Adds aggregate columns. Key columns stay available as c.<name>; new
    columns are evaluated against the group, so aggregates such as f.count
    and f.sum see every member row.

    Example:
      into summary h.numberrange calculate f.count f.sum[h.numberrange]
"#;

const SORTING_DOC: &str = r#"SORTING - Ordering records

  sort <keys>
    Orders by the first key, then by the next key where the first is equal.
    Records equal on every key keep their order.

    Example:
      into table h.name sort c.name

  Ordering between different kinds of value: nil < integer < text < list.
"#;

#[test]
fn test_function_list_is_sorted() {
    let list = function_list(&FunctionRegistry::new());
    let as_pos = list.find("f.as[any,string]").unwrap();
    let year_pos = list.find("f.year[string]").unwrap();
    assert!(as_pos < year_pos);
    assert!(list.contains("f.count "));
}

#[test]
fn test_unknown_topic_points_at_syntax() {
    let err = get_doc_topic("charts").unwrap_err();
    assert!(matches!(err, CliError::UnknownTopic(ref t) if t == "charts"));
    assert!(err.to_string().contains("tally syntax"));
}
