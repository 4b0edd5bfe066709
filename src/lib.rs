pub mod ast;
pub mod data;
pub mod evaluator;
pub mod funcs;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod transform;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{BoolExpr, ColumnExpr, CompareOp, Operation, Token, TokenKind, ValueExpr};
pub use data::{Data, Entry, GroupData, GroupRow, Headers, NilRow, Row, TableData, read_csv};
pub use evaluator::{EvalError, Evaluator};
pub use funcs::{Function, FunctionRegistry};
pub use parser::{ParseError, Parser};
pub use value::Value;

/// Parse a query and run it against `data` with the built-in functions.
///
/// # Examples
///
/// ```
/// let data = tally_lang::read_csv("name,n\nFelix Sutton,1\nJane Bender,9\n".as_bytes()).unwrap();
/// let words: Vec<String> = vec!["sort".into(), "h.n".into()];
///
/// let result = tally_lang::query(&words, Box::new(data)).unwrap();
/// assert_eq!(result.len(), 2);
/// ```
pub fn query(words: &[String], data: Box<dyn Data>) -> Result<Box<dyn Data>, QueryError> {
    let functions = FunctionRegistry::new();
    let op = Parser::new(&functions).parse_operations(words)?;
    Ok(Evaluator::new(&functions).execute(&op, data)?)
}

/// Error from [`query`]: either the words did not parse or the run failed.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    Parse(ParseError),
    Eval(EvalError),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::Parse(e) => write!(f, "Parse error: {}", e),
            QueryError::Eval(e) => write!(f, "Evaluation error: {}", e),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Parse(e) => Some(e),
            QueryError::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for QueryError {
    fn from(e: ParseError) -> Self {
        QueryError::Parse(e)
    }
}

impl From<EvalError> for QueryError {
    fn from(e: EvalError) -> Self {
        QueryError::Eval(e)
    }
}
