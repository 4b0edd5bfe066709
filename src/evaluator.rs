use crate::{
    ast::{BoolExpr, Operation, ValueExpr},
    data::{Data, Entry},
    funcs::FunctionRegistry,
    transform,
    value::Value,
};

/// Errors that can occur while executing a query.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A record has no value under this key
    KeyNotFound(String),

    /// Call to a function the registry does not know
    UnknownFunction(String),

    /// Function called with the wrong number of arguments
    ExpectingArguments { function: String, expected: String },

    /// Function called with an argument it cannot use
    UnsupportedType { function: String, found: String },

    /// A string could not be read as a date
    DateParse {
        function: String,
        input: String,
        reason: String,
    },

    /// A collection refused an entry
    InvalidData(String),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::KeyNotFound(key) => write!(f, "Key not found: {}", key),
            EvalError::UnknownFunction(name) => write!(f, "Unknown function: f.{}", name),
            EvalError::ExpectingArguments { function, expected } => {
                write!(f, "f.{} is expecting {}", function, expected)
            }
            EvalError::UnsupportedType { function, found } => {
                write!(f, "f.{} does not support {} arguments", function, found)
            }
            EvalError::DateParse {
                function,
                input,
                reason,
            } => write!(f, "f.{} could not parse date '{}': {}", function, input, reason),
            EvalError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
        }
    }
}

impl std::error::Error for EvalError {}

/// Executes operation trees against record collections.
///
/// The evaluator holds no state of its own beyond the function registry, so
/// one evaluator can run any number of queries.
pub struct Evaluator<'a> {
    functions: &'a FunctionRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(functions: &'a FunctionRegistry) -> Self {
        Evaluator { functions }
    }

    /// Runs an operation tree, threading the collection through every node.
    ///
    /// The first error aborts the run and the partial output is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use tally_lang::data::{Data, Headers, Row, TableData};
    /// use tally_lang::funcs::FunctionRegistry;
    /// use tally_lang::parser::Parser;
    /// use tally_lang::Evaluator;
    ///
    /// let headers = Rc::new(Headers::new(["name", "numberrange"]));
    /// let data: TableData = vec![
    ///     Row::new(Rc::clone(&headers), vec!["Jasper Joseph".into(), "4".into()]),
    ///     Row::new(Rc::clone(&headers), vec!["Rogan Hopkins".into(), "9".into()]),
    /// ]
    /// .into();
    ///
    /// let functions = FunctionRegistry::new();
    /// let words: Vec<String> = ["filter", "h.numberrange", "eq", ".4"]
    ///     .iter()
    ///     .map(|s| s.to_string())
    ///     .collect();
    /// let op = Parser::new(&functions).parse_operations(&words).unwrap();
    ///
    /// let result = Evaluator::new(&functions).execute(&op, Box::new(data)).unwrap();
    /// assert_eq!(result.len(), 1);
    /// ```
    pub fn execute(&self, op: &Operation, data: Box<dyn Data>) -> Result<Box<dyn Data>, EvalError> {
        match op {
            Operation::Compound(children) => {
                let mut data = data;
                for child in children {
                    data = self.execute(child, data)?;
                }
                Ok(data)
            }
            Operation::Filter(expr) => self.filter(expr, data),
            Operation::Table(columns) => transform::table(self, columns, data.as_ref()),
            Operation::Group(columns) => transform::group(self, columns, data.as_ref()),
            Operation::Sort(keys) => transform::sort(self, keys, data),
        }
    }

    pub fn eval_value(&self, expr: &ValueExpr, entry: &dyn Entry) -> Result<Value, EvalError> {
        match expr {
            ValueExpr::Literal(text) => Ok(Value::String(text.clone())),
            ValueExpr::Field(key) => entry.get(key),
            ValueExpr::Function { name, args } => {
                let function = self
                    .functions
                    .get(name)
                    .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
                function.run(self, entry, args)
            }
        }
    }

    pub fn eval_bool(&self, expr: &BoolExpr, entry: &dyn Entry) -> Result<bool, EvalError> {
        match expr {
            BoolExpr::Not(inner) => Ok(!self.eval_bool(inner, entry)?),
            BoolExpr::Compare { op, lhs, rhs } => {
                let lhs = self.eval_value(lhs, entry)?;
                let rhs = self.eval_value(rhs, entry)?;
                Ok(op.apply(&lhs, &rhs))
            }
        }
    }

    /// Compacts kept entries towards the front in a single pass, then drops
    /// the tail. Nothing is moved until the first entry is discarded.
    fn filter(&self, expr: &BoolExpr, mut data: Box<dyn Data>) -> Result<Box<dyn Data>, EvalError> {
        let mut kept = 0;
        let mut dropped = 0;

        while kept + dropped < data.len() {
            let index = kept + dropped;
            let Some(entry) = data.entry(index) else {
                break;
            };
            let keep = self.eval_bool(expr, entry.as_ref())?;
            tracing::trace!(index, keep, "filter");

            if keep {
                if dropped > 0 {
                    data.set_entry(kept, entry)?;
                }
                kept += 1;
            } else {
                dropped += 1;
            }
        }

        data.truncate(kept);
        Ok(data)
    }
}

#[test]
fn test_filter_compacts_in_order() {
    use crate::ast::{CompareOp, ValueExpr};
    use crate::data::{Headers, Row, TableData};
    use std::rc::Rc;

    let headers = Rc::new(Headers::new(["n"]));
    let data: TableData = ["a", "b", "a", "c", "a"]
        .iter()
        .map(|v| Row::new(Rc::clone(&headers), vec![Value::from(*v)]))
        .collect();

    let functions = FunctionRegistry::new();
    let expr = BoolExpr::Compare {
        op: CompareOp::Equals,
        lhs: ValueExpr::field("h.n"),
        rhs: ValueExpr::literal("a"),
    };
    let result = Evaluator::new(&functions)
        .execute(&Operation::Filter(expr), Box::new(data))
        .unwrap();

    assert_eq!(result.len(), 3);
    for i in 0..3 {
        assert_eq!(result.entry(i).unwrap().get("h.n").unwrap(), Value::from("a"));
    }
}
