//! Function registry for `f.name[args]` calls.
//!
//! The registry is built once and handed to the parser (to validate names and
//! derive column names) and to the evaluator (to run calls).
mod count;
mod date;
mod rename;
mod sum;

use std::collections::HashMap;
use std::fmt;

use crate::ast::ValueExpr;
use crate::data::Entry;
use crate::evaluator::{EvalError, Evaluator};
use crate::value::Value;

pub use count::Count;
pub use date::{Month, Year, resolve_time};
pub use rename::As;
pub use sum::Sum;

/// Argument type, as shown in function listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Any,
    String,
    Integer,
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::Any => write!(f, "any"),
            ArgType::String => write!(f, "string"),
            ArgType::Integer => write!(f, "integer"),
        }
    }
}

/// One accepted argument list of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub args: Vec<ArgType>,
    pub description: &'static str,
}

impl Signature {
    pub fn new(args: Vec<ArgType>, description: &'static str) -> Self {
        Signature { args, description }
    }

    /// Call syntax for this signature, e.g. `f.sum[any]`.
    pub fn usage(&self, name: &str) -> String {
        if self.args.is_empty() {
            return format!("f.{}", name);
        }
        let args: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
        format!("f.{}[{}]", name, args.join(","))
    }
}

/// A function callable from a query.
pub trait Function {
    fn name(&self) -> &'static str;

    fn signatures(&self) -> Vec<Signature>;

    /// Evaluate the call against `entry`. Arguments are unevaluated so
    /// aggregates can evaluate them against each group member instead.
    fn run(
        &self,
        evaluator: &Evaluator<'_>,
        entry: &dyn Entry,
        args: &[ValueExpr],
    ) -> Result<Value, EvalError>;

    /// Column name override.
    fn column_name(&self, _functions: &FunctionRegistry, _args: &[ValueExpr]) -> Option<String> {
        None
    }
}

/// Name to function map.
pub struct FunctionRegistry {
    functions: HashMap<String, Box<dyn Function>>,
}

impl FunctionRegistry {
    /// A registry holding the built-in functions.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(Count));
        registry.register(Box::new(Sum));
        registry.register(Box::new(Year));
        registry.register(Box::new(Month));
        registry.register(Box::new(As));
        registry
    }

    pub fn empty() -> Self {
        FunctionRegistry {
            functions: HashMap::new(),
        }
    }

    /// Add a function, replacing any function of the same name.
    pub fn register(&mut self, function: Box<dyn Function>) {
        self.functions.insert(function.name().to_string(), function);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Function> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Functions ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Function> {
        let mut functions: Vec<&dyn Function> = self.functions.values().map(|f| f.as_ref()).collect();
        functions.sort_by_key(|f| f.name());
        functions.into_iter()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|function| function.name()))
            .finish()
    }
}

/// Require exactly one argument.
fn only_argument<'a>(function: &str, args: &'a [ValueExpr]) -> Result<&'a ValueExpr, EvalError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(EvalError::ExpectingArguments {
            function: function.to_string(),
            expected: "exactly one argument".to_string(),
        }),
    }
}
