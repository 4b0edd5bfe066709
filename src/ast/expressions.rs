use crate::ast::CompareOp;
use crate::data::split_key;
use crate::funcs::FunctionRegistry;

/// Expression producing a value from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpr {
    /// Literal text
    ///
    /// # Example
    /// ```text
    /// .Kmail        // Literal("Kmail")
    /// ```
    Literal(String),

    /// Field reference, kept with its namespace prefix
    ///
    /// # Examples
    /// ```text
    /// h.User-Agent  // Field("h.User-Agent")
    /// c.count       // Field("c.count")
    /// ```
    Field(String),

    /// Function call
    ///
    /// # Examples
    /// ```text
    /// f.count                  // no arguments
    /// f.sum[h.size]
    /// f.as[h.subject,.Topic]
    /// ```
    Function { name: String, args: Vec<ValueExpr> },
}

impl ValueExpr {
    pub fn field(key: impl Into<String>) -> Self {
        ValueExpr::Field(key.into())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        ValueExpr::Literal(text.into())
    }

    pub fn function(name: impl Into<String>, args: Vec<ValueExpr>) -> Self {
        ValueExpr::Function {
            name: name.into(),
            args,
        }
    }

    /// Derive the output column name for this expression.
    ///
    /// Field references use the part after the namespace prefix (or the
    /// prefix itself for a bare `sz.`), literals use their text, and both map
    /// every non-letter to `-`. A function call is its name joined by `-` with
    /// the names of its arguments, unless the function names the column
    /// itself (`f.as`).
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_lang::ast::ValueExpr;
    /// use tally_lang::funcs::FunctionRegistry;
    ///
    /// let functions = FunctionRegistry::new();
    /// assert_eq!(ValueExpr::field("h.User-Agent").column_name(&functions), "User-Agent");
    /// assert_eq!(ValueExpr::literal("Hello World!").column_name(&functions), "Hello-World-");
    /// ```
    pub fn column_name(&self, functions: &FunctionRegistry) -> String {
        match self {
            ValueExpr::Field(key) => match split_key(key) {
                (Some(scheme), "") => letters_only(scheme),
                (_, name) => letters_only(name),
            },
            ValueExpr::Literal(text) => letters_only(text),
            ValueExpr::Function { name, args } => {
                if let Some(named) = functions
                    .get(name)
                    .and_then(|f| f.column_name(functions, args))
                {
                    return named;
                }
                let mut parts = vec![name.clone()];
                parts.extend(args.iter().map(|arg| arg.column_name(functions)));
                parts.join("-")
            }
        }
    }
}

fn letters_only(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphabetic() { c } else { '-' })
        .collect()
}

/// Expression producing a boolean from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum BoolExpr {
    /// Negation
    ///
    /// # Example
    /// ```text
    /// not h.agent icontains .Kmail
    /// ```
    Not(Box<BoolExpr>),

    /// Binary comparison
    ///
    /// # Example
    /// ```text
    /// h.numberrange eq .4
    /// ```
    Compare {
        op: CompareOp,
        lhs: ValueExpr,
        rhs: ValueExpr,
    },
}

/// A named value expression, one output column of a table or group.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnExpr {
    pub name: String,
    pub expr: ValueExpr,
}

impl ColumnExpr {
    pub fn new(name: impl Into<String>, expr: ValueExpr) -> Self {
        ColumnExpr {
            name: name.into(),
            expr,
        }
    }
}
