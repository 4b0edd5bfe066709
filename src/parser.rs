use std::fmt;

use crate::{
    ast::{BoolExpr, ColumnExpr, Operation, Token, TokenKind, ValueExpr},
    funcs::FunctionRegistry,
    lexer::{match_tokens, scan_n, scan_until_terminator},
};

/// Errors raised while turning query words into an operation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A word with a prefix the tokenizer does not know
    UnknownToken(String),

    /// No grammar production matched at this point
    NothingFound(String),

    /// A production consumed nothing, or produced something it should not
    ParserFault(String),

    /// `into` followed by something other than `table` or `summary`
    UnknownIntoTarget(String),

    /// Malformed `f.name[...]` word
    InvalidFunctionExpression(String),

    /// `f.name` where no function is registered under `name`
    UnknownFunction(String),

    /// A word that does not start a clause
    UnknownExpression(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownToken(word) => write!(f, "Unknown token: {}", word),
            ParseError::NothingFound(at) => write!(f, "No expression found at: {}", at),
            ParseError::ParserFault(msg) => write!(f, "Parser fault: {}", msg),
            ParseError::UnknownIntoTarget(target) => {
                write!(f, "Unknown into target: '{}' (expected 'table' or 'summary')", target)
            }
            ParseError::InvalidFunctionExpression(word) => {
                write!(f, "Invalid function expression: {}", word)
            }
            ParseError::UnknownFunction(name) => write!(f, "Unknown function: f.{}", name),
            ParseError::UnknownExpression(word) => write!(f, "Unknown expression: {}", word),
        }
    }
}

impl std::error::Error for ParseError {}

/// Recursive-descent parser over query words.
///
/// Every production takes the remaining words and returns the node it built
/// together with the words it did not consume.
pub struct Parser<'a> {
    functions: &'a FunctionRegistry,
}

impl<'a> Parser<'a> {
    pub fn new(functions: &'a FunctionRegistry) -> Self {
        Parser { functions }
    }

    /// Parses a whole query into a simplified operation tree.
    ///
    /// An empty query parses to an empty compound, which leaves its input
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_lang::ast::Operation;
    /// use tally_lang::funcs::FunctionRegistry;
    /// use tally_lang::parser::Parser;
    ///
    /// let functions = FunctionRegistry::new();
    /// let words: Vec<String> = "filter h.numberrange eq .4 sort c.name"
    ///     .split_whitespace()
    ///     .map(String::from)
    ///     .collect();
    ///
    /// let op = Parser::new(&functions).parse_operations(&words).unwrap();
    /// assert!(matches!(op, Operation::Compound(ref ops) if ops.len() == 2));
    /// ```
    pub fn parse_operations(&self, args: &[String]) -> Result<Operation, ParseError> {
        let mut operations = Vec::new();
        let mut rest = args;

        while let Some(word) = rest.first() {
            let before = rest.len();
            let (op, remain) = match word.as_str() {
                "filter" | "where" => self.parse_filters(&rest[1..])?,
                "into" => self.parse_into(&rest[1..])?,
                "sort" => self.parse_sort(&rest[1..])?,
                other => return Err(ParseError::UnknownExpression(other.to_string())),
            };
            rest = remain;
            operations.push(op);

            if rest.len() >= before {
                return Err(ParseError::ParserFault(format!(
                    "no progress at '{}'",
                    rest.join(" ")
                )));
            }
        }

        let tree = Operation::Compound(operations).simplify();
        tracing::debug!(?tree, "parsed query");
        Ok(tree)
    }

    /// Parses one boolean expression: `not <expr>` or
    /// `<operand> eq|contains|icontains <operand>`.
    pub fn parse_filter<'w>(&self, args: &'w [String]) -> Result<(BoolExpr, &'w [String]), ParseError> {
        let (tokens, remain) = scan_n(args, 3)?;

        if match_tokens(&tokens, &[&[TokenKind::Not]]).is_some() {
            let (inner, remain) = self.parse_filter(&args[1..])?;
            return Ok((BoolExpr::Not(Box::new(inner)), remain));
        }

        let operand: &[TokenKind] = &[TokenKind::Field, TokenKind::Literal];
        let comparison: &[TokenKind] = &[TokenKind::Equals, TokenKind::Contains, TokenKind::IContains];
        if match_tokens(&tokens, &[operand, comparison, operand]).is_some() {
            let mut tokens = tokens.into_iter();
            if let (Some(Token::Value(lhs)), Some(Token::Compare(op)), Some(Token::Value(rhs))) =
                (tokens.next(), tokens.next(), tokens.next())
            {
                return Ok((BoolExpr::Compare { op, lhs, rhs }, remain));
            }
        }

        Err(ParseError::NothingFound(describe(args, 3)))
    }

    /// Parses boolean expressions, each optionally introduced by `filter` or
    /// `where`, until `into`, `sort`, or the end of input.
    pub fn parse_filters<'w>(&self, args: &'w [String]) -> Result<(Operation, &'w [String]), ParseError> {
        let mut filters = Vec::new();
        let mut rest = args;

        while let Some(word) = rest.first() {
            match word.as_str() {
                "into" | "sort" => break,
                "filter" | "where" => rest = &rest[1..],
                _ => {}
            }
            let (expr, remain) = self.parse_filter(rest)?;
            filters.push(Operation::Filter(expr));
            rest = remain;
        }

        Ok((Operation::Compound(filters).simplify(), rest))
    }

    /// Parses the word after `into` and dispatches to its projection.
    pub fn parse_into<'w>(&self, args: &'w [String]) -> Result<(Operation, &'w [String]), ParseError> {
        let rest = match args.first() {
            Some(word) if word == "into" => &args[1..],
            _ => args,
        };

        match rest.first().map(String::as_str) {
            Some("table") => self.parse_into_table(&rest[1..]),
            Some("summary") => self.parse_into_summary(&rest[1..]),
            Some(other) => Err(ParseError::UnknownIntoTarget(other.to_string())),
            None => Err(ParseError::UnknownIntoTarget(String::new())),
        }
    }

    /// Parses a column list into a flat projection.
    pub fn parse_into_table<'w>(&self, args: &'w [String]) -> Result<(Operation, &'w [String]), ParseError> {
        let (columns, remain) = self.parse_columns(args)?;
        if columns.is_empty() {
            return Err(ParseError::NothingFound(describe(args, 3)));
        }
        Ok((Operation::Table(columns), remain))
    }

    /// Parses a group key column list, optionally followed by `calculate` and
    /// the aggregate columns.
    ///
    /// Group key columns pass through as `c.<name>`. When `calculate` adds no
    /// columns the grouping is returned alone.
    pub fn parse_into_summary<'w>(&self, args: &'w [String]) -> Result<(Operation, &'w [String]), ParseError> {
        let (keys, mut rest) = self.parse_columns(args)?;
        if keys.is_empty() {
            return Err(ParseError::NothingFound(describe(args, 3)));
        }

        if rest.first().map(String::as_str) != Some("calculate") {
            return Ok((Operation::Group(keys), rest));
        }
        rest = &rest[1..];

        let (calculated, remain) = self.parse_columns(rest)?;
        let mut columns: Vec<ColumnExpr> = keys
            .iter()
            .map(|key| ColumnExpr::new(key.name.clone(), ValueExpr::field(format!("c.{}", key.name))))
            .collect();
        columns.extend(calculated);

        let op = if columns.len() > keys.len() {
            Operation::Compound(vec![Operation::Group(keys), Operation::Table(columns)])
        } else {
            Operation::Group(keys)
        };
        Ok((op, remain))
    }

    /// Parses a list of sort keys.
    pub fn parse_sort<'w>(&self, args: &'w [String]) -> Result<(Operation, &'w [String]), ParseError> {
        let (keys, remain) = self.parse_values(args)?;
        if keys.is_empty() {
            return Err(ParseError::NothingFound(describe(args, 3)));
        }
        Ok((Operation::Sort(keys), remain))
    }

    fn parse_columns<'w>(&self, args: &'w [String]) -> Result<(Vec<ColumnExpr>, &'w [String]), ParseError> {
        let (values, remain) = self.parse_values(args)?;
        let columns = values
            .into_iter()
            .map(|expr| ColumnExpr::new(expr.column_name(self.functions), expr))
            .collect();
        Ok((columns, remain))
    }

    /// Scans value expressions until a terminator, rejecting anything that is
    /// not a value and any call to an unregistered function.
    fn parse_values<'w>(&self, args: &'w [String]) -> Result<(Vec<ValueExpr>, &'w [String]), ParseError> {
        let (tokens, remain) = scan_until_terminator(args)?;
        let mut values = Vec::with_capacity(tokens.len());
        for token in tokens {
            match token {
                Token::Value(expr) => {
                    self.check_functions(&expr)?;
                    values.push(expr);
                }
                other => {
                    return Err(ParseError::ParserFault(format!(
                        "unexpected token {:?} in column list",
                        other
                    )));
                }
            }
        }
        Ok((values, remain))
    }

    fn check_functions(&self, expr: &ValueExpr) -> Result<(), ParseError> {
        if let ValueExpr::Function { name, args } = expr {
            if !self.functions.contains(name) {
                return Err(ParseError::UnknownFunction(name.clone()));
            }
            for arg in args {
                self.check_functions(arg)?;
            }
        }
        Ok(())
    }
}

fn describe(args: &[String], n: usize) -> String {
    if args.is_empty() {
        return "end of input".to_string();
    }
    args.iter().take(n).cloned().collect::<Vec<_>>().join(" ")
}
