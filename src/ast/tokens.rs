use crate::ast::{CompareOp, ValueExpr};

/// A classified query word.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Clause keyword that ends the list before it
    ///
    /// Never consumed by the scan that discovers it, so the caller can branch
    /// on it.
    ///
    /// # Examples
    /// ```text
    /// into
    /// filter
    /// where
    /// sort
    /// calculate
    /// ```
    Terminator(String),

    /// Negation of the condition that follows
    Not,

    /// Comparison operator
    ///
    /// # Examples
    /// ```text
    /// eq
    /// contains
    /// icontains
    /// ```
    Compare(CompareOp),

    /// Field reference, literal or function call
    ///
    /// # Examples
    /// ```text
    /// h.subject
    /// .Kmail
    /// f.year[h.date]
    /// ```
    Value(ValueExpr),
}

/// The tag of a token, used for positional matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Terminator,
    Not,
    Equals,
    Contains,
    IContains,
    Field,
    Literal,
    Function,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Terminator(_) => TokenKind::Terminator,
            Token::Not => TokenKind::Not,
            Token::Compare(CompareOp::Equals) => TokenKind::Equals,
            Token::Compare(CompareOp::Contains) => TokenKind::Contains,
            Token::Compare(CompareOp::IContains) => TokenKind::IContains,
            Token::Value(ValueExpr::Field(_)) => TokenKind::Field,
            Token::Value(ValueExpr::Literal(_)) => TokenKind::Literal,
            Token::Value(ValueExpr::Function { .. }) => TokenKind::Function,
        }
    }
}
