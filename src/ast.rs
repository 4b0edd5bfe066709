//! # Tally Query Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the operation tree of the tally query
//! language, a word-at-a-time pipeline language for filtering, projecting,
//! grouping and sorting collections of records.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Classified query words produced by the lexer
//! - **[expressions]** - Value and boolean expression nodes
//! - **[operators]** - Comparison operators used by filters
//! - **[statements]** - Operation tree nodes (filter, table, group, sort)
//!
//! ## Quick Start
//!
//! ```text
//! filter not h.agent icontains .Kmail into table h.agent f.year[h.date]
//! ```
//!
//! This query drops every record whose `agent` mentions Kmail and projects the
//! remaining ones into a two-column table.
//!
//! ## Core Concepts
//!
//! ### Pipeline Structure
//!
//! A query is a flat sequence of clauses, each introduced by a keyword:
//!
//! ```text
//! filter <condition> [where <condition>]...
//! into table <columns>
//! into summary <columns> [calculate <columns>]
//! sort <keys>
//! ```
//!
//! Clauses can be repeated and combined in any order; each one receives the
//! collection produced by the previous one.
//!
//! ### Operands
//!
//! - **Field references** `h.name`, `c.name`, `p.name` - a value of the record
//! - **Literals** `.text` - everything after the leading dot
//! - **Function calls** `f.name[arg,arg]` - see the function registry
//!
//! ## Examples
//!
//! ### Simple Filter
//!
//! ```text
//! filter h.numberrange eq .4
//! ```
//!
//! ### Grouping With Aggregates
//!
//! ```text
//! into summary h.numberrange calculate f.count f.sum[h.numberrange]
//! ```
//!
//! ### Sorting A Projection
//!
//! ```text
//! into table h.name sort c.name
//! ```
pub mod expressions;
pub mod operators;
pub mod statements;
pub mod tokens;

pub use expressions::{BoolExpr, ColumnExpr, ValueExpr};
pub use operators::CompareOp;
pub use statements::Operation;
pub use tokens::{Token, TokenKind};
