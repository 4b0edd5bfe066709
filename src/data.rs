//! # Records and collections
//!
//! A query runs against a [`Data`] collection of [`Entry`] records and
//! produces another `Data` collection. The core never needs to know what a
//! record really is (a CSV row, a group of rows, a mail message); it only asks
//! records for values by key and asks collections to hand out, overwrite and
//! truncate their entries.
//!
//! ## Keys
//!
//! Keys use a dotted namespace. The segment before the first `.` selects the
//! scheme and the remainder is resolved against that scheme's fields:
//!
//! ```text
//! h.subject      header / field named "subject"
//! c.subject      column named "subject"
//! p.summary      property named "summary"
//! sz.            size of the record
//! ```
//!
//! ## Collections
//!
//! [`Records`] is the one collection type the crate ships. It is generic over
//! the concrete entry type, so `Records<Row>` only ever stores table rows and
//! `Records<GroupRow>` only ever stores group rows; [`Data::new_self`] hands
//! out an empty collection of the same kind.
pub mod group;
pub mod nil;
pub mod table;

use std::any::{self, Any};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::evaluator::EvalError;
use crate::value::Value;

pub use group::{GroupData, GroupRow};
pub use nil::NilRow;
pub use table::{Row, TableData, read_csv, read_delimited};

/// A single record exposing namespaced key lookup.
pub trait Entry: fmt::Debug + Any {
    /// Look up a value by its namespaced key (`h.name`, `c.count`, `sz.`).
    fn get(&self, key: &str) -> Result<Value, EvalError>;

    /// Member records, if this entry is a group.
    fn contents(&self) -> Option<&dyn Data> {
        None
    }

    /// Column names, in output order.
    fn column_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// The row rendered as strings, one per column.
    fn string_row(&self) -> Vec<String> {
        Vec::new()
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

/// An ordered, index-addressable, mutable collection of entries.
pub trait Data: fmt::Debug {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, n: usize) -> Option<Rc<dyn Entry>>;

    /// Overwrite the entry at `n`, or append it when `n == len()`.
    fn set_entry(&mut self, n: usize, entry: Rc<dyn Entry>) -> Result<(), EvalError>;

    /// Drop every entry from `n` onwards.
    fn truncate(&mut self, n: usize);

    /// An empty collection of the same concrete kind.
    fn new_self(&self) -> Box<dyn Data>;

    /// Column names of the collection, taken from its first entry.
    fn column_names(&self) -> Vec<String> {
        self.entry(0).map(|e| e.column_names()).unwrap_or_default()
    }
}

/// Split a key into its scheme and the remainder after the first `.`.
///
/// A key without a dot has no scheme.
pub fn split_key(key: &str) -> (Option<&str>, &str) {
    match key.split_once('.') {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, key),
    }
}

/// Column headers shared by every row a transformer produces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Headers {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Headers {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::new();
        for (i, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Headers { names, index }
    }

    /// Position of a column: exact match first, then ASCII case-insensitive.
    pub fn position(&self, name: &str) -> Option<usize> {
        if let Some(i) = self.index.get(name) {
            return Some(*i);
        }
        self.names.iter().position(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A collection of entries of one concrete type.
pub struct Records<E> {
    entries: Vec<Rc<E>>,
}

impl<E> Records<E> {
    pub fn new() -> Self {
        Records {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: E) {
        self.entries.push(Rc::new(entry));
    }
}

impl<E> Default for Records<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for Records<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<E> From<Vec<E>> for Records<E> {
    fn from(entries: Vec<E>) -> Self {
        Records {
            entries: entries.into_iter().map(Rc::new).collect(),
        }
    }
}

impl<E> FromIterator<E> for Records<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Records {
            entries: iter.into_iter().map(Rc::new).collect(),
        }
    }
}

impl<E: Entry> Data for Records<E> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, n: usize) -> Option<Rc<dyn Entry>> {
        self.entries.get(n).map(|e| Rc::clone(e) as Rc<dyn Entry>)
    }

    fn set_entry(&mut self, n: usize, entry: Rc<dyn Entry>) -> Result<(), EvalError> {
        let entry = entry.into_any().downcast::<E>().map_err(|_| {
            EvalError::InvalidData(format!(
                "cannot store a foreign entry in a collection of {}",
                any::type_name::<E>()
            ))
        })?;

        let len = self.entries.len();
        if n < len {
            self.entries[n] = entry;
        } else if n == len {
            self.entries.push(entry);
        } else {
            return Err(EvalError::InvalidData(format!(
                "entry index {} is past the end of a collection of length {}",
                n, len
            )));
        }
        Ok(())
    }

    fn truncate(&mut self, n: usize) {
        self.entries.truncate(n);
    }

    fn new_self(&self) -> Box<dyn Data> {
        Box::new(Records::<E>::new())
    }
}
