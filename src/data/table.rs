use std::any::Any;
use std::io;
use std::rc::Rc;

use super::{Entry, Headers, Records, split_key};
use crate::evaluator::EvalError;
use crate::value::Value;

/// A flat table row: one value per header.
///
/// Rows read from CSV and rows produced by `into table` share this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub headers: Rc<Headers>,
    pub values: Vec<Value>,
}

pub type TableData = Records<Row>;

impl Row {
    pub fn new(headers: Rc<Headers>, values: Vec<Value>) -> Self {
        Row { headers, values }
    }

    fn column(&self, name: &str, key: &str) -> Result<Value, EvalError> {
        self.headers
            .position(name)
            .and_then(|i| self.values.get(i))
            .cloned()
            .ok_or_else(|| EvalError::KeyNotFound(key.to_string()))
    }
}

impl Entry for Row {
    fn get(&self, key: &str) -> Result<Value, EvalError> {
        match split_key(key) {
            (Some("sz" | "sized"), "") => Ok(Value::Integer(self.values.len() as i64)),
            (Some("sz" | "sized"), name) => {
                let value = self.column(name, key)?;
                Ok(Value::Integer(value.len() as i64))
            }
            (Some("h" | "header" | "c" | "column" | "p" | "property") | None, name) => {
                self.column(name, key)
            }
            _ => Err(EvalError::KeyNotFound(key.to_string())),
        }
    }

    fn column_names(&self) -> Vec<String> {
        self.headers.names().to_vec()
    }

    fn string_row(&self) -> Vec<String> {
        self.values.iter().map(|v| v.to_string()).collect()
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// Read a CSV table. The first record is the header row and every cell
/// becomes a string value.
pub fn read_csv<R: io::Read>(reader: R) -> Result<TableData, csv::Error> {
    read_delimited(reader, b',')
}

/// Like [`read_csv`] with another field delimiter, e.g. `b'\t'`.
pub fn read_delimited<R: io::Read>(reader: R, delimiter: u8) -> Result<TableData, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);
    let headers = Rc::new(Headers::new(reader.headers()?.iter()));

    let mut data = TableData::new();
    for record in reader.records() {
        let record = record?;
        let values = record.iter().map(Value::from).collect();
        data.push(Row::new(Rc::clone(&headers), values));
    }
    Ok(data)
}
