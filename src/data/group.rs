use std::any::Any;
use std::rc::Rc;

use super::{Data, Entry, Headers, Records, split_key};
use crate::evaluator::EvalError;
use crate::value::Value;

/// One bucket produced by `into summary`: the evaluated group key plus every
/// member record that produced it, in first-seen order.
#[derive(Debug)]
pub struct GroupRow {
    pub headers: Rc<Headers>,
    pub key: Vec<Value>,
    pub contents: Box<dyn Data>,
}

pub type GroupData = Records<GroupRow>;

impl GroupRow {
    pub fn new(headers: Rc<Headers>, key: Vec<Value>, contents: Box<dyn Data>) -> Self {
        GroupRow {
            headers,
            key,
            contents,
        }
    }

    /// Gather `key` from every member. Members that are missing are skipped.
    fn collect(&self, key: &str) -> Result<Value, EvalError> {
        let mut values = Vec::with_capacity(self.contents.len());
        for i in 0..self.contents.len() {
            let Some(member) = self.contents.entry(i) else {
                continue;
            };
            let value = member
                .get(key)
                .map_err(|_| EvalError::KeyNotFound(key.to_string()))?;
            values.push(value);
        }
        Ok(Value::Array(values))
    }
}

impl Entry for GroupRow {
    fn get(&self, key: &str) -> Result<Value, EvalError> {
        match split_key(key) {
            (Some("sz" | "sized"), "") => Ok(Value::Integer(self.contents.len() as i64)),
            (Some("sz" | "sized"), name) => {
                let value = self.get(&format!("c.{}", name))?;
                Ok(Value::Integer(value.len() as i64))
            }
            (Some("h" | "header" | "c" | "column" | "p" | "property") | None, name) => {
                match self.headers.position(name).and_then(|i| self.key.get(i)) {
                    Some(v) => Ok(v.clone()),
                    None => self.collect(key),
                }
            }
            _ => Err(EvalError::KeyNotFound(key.to_string())),
        }
    }

    fn contents(&self) -> Option<&dyn Data> {
        Some(self.contents.as_ref())
    }

    fn column_names(&self) -> Vec<String> {
        self.headers.names().to_vec()
    }

    fn string_row(&self) -> Vec<String> {
        self.key.iter().map(|v| v.to_string()).collect()
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}
