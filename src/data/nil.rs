use std::any::Any;
use std::rc::Rc;

use super::Entry;
use crate::evaluator::EvalError;
use crate::value::Value;

/// A record with no fields. Every key resolves to `Nil`.
///
/// Used to evaluate expressions that must not depend on any record, such as
/// the name argument of `f.as[...]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NilRow;

impl Entry for NilRow {
    fn get(&self, _key: &str) -> Result<Value, EvalError> {
        Ok(Value::Nil)
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}
