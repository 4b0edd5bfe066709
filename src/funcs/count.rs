use super::{ArgType, Function, Signature};
use crate::ast::ValueExpr;
use crate::data::Entry;
use crate::evaluator::{EvalError, Evaluator};
use crate::value::Value;

/// `f.count` / `f.count[predicate]`
pub struct Count;

impl Function for Count {
    fn name(&self) -> &'static str {
        "count"
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![
            Signature::new(vec![], "Returns a count of rows represented by this row"),
            Signature::new(vec![ArgType::Any], "Returns the number of truthy results"),
        ]
    }

    fn run(
        &self,
        evaluator: &Evaluator<'_>,
        entry: &dyn Entry,
        args: &[ValueExpr],
    ) -> Result<Value, EvalError> {
        // A plain row counts as one
        let Some(contents) = entry.contents() else {
            return Ok(Value::Integer(1));
        };

        let Some(predicate) = args.first() else {
            return Ok(Value::Integer(contents.len() as i64));
        };

        let mut count = 0;
        for i in 0..contents.len() {
            let Some(member) = contents.entry(i) else {
                continue;
            };
            if evaluator.eval_value(predicate, member.as_ref())?.is_truthy() {
                count += 1;
            }
        }
        Ok(Value::Integer(count))
    }
}
