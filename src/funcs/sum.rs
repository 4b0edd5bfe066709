use super::{ArgType, Function, Signature};
use crate::ast::ValueExpr;
use crate::data::Entry;
use crate::evaluator::{EvalError, Evaluator};
use crate::value::Value;

/// `f.sum[value]`
///
/// Non-numeric member values are skipped.
pub struct Sum;

impl Function for Sum {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::new(
            vec![ArgType::Any],
            "Sums the integer values of every grouped row",
        )]
    }

    fn run(
        &self,
        evaluator: &Evaluator<'_>,
        entry: &dyn Entry,
        args: &[ValueExpr],
    ) -> Result<Value, EvalError> {
        let Some(arg) = args.first() else {
            return Err(EvalError::ExpectingArguments {
                function: self.name().to_string(),
                expected: "one argument".to_string(),
            });
        };

        // Outside a group there is nothing to add up
        let Some(contents) = entry.contents() else {
            return Ok(Value::Integer(1));
        };

        let mut total: i64 = 0;
        for i in 0..contents.len() {
            let Some(member) = contents.entry(i) else {
                continue;
            };
            let value = evaluator.eval_value(arg, member.as_ref())?;
            for element in value.elements() {
                if let Some(n) = element.as_int() {
                    total = total.saturating_add(n);
                }
            }
        }
        Ok(Value::Integer(total))
    }
}
