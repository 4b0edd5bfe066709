use super::{ArgType, Function, FunctionRegistry, Signature};
use crate::ast::ValueExpr;
use crate::data::{Entry, NilRow};
use crate::evaluator::{EvalError, Evaluator};
use crate::value::Value;

/// `f.as[value,name]`: evaluates to `value` in a column called `name`.
pub struct As;

impl Function for As {
    fn name(&self) -> &'static str {
        "as"
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::new(
            vec![ArgType::Any, ArgType::String],
            "Renames the column to a specific name",
        )]
    }

    fn run(
        &self,
        evaluator: &Evaluator<'_>,
        entry: &dyn Entry,
        args: &[ValueExpr],
    ) -> Result<Value, EvalError> {
        let Some(value) = args.first() else {
            return Err(EvalError::ExpectingArguments {
                function: self.name().to_string(),
                expected: "two arguments: a value and a name".to_string(),
            });
        };
        if let Some(name) = args.get(1) {
            // The name is resolved outside any record and must be text
            match evaluator.eval_value(name, &NilRow)? {
                Value::String(_) => {}
                other => {
                    return Err(EvalError::UnsupportedType {
                        function: self.name().to_string(),
                        found: other.type_name().to_string(),
                    });
                }
            }
        }
        evaluator.eval_value(value, entry)
    }

    fn column_name(&self, functions: &FunctionRegistry, args: &[ValueExpr]) -> Option<String> {
        let name = args.get(1)?;
        Evaluator::new(functions)
            .eval_value(name, &NilRow)
            .ok()
            .map(|v| v.to_string())
    }
}
