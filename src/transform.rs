use std::{cmp::Ordering, collections::HashMap, rc::Rc};

use crate::{
    ast::{ColumnExpr, ValueExpr},
    data::{Data, Entry, GroupData, GroupRow, Headers, Row, TableData},
    evaluator::{EvalError, Evaluator},
    value::Value,
};

/// Project every entry into a table row, one value per column.
///
/// Every row shares a single header map. A failing cell aborts the whole
/// projection.
pub fn table(
    evaluator: &Evaluator<'_>,
    columns: &[ColumnExpr],
    data: &dyn Data,
) -> Result<Box<dyn Data>, EvalError> {
    let headers = Rc::new(Headers::new(columns.iter().map(|c| c.name.clone())));

    let mut output = TableData::new();
    for i in 0..data.len() {
        let Some(entry) = data.entry(i) else {
            continue;
        };
        let values = evaluate_columns(evaluator, columns, entry.as_ref())?;
        output.push(Row::new(Rc::clone(&headers), values));
    }
    Ok(Box::new(output))
}

/// Bucket entries by the values of the key columns.
///
/// Buckets and their members both keep first-seen order. Members are stored
/// in a collection of the input's own kind.
pub fn group(
    evaluator: &Evaluator<'_>,
    columns: &[ColumnExpr],
    data: &dyn Data,
) -> Result<Box<dyn Data>, EvalError> {
    let headers = Rc::new(Headers::new(columns.iter().map(|c| c.name.clone())));

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(Vec<Value>, Box<dyn Data>)> = Vec::new();

    for i in 0..data.len() {
        let Some(entry) = data.entry(i) else {
            continue;
        };
        let key = evaluate_columns(evaluator, columns, entry.as_ref())?;
        let id = bucket_id(&key);

        let slot = match slots.get(&id) {
            Some(&slot) => slot,
            None => {
                tracing::debug!(key = %id, "new group");
                slots.insert(id, buckets.len());
                buckets.push((key, data.new_self()));
                buckets.len() - 1
            }
        };

        let contents = &mut buckets[slot].1;
        let end = contents.len();
        contents.set_entry(end, entry)?;
    }

    let output: GroupData = buckets
        .into_iter()
        .map(|(key, contents)| GroupRow::new(Rc::clone(&headers), key, contents))
        .collect();
    Ok(Box::new(output))
}

/// Stable multi-key sort.
///
/// Keys are evaluated once per entry. The first key that differs decides the
/// order; entries equal on every key keep their relative order. A key that
/// fails to evaluate sorts as nil.
pub fn sort(
    evaluator: &Evaluator<'_>,
    keys: &[ValueExpr],
    mut data: Box<dyn Data>,
) -> Result<Box<dyn Data>, EvalError> {
    let mut rows: Vec<(Vec<Value>, Rc<dyn Entry>)> = Vec::with_capacity(data.len());
    for i in 0..data.len() {
        let Some(entry) = data.entry(i) else {
            continue;
        };
        let values = keys
            .iter()
            .map(|key| match evaluator.eval_value(key, entry.as_ref()) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(index = i, %err, "sort key failed, treating as nil");
                    Value::Nil
                }
            })
            .collect();
        rows.push((values, entry));
    }

    rows.sort_by(|(a, _), (b, _)| compare_keys(a, b));

    for (i, (_, entry)) in rows.into_iter().enumerate() {
        data.set_entry(i, entry)?;
    }
    Ok(data)
}

fn evaluate_columns(
    evaluator: &Evaluator<'_>,
    columns: &[ColumnExpr],
    entry: &dyn Entry,
) -> Result<Vec<Value>, EvalError> {
    columns
        .iter()
        .map(|column| evaluator.eval_value(&column.expr, entry))
        .collect()
}

/// Bucket identity for a group key. Encoding as JSON keeps `["a,b"]` and
/// `["a", "b"]` apart.
fn bucket_id(key: &[Value]) -> String {
    serde_json::Value::Array(key.iter().map(serde_json::Value::from).collect()).to_string()
}

fn compare_keys(a: &[Value], b: &[Value]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.compare(y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[test]
fn test_bucket_id_separates_embedded_commas() {
    let joined = bucket_id(&[Value::from("a,b")]);
    let split = bucket_id(&[Value::from("a"), Value::from("b")]);
    assert_ne!(joined, split);
}

#[test]
fn test_compare_keys_falls_through() {
    let a = vec![Value::from("x"), Value::Integer(1)];
    let b = vec![Value::from("x"), Value::Integer(2)];
    assert_eq!(compare_keys(&a, &b), Ordering::Less);
    assert_eq!(compare_keys(&a, &a), Ordering::Equal);
}
