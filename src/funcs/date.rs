use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::{ArgType, Function, Signature, only_argument};
use crate::ast::ValueExpr;
use crate::data::Entry;
use crate::evaluator::{EvalError, Evaluator};
use crate::value::Value;

// `%b` only accepts abbreviated month names when parsing, `%B` full ones
const DATETIME_LAYOUTS: &[&str] = &[
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%d %B %Y %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    // ctime, as written by `date` and mbox From lines
    "%a %b %e %H:%M:%S %Y",
    // iCalendar basic form; a trailing `Z` is left as remainder
    "%Y%m%dT%H%M%S",
];

const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%a, %d %b %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%m/%d/%Y",
    "%Y%m%d",
];

/// Resolve a value to a point in time.
///
/// Integers and strings of nine or more digits are Unix seconds. Other
/// strings are parsed as RFC 2822, RFC 3339, then a set of common layouts
/// with any trailing zone annotation dropped. Empty strings, nil, and arrays
/// resolve to `None`.
pub fn resolve_time(function: &str, value: &Value) -> Result<Option<NaiveDateTime>, EvalError> {
    match value {
        Value::Integer(secs) => from_unix(function, *secs).map(Some),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            if s.len() >= 9 && s.bytes().all(|b| b.is_ascii_digit()) {
                let secs = s.parse::<i64>().map_err(|e| EvalError::DateParse {
                    function: function.to_string(),
                    input: s.to_string(),
                    reason: e.to_string(),
                })?;
                return from_unix(function, secs).map(Some);
            }
            parse_date(s).map(Some).ok_or_else(|| EvalError::DateParse {
                function: function.to_string(),
                input: s.to_string(),
                reason: "no known date layout matched".to_string(),
            })
        }
        Value::Array(_) | Value::Nil => Ok(None),
    }
}

fn from_unix(function: &str, secs: i64) -> Result<NaiveDateTime, EvalError> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| EvalError::DateParse {
            function: function.to_string(),
            input: secs.to_string(),
            reason: "timestamp out of range".to_string(),
        })
}

fn parse_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    let s = strip_annotation(s);
    for layout in DATETIME_LAYOUTS {
        if let Ok((dt, _)) = NaiveDateTime::parse_and_remainder(s, layout) {
            return Some(dt);
        }
    }
    for layout in DATE_LAYOUTS {
        if let Ok((date, _)) = NaiveDate::parse_and_remainder(s, layout) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Cut the string before the first character that cannot be part of a
/// date, so `+1100 (AEDT)` or a stray replacement character is ignored.
fn strip_annotation(s: &str) -> &str {
    let end = s
        .find(|c: char| !(c.is_alphanumeric() || c.is_whitespace() || ",:-/.".contains(c)))
        .unwrap_or(s.len());
    s[..end].trim_end()
}

fn date_part(
    function: &'static str,
    evaluator: &Evaluator<'_>,
    entry: &dyn Entry,
    args: &[ValueExpr],
    part: fn(&NaiveDateTime) -> i64,
) -> Result<Value, EvalError> {
    let arg = only_argument(function, args)?;
    let value = evaluator.eval_value(arg, entry)?;
    Ok(match resolve_time(function, &value)? {
        Some(dt) => Value::Integer(part(&dt)),
        None => Value::Nil,
    })
}

/// `f.year[date]`
pub struct Year;

impl Function for Year {
    fn name(&self) -> &'static str {
        "year"
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![
            Signature::new(vec![ArgType::String], "Extracts the year from a date string"),
            Signature::new(vec![ArgType::Integer], "Extracts the year from Unix seconds"),
        ]
    }

    fn run(
        &self,
        evaluator: &Evaluator<'_>,
        entry: &dyn Entry,
        args: &[ValueExpr],
    ) -> Result<Value, EvalError> {
        date_part(self.name(), evaluator, entry, args, |dt| dt.year() as i64)
    }
}

/// `f.month[date]`
pub struct Month;

impl Function for Month {
    fn name(&self) -> &'static str {
        "month"
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![
            Signature::new(vec![ArgType::String], "Extracts the month (1-12) from a date string"),
            Signature::new(vec![ArgType::Integer], "Extracts the month (1-12) from Unix seconds"),
        ]
    }

    fn run(
        &self,
        evaluator: &Evaluator<'_>,
        entry: &dyn Entry,
        args: &[ValueExpr],
    ) -> Result<Value, EvalError> {
        date_part(self.name(), evaluator, entry, args, |dt| dt.month() as i64)
    }
}
