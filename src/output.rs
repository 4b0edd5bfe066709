//! Renderers for query results.
//!
//! Every renderer works on any [`Data`] collection through the entries'
//! column names and stringified rows, so table rows and group rows print the
//! same way.
//!
//! # Formats
//!
//! - **CSV** via [`write_csv()`] - header row followed by one record per entry
//! - **Table** via [`TablePrinter`] - aligned ASCII grid for terminals
//! - **JSON** via [`to_json()`] - array of objects keyed by column name
//! - **Count** via [`count()`] - just the number of entries
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//! use tally_lang::data::{Headers, Row, TableData};
//! use tally_lang::output::TablePrinter;
//! use tally_lang::Value;
//!
//! let headers = Rc::new(Headers::new(["name", "n"]));
//! let data: TableData = vec![Row::new(headers, vec!["Jane Bender".into(), Value::Integer(9)])].into();
//!
//! let printed = TablePrinter::new().print(&data);
//! assert_eq!(
//!     printed,
//!     "+-------------+---+\n\
//!      | name        | n |\n\
//!      +-------------+---+\n\
//!      | Jane Bender | 9 |\n\
//!      +-------------+---+\n"
//! );
//! ```

use std::io;

use crate::data::Data;

/// Write the collection as CSV, header row first. An empty collection
/// writes nothing.
pub fn write_csv<W: io::Write>(data: &dyn Data, writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    if let Some(first) = data.entry(0) {
        writer.write_record(first.column_names())?;
    }
    for i in 0..data.len() {
        if let Some(entry) = data.entry(i) {
            writer.write_record(entry.string_row())?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Convert the collection to a JSON array with one object per entry.
///
/// Values keep their type: integers become numbers, arrays become arrays and
/// nil becomes `null`.
pub fn to_json(data: &dyn Data) -> serde_json::Value {
    let mut rows = Vec::with_capacity(data.len());
    for i in 0..data.len() {
        let Some(entry) = data.entry(i) else {
            continue;
        };
        let mut object = serde_json::Map::new();
        for name in entry.column_names() {
            let value = entry
                .get(&format!("c.{}", name))
                .map(|v| serde_json::Value::from(&v))
                .unwrap_or(serde_json::Value::Null);
            object.insert(name, value);
        }
        rows.push(serde_json::Value::Object(object));
    }
    serde_json::Value::Array(rows)
}

pub fn to_json_string(data: &dyn Data, pretty: bool) -> Result<String, serde_json::Error> {
    let json = to_json(data);
    if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    }
}

pub fn count(data: &dyn Data) -> String {
    data.len().to_string()
}

/// ASCII grid printer.
#[derive(Debug, Default)]
pub struct TablePrinter {
    /// Cells wider than this are cut and end in `...`
    max_width: Option<usize>,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_width(max_width: usize) -> Self {
        TablePrinter {
            max_width: Some(max_width.max(4)),
        }
    }

    pub fn print(&self, data: &dyn Data) -> String {
        let header = data.column_names();
        let mut rows = Vec::with_capacity(data.len());
        for i in 0..data.len() {
            if let Some(entry) = data.entry(i) {
                rows.push(entry.string_row().into_iter().map(|c| self.cell(c)).collect::<Vec<_>>());
            }
        }

        let columns = rows.iter().map(Vec::len).chain([header.len()]).max().unwrap_or(0);
        if columns == 0 {
            return String::new();
        }

        let mut widths = vec![0; columns];
        for row in rows.iter().chain([&header]) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let rule = self.rule(&widths);
        let mut result = rule.clone();
        result.push_str(&self.line(&header, &widths));
        result.push_str(&rule);
        for row in &rows {
            result.push_str(&self.line(row, &widths));
        }
        if !rows.is_empty() {
            result.push_str(&rule);
        }
        result
    }

    fn cell(&self, text: String) -> String {
        // One physical line per row
        let text = text.replace(['\n', '\r'], " ");
        match self.max_width {
            Some(max) if text.chars().count() > max => {
                let cut: String = text.chars().take(max - 3).collect();
                format!("{}...", cut)
            }
            _ => text,
        }
    }

    fn rule(&self, widths: &[usize]) -> String {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    }

    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        let mut line = String::from("|");
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = width - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line.push('\n');
        line
    }
}
