//! Run tally queries against record input

use std::fs::File;
use std::io::{self, BufReader, Read, Write};

use super::{CliError, InputType, OutputType};
use crate::{
    Evaluator, Operation, Parser,
    data::{Data, read_delimited},
    funcs::FunctionRegistry,
    output::{TablePrinter, count, to_json_string, write_csv},
};

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Query words
    pub query: Vec<String>,
    /// Input file, `-` for stdin
    pub input: String,
    pub input_type: InputType,
    pub output_type: OutputType,
    /// Output file, `-` for stdout
    pub output: String,
    /// Widest table cell before it is cut
    pub max_width: Option<usize>,
}

/// Open the input file, or stdin for `-`. A terminal stdin is refused.
pub fn open_input(path: &str) -> Result<Box<dyn Read>, CliError> {
    if path == "-" || path.is_empty() {
        if atty::is(atty::Stream::Stdin) {
            return Err(CliError::NoInput);
        }
        return Ok(Box::new(io::stdin()));
    }
    Ok(Box::new(BufReader::new(File::open(path)?)))
}

fn open_output(path: &str) -> Result<Box<dyn Write>, CliError> {
    if path == "-" || path.is_empty() {
        return Ok(Box::new(io::stdout()));
    }
    Ok(Box::new(File::create(path)?))
}

/// Parse a query without running it.
pub fn execute_check(query: &[String]) -> Result<Operation, CliError> {
    let functions = FunctionRegistry::new();
    Ok(Parser::new(&functions).parse_operations(query)?)
}

/// Parse the query, read the input, run the query and render the result.
pub fn execute_run(options: &RunOptions) -> Result<(), CliError> {
    let functions = FunctionRegistry::new();
    let op = Parser::new(&functions).parse_operations(&options.query)?;

    let input = open_input(&options.input)?;
    let data = read_delimited(input, options.input_type.delimiter())?;
    tracing::debug!(rows = data.len(), input = %options.input, "read input");

    let result = Evaluator::new(&functions).execute(&op, Box::new(data))?;
    tracing::debug!(rows = result.len(), "query complete");

    let mut out = open_output(&options.output)?;
    render(result.as_ref(), options.output_type, options.max_width, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Render a result in the given output format.
///
/// `max_width` only applies to the table format.
pub fn render(
    data: &dyn Data,
    output_type: OutputType,
    max_width: Option<usize>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match output_type {
        OutputType::Csv => write_csv(data, out)?,
        OutputType::Table => {
            let printer = match max_width {
                Some(width) => TablePrinter::with_max_width(width),
                None => TablePrinter::new(),
            };
            write!(out, "{}", printer.print(data))?
        }
        OutputType::Json => writeln!(out, "{}", to_json_string(data, true)?)?,
        OutputType::Count => writeln!(out, "{}", count(data))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Headers, Row, TableData};
    use std::rc::Rc;

    fn sample() -> TableData {
        let headers = Rc::new(Headers::new(["name"]));
        vec![Row::new(headers, vec!["Colorado Sandoval".into()])].into()
    }

    #[test]
    fn test_render_table_max_width() {
        let mut out = Vec::new();
        render(&sample(), OutputType::Table, Some(10), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("| Colorad... |"));

        let mut out = Vec::new();
        render(&sample(), OutputType::Table, None, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("| Colorado Sandoval |"));
    }

    #[test]
    fn test_render_count_ignores_max_width() {
        let mut out = Vec::new();
        render(&sample(), OutputType::Count, Some(4), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n");
    }
}
