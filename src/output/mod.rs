//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

impl<T> Formattable for Vec<T>
where
    T: Tabled + Serialize,
{
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}

/// Print a single resource in detail.
///
/// Renders the serialized form, so absent fields are omitted rather than
/// shown as null; json format adds the standard `{data, meta}` envelope.
pub fn print_detail<T: Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    let output = match format {
        OutputFormat::Json => json::format_json(data)?,
        OutputFormat::Table => serde_json::to_string_pretty(data)?,
    };
    println!("{}", output);
    Ok(())
}
