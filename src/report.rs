//! Rendering of TODO findings: coloured blocks on stderr or a JSON array on
//! stdout.
use std::io::{self, Write};

use clap::ValueEnum;
use colored::Colorize;

use crate::checker::{TodoError, TodoErrorJson};
use crate::error::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Standard,
    Json,
}

/// `ERROR: <kind>`, the source lines, and the hint for malformed TODOs, each
/// finding followed by a blank line.
pub fn write_standard(out: &mut impl Write, errs: &[TodoError]) -> io::Result<()> {
    for err in errs {
        writeln!(out, "{}", format!("ERROR: {}", err.kind).red())?;
        write!(out, "{}", err.source_location())?;
        if let Some(hint) = err.hint() {
            writeln!(out, "{}", format!("\t> {hint}").cyan())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// One compact array, `[]` when there is nothing to report.
pub fn write_json(out: &mut impl Write, errs: &[TodoError]) -> Result<(), Error> {
    let items: Vec<TodoErrorJson<'_>> = errs.iter().map(TodoError::to_json).collect();
    let json = serde_json::to_string(&items).map_err(|e| Error::Serialize(e.to_string()))?;
    writeln!(out, "{json}").map_err(|source| Error::Write {
        path: "<stdout>".into(),
        source,
    })
}

pub fn print(format: Format, errs: &[TodoError]) -> Result<(), Error> {
    match format {
        Format::Json => write_json(&mut io::stdout().lock(), errs),
        Format::Standard => write_standard(&mut io::stderr().lock(), errs).map_err(|source| {
            Error::Write {
                path: "<stderr>".into(),
                source,
            }
        }),
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
