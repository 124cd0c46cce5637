use super::report::FileReport;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

pub const CSV_HEADER: &str =
    "Filename,File size,File modified,Table,Jump A,Jump B,Jump C,Jump D,Install path";

/// How inspection results are printed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable blocks
    #[default]
    Text,
    /// One comma-separated row per file
    Csv,
    /// One JSON object per line
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

#[derive(Serialize)]
struct FailureRecord<'a> {
    path: &'a str,
    error: &'a str,
}

/// Writes whatever must precede the first record
pub fn write_header<W: Write>(out: &mut W, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Csv => writeln!(out, "{}", CSV_HEADER),
        OutputFormat::Text | OutputFormat::Json => Ok(()),
    }
}

pub fn write_report<W: Write>(
    out: &mut W,
    format: OutputFormat,
    report: &FileReport,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out)?;
            writeln!(out, "Processing {}", report.path)?;
            writeln!(out, "File size = {}", report.size)?;
            writeln!(out, "File modified = {}", report.modified)?;
            for found in &report.matches {
                writeln!(
                    out,
                    "Data at {:08x} is {:08x}, {:08x}, {:08x}, {:08x} ({})",
                    found.offset,
                    found.values[0],
                    found.values[1],
                    found.values[2],
                    found.values[3],
                    found.label
                )?;
            }
            if report.matches.is_empty() {
                writeln!(out, "No known jump table found")?;
            }
            Ok(())
        }
        OutputFormat::Csv => {
            let mut fields = vec![
                csv_field(&report.file_name),
                report.size.to_string(),
                csv_field(&report.modified),
            ];
            for found in &report.matches {
                fields.push(format!("0x{:08x}", found.offset));
                fields.extend(found.values.iter().map(|value| format!("0x{:08x}", value)));
            }
            fields.push(csv_field(&report.install_path));
            writeln!(out, "{}", fields.join(","))
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)
        }
    }
}

/// Reports a file that could not be inspected
pub fn write_failure<W: Write>(
    out: &mut W,
    format: OutputFormat,
    path: &str,
    error: &str,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out)?;
            writeln!(out, "Processing {}", path)?;
            writeln!(out, "{}", error)
        }
        OutputFormat::Csv => {
            let name = std::path::Path::new(path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string());
            writeln!(out, "{},{}", csv_field(&name), csv_field(error))
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &FailureRecord { path, error })?;
            writeln!(out)
        }
    }
}

/// Quotes a field that contains a separator, quote or newline
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
