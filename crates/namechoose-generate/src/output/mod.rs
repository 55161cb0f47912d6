//! Streaming writers for generated names.

mod counting;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use namechoose_core::GeneratedName;

use crate::errors::OutputError;
use counting::CountingWriter;

/// Column order of CSV output.
pub const CSV_HEADER: [&str; 4] = ["name", "romanised", "gender", "nationality"];

/// Record layout written per name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One line per name, romanisation in parentheses.
    #[default]
    Plain,
    Csv,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "csv" => Ok(Self::Csv),
            "json" | "jsonl" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Per-writer switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Append `(gender, nationality)` to plain lines.
    pub verbose: bool,
    /// Emit the CSV header before the first record.
    pub header: bool,
}

enum Sink<W: Write> {
    Plain(CountingWriter<W>),
    Csv(csv::Writer<CountingWriter<W>>),
    Json(CountingWriter<W>),
}

/// Writes one record per generated name to any `Write` target.
pub struct NameWriter<W: Write> {
    sink: Sink<W>,
    verbose: bool,
    records: usize,
}

impl<W: Write> NameWriter<W> {
    pub fn new(inner: W, format: OutputFormat, options: WriterOptions) -> Result<Self, OutputError> {
        let counting = CountingWriter::new(inner);
        let sink = match format {
            OutputFormat::Plain => Sink::Plain(counting),
            OutputFormat::Json => Sink::Json(counting),
            OutputFormat::Csv => {
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(counting);
                if options.header {
                    writer.write_record(CSV_HEADER)?;
                }
                Sink::Csv(writer)
            }
        };

        Ok(Self {
            sink,
            verbose: options.verbose,
            records: 0,
        })
    }

    pub fn write(&mut self, name: &GeneratedName) -> Result<(), OutputError> {
        match &mut self.sink {
            Sink::Plain(writer) => {
                if self.verbose {
                    writeln!(writer, "{name} ({}, {})", name.gender(), name.nationality())?;
                } else {
                    writeln!(writer, "{name}")?;
                }
            }
            Sink::Csv(writer) => {
                writer.write_record([
                    name.full(),
                    name.romanised().unwrap_or_default(),
                    name.gender().as_str(),
                    name.nationality(),
                ])?;
            }
            Sink::Json(writer) => {
                serde_json::to_writer(&mut *writer, name)?;
                writer.write_all(b"\n")?;
            }
        }
        self.records += 1;
        Ok(())
    }

    /// Records written so far.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and return the number of bytes written.
    pub fn finish(self) -> Result<u64, OutputError> {
        match self.sink {
            Sink::Plain(mut writer) | Sink::Json(mut writer) => {
                writer.flush()?;
                Ok(writer.bytes_written())
            }
            Sink::Csv(mut writer) => {
                writer.flush()?;
                let counting = writer.into_inner().map_err(|err| err.into_error())?;
                Ok(counting.bytes_written())
            }
        }
    }
}
