//! Line source abstraction for telemetry input.
//!
//! Input is one sectioned text stream:
//!
//! ```text
//! QUERIES
//! <query line>...
//! DATA
//! <well_id,timestamp,oil,water,pressure>...
//! END
//! ```
//!
//! The query section is read up front so pressure-drop trackers can be
//! registered before the first record arrives; data lines are then pulled
//! one at a time until `END` or end of input.

use anyhow::{Context, Result};
use std::io::BufRead;

/// Marker opening the query section.
pub const QUERIES_MARKER: &str = "QUERIES";
/// Marker closing the query section and opening the data section.
pub const DATA_MARKER: &str = "DATA";
/// Marker closing the data section.
pub const END_MARKER: &str = "END";

/// Events produced by an input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A trimmed, non-empty line.
    Line(String),
    /// Source reached end of input.
    Eof,
}

/// Trait abstracting where telemetry lines come from.
pub trait InputSource {
    /// Read the next non-blank line, trimmed.
    ///
    /// Returns `InputEvent::Eof` when no more data is available.
    fn next_line(&mut self) -> Result<InputEvent>;

    /// Human-readable name for logging (e.g. "stdin", a file path).
    fn source_name(&self) -> &str;
}

/// Reads lines from any buffered reader (stdin, a file, an in-memory buffer).
pub struct LineSource<R: BufRead> {
    reader: R,
    name: String,
    /// Raw bytes of the current line; invalid UTF-8 is decoded lossily
    line_buffer: Vec<u8>,
    line_number: u64,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            line_buffer: Vec::with_capacity(256),
            line_number: 0,
        }
    }

    /// Physical line number of the last line read (1-based).
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

impl<R: BufRead> InputSource for LineSource<R> {
    fn next_line(&mut self) -> Result<InputEvent> {
        loop {
            self.line_buffer.clear();
            let bytes = self
                .reader
                .read_until(b'\n', &mut self.line_buffer)
                .with_context(|| format!("failed to read from {}", self.name))?;
            if bytes == 0 {
                return Ok(InputEvent::Eof);
            }
            self.line_number += 1;
            let decoded = String::from_utf8_lossy(&self.line_buffer);
            let line = decoded.trim();
            if line.is_empty() {
                continue;
            }
            return Ok(InputEvent::Line(line.to_string()));
        }
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Outcome of reading everything up to the `DATA` marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySection {
    /// Query lines in input order, trimmed.
    pub queries: Vec<String>,
    /// Whether a `DATA` marker was found.
    pub data_follows: bool,
}

/// Consume the preamble and query section.
///
/// Lines before `QUERIES` are ignored. Stops right after `DATA`, leaving the
/// source positioned on the first data line.
pub fn read_query_section(source: &mut impl InputSource) -> Result<QuerySection> {
    let mut section = QuerySection::default();
    let mut in_queries = false;

    while let InputEvent::Line(line) = source.next_line()? {
        match line.as_str() {
            QUERIES_MARKER => in_queries = true,
            DATA_MARKER => {
                section.data_follows = true;
                break;
            }
            _ if in_queries => section.queries.push(line),
            _ => tracing::debug!(source = source.source_name(), line = %line, "Ignoring line before QUERIES"),
        }
    }

    tracing::debug!(
        source = source.source_name(),
        queries = section.queries.len(),
        data_follows = section.data_follows,
        "Query section read"
    );
    Ok(section)
}

/// Next record line of the data section, or `None` at `END` / end of input.
pub fn next_data_line(source: &mut impl InputSource) -> Result<Option<String>> {
    match source.next_line()? {
        InputEvent::Line(line) if line == END_MARKER => Ok(None),
        InputEvent::Line(line) => Ok(Some(line)),
        InputEvent::Eof => Ok(None),
    }
}
