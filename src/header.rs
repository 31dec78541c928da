//! Splits an export into its metadata preamble, column headers and data rows.
//!
//! The export starts with `key,value` rows (`Name`, `Datum`, `Startdatum`,
//! `Enddatum`, ...). A row with an empty first field, or a blank line, closes
//! the preamble. The next row names the data columns and everything after it
//! is data.

use crate::parser::Row;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Report-level `key -> value` facts from the preamble.
#[derive(Debug, Default, Clone)]
pub struct FileHeaders {
    entries: HashMap<String, String>,
}

impl FileHeaders {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FileHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Ordered names of the data table columns.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColumnHeaders {
    names: Vec<String>,
}

impl ColumnHeaders {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    ReadingMetadata,
    ReadingTableHeader,
    ReadingData,
}

/// What the extractor made of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    /// Stored as a preamble `key -> value` pair.
    Metadata,
    /// Not used: a short preamble row, or a blank line outside the preamble.
    Skipped,
    /// Closed the preamble.
    Boundary,
    /// Became the column headers.
    TableHeader,
    /// Belongs to the data table.
    Data,
}

pub struct HeaderExtractor {
    state: State,
    headers: FileHeaders,
    columns: Option<ColumnHeaders>,
}

impl HeaderExtractor {
    pub fn new() -> Self {
        Self {
            state: State::ReadingMetadata,
            headers: FileHeaders::default(),
            columns: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn file_headers(&self) -> &FileHeaders {
        &self.headers
    }

    pub fn columns(&self) -> Option<&ColumnHeaders> {
        self.columns.as_ref()
    }

    /// Advances the state machine by one row.
    pub fn feed(&mut self, row: &Row) -> Classified {
        match self.state {
            State::ReadingMetadata => self.feed_metadata(row),
            State::ReadingTableHeader => {
                if row.is_blank() {
                    return Classified::Skipped;
                }
                let columns = ColumnHeaders::new(row.fields.iter().map(str::to_string).collect());
                debug!(line = row.line, columns = columns.len(), "Column headers");
                self.columns = Some(columns);
                self.state = State::ReadingData;
                Classified::TableHeader
            }
            State::ReadingData if row.is_blank() => Classified::Skipped,
            State::ReadingData => Classified::Data,
        }
    }

    fn feed_metadata(&mut self, row: &Row) -> Classified {
        let key = row.get(0).unwrap_or_default();
        if key.is_empty() {
            debug!(line = row.line, "End of metadata preamble");
            self.state = State::ReadingTableHeader;
            return Classified::Boundary;
        }

        match row.get(1) {
            Some(value) => {
                debug!(line = row.line, key, value, "Metadata");
                self.headers
                    .entries
                    .insert(key.trim().to_string(), value.trim().to_string());
                Classified::Metadata
            }
            None => {
                warn!(line = row.line, key, "Ignoring preamble row without a value");
                Classified::Skipped
            }
        }
    }

    pub fn finish(self) -> (FileHeaders, Option<ColumnHeaders>) {
        (self.headers, self.columns)
    }
}

impl Default for HeaderExtractor {
    fn default() -> Self {
        Self::new()
    }
}
