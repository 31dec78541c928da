//! CSV row reader for analytics exports.
//!
//! Rows are produced lazily, one logical CSV record at a time. A record may
//! span several physical lines when a quoted field contains a line break.
//! Blank lines are kept as empty rows because the export uses them to
//! separate the metadata preamble from the data table.

use crate::error::ReportError;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// One logical CSV record.
#[derive(Debug, Clone)]
pub struct Row {
    /// 1-based line on which the record starts.
    pub line: u64,
    pub fields: StringRecord,
}

impl Row {
    /// A blank source line. Carries no fields at all.
    pub fn is_blank(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at `index`, if the row is wide enough.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index)
    }
}

/// Iterator over the rows of a CSV source.
///
/// Stops after the first error.
pub struct RowReader<R> {
    source: BufReader<R>,
    line: u64,
    done: bool,
}

impl RowReader<File> {
    /// Opens `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::FileOpen`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReportError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Opened input file");
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> RowReader<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            source: BufReader::new(reader),
            line: 0,
            done: false,
        }
    }

    fn read_row(&mut self) -> Result<Option<Row>, ReportError> {
        let mut text = String::new();
        let mut state = QuoteState::FieldStart;
        let start = self.line + 1;

        loop {
            let before = text.len();
            let read = self.source.read_line(&mut text).map_err(csv::Error::from)?;
            if read == 0 {
                break;
            }
            self.line += 1;

            if self.line == 1 {
                if let Some(stripped) = text.strip_prefix('\u{feff}') {
                    text = stripped.to_string();
                }
            }

            state = state.scan(&text[before..]);
            if state != QuoteState::Quoted {
                break;
            }
        }

        if text.is_empty() {
            return Ok(None);
        }
        if state == QuoteState::Quoted {
            let err = io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unterminated quoted field starting on line {start}"),
            );
            return Err(csv::Error::from(err).into());
        }

        Ok(Some(Row {
            line: start,
            fields: parse_record(&text, start)?,
        }))
    }
}

/// Where a record stands after some input, following the `csv` crate's
/// default quoting: a quote only opens a quoted field as the first character
/// of a field, `""` inside quotes is a literal quote, and anything after the
/// closing quote is plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

impl QuoteState {
    fn scan(self, input: &str) -> Self {
        input.chars().fold(self, |state, c| match (state, c) {
            (QuoteState::Quoted, '"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, '"') => QuoteState::Quoted,
            (_, ',' | '\n' | '\r') => QuoteState::FieldStart,
            (QuoteState::FieldStart, '"') => QuoteState::Quoted,
            _ => QuoteState::Unquoted,
        })
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<Row, ReportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Parses a single logical record. A blank line yields an empty record.
fn parse_record(text: &str, line: u64) -> Result<StringRecord, ReportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut record = StringRecord::new();
    if !rdr.read_record(&mut record)? {
        record.clear();
        return Ok(record);
    }

    // A lone `\r` ends a record for `csv` but not for `read_line`.
    let mut rest = StringRecord::new();
    if rdr.read_record(&mut rest)? {
        let err = io::Error::new(
            io::ErrorKind::InvalidData,
            format!("line {line} holds more than one record"),
        );
        return Err(csv::Error::from(err).into());
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(input: &str) -> Vec<Row> {
        RowReader::from_reader(input.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn fields(row: &Row) -> Vec<&str> {
        row.fields.iter().collect()
    }

    #[test]
    fn test_reads_rows_of_varying_width() {
        let rows = rows("Name,MyApp\nDate,iOS 17.0,iOS 16.4\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[0]), vec!["Name", "MyApp"]);
        assert_eq!(fields(&rows[1]), vec!["Date", "iOS 17.0", "iOS 16.4"]);
        assert_eq!(rows[1].line, 2);
    }

    #[test]
    fn test_blank_line_is_kept_as_empty_row() {
        let rows = rows("Name,MyApp\n\nDate,iOS 17.0\n");
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_blank());
        assert_eq!(rows[1].line, 2);
        assert!(!rows[2].is_blank());
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = rows("Name,MyApp\r\n\r\nDate,iOS 17.0\r\n");
        assert_eq!(rows.len(), 3);
        assert_eq!(fields(&rows[0]), vec!["Name", "MyApp"]);
        assert!(rows[1].is_blank());
        assert_eq!(fields(&rows[2]), vec!["Date", "iOS 17.0"]);
    }

    #[test]
    fn test_quoted_fields() {
        let rows = rows("\"Name\",\"My, App\"\n\"say \"\"hi\"\"\",x\n");
        assert_eq!(fields(&rows[0]), vec!["Name", "My, App"]);
        assert_eq!(fields(&rows[1]), vec!["say \"hi\"", "x"]);
    }

    #[test]
    fn test_quoted_field_spanning_lines() {
        let rows = rows("a,\"line one\nline two\"\nb,c\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[0]), vec!["a", "line one\nline two"]);
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn test_missing_trailing_newline() {
        let rows = rows("a,b\nc,d");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[1]), vec!["c", "d"]);
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let rows = rows("\u{feff}Name,MyApp\n");
        assert_eq!(rows[0].get(0), Some("Name"));
    }

    #[test]
    fn test_unterminated_quote_is_malformed() {
        let result: Result<Vec<_>, _> = RowReader::from_reader("a,\"open\nb,c\n".as_bytes()).collect();
        assert!(matches!(result, Err(ReportError::MalformedInput(_))));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let bytes: &[u8] = &[b'a', b',', 0xFF, 0xFE, b'\n'];
        let result: Result<Vec<_>, _> = RowReader::from_reader(bytes).collect();
        assert!(matches!(result, Err(ReportError::MalformedInput(_))));
    }

    #[test]
    fn test_stray_quotes_in_unquoted_fields_are_literal() {
        let paired = rows("Name,12\" Remix\nDatum,6\" Mix\n,\nDate,iOS 17.0\n2024-01-01,5\n");
        assert_eq!(paired.len(), 5);
        assert_eq!(fields(&paired[0]), vec!["Name", "12\" Remix"]);
        assert_eq!(fields(&paired[1]), vec!["Datum", "6\" Mix"]);
        assert_eq!(paired[4].line, 5);

        let single = rows("Name,My 5\" App\nDatum,2024-01-01\n");
        assert_eq!(single.len(), 2);
        assert_eq!(fields(&single[0]), vec!["Name", "My 5\" App"]);
    }

    #[test]
    fn test_text_after_closing_quote() {
        let rows = rows("\"ab\"c,d\ne,f\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(fields(&rows[0]), vec!["abc", "d"]);
    }

    #[test]
    fn test_rows_agree_with_csv_reader() {
        let input = "Name,My 5\" App\nx,\"a \"\"b\"\"\nc\",y\"z\nDate,iOS 17.0\n2024-01-01,5\n";
        let expected: Vec<Vec<String>> = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input.as_bytes())
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        let actual: Vec<Vec<String>> = rows(input)
            .iter()
            .map(|r| r.fields.iter().map(str::to_string).collect())
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_lone_carriage_return_is_malformed() {
        let result: Result<Vec<_>, _> = RowReader::from_reader("a,b\rc,d\n".as_bytes()).collect();
        assert!(matches!(result, Err(ReportError::MalformedInput(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let result = RowReader::open("/nonexistent/definitely/missing.csv");
        assert!(matches!(result, Err(ReportError::FileOpen { .. })));
    }
}
