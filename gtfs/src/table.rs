use std::sync::Arc;

use crate::FeedError;

/// One row of a GTFS table. Values are kept as raw text; consumers parse numbers themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    headers: Arc<[String]>,
    // Never longer than headers
    values: Vec<String>,
}

impl Record {
    /// Returns `None` if the column doesn't exist or this row ended before reaching it. If the
    /// header repeats a column name, the last one wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        let idx = self.headers.iter().rposition(|h| h == column)?;
        self.values.get(idx).map(|x| x.as_str())
    }

    /// The columns this row has a value for, in header order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.headers
            .iter()
            .take(self.values.len())
            .map(|h| h.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A parsed table: the header row plus every non-blank data row, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    headers: Arc<[String]>,
    records: Vec<Record>,
}

impl Table {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// The only schema check done anywhere: the header must name every column.
    pub fn require_columns(&self, table: &str, columns: &[&str]) -> Result<(), FeedError> {
        for column in columns {
            if !self.has_column(column) {
                return Err(FeedError::MissingColumn {
                    table: table.to_string(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parses comma-delimited text with a mandatory header row.
///
/// Lines end at `\n` or `\r\n`; a lone `\r` is just part of a value. The first line is always
/// the header, even if it's blank. There's no quoting or escaping: a comma always separates
/// fields, even inside something that looks quoted. Rows shorter than the header are kept and just
/// lack the trailing columns; extra values past the header are dropped. Lines that are blank after
/// trimming produce nothing.
pub fn parse(text: &str) -> Result<Table, FeedError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.is_empty() {
        return Ok(Table {
            headers: Arc::from(Vec::<String>::new()),
            records: Vec::new(),
        });
    }

    let (header_line, body) = text.split_once('\n').unwrap_or((text, ""));
    let headers: Arc<[String]> = strip_cr(header_line)
        .split(',')
        .map(|x| x.to_string())
        .collect();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if is_blank(&row) {
            continue;
        }
        let last = row.len().saturating_sub(1);
        let values = row
            .iter()
            .enumerate()
            .take(headers.len())
            .map(|(idx, x)| {
                if idx == last {
                    strip_cr(x).to_string()
                } else {
                    x.to_string()
                }
            })
            .collect();
        records.push(Record {
            headers: headers.clone(),
            values,
        });
    }
    Ok(Table { headers, records })
}

fn strip_cr(x: &str) -> &str {
    x.strip_suffix('\r').unwrap_or(x)
}

// The csv reader already skips truly empty lines; this catches whitespace-only ones.
fn is_blank(row: &csv::StringRecord) -> bool {
    row.len() <= 1 && row.iter().all(|x| x.trim().is_empty())
}
