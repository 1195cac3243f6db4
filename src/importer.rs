//! Dataset import.
//!
//! Spreadsheet container parsing stays with the host: the browser side
//! parses the workbook and hands over a `{headers, rows, styles?}` JSON
//! payload, which is validated here into a [`Dataset`]. A minimal
//! delimited-text path (CSV/TSV) exists for the CLI and tests; it carries
//! no styles.

use serde::Deserialize;

use crate::error::{Result, XlplayError};
use crate::types::{CellStyle, Dataset};

/// Import progress signal for hosts that surface loading state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Delimiter for the plain-text path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

/// Raw shape handed over by the host's sheet parser.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawImport {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    #[serde(default)]
    styles: Option<Vec<Vec<Option<CellStyle>>>>,
}

/// Decode and validate a host-parsed JSON payload into a [`Dataset`].
///
/// Headers must be non-empty; body rows are padded (or truncated) to the
/// header width so downstream code can index columns freely. Zero body rows
/// is valid; playback will simply refuse to start.
pub fn from_json(source_id: &str, json: &str) -> Result<Dataset> {
    let raw: RawImport = serde_json::from_str(json)?;
    build(source_id, raw.headers, raw.rows, raw.styles)
}

/// Parse CSV/TSV bytes into a [`Dataset`]; the first line is the header row.
pub fn from_delimited(source_id: &str, data: &[u8], delim: Delimiter) -> Result<Dataset> {
    let text = String::from_utf8_lossy(data);
    let sep = match delim {
        Delimiter::Comma => ',',
        Delimiter::Tab => '\t',
    };

    let mut lines = text.lines().filter(|l| !l.is_empty());
    let headers = lines
        .next()
        .map(|line| split_delimited_line(line, sep))
        .ok_or_else(|| XlplayError::Dataset("empty input".to_string()))?;
    let rows: Vec<Vec<String>> = lines.map(|line| split_delimited_line(line, sep)).collect();

    build(source_id, headers, rows, None)
}

fn build(
    source_id: &str,
    headers: Vec<String>,
    mut rows: Vec<Vec<String>>,
    styles: Option<Vec<Vec<Option<CellStyle>>>>,
) -> Result<Dataset> {
    if headers.is_empty() {
        return Err(XlplayError::Dataset("no header columns".to_string()));
    }
    if source_id.is_empty() {
        return Err(XlplayError::Dataset("missing source id".to_string()));
    }
    let width = headers.len();
    for row in &mut rows {
        row.resize(width, String::new());
    }
    Ok(Dataset {
        headers,
        rows,
        source_id: source_id.to_string(),
        styles,
    })
}

/// Split one delimited line, respecting quoted fields.
fn split_delimited_line(line: &str, sep: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == sep {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_from_delimited_basic() {
        let data = b"Name,Age,City\nAlice,30,NYC\nBob,25,LA";
        let ds = from_delimited("people.csv", data, Delimiter::Comma).unwrap();
        assert_eq!(ds.headers, vec!["Name", "Age", "City"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.rows[0][0], "Alice");
        assert!(ds.styles.is_none());
    }

    #[test]
    fn test_from_delimited_quoted() {
        let data = b"\"Hello, World\",B\n\"She said \"\"hi\"\"\",2";
        let ds = from_delimited("q.csv", data, Delimiter::Comma).unwrap();
        assert_eq!(ds.headers[0], "Hello, World");
        assert_eq!(ds.rows[0][0], "She said \"hi\"");
    }

    #[test]
    fn test_short_rows_padded_to_header_width() {
        let data = b"A\tB\tC\n1\n1\t2\t3\t4";
        let ds = from_delimited("t.tsv", data, Delimiter::Tab).unwrap();
        assert_eq!(ds.rows[0], vec!["1", "", ""]);
        assert_eq!(ds.rows[1].len(), 3);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(from_delimited("e.csv", b"", Delimiter::Comma).is_err());
    }

    #[test]
    fn test_from_json_with_styles() {
        let json = r##"{
            "headers": ["Region", "Total"],
            "rows": [["North", "120"]],
            "styles": [
                [{"bold": true}, null],
                [null, {"fillColor": "#ffff00", "alignH": "right"}]
            ]
        }"##;
        let ds = from_json("report.xlsx", json).unwrap();
        assert!(ds.header_style_at(0).unwrap().bold);
        assert_eq!(
            ds.body_style_at(0, 1).unwrap().fill_color.as_deref(),
            Some("#ffff00")
        );
    }

    #[test]
    fn test_from_json_zero_rows_is_valid() {
        let ds = from_json("empty.xlsx", r#"{"headers":["A"],"rows":[]}"#).unwrap();
        assert!(ds.is_empty());
    }
}
