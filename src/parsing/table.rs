use std::path::Path;

use crate::core::record::Record;
use crate::parsing::{read_text_file, ReadError};

/// Default field delimiter for uploaded extracts
pub const DEFAULT_DELIMITER: char = ',';

/// Parse a delimited file into records.
///
/// # Errors
///
/// Returns `ReadError` if the file cannot be read. Content
/// problems never fail; see [`parse_table_text`].
pub fn parse_table_file(path: &Path, delimiter: char) -> Result<Vec<Record>, ReadError> {
    let content = read_text_file(path)?;
    Ok(parse_table_text(&content, delimiter))
}

/// Parse delimited text into records.
///
/// The first non-blank line is the header. Cells are trimmed and stripped of one
/// pair of enclosing double quotes. Splitting is naive: a delimiter inside a
/// quoted value still splits the value.
///
/// Fewer than two non-blank lines (no header plus data) yields an empty sequence.
#[must_use]
pub fn parse_table_text(text: &str, delimiter: char) -> Vec<Record> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let Some(header_line) = lines.next() else {
        tracing::warn!("input has no header line, nothing to parse");
        return Vec::new();
    };
    let headers = split_cells(header_line, delimiter);

    let records: Vec<Record> = lines
        .map(|line| Record::from_row(&headers, &split_cells(line, delimiter)))
        .collect();

    if records.is_empty() {
        tracing::warn!("input has a header but no data lines");
    } else {
        tracing::debug!(
            "parsed {} records with {} columns",
            records.len(),
            headers.len()
        );
    }

    records
}

fn split_cells(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(clean_cell).collect()
}

/// Trim a cell and strip a single pair of enclosing double quotes
fn clean_cell(cell: &str) -> String {
    let cell = cell.trim();
    cell.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(cell)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_text() {
        let csv = "ORIGIN,DEST,SYS_CODE,SERVICE,TARIF,SLA_FORM,SLA_THRU
MES10612,AMI10000,MES10612AMI10000,REG23,59000,3,5
DJJ10000,AMI10000,DJJ10000AMI10000,YES19,78000,4,7
";
        let records = parse_table_text(csv, ',');
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key(), "MES10612AMI10000");
        assert_eq!(records[1].get("SERVICE"), "YES19");
        assert_eq!(records[1].get("SLA_THRU"), "7");
    }

    #[test]
    fn test_parse_quoted_and_padded_cells() {
        let csv = "\"ORIGIN\" , \"SYS_CODE\",SERVICE\n \"MES10612\",  \"K1\" , \"REG23\"\n";
        let records = parse_table_text(csv, ',');
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].origin(), "MES10612");
        assert_eq!(records[0].key(), "K1");
        assert_eq!(records[0].get("SERVICE"), "REG23");
    }

    #[test]
    fn test_parse_strips_only_one_quote_pair() {
        let records = parse_table_text("A\n\"\"x\"\"\n", ',');
        assert_eq!(records[0].get("A"), "\"x\"");

        let records = parse_table_text("A\n\"open\n", ',');
        assert_eq!(records[0].get("A"), "\"open");
    }

    #[test]
    fn test_parse_mixed_line_endings_and_blank_lines() {
        let csv = "A,B\r\n1,2\r\n\r\n   \n3,4\r5,6";
        let records = parse_table_text(csv, ',');
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].get("A"), "5");
        assert_eq!(records[2].get("B"), "6");
    }

    #[test]
    fn test_parse_short_row_is_padded() {
        let records = parse_table_text("A,B,C\n1\n", ',');
        assert_eq!(records[0].get("A"), "1");
        assert_eq!(records[0].get("B"), "");
        assert_eq!(records[0].get("C"), "");
    }

    #[test]
    fn test_parse_empty_input_yields_nothing() {
        assert!(parse_table_text("", ',').is_empty());
        assert!(parse_table_text("\n  \n", ',').is_empty());
        assert!(parse_table_text("ORIGIN,DEST\n", ',').is_empty());
    }

    #[test]
    fn test_parse_naive_split_inside_quotes() {
        let records = parse_table_text("A,B\n\"1,5\",x\n", ',');
        assert_eq!(records[0].get("A"), "\"1");
        assert_eq!(records[0].get("B"), "5\"");
    }

    #[test]
    fn test_parse_semicolon_and_bom() {
        let records = parse_table_text("\u{feff}ORIGIN;SYS_CODE\nA;K\n", ';');
        assert_eq!(records[0].origin(), "A");
        assert_eq!(records[0].key(), "K");
    }
}
