//! Delimiter-detecting parser for the reference tables. The files have no
//! fixed schema contract: the header row supplies whatever field names the
//! publisher chose, and the delimiter varies between exports.

use tracing::warn;

/// Candidate delimiters, checked against the header line.
const DELIMITERS: [char; 4] = [',', '\t', '|', ';'];

/// Pick the candidate that occurs most often in the header line. Falls back
/// to comma when nothing matches (a single-column table parses fine either
/// way).
pub fn detect_delimiter(header: &str) -> char {
    DELIMITERS
        .iter()
        .copied()
        .map(|d| (d, header.matches(d).count()))
        .filter(|&(_, n)| n > 0)
        .max_by_key(|&(_, n)| n)
        .map(|(d, _)| d)
        .unwrap_or(',')
}

/// Split one record on `delim`, honoring double quotes: a quoted cell may
/// contain the delimiter, and `""` inside quotes is an escaped quote.
fn split_record(line: &str, delim: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delim {
            cells.push(std::mem::take(&mut cell));
        } else {
            cell.push(c);
        }
    }
    cells.push(cell);
    cells
}

/// Parse tabular text into raw `(field name, value)` records. The first
/// non-blank line is the header; records whose cell count disagrees with the
/// header are skipped, not fatal.
pub fn parse_table(text: &str) -> Vec<Vec<(String, String)>> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header_line = match lines.next() {
        Some(l) => l,
        None => return Vec::new(),
    };

    let delim = detect_delimiter(header_line);
    let headers = split_record(header_line, delim);

    let mut rows = Vec::new();
    for (idx, line) in lines.enumerate() {
        let cells = split_record(line, delim);
        if cells.len() != headers.len() {
            warn!(
                row = idx + 2,
                expected = headers.len(),
                got = cells.len(),
                "field count mismatch, skipping row"
            );
            continue;
        }
        rows.push(headers.iter().cloned().zip(cells).collect());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_candidate_delimiter() {
        assert_eq!(detect_delimiter("District,Rainfall"), ',');
        assert_eq!(detect_delimiter("District\tRainfall"), '\t');
        assert_eq!(detect_delimiter("District|Rainfall"), '|');
        assert_eq!(detect_delimiter("District;Rainfall"), ';');
    }

    #[test]
    fn majority_delimiter_wins_over_stray_characters() {
        // A header with one stray comma in a name but three real pipes.
        assert_eq!(detect_delimiter("Name, full|Depth|Soil|Notes"), '|');
    }

    #[test]
    fn falls_back_to_comma_for_single_column() {
        assert_eq!(detect_delimiter("District"), ',');
    }

    #[test]
    fn parses_header_and_rows() {
        let rows = parse_table("District,Rainfall\nChennai,1400\nMadurai,850\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            vec![
                ("District".to_string(), "Chennai".to_string()),
                ("Rainfall".to_string(), "1400".to_string()),
            ]
        );
    }

    #[test]
    fn parses_tab_delimited_text() {
        let rows = parse_table("District\tDepth\nSalem\t12.5\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1], ("Depth".to_string(), "12.5".to_string()));
    }

    #[test]
    fn quoted_cell_may_contain_the_delimiter() {
        let rows = parse_table("Location,Soil Type\n\"Chennai, North\",Clay\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].1, "Chennai, North");
    }

    #[test]
    fn escaped_quotes_inside_quoted_cell() {
        let rows = parse_table("A,B\n\"say \"\"hi\"\"\",x\n");
        assert_eq!(rows[0][0].1, "say \"hi\"");
    }

    #[test]
    fn mismatched_rows_are_skipped() {
        let rows = parse_table("District,Rainfall\nChennai,1400,extra\nMadurai,850\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].1, "Madurai");
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse_table("").is_empty());
        assert!(parse_table("District,Rainfall\n").is_empty());
    }
}
