use std::collections::HashSet;
use super::types::{Cell, Table};
use super::utils::unique_column_name;
use crate::error::AppError;

/// Splits delimited text into a [`Table`].
///
/// The first non-blank line is the header. Fields are split on `delimiter`
/// with no quoting support and trimmed; empty fields become missing cells.
pub fn parse_table(input: &str, delimiter: char) -> Result<Table, AppError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input).trim();
    if input.is_empty() {
        return Err(AppError::MalformedInput("input is empty, expected a header line".to_string()));
    }

    let mut lines = input.split('\n');
    let header_line = lines
        .next()
        .ok_or_else(|| AppError::MalformedInput("missing header line".to_string()))?;

    let mut existing_names = HashSet::new();
    let columns: Vec<String> = header_line
        .split(delimiter)
        .enumerate()
        .map(|(position, name)| unique_column_name(name.trim(), position, &mut existing_names))
        .collect();

    let rows: Vec<Vec<Cell>> = lines
        .map(|line| {
            line.split(delimiter)
                .take(columns.len())
                .map(|value| {
                    let value = value.trim();
                    (!value.is_empty()).then(|| value.to_string())
                })
                .collect()
        })
        .collect();

    tracing::debug!("Parsed {} columns and {} data rows", columns.len(), rows.len());

    Ok(Table::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let table = parse_table("A, B\n1 ,x\n2,y\n", ',').unwrap();
        assert_eq!(table.column_names(), &["A".to_string(), "B".to_string()]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, "A"), Some("1"));
        assert_eq!(table.cell(1, "B"), Some("y"));
    }

    #[test]
    fn short_rows_are_missing_and_long_rows_truncated() {
        let table = parse_table("A,B,C\n1\n1,2,3,4,5", ',').unwrap();
        assert_eq!(table.rows()[0], vec![Some("1".to_string()), None, None]);
        assert_eq!(table.rows()[1].len(), 3);
        assert_eq!(table.cell(1, "C"), Some("3"));
    }

    #[test]
    fn empty_fields_are_missing() {
        let table = parse_table("A,B\n1,\n,2", ',').unwrap();
        assert_eq!(table.cell(0, "B"), None);
        assert_eq!(table.cell(1, "A"), None);
    }

    #[test]
    fn handles_crlf_and_custom_delimiter() {
        let table = parse_table("A;B\r\n1;x\r\n2;y\r\n", ';').unwrap();
        assert_eq!(table.column_names(), &["A".to_string(), "B".to_string()]);
        assert_eq!(table.cell(1, "B"), Some("y"));
    }

    #[test]
    fn header_only_gives_zero_rows() {
        let table = parse_table("A,B", ',').unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn duplicate_and_blank_headers_are_made_unique() {
        let table = parse_table("id,,id\n1,2,3", ',').unwrap();
        assert_eq!(
            table.column_names(),
            &["id".to_string(), "column_2".to_string(), "id_1".to_string()]
        );
        assert_eq!(table.cell(0, "id_1"), Some("3"));
    }

    #[test]
    fn empty_input_is_malformed() {
        assert!(matches!(parse_table("", ','), Err(AppError::MalformedInput(_))));
        assert!(matches!(parse_table("  \n\n ", ','), Err(AppError::MalformedInput(_))));
        assert!(matches!(parse_table("\u{feff}", ','), Err(AppError::MalformedInput(_))));
    }
}
