//! Line and cell splitting for comma-delimited import files.
//!
//! Import files are split naively: one record per line, cells separated
//! by commas, no embedded newlines or quoted commas.

/// Splits text into its non-blank lines.
///
/// A leading UTF-8 BOM is dropped; lines keep their inner whitespace but
/// carriage returns are trimmed with the rest of the line ends.
pub fn split_lines(text: &str) -> Vec<&str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Splits the header line into trimmed header cells.
pub fn parse_header_line(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}

/// Splits a data line into trimmed cells with one layer of quotes removed.
pub fn parse_data_line(line: &str) -> Vec<String> {
    line.trim()
        .split(',')
        .map(|cell| strip_quotes(cell.trim()).to_string())
        .collect()
}

/// Removes a leading and a trailing double quote, each independently.
pub fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_drops_blank_lines() {
        let text = "Name,Phone\r\n\r\nAsha,0712\n   \nJuma,0755\n";
        assert_eq!(split_lines(text), vec!["Name,Phone", "Asha,0712", "Juma,0755"]);
    }

    #[test]
    fn split_lines_strips_bom() {
        assert_eq!(split_lines("\u{feff}Name\nAsha"), vec!["Name", "Asha"]);
    }

    #[test]
    fn header_cells_are_trimmed() {
        assert_eq!(
            parse_header_line(" Full Name , Phone Number,"),
            vec!["Full Name", "Phone Number", ""]
        );
    }

    #[test]
    fn data_cells_lose_one_layer_of_quotes() {
        assert_eq!(
            parse_data_line("\"Asha\", \"0712 345 678\" ,Arusha,\"\"x\"\""),
            vec!["Asha", "0712 345 678", "Arusha", "\"x\""]
        );
    }

    #[test]
    fn strip_quotes_handles_unbalanced_quotes() {
        assert_eq!(strip_quotes("\"open"), "open");
        assert_eq!(strip_quotes("close\""), "close");
        assert_eq!(strip_quotes("\""), "");
        assert_eq!(strip_quotes("plain"), "plain");
    }
}
