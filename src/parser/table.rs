//! Pipe-table row handling.

use crate::nodes::NodeTable;
use crate::scanners;
use crate::strings;

/// Split a pipe-delimited line into trimmed cell strings.  Leading and
/// trailing pipes are optional; `\|` escapes a literal pipe inside a cell.
/// Returns `None` when the line holds no cells at all.
pub(crate) fn row(line: &str) -> Option<Vec<String>> {
    let mut line = line.trim();
    if !scanners::contains_unescaped_pipe(line) {
        return None;
    }

    line = line.strip_prefix('|').unwrap_or(line);
    line = line.strip_suffix('|').unwrap_or(line);

    let mut cells = vec![];
    let mut cell = String::new();
    let mut escaping = false;

    for c in line.chars() {
        if escaping {
            if c != '|' {
                cell.push('\\');
            }
            cell.push(c);
            escaping = false;
        } else if c == '\\' {
            escaping = true;
        } else if c == '|' {
            cells.push(strings::unescape(cell.trim()));
            cell = String::new();
        } else {
            cell.push(c);
        }
    }
    if escaping {
        cell.push('\\');
    }
    cells.push(strings::unescape(cell.trim()));

    if cells.is_empty() {
        None
    } else {
        Some(cells)
    }
}

/// Assemble a table from a header line and body lines.  Body rows are
/// padded or truncated to the header's column count.
pub(crate) fn build(header: &str, body: &[String]) -> Option<NodeTable> {
    let headers = row(header)?;
    let columns = headers.len();

    let mut rows = vec![];
    for line in body {
        let mut cells = match row(line) {
            Some(cells) => cells,
            None => continue,
        };
        cells.truncate(columns);
        while cells.len() < columns {
            cells.push(String::new());
        }
        rows.push(cells);
    }

    Some(NodeTable { headers, rows })
}
