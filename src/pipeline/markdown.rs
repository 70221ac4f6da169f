//! Markdown serialisation of extracted page content.
//!
//! Two pure functions, no I/O:
//!
//! * [`format_table`] turns a cell grid into a GitHub pipe table.
//! * [`render_page`] lays out one page: heading, text, tables, rule.
//!
//! Cell text is emitted verbatim. A `|` or a newline inside a cell is not
//! escaped, so such cells break the table layout in renderers.

use crate::pipeline::extract::Table;

/// Horizontal rule closing every page fragment.
pub const PAGE_RULE: &str = "---";

/// Render a cell grid as a Markdown pipe table.
///
/// The first row is the header. The separator row has one `---` per header
/// column; data rows are written as-is even when their length differs from
/// the header's. Missing cells (`None`) become empty strings. The block ends
/// with a blank line. An empty grid yields an empty string.
///
/// ```
/// use pdf_to_md::pipeline::markdown::format_table;
///
/// let grid = vec![
///     vec![Some("A".to_string()), Some("B".to_string())],
///     vec![Some("1".to_string()), None],
/// ];
/// assert_eq!(format_table(&grid), "| A | B |\n| --- | --- |\n| 1 |  |\n\n");
/// ```
pub fn format_table(rows: &[Vec<Option<String>>]) -> String {
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let mut md = String::new();
    push_row(&mut md, header);

    md.push_str("| ");
    md.push_str(&vec!["---"; header.len()].join(" | "));
    md.push_str(" |\n");

    for row in body {
        push_row(&mut md, row);
    }

    md.push('\n');
    md
}

fn push_row(md: &mut String, row: &[Option<String>]) {
    let cells: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("")).collect();
    md.push_str("| ");
    md.push_str(&cells.join(" | "));
    md.push_str(" |\n");
}

/// Render the Markdown fragment for one page.
///
/// `page_num` is 1-indexed. Empty or absent text is skipped; every table gets
/// a `## Table` heading. The fragment always ends with a horizontal rule and
/// a blank line, even for a page with no content.
pub fn render_page(page_num: usize, text: Option<&str>, tables: &[Table]) -> String {
    let mut md = format!("# Page {page_num}\n\n");

    if let Some(text) = text.filter(|t| !t.is_empty()) {
        md.push_str(text);
        md.push_str("\n\n");
    }

    for table in tables {
        md.push_str("## Table\n\n");
        md.push_str(&format_table(&table.rows));
    }

    md.push_str(PAGE_RULE);
    md.push_str("\n\n");
    md
}
