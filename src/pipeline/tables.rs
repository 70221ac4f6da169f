//! Heuristic table detection over positioned text.
//!
//! pdfium reports where each run of text sits on the page but has no notion
//! of tables. This module recovers cell grids from that geometry alone:
//!
//! 1. Cluster text cells into rows by vertical centre.
//! 2. Group consecutive rows with a similar cell count into regions.
//! 3. Derive column boundaries from the left edges inside each region.
//! 4. Place every cell in its column; grid positions nobody filled stay `None`.
//!
//! The code here is pure geometry so it can be tested without a PDF.

use crate::config::TableDetectorConfig;
use crate::pipeline::extract::Table;
use std::cmp::Ordering;

/// A run of text with its bounding box, in points, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCell {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TextCell {
    fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Smallest grid accepted as a table, whatever the configuration says.
const MIN_GRID: usize = 2;

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Detect tables among the text cells of a single page.
///
/// Tables are returned top to bottom. Every returned grid is rectangular.
/// `min_rows` and `min_cols` below 2 are treated as 2.
pub fn detect_tables(cells: &[TextCell], config: &TableDetectorConfig) -> Vec<Table> {
    let min_rows = config.min_rows.max(MIN_GRID);
    let min_cols = config.min_cols.max(MIN_GRID);
    if !config.enabled || cells.len() < min_rows * min_cols {
        return Vec::new();
    }

    let rows = cluster_rows(cells, config.row_tolerance);
    find_regions(&rows, min_rows, min_cols)
        .iter()
        .filter_map(|region| build_table(region, config.col_tolerance, min_cols))
        .collect()
}

/// Group cells into rows (top to bottom), each row sorted left to right.
fn cluster_rows(cells: &[TextCell], row_tolerance: f32) -> Vec<Vec<&TextCell>> {
    let mut sorted: Vec<&TextCell> = cells.iter().filter(|c| !c.text.trim().is_empty()).collect();
    sorted.sort_by(|a, b| cmp_f32(a.center_y(), b.center_y()).then(cmp_f32(a.x, b.x)));

    let mut rows: Vec<Vec<&TextCell>> = Vec::new();
    for cell in sorted {
        let same_row = rows
            .last()
            .is_some_and(|row| (cell.center_y() - row[0].center_y()).abs() <= row_tolerance);
        match rows.last_mut() {
            Some(row) if same_row => row.push(cell),
            _ => rows.push(vec![cell]),
        }
    }

    for row in &mut rows {
        row.sort_by(|a, b| cmp_f32(a.x, b.x));
    }
    rows
}

/// Split rows into runs of consecutive multi-cell rows whose cell counts
/// differ by at most one. Runs shorter than `min_rows` are dropped.
fn find_regions<'a>(
    rows: &[Vec<&'a TextCell>],
    min_rows: usize,
    min_cols: usize,
) -> Vec<Vec<Vec<&'a TextCell>>> {
    let mut regions = Vec::new();
    let mut current: Vec<Vec<&'a TextCell>> = Vec::new();
    let mut expected_cols: Option<usize> = None;

    let mut close = |current: &mut Vec<Vec<&'a TextCell>>| {
        if current.len() >= min_rows {
            regions.push(std::mem::take(current));
        } else {
            current.clear();
        }
    };

    for row in rows {
        let n = row.len();
        if n < min_cols {
            close(&mut current);
            expected_cols = None;
            continue;
        }
        match expected_cols {
            Some(expected) if n.abs_diff(expected) <= 1 => {}
            Some(_) => {
                close(&mut current);
                expected_cols = Some(n);
            }
            None => expected_cols = Some(n),
        }
        current.push(row.clone());
    }
    close(&mut current);

    regions
}

/// Left edges of each column, clustered within `col_tolerance`.
fn column_starts(region: &[Vec<&TextCell>], col_tolerance: f32) -> Vec<f32> {
    let mut xs: Vec<f32> = region.iter().flatten().map(|c| c.x).collect();
    xs.sort_by(|a, b| cmp_f32(*a, *b));

    let mut starts: Vec<f32> = Vec::new();
    for x in xs {
        match starts.last() {
            Some(&last) if x - last <= col_tolerance => {}
            _ => starts.push(x),
        }
    }
    starts
}

/// Index of the right-most column starting at or before the cell.
fn column_index(cell: &TextCell, starts: &[f32]) -> usize {
    starts.iter().rposition(|&s| s <= cell.x).unwrap_or(0)
}

fn build_table(region: &[Vec<&TextCell>], col_tolerance: f32, min_cols: usize) -> Option<Table> {
    if region.is_empty() {
        return None;
    }
    let starts = column_starts(region, col_tolerance);
    let num_cols = starts.len();
    if num_cols < min_cols {
        return None;
    }

    let mut rows = Vec::with_capacity(region.len());
    for row in region {
        let mut out: Vec<Option<String>> = vec![None; num_cols];
        for cell in row {
            let col = column_index(cell, &starts);
            let text = cell.text.trim();
            match &mut out[col] {
                Some(existing) => {
                    existing.push(' ');
                    existing.push_str(text);
                }
                slot => *slot = Some(text.to_string()),
            }
        }
        rows.push(out);
    }

    tracing::debug!("Detected table: {} rows x {} cols", rows.len(), num_cols);

    Some(Table { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str, x: f32, y: f32) -> TextCell {
        TextCell {
            text: text.to_string(),
            x,
            y,
            width: 30.0,
            height: 10.0,
        }
    }

    fn texts(table: &Table) -> Vec<Vec<Option<&str>>> {
        table
            .rows
            .iter()
            .map(|r| r.iter().map(|c| c.as_deref()).collect())
            .collect()
    }

    #[test]
    fn aligned_grid_becomes_a_table() {
        let cells = vec![
            cell("Name", 50.0, 100.0),
            cell("Age", 150.0, 100.0),
            cell("City", 250.0, 100.0),
            cell("Alice", 50.0, 120.0),
            cell("30", 152.0, 121.0),
            cell("Paris", 249.0, 120.0),
            cell("Bob", 51.0, 140.0),
            cell("25", 150.0, 140.0),
            cell("Rome", 250.0, 139.0),
        ];
        let tables = detect_tables(&cells, &TableDetectorConfig::default());
        assert_eq!(tables.len(), 1);
        assert_eq!(
            texts(&tables[0]),
            vec![
                vec![Some("Name"), Some("Age"), Some("City")],
                vec![Some("Alice"), Some("30"), Some("Paris")],
                vec![Some("Bob"), Some("25"), Some("Rome")],
            ]
        );
    }

    #[test]
    fn input_order_does_not_matter() {
        let cells = vec![
            cell("d", 150.0, 120.0),
            cell("a", 50.0, 100.0),
            cell("c", 50.0, 120.0),
            cell("b", 150.0, 100.0),
        ];
        let tables = detect_tables(&cells, &TableDetectorConfig::default());
        assert_eq!(
            texts(&tables[0]),
            vec![vec![Some("a"), Some("b")], vec![Some("c"), Some("d")]]
        );
    }

    #[test]
    fn prose_lines_are_not_tables() {
        let cells: Vec<TextCell> = (0..6)
            .map(|i| cell("A full line of running text.", 50.0, 100.0 + 14.0 * i as f32))
            .collect();
        assert!(detect_tables(&cells, &TableDetectorConfig::default()).is_empty());
    }

    #[test]
    fn missing_cell_is_none() {
        let cells = vec![
            cell("Item", 50.0, 100.0),
            cell("Qty", 150.0, 100.0),
            cell("Price", 250.0, 100.0),
            cell("Pen", 50.0, 120.0),
            cell("1.20", 250.0, 120.0),
        ];
        let tables = detect_tables(&cells, &TableDetectorConfig::default());
        assert_eq!(tables.len(), 1);
        assert_eq!(
            texts(&tables[0])[1],
            vec![Some("Pen"), None, Some("1.20")]
        );
    }

    #[test]
    fn paragraph_splits_two_tables() {
        let mut cells = vec![
            cell("A", 50.0, 100.0),
            cell("B", 150.0, 100.0),
            cell("1", 50.0, 120.0),
            cell("2", 150.0, 120.0),
        ];
        cells.push(cell("Some paragraph between the tables.", 50.0, 160.0));
        cells.extend([
            cell("C", 50.0, 200.0),
            cell("D", 150.0, 200.0),
            cell("3", 50.0, 220.0),
            cell("4", 150.0, 220.0),
        ]);
        let tables = detect_tables(&cells, &TableDetectorConfig::default());
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows[0][0].as_deref(), Some("A"));
        assert_eq!(tables[1].rows[0][0].as_deref(), Some("C"));
    }

    #[test]
    fn cells_in_the_same_column_are_joined() {
        let cells = vec![
            cell("Key", 50.0, 100.0),
            cell("Value", 150.0, 100.0),
            cell("first", 50.0, 120.0),
            cell("part", 85.0, 120.0),
            cell("v", 150.0, 120.0),
        ];
        let config = TableDetectorConfig {
            col_tolerance: 40.0,
            ..TableDetectorConfig::default()
        };
        let tables = detect_tables(&cells, &config);
        assert_eq!(
            texts(&tables[0])[1],
            vec![Some("first part"), Some("v")]
        );
    }

    #[test]
    fn disabled_detection_finds_nothing() {
        let cells = vec![
            cell("a", 50.0, 100.0),
            cell("b", 150.0, 100.0),
            cell("c", 50.0, 120.0),
            cell("d", 150.0, 120.0),
        ];
        let config = TableDetectorConfig {
            enabled: false,
            ..TableDetectorConfig::default()
        };
        assert!(detect_tables(&cells, &config).is_empty());
    }

    #[test]
    fn blank_segments_are_ignored() {
        let cells = vec![
            cell("a", 50.0, 100.0),
            cell("   ", 100.0, 100.0),
            cell("b", 150.0, 100.0),
            cell("c", 50.0, 120.0),
            cell("d", 150.0, 120.0),
        ];
        let tables = detect_tables(&cells, &TableDetectorConfig::default());
        assert_eq!(tables[0].rows[0].len(), 2);
    }

    #[test]
    fn zero_minimums_fall_back_to_two_by_two() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let config = TableDetectorConfig {
            min_rows: 0,
            min_cols: 0,
            ..TableDetectorConfig::default()
        };
        let single_column = vec![cell("one", 50.0, 100.0), cell("two", 50.0, 120.0)];

        tracing::subscriber::with_default(subscriber, || {
            assert!(detect_tables(&[], &config).is_empty());
            assert!(detect_tables(&single_column, &config).is_empty());
        });
    }

    #[test]
    fn empty_region_builds_no_table() {
        assert!(build_table(&[], 10.0, 2).is_none());
    }
}
