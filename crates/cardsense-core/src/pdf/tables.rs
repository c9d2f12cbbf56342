//! Heuristic table detection over extracted page text.
//!
//! A table is a run of consecutive lines that each split into enough cells
//! on tab or multi-space gaps. PDF text extraction flattens real table
//! structure, so this only recovers column-aligned blocks.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref CELL_GAP: Regex = Regex::new(r"\t+|\s{2,}").unwrap();
}

/// A tabular matrix found on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTable {
    /// Page number (1-indexed).
    pub page: u32,
    /// Table number within the page (1-indexed).
    pub index: usize,
    /// Cell text, row by row.
    pub rows: Vec<Vec<String>>,
}

/// Split a line into cells; empty lines yield no cells.
fn cells(line: &str) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    CELL_GAP.split(line).map(|c| c.trim().to_string()).collect()
}

/// Find tables in the text of `page`.
pub fn detect_tables(page: u32, text: &str, min_rows: usize, min_columns: usize) -> Vec<ExtractedTable> {
    let mut tables = Vec::new();
    let mut run: Vec<Vec<String>> = Vec::new();

    let mut flush = |run: &mut Vec<Vec<String>>| {
        if run.len() >= min_rows.max(1) {
            tables.push(ExtractedTable {
                page,
                index: tables.len() + 1,
                rows: std::mem::take(run),
            });
        } else {
            run.clear();
        }
    };

    for line in text.lines() {
        let row = cells(line);
        if row.len() >= min_columns.max(2) {
            run.push(row);
        } else {
            flush(&mut run);
        }
    }
    flush(&mut run);

    tables
}
