// src/table.rs
//
// Rectangular table data shared by extraction and aggregation.
//
// - TableBundle: one file's cleaned table. Invariant: every row has
//   exactly headers.len() cells; ragged source rows are padded with
//   blanks on construction. A blank cell and a missing cell mean the
//   same thing everywhere in this tool.
// - concat: name-aligned concatenation of many bundles into one.

use std::collections::HashMap;

use crate::params::GENERIC_HEADER_PREFIX;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableBundle {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableBundle {
    /// Build a rectangular bundle; short rows are padded with blanks
    /// up to the header count.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, s!());
        }
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Remove every column whose cells are blank in all rows.
    /// Surviving columns keep their labels; nothing is renumbered.
    pub fn drop_blank_columns(&mut self) {
        let width = self.headers.len();
        let keep: Vec<bool> = (0..width)
            .map(|col| self.rows.iter().any(|row| !row[col].is_empty()))
            .collect();
        if keep.iter().all(|&k| k) {
            return;
        }

        retain_by_index(&mut self.headers, &keep);
        for row in &mut self.rows {
            retain_by_index(row, &keep);
        }
    }

    /// Insert a column at `at` with the same value in every row.
    pub fn insert_column(&mut self, at: usize, header: &str, value: &str) {
        self.headers.insert(at, s!(header));
        for row in &mut self.rows {
            row.insert(at, s!(value));
        }
    }

    /// Drop rows that are blank in every column.
    pub fn retain_nonblank_rows(&mut self) {
        self.rows.retain(|row| row.iter().any(|cell| !cell.is_empty()));
    }
}

/// `Column_0`, `Column_1`, … placeholder headers.
pub fn generic_headers(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{GENERIC_HEADER_PREFIX}{i}"))
        .collect()
}

/// Concatenate bundles in order, aligning columns by header name.
///
/// The aggregate's columns are the first bundle's columns followed by
/// each later bundle's previously-unseen columns, in their own order.
/// Cells under a column a bundle does not have stay blank. Duplicate
/// labels inside one bundle align occurrence-by-occurrence.
pub fn concat(tables: Vec<TableBundle>) -> TableBundle {
    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for table in &tables {
        // Map each of this table's columns to an aggregate column.
        let mut occurrence: HashMap<&str, usize> = HashMap::new();
        let mut target = Vec::with_capacity(table.headers.len());
        for name in &table.headers {
            let nth = occurrence.entry(name.as_str()).or_insert(0);
            let slot = headers
                .iter()
                .enumerate()
                .filter(|(_, h)| *h == name)
                .nth(*nth)
                .map(|(i, _)| i);
            *nth += 1;

            target.push(match slot {
                Some(i) => i,
                None => {
                    headers.push(name.clone());
                    headers.len() - 1
                }
            });
        }

        for row in &table.rows {
            let mut out = vec![s!(); headers.len()];
            for (col, &ix) in target.iter().enumerate() {
                out[ix] = row[col].clone();
            }
            rows.push(out);
        }
    }

    // Columns appended by later tables widen earlier rows.
    let width = headers.len();
    for row in &mut rows {
        row.resize(width, s!());
    }

    TableBundle { headers, rows }
}

fn retain_by_index(values: &mut Vec<String>, keep: &[bool]) {
    let mut col = 0;
    values.retain(|_| {
        let k = keep[col];
        col += 1;
        k
    });
}
