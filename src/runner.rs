// src/runner.rs
//
// Top-level batch pipeline: discover files, extract per file, merge,
// write the workbook. Each file is processed fully and independently;
// the only shared state is the growing list of per-file tables.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::extract::{Extraction, extract_table};
use crate::params::{HTML_GLOB, OUTPUT_FILE};
use crate::table::{self, TableBundle};
use crate::xlsx;

/// What one batch run produced.
pub struct RunSummary {
    pub files_seen: usize,
    pub tables_found: usize,
    /// Path of the written workbook, or None when nothing qualified.
    pub output: Option<PathBuf>,
    /// Files that could not be read, with the reason. These are skipped,
    /// not fatal; the caller decides how to surface them.
    pub failures: Vec<(PathBuf, String)>,
}

/// Run the whole pipeline over `*.html` in `dir`.
pub fn run(dir: &Path) -> Result<RunSummary, Box<dyn Error>> {
    let files = discover(dir)?;
    let mut tables: Vec<TableBundle> = Vec::new();
    let mut failures: Vec<(PathBuf, String)> = Vec::new();

    for path in &files {
        let name = base_name(path);
        match fs::read_to_string(path) {
            Ok(doc) => match extract_table(&doc, &name) {
                Extraction::Table(t) => {
                    logf!("{}: extracted {} rows", name, t.rows.len());
                    tables.push(t);
                }
                Extraction::Empty => logf!("{}: no table, skipped", name),
            },
            Err(e) => {
                loge!("{}: {}", name, e);
                failures.push((path.clone(), e.to_string()));
            }
        }
    }

    let tables_found = tables.len();
    let mut output = None;
    if tables_found > 0 {
        let mut merged = table::concat(tables);
        merged.retain_nonblank_rows();
        if !merged.is_empty() {
            let out = dir.join(OUTPUT_FILE);
            xlsx::write_workbook(&out, &merged.headers, &merged.rows)?;
            logf!("wrote {} rows to {}", merged.rows.len(), out.display());
            output = Some(out);
        }
    }

    Ok(RunSummary {
        files_seen: files.len(),
        tables_found,
        output,
        failures,
    })
}

/// Matching files in `dir`, in the glob crate's (lexicographic) order.
fn discover(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let pattern = dir.join(HTML_GLOB);
    let pattern = pattern.to_str().ok_or("working directory is not valid UTF-8")?;

    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
