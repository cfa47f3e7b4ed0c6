// src/cli.rs
use std::env;
use std::error::Error;

use crate::params::OUTPUT_FILE;
use crate::runner;

/// Run the batch over the current working directory.
/// No flags, no environment surface: the glob pattern and output
/// filename are fixed in params.rs.
pub fn run() -> Result<(), Box<dyn Error>> {
    let dir = env::current_dir()?;
    let summary = runner::run(&dir)?;

    // Unreadable files were skipped; say so, but on stderr only.
    for (path, reason) in &summary.failures {
        eprintln!("Warning: skipped {}: {}", path.display(), reason);
    }

    match &summary.output {
        Some(_) => println!("Excel file created: {OUTPUT_FILE}"),
        None => println!("No tables found in the provided HTML files."),
    }
    Ok(())
}
