// src/params.rs

// Discovery
pub const HTML_GLOB: &str = "*.html";

// Output
pub const OUTPUT_FILE: &str = "cleaned_tablesthrough9.xlsx";
pub const SHEET_NAME: &str = "Sheet1";

// Metadata columns prepended to every extracted table
pub const FILENAME_HEADER: &str = "Filename";
pub const TITLE_HEADER: &str = "Table Title";

// Generic header prefix used when real headers are misaligned
pub const GENERIC_HEADER_PREFIX: &str = "Column_";
