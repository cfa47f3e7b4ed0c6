// src/extract.rs
//
// Per-file extraction: one HTML document in, one cleaned table out.
//
// Assumptions (by design):
// - one table per file; only the first <table> block is read
// - the table's title is the nearest preceding <h2>, else the file name
// - header cells are every <th> in the table, body cells are <td> only

use crate::core::html::{
    first_table_block, inner_after_open_tag, last_h2_before, next_element_block_ci, strip_tags,
};
use crate::core::sanitize::{clean_cell, normalize_entities};
use crate::params::{FILENAME_HEADER, TITLE_HEADER};
use crate::table::{TableBundle, generic_headers};

/// Outcome for one source file. `Empty` covers both "no table element"
/// and "nothing left after cleaning"; either way the file contributes
/// nothing to the aggregate.
pub enum Extraction {
    Table(TableBundle),
    Empty,
}

pub fn extract_table(doc: &str, file_name: &str) -> Extraction {
    let Some((table_start, table_end)) = first_table_block(doc) else {
        return Extraction::Empty;
    };
    let table = &doc[table_start..table_end];

    // Title is metadata only; an empty <h2> still wins over the file name.
    let title = match last_h2_before(doc, table_start) {
        Some(inner) => strip_tags(normalize_entities(&inner)),
        None => s!(file_name),
    };

    let headers = read_header_cells(table);
    let rows = read_body_rows(table);
    if rows.is_empty() {
        return Extraction::Empty;
    }

    // Merged/spanning header cells make th counts unreliable; on any
    // mismatch the real headers are discarded wholesale.
    let max_columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let headers = if !headers.is_empty() && headers.len() == max_columns {
        headers
    } else {
        generic_headers(max_columns)
    };

    let mut bundle = TableBundle::new(headers, rows);
    bundle.drop_blank_columns();
    bundle.insert_column(0, FILENAME_HEADER, file_name);
    bundle.insert_column(1, TITLE_HEADER, &title);
    Extraction::Table(bundle)
}

/// Every <th> cell in the table, in document order.
fn read_header_cells(table: &str) -> Vec<String> {
    let mut headers = Vec::new();
    let mut pos = 0usize;
    while let Some((th_s, th_e)) = next_element_block_ci(table, "th", pos) {
        let inner = inner_after_open_tag(&table[th_s..th_e]);
        headers.push(strip_tags(normalize_entities(&inner)));
        pos = th_e;
    }
    headers
}

/// Cleaned <td> cells per <tr>. Rows with no non-empty cell after
/// cleaning are dropped here, not blanked.
fn read_body_rows(table: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = next_element_block_ci(table, "tr", pos) {
        let tr = &table[tr_s..tr_e];
        pos = tr_e;

        let mut cells = Vec::new();
        let mut td_pos = 0usize;
        while let Some((td_s, td_e)) = next_element_block_ci(tr, "td", td_pos) {
            let inner = inner_after_open_tag(&tr[td_s..td_e]);
            cells.push(clean_cell(&strip_tags(normalize_entities(&inner))));
            td_pos = td_e;
        }

        if cells.iter().any(|c| !c.is_empty()) {
            rows.push(cells);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| s!(*c)).collect()
    }

    fn table_of(bundle: Extraction) -> TableBundle {
        match bundle {
            Extraction::Table(t) => t,
            Extraction::Empty => panic!("expected a table"),
        }
    }

    #[test]
    fn well_formed_table_keeps_its_headers() {
        let doc = r#"
            <h2>Revenue</h2>
            <table>
              <tr><th>X</th><th>Y</th></tr>
              <tr><td>$10</td><td>20%</td></tr>
            </table>
        "#;
        let t = table_of(extract_table(doc, "a.html"));
        assert_eq!(t.headers, v(&["Filename", "Table Title", "X", "Y"]));
        assert_eq!(t.rows, vec![v(&["a.html", "Revenue", "10", "20"])]);
    }

    #[test]
    fn missing_table_is_empty() {
        assert!(matches!(
            extract_table("<h2>Title</h2><p>No table.</p>", "b.html"),
            Extraction::Empty
        ));
    }

    #[test]
    fn title_falls_back_to_file_name() {
        let doc = "<table><tr><td>1</td></tr></table>";
        let t = table_of(extract_table(doc, "report.html"));
        assert_eq!(t.rows[0][1], "report.html");
    }

    #[test]
    fn empty_h2_still_beats_file_name() {
        let doc = "<h2></h2><table><tr><td>1</td></tr></table>";
        let t = table_of(extract_table(doc, "report.html"));
        assert_eq!(t.rows[0][1], "");
    }

    #[test]
    fn heading_after_table_is_ignored() {
        let doc = "<table><tr><td>1</td></tr></table><h2>Later</h2>";
        let t = table_of(extract_table(doc, "x.html"));
        assert_eq!(t.rows[0][1], "x.html");
    }

    #[test]
    fn header_count_mismatch_yields_generic_names() {
        let doc = r#"
            <table>
              <tr><th>A</th><th>B</th><th>C</th></tr>
              <tr><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td></tr>
            </table>
        "#;
        let t = table_of(extract_table(doc, "w.html"));
        assert_eq!(
            t.headers,
            v(&[
                "Filename", "Table Title",
                "Column_0", "Column_1", "Column_2", "Column_3", "Column_4"
            ])
        );
    }

    #[test]
    fn no_headers_yields_generic_names() {
        let doc = "<table><tr><td>1</td><td>2</td></tr></table>";
        let t = table_of(extract_table(doc, "w.html"));
        assert_eq!(t.headers, v(&["Filename", "Table Title", "Column_0", "Column_1"]));
    }

    #[test]
    fn rows_blank_after_cleaning_are_dropped() {
        let doc = r#"
            <table>
              <tr><td>$</td><td>(%)</td></tr>
              <tr><td>kept</td><td></td></tr>
            </table>
        "#;
        let t = table_of(extract_table(doc, "w.html"));
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0][2], "kept");
    }

    #[test]
    fn table_with_only_blank_rows_is_empty() {
        let doc = "<table><tr><td>$()%</td></tr></table>";
        assert!(matches!(extract_table(doc, "w.html"), Extraction::Empty));
    }

    #[test]
    fn all_blank_column_is_dropped_before_metadata() {
        let doc = r#"
            <table>
              <tr><th>A</th><th>B</th></tr>
              <tr><td>1</td><td></td></tr>
              <tr><td>2</td><td>  </td></tr>
            </table>
        "#;
        let t = table_of(extract_table(doc, "w.html"));
        assert_eq!(t.headers, v(&["Filename", "Table Title", "A"]));
        assert_eq!(t.rows[0], v(&["w.html", "w.html", "1"]));
    }

    #[test]
    fn ragged_short_rows_are_padded() {
        let doc = r#"
            <table>
              <tr><td>1</td><td>2</td></tr>
              <tr><td>3</td></tr>
            </table>
        "#;
        let t = table_of(extract_table(doc, "w.html"));
        assert_eq!(t.rows[1], v(&["w.html", "w.html", "3", ""]));
    }

    #[test]
    fn cell_markup_and_entities_are_flattened() {
        let doc = r#"
            <table>
              <tr><td><b>$1,234.56</b>&nbsp;<i>(12%)</i></td></tr>
            </table>
        "#;
        let t = table_of(extract_table(doc, "w.html"));
        assert_eq!(t.rows[0][2], "1,234.56 12");
    }
}
