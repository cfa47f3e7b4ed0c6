// src/core/html.rs
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Next `<tag …>…</tag>` block at or after `from`, case-insensitive.
/// Matches whole element names only: scanning for `th` will not stop
/// at `<thead>`. Returns byte offsets of the full block including the
/// closing tag. Nested same-name elements are not handled.
pub fn next_element_block_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open = format!("<{}", to_lower(tag));
    let close = format!("</{}>", to_lower(tag));

    let mut search = from;
    loop {
        let start = lc.get(search..)?.find(&open)? + search;
        let after = start + open.len();

        // Reject partial matches like <thead> for "th"
        let at_boundary = lc
            .as_bytes()
            .get(after)
            .map(|b| !b.is_ascii_alphanumeric())
            .unwrap_or(true);
        if !at_boundary {
            search = after;
            continue;
        }

        let open_end = s[start..].find('>')? + start + 1;
        let end_rel = lc.get(open_end..)?.find(&close)?;
        return Some((start, open_end + end_rel + close.len()));
    }
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// First `<table>…</table>` block in the document, if any.
pub fn first_table_block(doc: &str) -> Option<(usize, usize)> {
    next_element_block_ci(doc, "table", 0)
}

/// Inner markup of the last `<h2>` block starting before byte offset `before`.
pub fn last_h2_before(doc: &str, before: usize) -> Option<String> {
    let mut found = None;
    let mut pos = 0usize;
    while let Some((h_s, h_e)) = next_element_block_ci(doc, "h2", pos) {
        if h_s >= before {
            break;
        }
        found = Some(inner_after_open_tag(&doc[h_s..h_e]));
        pos = h_e;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_scan_skips_partial_tag_names() {
        let html = "<thead><th>A</th></thead>";
        let (s_, e) = next_element_block_ci(html, "th", 0).unwrap();
        assert_eq!(&html[s_..e], "<th>A</th>");
    }

    #[test]
    fn element_scan_is_case_insensitive_and_takes_attributes() {
        let html = r#"<TABLE class="x"><tr><td>1</td></tr></TABLE>"#;
        let (s_, e) = first_table_block(html).unwrap();
        assert_eq!(s_, 0);
        assert_eq!(e, html.len());
    }

    #[test]
    fn first_table_block_none_without_table() {
        assert!(first_table_block("<p>nothing here</p>").is_none());
    }

    #[test]
    fn last_h2_before_picks_nearest_preceding() {
        let html = "<h2>Old</h2><h2>Revenue</h2><table></table><h2>After</h2>";
        let (t_s, _) = first_table_block(html).unwrap();
        assert_eq!(last_h2_before(html, t_s).as_deref(), Some("Revenue"));
    }

    #[test]
    fn last_h2_before_none_when_absent() {
        let html = "<h3>Not level 2</h3><table></table>";
        let (t_s, _) = first_table_block(html).unwrap();
        assert!(last_h2_before(html, t_s).is_none());
    }

    #[test]
    fn strip_tags_flattens_markup_and_whitespace() {
        assert_eq!(strip_tags("<b>10\n  </b><i>USD</i>"), "10 USD");
    }
}
