// src/core/sanitize.rs

use std::sync::OnceLock;

use regex::Regex;

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

fn paren_percent() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[()%]").expect("hardcoded pattern"))
}

/// Clean one data cell. Order is fixed: trim, remove `$`,
/// then remove `(`, `)` and `%`.
pub fn clean_cell(text: &str) -> String {
    let trimmed = text.trim();
    let no_dollars = trimmed.replace('$', "");
    paren_percent().replace_all(&no_dollars, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_cell_strips_currency_and_percent_decoration() {
        assert_eq!(clean_cell("$1,234.56 (12%)"), "1,234.56 12");
    }

    #[test]
    fn clean_cell_keeps_plain_text() {
        assert_eq!(clean_cell("Revenue 2024"), "Revenue 2024");
    }

    #[test]
    fn clean_cell_trims_before_stripping() {
        assert_eq!(clean_cell("  $10  "), "10");
        assert_eq!(clean_cell(" (100%) "), "100");
    }

    #[test]
    fn clean_cell_can_empty_a_cell() {
        assert_eq!(clean_cell(" $() % "), "");
    }

    #[test]
    fn normalize_ws_collapses_runs() {
        assert_eq!(normalize_ws("  a \t b\n\nc "), "a b c");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(normalize_entities("A&nbsp;&amp;&nbsp;B"), "A & B");
    }
}
