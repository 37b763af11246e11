//! Ranking extraction from a rendered-on-server profile page.
//!
//! Two scanners, both pure functions over the page markup:
//! - [`scan_scripts`] looks inside `<script>` blocks, where the page embeds
//!   its bootstrap JSON;
//! - [`scan_text`] is the last resort over the raw page text.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};

struct Patterns {
    script: Selector,
    quoted: Regex,
    loose: Regex,
    text: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        script: Selector::parse("script").expect("valid selector"),
        quoted: Regex::new(r#""ranking":\s*(\d+)"#).expect("valid regex"),
        loose: Regex::new(r#"ranking["']?\s*:\s*(\d+)"#).expect("valid regex"),
        text: Regex::new(r"(?i)Ranking[:\s]+(\d+)").expect("valid regex"),
    })
}

/// Scan every `<script>` block in document order.
///
/// Within a block the quoted `"ranking": N` form is tried before the looser
/// `ranking: N` / `'ranking': N` form. The first block with any match wins.
pub fn scan_scripts(html: &str) -> Option<u64> {
    let p = patterns();
    let document = Html::parse_document(html);
    for script in document.select(&p.script) {
        let text: String = script.text().collect();
        if text.trim().is_empty() {
            continue;
        }
        for re in [&p.quoted, &p.loose] {
            if let Some(rank) = first_number(re, &text) {
                return Some(rank);
            }
        }
    }
    None
}

/// Case-insensitive `Ranking` followed by separators and digits, anywhere in
/// the raw page.
pub fn scan_text(html: &str) -> Option<u64> {
    first_number(&patterns().text, html)
}

/// First match's digit group. A digit run too large for `u64` is no match.
fn first_number(re: &Regex, haystack: &str) -> Option<u64> {
    re.captures(haystack)?.get(1)?.as_str().parse().ok()
}
