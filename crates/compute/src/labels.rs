//! Display formatting for codes coming out of the dataset.
//!
//! These only ever produce text for people. Filtering keeps using the raw code.

const DISPLAY_PREFIXES: &[&str] = &["fiscal ", "tax "];

/// `fiscal_purchase_subsidy` -> `purchase subsidy`, `tax_exemption` -> `exemption`.
pub fn instrument_label(code: &str) -> String {
    let spaced = code.replace('_', " ");
    for prefix in DISPLAY_PREFIXES {
        if let Some(rest) = spaced.strip_prefix(prefix) {
            return rest.to_string();
        }
    }
    spaced
}

/// Underscores become spaces; nothing else changes.
pub fn spaced_label(code: &str) -> String {
    code.replace('_', " ")
}

/// Short table tag: the last `_`-separated segment of the code.
pub fn instrument_tag(code: &str) -> &str {
    code.rsplit('_').next().unwrap_or(code)
}
