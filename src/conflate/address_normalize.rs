//! Address-string normalization (spec §4.5 step 5). The suffix rewrites are
//! part of the core; the postal-normalizer pass they feed is kept in its
//! own function so it stays swappable for a real USPS-rules library
//! without touching `correspond`/`merge` (spec §9: "do not encode USPS
//! rules in the core").

use regex::Regex;
use std::sync::LazyLock;

struct SuffixRewrite {
    pattern: Regex,
    replacement: &'static str,
}

static SUFFIX_REWRITES: LazyLock<Vec<SuffixRewrite>> = LazyLock::new(|| {
    [
        (r"(?i)\s+dr$", " drive"),
        (r"(?i)\s+st$", " street"),
        (r"(?i)\s+ct$", " court"),
        (r"(?i)\s+ln$", " lane"),
        (r"(?i)\s+ave$", " avenue"),
        (r"(?i)\s+rd$", " road"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| SuffixRewrite {
        pattern: Regex::new(pattern).expect("static suffix pattern is valid"),
        replacement,
    })
    .collect()
});

fn apply_suffix_rewrites(address: &str) -> String {
    SUFFIX_REWRITES
        .iter()
        .fold(address.to_string(), |acc, rewrite| {
            rewrite.pattern.replace(&acc, rewrite.replacement).into_owned()
        })
}

/// Stand-in for an external USPS-style postal normalizer: splits a free-form
/// address into `address_line_1`/`address_line_2` and rejoins them with a
/// single space. Returns `""` on malformed input, matching the
/// exception-to-empty-string contract of the library this substitutes for.
fn postal_normalize(address: &str) -> String {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let collapsed: Vec<&str> = trimmed.split_whitespace().collect();
    if collapsed.is_empty() {
        return String::new();
    }

    collapsed.join(" ")
}

/// Full normalization pipeline: suffix rewrites, postal normalization,
/// empty-to-`None`, lowercase.
pub fn normalize(address: Option<&str>) -> Option<String> {
    let address = address?;
    let rewritten = apply_suffix_rewrites(address);
    let normalized = postal_normalize(&rewritten);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_rewrites_apply_before_lowercasing() {
        assert_eq!(normalize(Some("123 Main St")), Some("123 main street".to_string()));
        assert_eq!(normalize(Some("456 Oak Dr")), Some("456 oak drive".to_string()));
    }

    #[test]
    fn s7_scenario_collapses_equivalent_spellings() {
        let a = normalize(Some("123 Main St"));
        let b = normalize(Some("123 main street"));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_or_whitespace_becomes_none() {
        assert_eq!(normalize(Some("   ")), None);
        assert_eq!(normalize(Some("")), None);
    }

    #[test]
    fn missing_address_is_none() {
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(normalize(Some("123   Main   Rd")), Some("123 main road".to_string()));
    }
}
