//! Finds the catalog keys a template document references.
//!
//! This is a pattern match, not a template parser. Only the literal tag
//! shape `{{t "key"}}` (or `{{i18n "key"}}`) is recognized: whitespace is
//! allowed after `{{` and between the verb and the key, but not before `}}`.
//! Keys built from expressions are invisible.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Verbs recognized as "translate" in a key tag.
pub const TRANSLATE_VERBS: [&str; 2] = ["t", "i18n"];

static KEY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*(?:t|i18n)\s+"([^"]+)"\}\}"#).expect("key tag pattern is valid")
});

/// Returns the deduplicated keys referenced by `text`.
pub fn scan_template_keys(text: &str) -> BTreeSet<String> {
    let keys: BTreeSet<String> = KEY_TAG
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|key| key.as_str().to_owned())
        .collect();

    tracing::debug!(keys = keys.len(), "Scanned template for key tags");
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_dedups_across_verbs() {
        let text = r#"<h1>{{t "greeting"}}</h1>
<p>{{i18n "greeting"}}</p>
<footer>{{t "farewell"}}</footer>"#;

        let keys = scan_template_keys(text);

        assert_eq!(
            keys,
            BTreeSet::from(["farewell".to_string(), "greeting".to_string()])
        );
    }

    #[test]
    fn test_scan_allows_leading_whitespace() {
        let keys = scan_template_keys(r#"{{   t    "title"}}"#);
        assert!(keys.contains("title"));
    }

    #[test]
    fn test_scan_ignores_other_shapes() {
        let text = r#"{{t "spaced" }} {{translate "other"}} {{t .Computed}} {{ t ""}}"#;
        assert!(scan_template_keys(text).is_empty());
    }

    #[test]
    fn test_verbs_are_recognized() {
        for verb in TRANSLATE_VERBS {
            let text = format!(r#"{{{{{verb} "key"}}}}"#);
            assert_eq!(scan_template_keys(&text).len(), 1, "verb {verb}");
        }
    }
}
