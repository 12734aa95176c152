//! Key-level reconciliation between catalogs.
//!
//! Every operation compares key presence only; values are never compared.
//! Inputs are borrowed and results are freshly built catalogs.

use crate::catalog::{Catalog, Value};
use std::collections::BTreeSet;

/// Drift between a base catalog and another locale.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CatalogDiff {
    /// Keys of the base catalog the other catalog lacks.
    pub missing: BTreeSet<String>,
    /// Keys of the other catalog the base catalog lacks.
    pub unused: BTreeSet<String>,
}

impl CatalogDiff {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unused.is_empty()
    }
}

/// Computes missing and unused keys of `other` relative to `base`.
pub fn diff(base: &Catalog, other: &Catalog) -> CatalogDiff {
    let absent_from = |from: &Catalog, to: &Catalog| -> BTreeSet<String> {
        from.keys()
            .filter(|key| !to.contains_key(key))
            .map(str::to_owned)
            .collect()
    };

    let diff = CatalogDiff {
        missing: absent_from(base, other),
        unused: absent_from(other, base),
    };
    tracing::debug!(
        missing = diff.missing.len(),
        unused = diff.unused.len(),
        "Compared catalogs"
    );
    diff
}

/// Returns `dst` plus every key of `src` that `dst` lacks.
///
/// Destination entries are never overwritten, so existing translations
/// survive a merge from the source locale.
pub fn merge(src: &Catalog, dst: &Catalog) -> Catalog {
    let mut merged = dst.clone();
    let mut added = 0usize;

    for (key, value) in src {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
            added += 1;
        }
    }

    tracing::debug!(added, total = merged.len(), "Merged catalogs");
    merged
}

/// Returns `target` with every key of `base` it lacks filled in.
///
/// Gaps get `placeholder` when it is non-empty. With an empty placeholder the
/// base value is copied verbatim, which leaves untranslated text that looks
/// like a real translation.
pub fn auto_fill(base: &Catalog, target: &Catalog, placeholder: &str) -> Catalog {
    let mut filled = target.clone();
    let mut added = 0usize;

    for (key, value) in base {
        if filled.contains_key(key) {
            continue;
        }
        let fill = if placeholder.is_empty() {
            value.clone()
        } else {
            Value::from(placeholder)
        };
        filled.insert(key.clone(), fill);
        added += 1;
    }

    if placeholder.is_empty() && added > 0 {
        tracing::warn!(
            added,
            "Filled missing keys with untranslated base text; pass a placeholder to mark them"
        );
    } else {
        tracing::debug!(added, "Filled missing keys with placeholder");
    }
    filled
}
