use bon::Builder;
use serde::{Deserialize, Serialize};

/// One localizable string with its plural forms.
///
/// Empty `one`/`other` mean the form is absent.
#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Message {
    #[builder(into)]
    pub id: String,
    /// Template used when the plural count is exactly one.
    #[builder(into, default)]
    pub one: String,
    /// Template used for every other count.
    #[builder(into, default)]
    pub other: String,
}

impl Message {
    /// Picks the template for `plural_count`.
    ///
    /// `one` is used only for a count of exactly one and only when it is
    /// non-empty; everything else falls through to `other`.
    pub fn select_variant(&self, plural_count: i64) -> &str {
        if plural_count == 1 && !self.one.is_empty() {
            &self.one
        } else {
            &self.other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_variant_falls_back_to_other_without_one() {
        let message = Message::builder().id("x").other("many").build();

        assert_eq!(message.select_variant(1), "many");
        assert_eq!(message.select_variant(0), "many");
    }

    #[test]
    fn test_select_variant_uses_one_only_for_exactly_one() {
        let message = Message::builder().id("x").one("single").other("many").build();

        assert_eq!(message.select_variant(1), "single");
        assert_eq!(message.select_variant(-1), "many");
        assert_eq!(message.select_variant(2), "many");
    }
}
