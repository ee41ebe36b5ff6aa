//! Text normalization for raw feedback.
//!
//! Turns one raw feedback value into a canonical, space-joined string of
//! lowercase content words. The steps run in a fixed order, each over the
//! whole output of the previous one:
//!
//! 1. stringify and lowercase
//! 2. drop URL-like runs (`http…`, `https…`, `www…` up to the next whitespace)
//! 3. drop every decimal digit run, including inside words (`item2` → `item`)
//! 4. drop the 32 ASCII punctuation characters
//! 5. collapse whitespace and trim
//! 6. drop stopwords
//! 7. rejoin with single spaces
//!
//! Normalization is total: every input, including null and numeric cells,
//! yields a string, possibly empty.

pub mod stopwords;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::domain::stringify;

pub use stopwords::{is_stopword, STOPWORDS};

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"http\S+|www\S+|https\S+").expect("URL pattern is a valid regex")
});

static DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("digit pattern is a valid regex"));

/// Normalize one piece of raw text.
///
/// ```
/// use reviewsense::pipeline::processing::normalize::normalize_text;
///
/// assert_eq!(normalize_text("Visit http://x.com NOW!!! 123"), "visit now");
/// assert_eq!(normalize_text("This is a great product"), "great product");
/// ```
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_urls = URL_RE.replace_all(&lowered, "");
    let without_digits = DIGITS_RE.replace_all(&without_urls, "");
    let letters: String = without_digits
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    // Splitting on whitespace both collapses runs and trims the ends.
    letters
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize any table cell; non-string cells are stringified first.
pub fn normalize_value(value: &Value) -> String {
    normalize_text(&stringify(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_digits_and_punctuation_removed() {
        assert_eq!(normalize_text("Visit http://x.com NOW!!! 123"), "visit now");
    }

    #[test]
    fn test_stopwords_removed() {
        assert_eq!(normalize_text("This is a great product"), "great product");
        assert_eq!(normalize_text("THE AND OF"), "");
    }

    #[test]
    fn test_every_url_prefix() {
        assert_eq!(
            normalize_text("see https://a.io/x?y=1 and www.shop.com/deal or HTTP://LOUD.com"),
            "see"
        );
        // The pattern is unanchored, so a URL glued to a word is cut from the prefix on
        assert_eq!(normalize_text("checkhttp://x.com out"), "check out");
    }

    #[test]
    fn test_digits_inside_tokens() {
        assert_eq!(normalize_text("item2 arrived in 3 days"), "item arrived days");
        assert_eq!(normalize_text("4ever"), "ever");
    }

    #[test]
    fn test_punctuation_inside_tokens_joins_letters() {
        assert_eq!(normalize_text("don't re-order (please)"), "dont reorder please");
        assert_eq!(normalize_text("snake_case"), "snakecase");
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        assert_eq!(normalize_text("  fast \t\n shipping  "), "fast shipping");
    }

    #[test]
    fn test_non_ascii_letters_survive() {
        assert_eq!(normalize_text("Café CRÈME"), "café crème");
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("!!! ... ???"), "");
        assert_eq!(normalize_text("12345"), "");
    }

    #[test]
    fn test_non_string_cells() {
        assert_eq!(normalize_value(&Value::Null), "");
        assert_eq!(normalize_value(&json!(42)), "");
        assert_eq!(normalize_value(&json!(3.75)), "");
        assert_eq!(normalize_value(&json!(true)), "true");
        assert_eq!(normalize_value(&json!("Loved it!")), "loved");
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let samples = [
            "Visit http://x.com NOW!!! 123",
            "This is a great product",
            "Terrible support, never again... 0/10",
            "",
        ];
        for s in samples {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once);
        }
    }
}
