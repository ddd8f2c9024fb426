//! Public URL slugs for listing pages.

use uuid::Uuid;

/// Longest slug body, in characters, before the unique suffix.
pub const MAX_SLUG_CHARS: usize = 60;

/// Dropped without leaving a separator, so `ממ"ד` stays one word.
const ELIDED: &[char] = &['\'', '"', '`', '’', '׳', '״'];

/// Lowercase `text` into a URL slug.
///
/// Letters and digits from any script are kept; every other run of
/// characters becomes a single `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if ELIDED.contains(&c) {
            continue;
        }
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    let truncated: String = slug.chars().take(MAX_SLUG_CHARS).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Unique slug for a new listing at `address`.
pub fn listing_slug(address: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    let suffix = &id[..8];

    let base = slugify(address);
    if base.is_empty() {
        format!("listing-{}", suffix)
    } else {
        format!("{}-{}", base, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ascii() {
        assert_eq!(slugify("12 Herzl St., Haifa"), "12-herzl-st-haifa");
    }

    #[test]
    fn test_hebrew_kept_and_quotes_elided() {
        assert_eq!(slugify("הרצל 12, חיפה"), "הרצל-12-חיפה");
        assert_eq!(slugify("דירה עם ממ\"ד"), "דירה-עם-ממד");
    }

    #[test]
    fn test_no_leading_or_trailing_dashes() {
        assert_eq!(slugify("  --Rothschild Blvd!!  "), "rothschild-blvd");
    }

    #[test]
    fn test_truncates_without_trailing_dash() {
        let long = "a".repeat(59) + " b";
        let slug = slugify(&long);
        assert_eq!(slug, "a".repeat(59));
        assert!(slugify(&"word ".repeat(40)).chars().count() <= MAX_SLUG_CHARS);
    }

    #[test]
    fn test_listing_slug_suffix() {
        let slug = listing_slug("Herzl 12");
        assert!(slug.starts_with("herzl-12-"));
        let suffix = slug.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_listing_slug_unique_and_never_empty() {
        assert_ne!(listing_slug("Herzl 12"), listing_slug("Herzl 12"));
        assert!(listing_slug("!!!").starts_with("listing-"));
    }
}
