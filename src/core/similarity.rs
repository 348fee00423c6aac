//! Normalized edit-distance similarity used by brand matching.

use strsim::levenshtein;

/// Levenshtein distance counted in characters (unit cost for insert, delete, substitute).
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// Similarity in `[0, 1]`: `(len(longer) - distance) / len(longer)`.
///
/// Two empty strings are maximally similar. No case folding happens here;
/// callers lower-case before comparing.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longer = a.chars().count().max(b.chars().count());
    if longer == 0 {
        return 1.0;
    }
    let distance = edit_distance(a, b);
    (longer - distance) as f64 / longer as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_fully_similar() {
        assert_eq!(similarity("paypal.com", "paypal.com"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn similarity_is_symmetric() {
        let pairs = [
            ("amazon.com", "amaz0n-login.net"),
            ("", "dhl.de"),
            ("wellsfargo.com", "wellsfarg0.co"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn single_substitution_over_ten_chars() {
        assert_eq!(edit_distance("paypa1.com", "paypal.com"), 1);
        assert!((similarity("paypa1.com", "paypal.com") - 0.9).abs() < 1e-9);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Cyrillic 'а' is two bytes but one edit.
        assert_eq!(edit_distance("\u{0430}mazon.com", "amazon.com"), 1);
        assert!((similarity("\u{0430}mazon.com", "amazon.com") - 0.9).abs() < 1e-9);
    }

    #[test]
    fn empty_against_non_empty_is_zero() {
        assert_eq!(similarity("", "fedex.com"), 0.0);
    }
}
