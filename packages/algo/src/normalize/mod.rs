//! Answer Normalization
//!
//! Canonical form for free-text answers, applied in order:
//! - Unicode canonical composition (NFC)
//! - Removal of `. , ! ? [ ] ( ) { }`
//! - Whitespace runs collapsed to one space, ends trimmed
//! - Lowercase folding
//!
//! A last NFC pass recomposes base letters that punctuation removal left
//! adjacent to combining marks, which keeps the function idempotent.

use unicode_normalization::UnicodeNormalization;

/// Characters stripped before comparison
pub const STRIPPED_PUNCTUATION: &[char] = &['.', ',', '!', '?', '[', ']', '(', ')', '{', '}'];

/// 规范化自由文本答案
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfc().collect();
    let stripped: String = composed
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase().nfc().collect()
}

/// Missing input normalizes to the empty string
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Whether two answers are equal after normalization
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    normalize(submitted) == normalize(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_case() {
        assert_eq!(normalize("Hello!"), "hello");
        assert_eq!(normalize("Hello!"), normalize("hello"));
        assert_eq!(normalize("{(a)} [b], c?"), "a b c");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  Annyeonghaseyo!  "), "annyeonghaseyo");
        assert_eq!(normalize("good \t\n morning"), "good morning");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_composes_decomposed_hangul() {
        let decomposed: String = "안녕하세요".nfd().collect();
        assert_ne!(decomposed, "안녕하세요");
        assert_eq!(normalize(&decomposed), "안녕하세요");
    }

    #[test]
    fn test_recomposes_after_punctuation_removal() {
        let input = "Cafe.\u{301}";
        let once = normalize(input);
        assert_eq!(once, "café");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_keeps_other_punctuation() {
        assert_eq!(normalize("don't"), "don't");
        assert_eq!(normalize("a-b"), "a-b");
    }

    #[test]
    fn test_normalize_opt_missing() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("A.")), "a");
    }

    #[test]
    fn test_answers_match() {
        assert!(answers_match("  Annyeonghaseyo!  ", "annyeonghaseyo"));
        assert!(!answers_match("annyeong", "annyeonghaseyo"));
    }
}
