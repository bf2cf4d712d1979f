//! Feature-word fallback scan
//!
//! Runs only after every keyword group missed. Walks the feature list in
//! order and answers with the first item that has any word of at least
//! [`MIN_WORD_CHARS`] characters contained in the message. There is no
//! scoring: an earlier item with one weak hit beats a later item with many.

use crate::knowledge::{KnowledgeBase, Language};

pub const MIN_WORD_CHARS: usize = 5;

/// Appended to replies produced by the scan
pub const KB_MARKER: &str = "(From knowledge base)";

/// Index and text of the first feature item with a qualifying word
pub fn scan<'a>(kb: &'a KnowledgeBase, lang: Language, message: &str) -> Option<(usize, &'a str)> {
    kb.features(lang)
        .iter()
        .enumerate()
        .find(|(_, item)| has_qualifying_word(item, message))
        .map(|(index, item)| (index, *item))
}

fn has_qualifying_word(item: &str, message: &str) -> bool {
    item.split_whitespace()
        .map(str::to_lowercase)
        .any(|word| word.chars().count() >= MIN_WORD_CHARS && message.contains(&word))
}

pub fn with_marker(item: &str) -> String {
    format!("{item}\n\n{KB_MARKER}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_first_item_wins() {
        let kb = KnowledgeBase::global();
        // "monastery" appears in items 0 and 2
        assert_eq!(scan(kb, Language::En, "monastery").map(|(i, _)| i), Some(0));
    }

    #[test]
    fn test_scan_later_item() {
        let kb = KnowledgeBase::global();
        let (index, item) = scan(kb, Language::En, "rituals").expect("rituals should match");
        assert_eq!(index, 8);
        assert!(item.starts_with("Cultural Calendar"));
    }

    #[test]
    fn test_short_words_ignored() {
        let kb = KnowledgeBase::global();
        // "mode" and "with" are too short to qualify
        assert!(scan(kb, Language::En, "mode with").is_none());
    }

    #[test]
    fn test_word_length_boundary() {
        let kb = KnowledgeBase::global();
        // "views" has exactly MIN_WORD_CHARS characters and counts
        assert_eq!("views".chars().count(), MIN_WORD_CHARS);
        assert_eq!(scan(kb, Language::En, "views").map(|(i, _)| i), Some(0));
        // "tours:" qualifies only with its colon; "tour" is one short
        assert!(scan(kb, Language::En, "tour").is_none());
    }

    #[test]
    fn test_punctuation_stays_attached() {
        let kb = KnowledgeBase::global();
        // The item word is "calendar:" so the bare word does not hit
        assert!(scan(kb, Language::En, "calendar").is_none());
        assert_eq!(
            scan(kb, Language::En, "calendar: when?").map(|(i, _)| i),
            Some(8)
        );
    }

    #[test]
    fn test_scan_hindi() {
        let kb = KnowledgeBase::global();
        assert_eq!(scan(kb, Language::Hi, "एआई-संचालित").map(|(i, _)| i), Some(5));
    }

    #[test]
    fn test_marker() {
        assert_eq!(with_marker("x"), "x\n\n(From knowledge base)");
    }
}
