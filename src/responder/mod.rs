//! Rule-based responder
//!
//! Maps a message and a language to a canned reply. The message is trimmed
//! and lowercased, then checked against the keyword groups in priority
//! order. If none match, the feature-word scan runs, and if that misses too
//! the fixed "didn't understand" text is returned.
//!
//! Pure and stateless: safe to call from any number of tasks at once.

mod fallback;
mod groups;

pub use fallback::{KB_MARKER, MIN_WORD_CHARS};
pub use groups::{KeywordGroup, BULLET, GROUPS};

use std::fmt;

use crate::knowledge::{KnowledgeBase, Language, LanguageError};

/// What produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// A keyword group, by name
    Group(&'static str),
    /// The fallback scan, by feature index
    Feature(usize),
    Fallback,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(name) => write!(f, "group:{name}"),
            Self::Feature(index) => write!(f, "feature:{index}"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub kind: MatchKind,
}

pub fn normalize(message: &str) -> String {
    message.trim().to_lowercase()
}

/// Name of the keyword group that would answer `message`, if any
pub fn classify(message: &str) -> Option<&'static str> {
    groups::find(&normalize(message)).map(|g| g.name)
}

/// Produce the reply along with what matched
pub fn reply(kb: &KnowledgeBase, message: &str, lang: Language) -> Reply {
    let msg = normalize(message);

    if let Some(group) = groups::find(&msg) {
        return Reply {
            text: (group.reply)(kb, lang),
            kind: MatchKind::Group(group.name),
        };
    }

    if let Some((index, item)) = fallback::scan(kb, lang, &msg) {
        return Reply {
            text: fallback::with_marker(item),
            kind: MatchKind::Feature(index),
        };
    }

    Reply {
        text: (*groups::FALLBACK.get(lang)).to_string(),
        kind: MatchKind::Fallback,
    }
}

/// Reply text for `message` against the global knowledge base
pub fn respond(message: &str, lang: Language) -> String {
    reply(KnowledgeBase::global(), message, lang).text
}

/// Like [`respond`], taking a wire language code
pub fn respond_code(message: &str, code: &str) -> Result<String, LanguageError> {
    let lang = code.parse::<Language>()?;
    Ok(respond(message, lang))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greeting(lang: Language) -> String {
        respond("hello", lang)
    }

    #[test]
    fn test_greeting_any_case_and_padding() {
        for lang in Language::ALL {
            let expected = greeting(lang);
            for msg in ["hello", "HELLO there", "  Hey  ", "Namaste", "नमस्ते जी", "हैलो"] {
                assert_eq!(respond(msg, lang), expected, "message {msg:?}");
            }
        }
        assert!(greeting(Language::En).starts_with("Hello! I can answer questions"));
        assert!(greeting(Language::Hi).starts_with("नमस्ते!"));
    }

    #[test]
    fn test_features_lists_every_item_in_order() {
        let kb = KnowledgeBase::global();
        let text = respond("features", Language::En);
        let expected: Vec<String> = kb
            .features(Language::En)
            .iter()
            .map(|item| format!("- {item}"))
            .collect();
        assert_eq!(text, expected.join("\n"));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(
            respond("Features", Language::En),
            respond("features ", Language::En)
        );
    }

    #[test]
    fn test_empty_message_falls_back() {
        let r = reply(KnowledgeBase::global(), "", Language::En);
        assert_eq!(r.kind, MatchKind::Fallback);
        assert_eq!(
            r.text,
            "Sorry, I didn't understand that. Ask about 'features', 'map', 'audio guide', or type a question about the project."
        );
    }

    #[test]
    fn test_map_in_hindi() {
        assert_eq!(
            respond("map", Language::Hi),
            "परियोजना में जियो-टैग्ड मठ स्थान, यात्रा मार्ग और पास के आकर्षणों वाला इंटरैक्टिव मैप शामिल है। यह परिवहन सेवाओं के साथ जुड़ सकता है।"
        );
    }

    #[test]
    fn test_gibberish_falls_back() {
        for msg in ["gibberishxyz", "zzzqqq"] {
            let r = reply(KnowledgeBase::global(), msg, Language::En);
            assert_eq!(r.kind, MatchKind::Fallback, "message {msg:?}");
        }
    }

    #[test]
    fn test_greeting_beats_features() {
        let r = reply(KnowledgeBase::global(), "hi features", Language::En);
        assert_eq!(r.kind, MatchKind::Group("greeting"));
        assert_eq!(r.text, greeting(Language::En));
    }

    #[test]
    fn test_topic_groups() {
        let cases = [
            ("what is this about", "greeting"), // "this" contains "hi"
            ("tell me about murals", "about"),
            ("where is the map", "map"),
            ("audio", "audio"),
            ("manuscripts", "archive"),
            ("who is the org", "organization"),
            ("government", "organization"),
        ];
        for (msg, group) in cases {
            assert_eq!(classify(msg), Some(group), "message {msg:?}");
        }
        assert_eq!(classify("bluetooth"), None);
    }

    #[test]
    fn test_knowledge_base_answers() {
        assert_eq!(
            respond("About the project", Language::En),
            KnowledgeBase::global().short(Language::En)
        );
        assert_eq!(
            respond("सरकार", Language::Hi),
            "सिक्किम सरकार (उच्च एवं तकनीकी शिक्षा विभाग)"
        );
    }

    #[test]
    fn test_fallback_scan_reply() {
        let r = reply(KnowledgeBase::global(), "bluetooth", Language::En);
        assert_eq!(r.kind, MatchKind::Feature(6));
        assert_eq!(
            r.text,
            "Smart Audio Guide App: Location-based audio guides using Bluetooth beacons or GPS.\n\n(From knowledge base)"
        );
    }

    #[test]
    fn test_unsupported_language_code() {
        assert_eq!(
            respond_code("hello", "fr"),
            Err(LanguageError::Unsupported("fr".to_string()))
        );
        assert_eq!(respond_code("hello", "en"), Ok(greeting(Language::En)));
    }

    #[test]
    fn test_match_kind_display() {
        assert_eq!(MatchKind::Group("map").to_string(), "group:map");
        assert_eq!(MatchKind::Feature(3).to_string(), "feature:3");
        assert_eq!(MatchKind::Fallback.to_string(), "fallback");
    }
}
