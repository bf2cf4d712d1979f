//! Keyword groups in priority order
//!
//! Each group pairs a set of substring triggers with the producer of its
//! reply. The first group with any trigger contained in the normalized
//! message answers.

use crate::knowledge::{KnowledgeBase, Language, Localized};

/// Builds the reply text of a group
pub type ReplyFn = fn(&KnowledgeBase, Language) -> String;

pub struct KeywordGroup {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub reply: ReplyFn,
}

impl KeywordGroup {
    /// `message` must already be normalized
    pub fn matches(&self, message: &str) -> bool {
        self.triggers.iter().any(|t| message.contains(t))
    }
}

const GREETING: Localized<&str> = Localized {
    en: "Hello! I can answer questions about the Sikkim Monasteries digitization project. Try: 'features', 'map', 'offline', or ask in Hindi.",
    hi: "नमस्ते! मैं सिक्किम मठ डिजिटलीकरण परियोजना के बारे में मदद कर सकता हूँ। कोशिश करें: 'features', 'मैप', 'ऑफलाइन', या हिंदी में पूछें।",
};

const MAP: Localized<&str> = Localized {
    en: "The project includes an interactive map with geo-tagged monastery locations, travel routes, and nearby attractions. It can integrate with transport services.",
    hi: "परियोजना में जियो-टैग्ड मठ स्थान, यात्रा मार्ग और पास के आकर्षणों वाला इंटरैक्टिव मैप शामिल है। यह परिवहन सेवाओं के साथ जुड़ सकता है।",
};

const AUDIO: Localized<&str> = Localized {
    en: "Smart Audio Guide: location-based audio guides using Bluetooth beacons or GPS. Offline mode is supported for remote areas.",
    hi: "स्मार्ट ऑडियो गाइड: ब्लूटूथ बीकन या GPS के माध्यम से स्थान-आधारित ऑडियो गाइड। दूरस्थ क्षेत्रों के लिए ऑफ़लाइन मोड समर्थन।",
};

const ARCHIVE: Localized<&str> = Localized {
    en: "Digital Archives: project will scan manuscripts, murals, and historical documents and include AI-powered search and categorization.",
    hi: "डिजिटल अभिलेख: परियोजना पांडुलिपियाँ, भित्ति चित्र और ऐतिहासिक दस्तावेज़ स्कैन करेगी तथा एआई-संचालित खोज और वर्गीकरण होगा।",
};

pub const FALLBACK: Localized<&str> = Localized {
    en: "Sorry, I didn't understand that. Ask about 'features', 'map', 'audio guide', or type a question about the project.",
    hi: "माफ़ कीजिये, मैं समझा नहीं। 'features', 'मैप', 'ऑडियो गाइड' के बारे में पूछें या परियोजना से जुड़ा कोई प्रश्न लिखें।",
};

/// Bullet prefix of each feature line
pub const BULLET: &str = "- ";

/// Render the feature list as bullet lines in knowledge base order
pub fn feature_list(kb: &KnowledgeBase, lang: Language) -> String {
    kb.features(lang)
        .iter()
        .map(|item| format!("{BULLET}{item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn canned(text: &Localized<&str>, lang: Language) -> String {
    (*text.get(lang)).to_string()
}

pub static GROUPS: [KeywordGroup; 7] = [
    KeywordGroup {
        name: "greeting",
        triggers: &["hello", "hi", "namaste", "hey", "हैलो", "नमस्ते"],
        reply: |_, lang| canned(&GREETING, lang),
    },
    KeywordGroup {
        name: "about",
        triggers: &[
            "project",
            "title",
            "about",
            "what is",
            "what's",
            "परियोजना",
            "यह क्या",
            "के बारे में",
        ],
        reply: |kb, lang| kb.short(lang).to_string(),
    },
    KeywordGroup {
        name: "features",
        triggers: &["feature", "features", "क्या-क्या", "फीचर", "विशेषत"],
        reply: feature_list,
    },
    KeywordGroup {
        name: "map",
        triggers: &["map", "location", "geo", "मैप", "स्थान"],
        reply: |_, lang| canned(&MAP, lang),
    },
    KeywordGroup {
        name: "audio",
        triggers: &["audio", "guide", "offline", "ऑडियो", "ऑफलाइन"],
        reply: |_, lang| canned(&AUDIO, lang),
    },
    KeywordGroup {
        name: "archive",
        triggers: &["archive", "manuscript", "document", "अभिलेख", "पांडुलिप"],
        reply: |_, lang| canned(&ARCHIVE, lang),
    },
    KeywordGroup {
        name: "organization",
        triggers: &["organization", "org", "gov", "सरकार", "विभाग"],
        reply: |kb, lang| kb.org(lang).to_string(),
    },
];

/// First group whose triggers match, in priority order
pub fn find(message: &str) -> Option<&'static KeywordGroup> {
    GROUPS.iter().find(|group| group.matches(message))
}
