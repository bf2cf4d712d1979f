//! Static project knowledge base
//!
//! Every topic stores one value per [`Language`], so a lookup with a parsed
//! language always succeeds. String codes go through [`KnowledgeBase::lookup`],
//! which rejects unknown languages explicitly.

use std::sync::OnceLock;

use super::lang::{Language, LanguageError};

static KNOWLEDGE_BASE: OnceLock<KnowledgeBase> = OnceLock::new();

/// Topic keys of the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Title,
    Short,
    Features,
    Org,
    Category,
    Theme,
}

impl Topic {
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Short,
        Self::Features,
        Self::Org,
        Self::Category,
        Self::Theme,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Short => "short",
            Self::Features => "features",
            Self::Org => "org",
            Self::Category => "category",
            Self::Theme => "theme",
        }
    }
}

/// A value held once per supported language
#[derive(Debug, Clone, Copy)]
pub struct Localized<T> {
    pub en: T,
    pub hi: T,
}

impl<T> Localized<T> {
    pub const fn get(&self, lang: Language) -> &T {
        match lang {
            Language::En => &self.en,
            Language::Hi => &self.hi,
        }
    }
}

/// Topic value for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Text(&'a str),
    List(&'a [&'a str]),
}

impl Value<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.is_empty() || items.iter().any(|i| i.trim().is_empty()),
        }
    }
}

#[derive(Debug)]
pub struct KnowledgeBase {
    title: Localized<&'static str>,
    short: Localized<&'static str>,
    features: Localized<&'static [&'static str]>,
    org: Localized<&'static str>,
    category: Localized<&'static str>,
    theme: Localized<&'static str>,
}

impl KnowledgeBase {
    /// Process-wide instance, built on first access
    pub fn global() -> &'static Self {
        KNOWLEDGE_BASE.get_or_init(Self::builtin)
    }

    fn builtin() -> Self {
        Self {
            title: Localized {
                en: "Digitize and Showcase Monasteries of Sikkim for Tourism and Cultural Preservation",
                hi: "सिटीके मठों का डिजिटलीकरण और प्रदर्शनी (Sikkim) - पर्यटन और सांस्कृतिक संरक्षण",
            },
            short: Localized {
                en: "A project to create virtual tours, digital archives, interactive maps and audio guides for monasteries in Sikkim.",
                hi: "यह परियोजना सिखिम के मठों के लिए वर्चुअल टूर, डिजिटल अभिलेख, इंटरैक्टिव मानचित्र और ऑडियो गाइड बनाती है।",
            },
            features: Localized {
                en: &[
                    "Virtual Tours: 360° panoramic views of monastery interiors and surroundings.",
                    "Narrated walkthroughs in multiple languages.",
                    "Interactive Map: Geo-tagged monastery locations with travel routes and nearby attractions.",
                    "Integration with local transport and tourism services.",
                    "Digital Archives: Scanned manuscripts, murals, and historical documents.",
                    "AI-powered search and categorization.",
                    "Smart Audio Guide App: Location-based audio guides using Bluetooth beacons or GPS.",
                    "Offline mode for remote areas.",
                    "Cultural Calendar: Events, festivals, and rituals schedule.",
                ],
                hi: &[
                    "वर्चुअल टूर: मठ के अंदर और आसपास के 360° पैनोरमिक दृश्य।",
                    "कई भाषाओं में वर्णित वॉकथ्रू।",
                    "इंटरैक्टिव मैप: यात्रा मार्ग और पास के आकर्षणों के साथ जियो-टैग्ड मठ स्थान।",
                    "स्थानीय परिवहन और पर्यटन सेवाओं के साथ एकीकरण।",
                    "डिजिटल अभिलेख: स्कैन किए गए पांडुलिपियाँ, भित्ति चित्र और ऐतिहासिक दस्तावेज।",
                    "एआई-संचालित खोज और वर्गीकरण।",
                    "स्मार्ट ऑडियो गाइड ऐप: ब्लूटूथ बीकन या GPS का उपयोग करके स्थान-आधारित ऑडियो गाइड।",
                    "दूरस्थ क्षेत्रों के लिए ऑफ़लाइन मोड।",
                    "सांस्कृतिक कैलेंडर: कार्यक्रम, त्योहार और अनुष्ठान शेड्यूल।",
                ],
            },
            org: Localized {
                en: "Government of Sikkim (Department of Higher & Technical Education)",
                hi: "सिक्किम सरकार (उच्च एवं तकनीकी शिक्षा विभाग)",
            },
            category: Localized {
                en: "Software",
                hi: "सॉफ़्टवेयर",
            },
            theme: Localized {
                en: "Travel & Tourism",
                hi: "यात्रा और पर्यटन",
            },
        }
    }

    pub fn get(&self, topic: Topic, lang: Language) -> Value<'_> {
        match topic {
            Topic::Title => Value::Text(self.title.get(lang)),
            Topic::Short => Value::Text(self.short.get(lang)),
            Topic::Features => Value::List(self.features.get(lang)),
            Topic::Org => Value::Text(self.org.get(lang)),
            Topic::Category => Value::Text(self.category.get(lang)),
            Topic::Theme => Value::Text(self.theme.get(lang)),
        }
    }

    /// Look up a topic by wire language code
    pub fn lookup(&self, topic: Topic, code: &str) -> Result<Value<'_>, LanguageError> {
        let lang = code.parse::<Language>()?;
        Ok(self.get(topic, lang))
    }

    pub fn title(&self, lang: Language) -> &'static str {
        self.title.get(lang)
    }

    pub fn short(&self, lang: Language) -> &'static str {
        self.short.get(lang)
    }

    /// Feature list in presentation order
    pub fn features(&self, lang: Language) -> &'static [&'static str] {
        self.features.get(lang)
    }

    pub fn org(&self, lang: Language) -> &'static str {
        self.org.get(lang)
    }
}
