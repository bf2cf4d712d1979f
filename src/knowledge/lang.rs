//! Supported reply languages
//!
//! Wire codes are the two-letter strings clients send in the `lang` field.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Language a reply is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Hi,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::En, Self::Hi];

    /// Wire code of this language (`"en"` or `"hi"`)
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("unsupported language: {0}")]
    Unsupported(String),
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" => Ok(Self::En),
            "hi" => Ok(Self::Hi),
            other => Err(LanguageError::Unsupported(other.to_string())),
        }
    }
}
