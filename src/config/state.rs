// Application state module
// Shared, read-only state handed to every connection

use std::path::PathBuf;

use super::types::Config;
use crate::knowledge::{KnowledgeBase, Language, LanguageError};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Parsed `site.default_lang`
    pub default_lang: Language,
    pub knowledge: &'static KnowledgeBase,
}

impl AppState {
    /// Build state from loaded configuration
    ///
    /// Fails if the configured default language is not supported.
    pub fn new(config: Config) -> Result<Self, LanguageError> {
        let default_lang = config.site.default_lang.parse::<Language>()?;

        Ok(Self {
            config,
            default_lang,
            knowledge: KnowledgeBase::global(),
        })
    }

    /// Full path of the page served at `/`
    pub fn index_path(&self) -> PathBuf {
        PathBuf::from(&self.config.site.static_dir).join(&self.config.site.index_file)
    }
}
