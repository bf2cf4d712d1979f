//! Knowledge base module
//!
//! Bilingual (English/Hindi) content about the Sikkim monasteries
//! digitization project. Read-only after first access.

mod base;
mod lang;

pub use base::{KnowledgeBase, Localized, Topic, Value};
pub use lang::{Language, LanguageError};
