use super::language::DisplayLanguage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationKind {
    Class,
    Member,
    Association,
    #[default]
    Other,
}

/// One row of the static translations file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub de: String,
    pub en: String,
    #[serde(default)]
    pub kind: TranslationKind,
}

impl TranslationEntry {
    pub fn new(de: impl Into<String>, en: impl Into<String>, kind: TranslationKind) -> Self {
        Self {
            de: de.into(),
            en: en.into(),
            kind,
        }
    }
}

/// Result of translating a single name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub source: String,
    pub target: String,
    pub target_language: DisplayLanguage,
    pub kind: TranslationKind,
}
