//! German/English name lookup.

use crate::schema::SchemaModel;
use std::collections::HashMap;
use vtscope_api::{DisplayLanguage, Translation, TranslationEntry, TranslationKind};

/// Bidirectional, case-insensitive translation table.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: Vec<TranslationEntry>,
    by_de: HashMap<String, usize>,
    by_en: HashMap<String, usize>,
}

impl TranslationTable {
    pub fn new(entries: Vec<TranslationEntry>) -> Self {
        let mut table = Self::default();
        for entry in entries {
            table.insert(entry);
        }
        table
    }

    /// Add the name pairs the merged schema already carries.
    ///
    /// Entries from the translations file take precedence.
    pub fn with_schema(mut self, model: &SchemaModel) -> Self {
        for class in model.classes() {
            if let Some(en) = &class.alt_name {
                self.insert(TranslationEntry::new(&class.name, en, TranslationKind::Class));
            }
            for member in &class.members {
                if let Some(en) = &member.alt_name {
                    self.insert(TranslationEntry::new(&member.name, en, TranslationKind::Member));
                }
            }
            for assoc in &class.associations {
                if let Some(en) = &assoc.alt_perceived_name {
                    self.insert(TranslationEntry::new(
                        assoc.perceived(),
                        en,
                        TranslationKind::Association,
                    ));
                }
            }
        }
        self
    }

    fn insert(&mut self, entry: TranslationEntry) {
        let de = entry.de.to_lowercase();
        let en = entry.en.to_lowercase();
        if de.is_empty() || en.is_empty() || self.by_de.contains_key(&de) {
            return;
        }
        let idx = self.entries.len();
        self.by_de.insert(de, idx);
        self.by_en.entry(en).or_insert(idx);
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    /// Translate `word` in whichever direction it is known. German wins
    /// when a word exists on both sides.
    pub fn translate(&self, word: &str) -> Option<Translation> {
        let key = word.trim().to_lowercase();
        if let Some(&idx) = self.by_de.get(&key) {
            let entry = &self.entries[idx];
            return Some(Translation {
                source: entry.de.clone(),
                target: entry.en.clone(),
                target_language: DisplayLanguage::En,
                kind: entry.kind,
            });
        }
        self.by_en.get(&key).map(|&idx| {
            let entry = &self.entries[idx];
            Translation {
                source: entry.en.clone(),
                target: entry.de.clone(),
                target_language: DisplayLanguage::De,
                kind: entry.kind,
            }
        })
    }

    /// Translate into a specific language; `None` if `word` is already in it
    /// or unknown.
    pub fn translate_to(&self, word: &str, language: DisplayLanguage) -> Option<Translation> {
        let key = word.trim().to_lowercase();
        let (index, forward) = match language {
            DisplayLanguage::En => (&self.by_de, true),
            DisplayLanguage::De => (&self.by_en, false),
        };
        index.get(&key).map(|&idx| {
            let entry = &self.entries[idx];
            let (source, target) = if forward {
                (&entry.de, &entry.en)
            } else {
                (&entry.en, &entry.de)
            };
            Translation {
                source: source.clone(),
                target: target.clone(),
                target_language: language,
                kind: entry.kind,
            }
        })
    }
}
