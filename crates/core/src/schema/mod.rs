//! Indexed, immutable view over one fetched class set.

pub mod inheritance;
pub mod merge;
pub mod roles;

pub use inheritance::{Lineage, resolve as flatten};
pub use merge::merge_languages;
pub use roles::{RoleMatch, RolePair, RoleView, resolve_pair, role_info};

use std::collections::HashMap;
use vtscope_api::{Class, ClassRef, FlattenedClass};

/// A schema snapshot indexed by id and by lower-cased display names.
///
/// Snapshots are never mutated; a refresh builds a new one and swaps it in.
#[derive(Debug, Clone, Default)]
pub struct SchemaModel {
    classes: Vec<Class>,
    by_id: HashMap<i64, usize>,
    by_name: HashMap<String, usize>,
}

impl SchemaModel {
    /// Index a class list. Duplicate ids keep the first occurrence.
    ///
    /// Primary names are indexed before alternates, so an English name never
    /// shadows another class's German name.
    pub fn new(classes: Vec<Class>) -> Self {
        let mut kept = Vec::with_capacity(classes.len());
        let mut by_id = HashMap::with_capacity(classes.len());
        let mut by_name = HashMap::with_capacity(classes.len() * 2);

        for class in classes {
            if by_id.contains_key(&class.id) {
                tracing::debug!("Dropping duplicate class id {} ({})", class.id, class.name);
                continue;
            }
            let idx = kept.len();
            by_id.insert(class.id, idx);
            by_name.entry(class.name.to_lowercase()).or_insert(idx);
            kept.push(class);
        }
        for (idx, class) in kept.iter().enumerate() {
            let Some(alt) = &class.alt_name else {
                continue;
            };
            if let Some(&owner) = by_name.get(&alt.to_lowercase()) {
                if owner != idx {
                    tracing::debug!(
                        "Alternate name {} of {} collides with {}",
                        alt,
                        class.name,
                        kept[owner].name
                    );
                }
                continue;
            }
            by_name.insert(alt.to_lowercase(), idx);
        }

        Self {
            classes: kept,
            by_id,
            by_name,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_by_id(&self, id: i64) -> Option<&Class> {
        self.by_id.get(&id).map(|&idx| &self.classes[idx])
    }

    /// Case-insensitive lookup by either display name.
    pub fn class_by_name(&self, name: &str) -> Option<&Class> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.classes[idx])
    }

    pub fn resolve_ref(&self, class_ref: &ClassRef) -> Option<&Class> {
        if class_ref.id != 0 {
            if let Some(class) = self.class_by_id(class_ref.id) {
                return Some(class);
            }
        }
        self.class_by_name(&class_ref.name)
    }

    pub fn superclass_of(&self, class: &Class) -> Option<&Class> {
        class
            .superclass
            .as_ref()
            .and_then(|sup| self.resolve_ref(sup))
    }

    /// Members and associations visible on `class`, see [`inheritance::resolve`].
    pub fn flatten<'a>(&'a self, class: &'a Class) -> FlattenedClass<'a> {
        inheritance::resolve(class, self)
    }

    /// `class` itself, then its ancestors nearest first.
    pub fn lineage<'a>(&'a self, class: &'a Class) -> Lineage<'a> {
        Lineage::new(class, self)
    }

    /// Classes whose name (either language) starts with `prefix`, case-insensitively.
    pub fn classes_with_prefix(&self, prefix: &str) -> Vec<&Class> {
        let prefix = prefix.to_lowercase();
        self.classes
            .iter()
            .filter(|c| {
                c.name.to_lowercase().starts_with(&prefix)
                    || c.alt_name
                        .as_ref()
                        .is_some_and(|alt| alt.to_lowercase().starts_with(&prefix))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ids_keep_first_entry() {
        let model = SchemaModel::new(vec![
            Class::new(1, "Projekt"),
            Class::new(1, "ProjektKopie"),
            Class::new(2, "Phase"),
        ]);
        assert_eq!(model.len(), 2);
        assert_eq!(model.class_by_id(1).unwrap().name, "Projekt");
        assert!(model.class_by_name("ProjektKopie").is_none());
    }

    #[test]
    fn finds_classes_by_either_name_ignoring_case() {
        let model = SchemaModel::new(vec![Class::new(1, "Projekt").with_alt_name("Project")]);
        assert_eq!(model.class_by_name("PROJECT").map(|c| c.id), Some(1));
        assert_eq!(model.class_by_name(" projekt ").map(|c| c.id), Some(1));
    }

    #[test]
    fn primary_name_wins_over_another_class_alternate() {
        let model = SchemaModel::new(vec![
            Class::new(1, "Kunde").with_alt_name("Person"),
            Class::new(2, "Person").with_alt_name("Individual"),
        ]);
        assert_eq!(model.class_by_name("Person").map(|c| c.id), Some(2));
        assert_eq!(model.class_by_name("Kunde").map(|c| c.id), Some(1));
        assert_eq!(model.class_by_name("individual").map(|c| c.id), Some(2));
    }

    #[test]
    fn resolve_ref_falls_back_to_name_for_unknown_id() {
        let model = SchemaModel::new(vec![Class::new(5, "Phase")]);
        assert_eq!(model.resolve_ref(&ClassRef::new(99, "phase")).map(|c| c.id), Some(5));
        assert_eq!(model.resolve_ref(&ClassRef::new(0, "Phase")).map(|c| c.id), Some(5));
        assert!(model.resolve_ref(&ClassRef::new(99, "Nope")).is_none());
    }

    #[test]
    fn empty_model_answers_lookups_with_none() {
        let model = SchemaModel::new(Vec::new());
        assert!(model.is_empty());
        assert!(model.class_by_name("anything").is_none());
    }
}
