//! Superclass walk and inheritance flattening.
//!
//! Superclass references come from external data and may dangle or form
//! cycles. The walk tracks visited ids and stops at the first repeat or
//! unresolvable reference instead of trusting the data to be acyclic.

use super::SchemaModel;
use std::collections::HashSet;
use vtscope_api::{Class, EnrichedAssociation, EnrichedMember, FlattenedClass};

/// Iterator over a class and its ancestors, nearest first.
pub struct Lineage<'a> {
    model: &'a SchemaModel,
    next: Option<&'a Class>,
    visited: HashSet<i64>,
}

impl<'a> Lineage<'a> {
    pub fn new(class: &'a Class, model: &'a SchemaModel) -> Self {
        Self {
            model,
            next: Some(class),
            visited: HashSet::new(),
        }
    }
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a Class;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if !self.visited.insert(current.id) {
            tracing::warn!(
                "Superclass cycle detected at class {} ({}); stopping walk",
                current.name,
                current.id
            );
            return None;
        }

        self.next = match &current.superclass {
            Some(sup) => {
                let parent = self.model.resolve_ref(sup);
                if parent.is_none() {
                    tracing::debug!(
                        "Dangling superclass {} ({}) on {}",
                        sup.name,
                        sup.id,
                        current.name
                    );
                }
                parent
            }
            None => None,
        };
        Some(current)
    }
}

/// Flatten the members and associations visible on `class`.
///
/// Own items come first, then each ancestor's in chain order. Every item is
/// tagged with the display name of the class that declares it.
pub fn resolve<'a>(class: &'a Class, model: &'a SchemaModel) -> FlattenedClass<'a> {
    let mut flat = FlattenedClass::default();

    for level in Lineage::new(class, model) {
        flat.members.extend(level.members.iter().map(|member| EnrichedMember {
            member,
            source_class: level.name.as_str(),
            source_id: level.id,
        }));
        flat.associations
            .extend(level.associations.iter().map(|association| EnrichedAssociation {
                association,
                source_class: level.name.as_str(),
                source_id: level.id,
            }));
    }

    flat
}
