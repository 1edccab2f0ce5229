//! Shared schema fixture for integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use vtscope_api::{Association, AssociationRole, Class, ClassRef, Member};
use vtscope_core::SchemaModel;

/// A schema built with a fluent API.
#[derive(Default)]
pub struct SchemaFixture {
    classes: BTreeMap<i64, Class>,
}

impl SchemaFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, id: i64, name: &str, alt: &str, superclass: Option<i64>) -> Self {
        let mut class = Class::new(id, name).with_alt_name(alt);
        if let Some(sup) = superclass {
            let sup_name = self
                .classes
                .get(&sup)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            class = class.with_superclass(ClassRef::new(sup, sup_name));
        }
        self.classes.insert(id, class);
        self
    }

    pub fn member(mut self, owner: i64, name: &str, alt: &str, type_name: &str) -> Self {
        if let Some(class) = self.classes.get_mut(&owner) {
            class
                .members
                .push(Member::new(name, type_name).with_alt_name(alt));
        }
        self
    }

    /// Association declared on `from`, navigable as `perceived` towards `to`.
    pub fn association(
        mut self,
        from: i64,
        perceived: (&str, &str),
        to: i64,
        many: bool,
    ) -> Self {
        let from_ref = self.reference(from);
        let to_ref = self.reference(to);
        let near = AssociationRole::new(from_ref, "near");
        let mut far = AssociationRole::new(to_ref, "far");
        if many {
            far = far.many();
        }
        let name = format!("{}{}", self.name_of(from), perceived.0);
        let assoc = Association::new(name, perceived.0, near, far)
            .with_alt_perceived_name(perceived.1);
        if let Some(class) = self.classes.get_mut(&from) {
            class.associations.push(assoc);
        }
        self
    }

    fn reference(&self, id: i64) -> ClassRef {
        ClassRef::new(id, self.name_of(id))
    }

    fn name_of(&self, id: i64) -> String {
        self.classes
            .get(&id)
            .map(|c| c.name.clone())
            .unwrap_or_default()
    }

    pub fn build(self) -> SchemaModel {
        SchemaModel::new(self.classes.into_values().collect())
    }
}

pub const EINTRAG: i64 = 1;
pub const PROJEKTBASE: i64 = 2;
pub const PROJEKT: i64 = 3;
pub const PROJEKTPHASE: i64 = 4;
pub const BEARBEITER: i64 = 5;
pub const WAEHRUNG: i64 = 6;

/// A small slice of a Vertec schema.
///
/// ```text
/// Eintrag ─┬─ Projektbase ── Projekt
///          ├─ ProjektPhase
///          └─ Projektbearbeiter
/// Waehrung
/// ```
pub fn vertec_model() -> SchemaModel {
    SchemaFixture::new()
        .class(EINTRAG, "Eintrag", "Entry", None)
        .class(PROJEKTBASE, "Projektbase", "ProjectBase", Some(EINTRAG))
        .class(PROJEKT, "Projekt", "Project", Some(PROJEKTBASE))
        .class(PROJEKTPHASE, "ProjektPhase", "ProjectPhase", Some(EINTRAG))
        .class(BEARBEITER, "Projektbearbeiter", "ProjectWorker", Some(EINTRAG))
        .class(WAEHRUNG, "Waehrung", "Currency", None)
        .member(EINTRAG, "Bemerkung", "Remark", "String")
        .member(PROJEKTBASE, "Code", "Code", "String")
        .member(PROJEKTBASE, "Aktiv", "Active", "Boolean")
        .member(PROJEKT, "Waehrung", "Currency", "Waehrung")
        .member(PROJEKTPHASE, "Aktiv", "Active", "Boolean")
        .member(PROJEKTPHASE, "Status", "State", "Integer")
        .member(BEARBEITER, "Kuerzel", "Abbreviation", "String")
        .member(WAEHRUNG, "Kurs", "Rate", "Float")
        .association(PROJEKTBASE, ("Projektleiter", "ProjectLeader"), BEARBEITER, false)
        .association(PROJEKT, ("Phasen", "Phases"), PROJEKTPHASE, true)
        .association(PROJEKTPHASE, ("Verantwortlicher", "Responsible"), BEARBEITER, false)
        .association(BEARBEITER, ("Projekte", "Projects"), PROJEKT, true)
        .build()
}

/// Script preamble binding `projekt` to a Projekt.
pub const PREAMBLE: &str = "projekt = argobject  # type: Projekt\n";
