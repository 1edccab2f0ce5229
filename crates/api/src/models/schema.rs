//! Schema records as delivered by the remote API, after the German and
//! English variants have been merged.
//!
//! These are plain data. Lookups across a class set live in
//! `vtscope_core::schema`.

use serde::{Deserialize, Serialize};

/// Case-insensitive name comparison used for every schema lookup.
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

fn default_true() -> bool {
    true
}

/// Reference to another class by id and display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassRef {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

impl ClassRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Ids win when both sides carry one; otherwise fall back to names.
    pub fn refers_to(&self, class: &Class) -> bool {
        if self.id != 0 && class.id != 0 {
            return self.id == class.id;
        }
        class.matches_name(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: i64,
    /// Primary (German) display name.
    pub name: String,
    #[serde(default)]
    pub alt_name: Option<String>,
    #[serde(default)]
    pub superclass: Option<ClassRef>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub persistent: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub associations: Vec<Association>,
}

impl Class {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            alt_name: None,
            superclass: None,
            is_abstract: false,
            persistent: true,
            hidden: false,
            description: None,
            table: None,
            members: Vec::new(),
            associations: Vec::new(),
        }
    }

    pub fn with_alt_name(mut self, alt: impl Into<String>) -> Self {
        self.alt_name = Some(alt.into());
        self
    }

    pub fn with_superclass(mut self, superclass: ClassRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_association(mut self, association: Association) -> Self {
        self.associations.push(association);
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn to_ref(&self) -> ClassRef {
        ClassRef::new(self.id, self.name.clone())
    }

    pub fn matches_name(&self, name: &str) -> bool {
        names_match(&self.name, name)
            || self.alt_name.as_deref().is_some_and(|alt| names_match(alt, name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub alt_name: Option<String>,
    /// Declared type as free text; maps to a class when a class of that name exists.
    #[serde(alias = "type")]
    pub type_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub derived: bool,
    #[serde(default)]
    pub indexed: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alt_name: None,
            type_name: type_name.into(),
            description: None,
            max_length: None,
            nullable: true,
            derived: false,
            indexed: false,
        }
    }

    pub fn with_alt_name(mut self, alt: impl Into<String>) -> Self {
        self.alt_name = Some(alt.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn matches_name(&self, name: &str) -> bool {
        names_match(&self.name, name)
            || self.alt_name.as_deref().is_some_and(|alt| names_match(alt, name))
    }
}

/// One end of an association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationRole {
    pub class: ClassRef,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub navigable: bool,
    /// This end is a collection when reached from the other end.
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub composite: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl AssociationRole {
    pub fn new(class: ClassRef, name: impl Into<String>) -> Self {
        Self {
            class,
            name: name.into(),
            navigable: true,
            multiple: false,
            composite: false,
            hidden: false,
            description: None,
        }
    }

    pub fn many(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn composite(mut self) -> Self {
        self.composite = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    pub name: String,
    #[serde(default)]
    pub alt_name: Option<String>,
    /// What a script author types; empty when the API omits it.
    #[serde(default)]
    pub perceived_name: String,
    #[serde(default)]
    pub alt_perceived_name: Option<String>,
    #[serde(default)]
    pub link_class: Option<ClassRef>,
    #[serde(default)]
    pub derived: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub role1: Option<AssociationRole>,
    #[serde(default)]
    pub role2: Option<AssociationRole>,
}

impl Association {
    pub fn new(
        name: impl Into<String>,
        perceived_name: impl Into<String>,
        role1: AssociationRole,
        role2: AssociationRole,
    ) -> Self {
        Self {
            name: name.into(),
            alt_name: None,
            perceived_name: perceived_name.into(),
            alt_perceived_name: None,
            link_class: None,
            derived: false,
            description: None,
            role1: Some(role1),
            role2: Some(role2),
        }
    }

    pub fn with_alt_perceived_name(mut self, alt: impl Into<String>) -> Self {
        self.alt_perceived_name = Some(alt.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The perceived name, or the internal name when none was delivered.
    pub fn perceived(&self) -> &str {
        if self.perceived_name.is_empty() {
            &self.name
        } else {
            &self.perceived_name
        }
    }

    pub fn matches_perceived(&self, name: &str) -> bool {
        names_match(self.perceived(), name)
            || self
                .alt_perceived_name
                .as_deref()
                .is_some_and(|alt| names_match(alt, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_matching_is_case_insensitive_in_both_languages() {
        let class = Class::new(3, "Projekt").with_alt_name("Project");
        assert!(class.matches_name("projekt"));
        assert!(class.matches_name("PROJECT"));
        assert!(!class.matches_name("Phase"));
    }

    #[test]
    fn umlauts_compare_case_insensitively() {
        assert!(names_match("Währung", "WÄHRUNG"));
    }

    #[test]
    fn class_ref_prefers_ids_over_names() {
        let class = Class::new(7, "Projekt");
        assert!(ClassRef::new(7, "Renamed").refers_to(&class));
        assert!(!ClassRef::new(8, "Projekt").refers_to(&class));
        assert!(ClassRef::new(0, "projekt").refers_to(&class));
    }

    #[test]
    fn perceived_name_falls_back_to_internal_name() {
        let role = AssociationRole::new(ClassRef::new(1, "A"), "a");
        let assoc = Association::new("AzuB", "", role.clone(), role);
        assert_eq!(assoc.perceived(), "AzuB");
        assert!(assoc.matches_perceived("azub"));
    }

    #[test]
    fn role_defaults_to_navigable_when_deserialized() {
        let role: AssociationRole =
            serde_json::from_str(r#"{"class":{"id":1,"name":"A"},"name":"a"}"#).unwrap();
        assert!(role.navigable);
        assert!(!role.multiple);
    }
}
