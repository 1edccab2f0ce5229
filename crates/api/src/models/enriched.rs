//! Inheritance-flattened views over a class.
//!
//! These borrow from the schema snapshot and are rebuilt per query.

use super::schema::{Association, Member};

/// A member annotated with the class that declares it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichedMember<'a> {
    pub member: &'a Member,
    pub source_class: &'a str,
    pub source_id: i64,
}

/// An association annotated with the class that declares it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichedAssociation<'a> {
    pub association: &'a Association,
    pub source_class: &'a str,
    pub source_id: i64,
}

/// Members and associations visible on a class, own items first,
/// then ancestors nearest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedClass<'a> {
    pub members: Vec<EnrichedMember<'a>>,
    pub associations: Vec<EnrichedAssociation<'a>>,
}

impl<'a> FlattenedClass<'a> {
    /// First member matching either display name.
    pub fn find_member(&self, name: &str) -> Option<&EnrichedMember<'a>> {
        self.members.iter().find(|m| m.member.matches_name(name))
    }

    /// First association matching either perceived name.
    pub fn find_association(&self, name: &str) -> Option<&EnrichedAssociation<'a>> {
        self.associations
            .iter()
            .find(|a| a.association.matches_perceived(name))
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.associations.is_empty()
    }
}
