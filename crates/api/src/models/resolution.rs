use super::schema::{AssociationRole, ClassRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cursor position inside a script. `column` is a byte offset into the line.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Start of the given line.
    pub fn line_start(line: u32) -> Self {
        Self { line, column: 0 }
    }
}

/// Outcome of resolving a dot/index chain.
///
/// Any failure collapses to `{ type_name: None, is_collection: false }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainResult {
    pub type_name: Option<String>,
    pub is_collection: bool,
}

impl ChainResult {
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn new(type_name: impl Into<String>, is_collection: bool) -> Self {
        Self {
            type_name: Some(type_name.into()),
            is_collection,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.type_name.is_some()
    }

    /// The resolved type when it denotes a single entity.
    pub fn single(&self) -> Option<&str> {
        if self.is_collection {
            None
        } else {
            self.type_name.as_deref()
        }
    }
}

/// Which line pattern produced a variable binding.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    AnnotatedAssignment,
    LoopBinding,
    PlainAssignment,
    ParameterAnnotation,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BindingKind::AnnotatedAssignment => "annotated assignment",
            BindingKind::LoopBinding => "loop variable",
            BindingKind::PlainAssignment => "assignment",
            BindingKind::ParameterAnnotation => "parameter",
        };
        f.write_str(label)
    }
}

/// A typed variable binding found above the cursor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub type_name: String,
    pub is_collection: bool,
    pub kind: BindingKind,
    /// Zero-based line of the binding.
    pub line: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleIndex {
    Role1,
    Role2,
}

/// One role of an association, tagged with its position in the pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleInfo<'a> {
    pub index: RoleIndex,
    pub role: &'a AssociationRole,
}

impl<'a> RoleInfo<'a> {
    pub fn class(&self) -> &'a ClassRef {
        &self.role.class
    }

    pub fn is_collection(&self) -> bool {
        self.role.multiple
    }

    pub fn description(&self) -> Option<&'a str> {
        self.role.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_hides_collections() {
        assert_eq!(ChainResult::new("Projekt", false).single(), Some("Projekt"));
        assert_eq!(ChainResult::new("Projekt", true).single(), None);
        assert!(!ChainResult::unresolved().is_resolved());
    }
}
