//! Near/far role resolution for two-sided associations.
//!
//! Which role is "mine" depends on the viewing class. The decision is made
//! once here and handed out as a [`RolePair`]; call sites pick a side with
//! [`RoleView`] and never inspect `role1`/`role2` themselves.

use super::SchemaModel;
use super::inheritance::Lineage;
use vtscope_api::{Association, Class, RoleIndex, RoleInfo};

/// Which end of the pair a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleView {
    /// The far end: the class reached by navigating the association, with
    /// its multiplicity as seen from the viewing class.
    Target,
    /// The viewing class's own end.
    Source,
}

/// How the viewing class was matched against the roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleMatch {
    Exact,
    /// Matched through an ancestor that declares the association.
    Inherited { via: i64 },
    /// Neither role matched; role1 was taken as the far end.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolePair<'a> {
    pub near: RoleInfo<'a>,
    pub far: RoleInfo<'a>,
    pub matched: RoleMatch,
}

impl<'a> RolePair<'a> {
    pub fn view(&self, view: RoleView) -> RoleInfo<'a> {
        match view {
            RoleView::Target => self.far,
            RoleView::Source => self.near,
        }
    }
}

/// Decide which role is near and which is far for `viewing`.
///
/// Tries the viewing class, then its ancestors nearest first. When nothing
/// matches, role1 is treated as the far end. That fallback keeps completion
/// working on odd data but can silently pick the wrong side, so it is logged.
///
/// Returns `None` when the association lacks either role.
pub fn resolve_pair<'a>(
    association: &'a Association,
    viewing: &Class,
    model: &SchemaModel,
) -> Option<RolePair<'a>> {
    let (Some(role1), Some(role2)) = (association.role1.as_ref(), association.role2.as_ref())
    else {
        tracing::debug!(
            target: "vtscope::roles",
            "Association {} has incomplete role data",
            association.name
        );
        return None;
    };

    let first = RoleInfo {
        index: RoleIndex::Role1,
        role: role1,
    };
    let second = RoleInfo {
        index: RoleIndex::Role2,
        role: role2,
    };

    for (depth, class) in Lineage::new(viewing, model).enumerate() {
        let matched = if depth == 0 {
            RoleMatch::Exact
        } else {
            RoleMatch::Inherited { via: class.id }
        };
        // Self-associations match both; role1 stays near.
        if role1.class.refers_to(class) {
            return Some(RolePair {
                near: first,
                far: second,
                matched,
            });
        }
        if role2.class.refers_to(class) {
            return Some(RolePair {
                near: second,
                far: first,
                matched,
            });
        }
    }

    tracing::debug!(
        target: "vtscope::roles",
        "No role of association {} matches {} or its ancestors; falling back to role1",
        association.name,
        viewing.name
    );
    Some(RolePair {
        near: second,
        far: first,
        matched: RoleMatch::Fallback,
    })
}

/// Role metadata of `association` as seen from `viewing`.
pub fn role_info<'a>(
    association: &'a Association,
    viewing: &Class,
    model: &SchemaModel,
    view: RoleView,
) -> Option<RoleInfo<'a>> {
    resolve_pair(association, viewing, model).map(|pair| pair.view(view))
}
