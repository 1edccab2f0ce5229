//! Dot/index chain parsing and the left-to-right walk over the schema.
//!
//! `projekt.phasen[0].aktiv` becomes a base identifier plus
//! `[Segment("phasen"), Index, Segment("aktiv")]`. The walk folds the steps
//! over a running `(class, is_collection)` state with `try_fold`, so the
//! first failing step short-circuits the whole chain.

use super::patterns::{CHAIN, CHAIN_STEP};
use crate::schema::{RoleView, SchemaModel, role_info};
use vtscope_api::{ChainResult, Class};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStep<'a> {
    Segment(&'a str),
    Index,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChain<'a> {
    pub base: &'a str,
    pub steps: Vec<ChainStep<'a>>,
}

/// Split `text` into base identifier and steps. `None` when it is not a chain.
pub fn parse_chain(text: &str) -> Option<ParsedChain<'_>> {
    let text = text.trim();
    if !CHAIN.is_match(text) {
        return None;
    }
    let base_len = text
        .find(|c: char| c == '.' || c == '[')
        .unwrap_or(text.len());
    let (base, rest) = text.split_at(base_len);

    let steps = CHAIN_STEP
        .captures_iter(rest)
        .map(|caps| match caps.name("seg") {
            Some(seg) => ChainStep::Segment(seg.as_str()),
            None => ChainStep::Index,
        })
        .collect();

    Some(ParsedChain { base, steps })
}

/// Running state of a chain walk.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChainState<'m> {
    pub class: &'m Class,
    pub is_collection: bool,
}

impl<'m> ChainState<'m> {
    pub fn new(class: &'m Class, is_collection: bool) -> Self {
        Self {
            class,
            is_collection,
        }
    }

    /// Apply one step. `None` ends the walk as unresolvable.
    pub fn advance(self, step: &ChainStep<'_>, model: &'m SchemaModel) -> Option<Self> {
        match step {
            ChainStep::Index => self
                .is_collection
                .then_some(Self::new(self.class, false)),
            ChainStep::Segment(_) if self.is_collection => None,
            ChainStep::Segment(name) => self.navigate(name, model),
        }
    }

    fn navigate(self, name: &str, model: &'m SchemaModel) -> Option<Self> {
        let flat = model.flatten(self.class);

        // Scalar members (String, Boolean, ...) fall through to associations.
        if let Some(member) = flat.find_member(name) {
            if let Some(target) = model.class_by_name(&member.member.type_name) {
                return Some(Self::new(target, false));
            }
        }

        let assoc = flat.find_association(name)?;
        let far = role_info(assoc.association, self.class, model, RoleView::Target)?;
        let target = model.resolve_ref(far.class())?;
        Some(Self::new(target, far.is_collection()))
    }

    pub fn into_result(self) -> ChainResult {
        ChainResult::new(self.class.name.clone(), self.is_collection)
    }
}

/// Walk `steps` from `seed`. Any failing step yields `None`.
pub(crate) fn walk<'m>(
    seed: ChainState<'m>,
    steps: &[ChainStep<'_>],
    model: &'m SchemaModel,
) -> Option<ChainState<'m>> {
    steps
        .iter()
        .try_fold(seed, |state, step| state.advance(step, model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_segments_and_subscripts() {
        let parsed = parse_chain("projekt.phasen[0].aktiv").unwrap();
        assert_eq!(parsed.base, "projekt");
        assert_eq!(
            parsed.steps,
            vec![
                ChainStep::Segment("phasen"),
                ChainStep::Index,
                ChainStep::Segment("aktiv")
            ]
        );
    }

    #[test]
    fn bare_identifier_has_no_steps() {
        let parsed = parse_chain(" phasen ").unwrap();
        assert_eq!(parsed.base, "phasen");
        assert!(parsed.steps.is_empty());
    }

    #[test]
    fn subscript_contents_are_opaque() {
        let parsed = parse_chain("phasen[i + 1]").unwrap();
        assert_eq!(parsed.steps, vec![ChainStep::Index]);
    }

    #[test]
    fn rejects_non_chains() {
        assert!(parse_chain("").is_none());
        assert!(parse_chain("[0].x").is_none());
        assert!(parse_chain("foo().bar").is_none());
        assert!(parse_chain("a.b.").is_none());
        assert!(parse_chain("1abc").is_none());
    }
}
