//! Variable-type tracking and chain resolution over plain script text.
//!
//! # Architecture
//!
//! ```text
//! BindingStrategy (trait)  →  pattern classes combined via or_else()
//!       │
//!       ▼
//! tracker::scan            →  upward line scan, stops at def/class
//!       │
//!       ▼
//! chain::walk              →  left-to-right fold over the schema
//! ```
//!
//! Nothing here returns an error. A chain that can't be typed resolves to
//! [`ChainResult::unresolved`], a variable without a usable binding to `None`.
//!
//! # Usage
//!
//! ```ignore
//! let inference = TypeInference::new(&model, source_text);
//! let result = inference.resolve_chain(position, "projekt.phasen[0]");
//! ```

pub mod chain;
pub mod context;
pub mod patterns;
pub mod strategy;
mod tracker;

pub use chain::{ChainStep, ParsedChain, parse_chain};
pub use context::ScriptSource;
pub use strategy::{BindingStrategy, LineContext, LineMatch, build_binding_matcher};

use crate::schema::SchemaModel;
use chain::ChainState;
use once_cell::sync::Lazy;
use vtscope_api::{Binding, ChainResult, Position};

/// Nesting limit for assignments that resolve through other assignments.
pub const MAX_DEPTH: usize = 20;

static BINDING_MATCHER: Lazy<Box<dyn BindingStrategy>> =
    Lazy::new(|| Box::new(build_binding_matcher()));

/// Type inference over one script against one schema snapshot.
pub struct TypeInference<'a> {
    model: &'a SchemaModel,
    source: ScriptSource<'a>,
}

impl<'a> TypeInference<'a> {
    pub fn new(model: &'a SchemaModel, text: &'a str) -> Self {
        Self {
            model,
            source: ScriptSource::new(text),
        }
    }

    pub fn model(&self) -> &'a SchemaModel {
        self.model
    }

    pub fn source(&self) -> &ScriptSource<'a> {
        &self.source
    }

    /// The nearest binding of `ident` above `position`, within its block.
    pub fn find_binding(&self, position: Position, ident: &str) -> Option<Binding> {
        self.binding_at(position, ident, 0)
    }

    /// The binding `ident` receives on `line` itself, as on a declaration
    /// under the cursor.
    pub fn binding_on_line(&self, line: u32, ident: &str) -> Option<Binding> {
        let text = self.source.line(line)?;
        match tracker::match_line(self, &**BINDING_MATCHER, line, text, ident, 0)? {
            LineMatch::Bound(binding) => Some(binding),
            LineMatch::Untyped(_) => None,
        }
    }

    /// Primary class name of `ident`, if it can be inferred.
    pub fn find_type(&self, position: Position, ident: &str) -> Option<String> {
        self.find_binding(position, ident).map(|b| b.type_name)
    }

    pub fn is_collection(&self, position: Position, ident: &str) -> bool {
        self.find_binding(position, ident)
            .is_some_and(|b| b.is_collection)
    }

    /// Resolve `chain` as written at `position`.
    pub fn resolve_chain(&self, position: Position, chain: &str) -> ChainResult {
        self.resolve_chain_at(chain, position, 0)
    }

    pub(crate) fn binding_at(
        &self,
        position: Position,
        ident: &str,
        depth: usize,
    ) -> Option<Binding> {
        if depth > MAX_DEPTH {
            tracing::debug!("Binding lookup for '{}' exceeded depth {}", ident, MAX_DEPTH);
            return None;
        }
        tracker::scan(self, &**BINDING_MATCHER, position, ident, depth)
    }

    pub(crate) fn resolve_chain_at(
        &self,
        chain: &str,
        position: Position,
        depth: usize,
    ) -> ChainResult {
        let Some(parsed) = parse_chain(chain) else {
            return ChainResult::unresolved();
        };
        let Some(binding) = self.binding_at(position, parsed.base, depth) else {
            return ChainResult::unresolved();
        };
        let Some(class) = self.model.class_by_name(&binding.type_name) else {
            return ChainResult::unresolved();
        };

        chain::walk(
            ChainState::new(class, binding.is_collection),
            &parsed.steps,
            self.model,
        )
        .map(ChainState::into_result)
        .unwrap_or_default()
    }
}

/// Type of `ident` at `position` in `text`.
pub fn find_type(
    model: &SchemaModel,
    text: &str,
    position: Position,
    ident: &str,
) -> Option<String> {
    TypeInference::new(model, text).find_type(position, ident)
}

pub fn is_collection(model: &SchemaModel, text: &str, position: Position, ident: &str) -> bool {
    TypeInference::new(model, text).is_collection(position, ident)
}

/// Resolve a chain at `position` in `text`.
pub fn resolve_chain(
    model: &SchemaModel,
    text: &str,
    position: Position,
    chain: &str,
) -> ChainResult {
    TypeInference::new(model, text).resolve_chain(position, chain)
}
