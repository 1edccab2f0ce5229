//! Binding strategies, one per line pattern class.
//!
//! Each strategy implements [`BindingStrategy`] and they are combined with
//! `or_else()` into a single matcher whose order is the priority order.

mod annotated;
mod assignment;
mod combinator;
mod loop_binding;
mod parameter;

pub use annotated::AnnotatedAssignment;
pub use assignment::PlainAssignment;
pub use combinator::OrElse;
pub use loop_binding::LoopBinding;
pub use parameter::ParameterAnnotation;

use super::TypeInference;
use super::patterns::parse_type_expr;
use vtscope_api::{Binding, BindingKind};

/// One line under inspection while scanning upward.
#[derive(Clone, Copy)]
pub struct LineContext<'a> {
    pub text: &'a str,
    pub line: u32,
    /// The variable being looked up.
    pub ident: &'a str,
    pub inference: &'a TypeInference<'a>,
    pub depth: usize,
}

impl<'a> LineContext<'a> {
    /// Turn a type expression into a binding of the given kind.
    fn bind_type_expr(&self, expr: &str, kind: BindingKind) -> LineMatch {
        parse_type_expr(expr)
            .and_then(|(name, is_collection)| {
                let class = self.inference.model().class_by_name(name)?;
                Some(LineMatch::Bound(Binding {
                    type_name: class.name.clone(),
                    is_collection,
                    kind,
                    line: self.line,
                }))
            })
            .unwrap_or(LineMatch::Untyped(kind))
    }
}

/// Outcome of a strategy that recognised the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    Bound(Binding),
    /// The line binds the variable but its type can't be determined.
    Untyped(BindingKind),
}

/// A line pattern class.
///
/// Returns `None` when the line does not bind `ctx.ident` in this form.
pub trait BindingStrategy: Send + Sync {
    fn match_line(&self, ctx: &LineContext<'_>) -> Option<LineMatch>;

    /// If `self` does not recognise the line, try `other`.
    fn or_else<S: BindingStrategy>(self, other: S) -> OrElse<Self, S>
    where
        Self: Sized,
    {
        OrElse::new(self, other)
    }
}

/// Build the per-line matcher in priority order.
pub fn build_binding_matcher() -> impl BindingStrategy {
    AnnotatedAssignment
        .or_else(LoopBinding)
        .or_else(PlainAssignment)
        .or_else(ParameterAnnotation)
}
