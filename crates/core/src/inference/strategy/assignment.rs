use super::{BindingStrategy, LineContext, LineMatch};
use crate::inference::patterns::{ASSIGNMENT, strip_comment};
use vtscope_api::{Binding, BindingKind, Position};

/// `x = chain`, resolved against the bindings above this line.
pub struct PlainAssignment;

impl BindingStrategy for PlainAssignment {
    fn match_line(&self, ctx: &LineContext<'_>) -> Option<LineMatch> {
        let caps = ASSIGNMENT.captures(strip_comment(ctx.text))?;
        if &caps["name"] != ctx.ident {
            return None;
        }

        let value = ctx.inference.resolve_chain_at(
            &caps["expr"],
            Position::line_start(ctx.line),
            ctx.depth + 1,
        );
        Some(match value.type_name {
            Some(type_name) => LineMatch::Bound(Binding {
                type_name,
                is_collection: value.is_collection,
                kind: BindingKind::PlainAssignment,
                line: ctx.line,
            }),
            None => LineMatch::Untyped(BindingKind::PlainAssignment),
        })
    }
}
