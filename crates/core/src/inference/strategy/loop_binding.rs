use super::{BindingStrategy, LineContext, LineMatch};
use crate::inference::patterns::{FOR_LOOP, strip_comment};
use vtscope_api::{Binding, BindingKind, Position};

/// `for x in chain:`. The loop variable is one element of the iterated chain.
pub struct LoopBinding;

impl BindingStrategy for LoopBinding {
    fn match_line(&self, ctx: &LineContext<'_>) -> Option<LineMatch> {
        let caps = FOR_LOOP.captures(strip_comment(ctx.text))?;
        if &caps["name"] != ctx.ident {
            return None;
        }

        let iterated = ctx.inference.resolve_chain_at(
            &caps["expr"],
            Position::line_start(ctx.line),
            ctx.depth + 1,
        );
        Some(match iterated.type_name {
            Some(type_name) => LineMatch::Bound(Binding {
                type_name,
                is_collection: false,
                kind: BindingKind::LoopBinding,
                line: ctx.line,
            }),
            None => LineMatch::Untyped(BindingKind::LoopBinding),
        })
    }
}
