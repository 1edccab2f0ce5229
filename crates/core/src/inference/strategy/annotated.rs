use super::{BindingStrategy, LineContext, LineMatch};
use crate::inference::patterns::{ANNOTATED_DECL, TYPE_COMMENT, strip_comment};
use vtscope_api::BindingKind;

/// `x = ...  # type: T` and `x: T = ...`. Always wins over other forms.
pub struct AnnotatedAssignment;

impl BindingStrategy for AnnotatedAssignment {
    fn match_line(&self, ctx: &LineContext<'_>) -> Option<LineMatch> {
        let caps = TYPE_COMMENT
            .captures(ctx.text)
            .or_else(|| ANNOTATED_DECL.captures(strip_comment(ctx.text)))?;
        if &caps["name"] != ctx.ident {
            return None;
        }
        Some(ctx.bind_type_expr(&caps["ty"], BindingKind::AnnotatedAssignment))
    }
}
