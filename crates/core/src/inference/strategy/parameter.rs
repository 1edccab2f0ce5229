use super::{BindingStrategy, LineContext, LineMatch};
use crate::inference::patterns::{PARAM_COMMENT, signature_hint};
use vtscope_api::BindingKind;

/// `# param x: T` comments and `def f(x: T)` signature hints.
pub struct ParameterAnnotation;

impl BindingStrategy for ParameterAnnotation {
    fn match_line(&self, ctx: &LineContext<'_>) -> Option<LineMatch> {
        if let Some(caps) = PARAM_COMMENT.captures(ctx.text) {
            if &caps["name"] == ctx.ident {
                return Some(ctx.bind_type_expr(&caps["ty"], BindingKind::ParameterAnnotation));
            }
            return None;
        }
        signature_hint(ctx.text, ctx.ident)
            .map(|ty| ctx.bind_type_expr(ty, BindingKind::ParameterAnnotation))
    }
}
