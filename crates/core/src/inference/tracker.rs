//! Backward scan for the binding of a variable.

use super::TypeInference;
use super::patterns::is_boundary;
use super::strategy::{BindingStrategy, LineContext, LineMatch, ParameterAnnotation};
use vtscope_api::{Binding, Position};

/// Scan upward from the line above `position` for the binding of `ident`.
///
/// The first line recognised by `matcher` decides: a typed binding is
/// returned, an untyped one ends the scan with `None`. A `def`/`class` line
/// is only checked for a signature hint and always ends the scan.
pub(crate) fn scan(
    inference: &TypeInference<'_>,
    matcher: &dyn BindingStrategy,
    position: Position,
    ident: &str,
    depth: usize,
) -> Option<Binding> {
    for (line, text) in inference.source().lines_above(position.line) {
        match match_line(inference, matcher, line, text, ident, depth) {
            Some(LineMatch::Bound(binding)) => return Some(binding),
            Some(LineMatch::Untyped(kind)) => {
                tracing::trace!("{} on line {} binds '{}' without a type", kind, line, ident);
                return None;
            }
            None if is_boundary(text) => return None,
            None => {}
        }
    }
    None
}

/// Apply `matcher` to a single line. On a `def`/`class` line only the
/// signature is checked, gathered across continuation lines.
pub(crate) fn match_line(
    inference: &TypeInference<'_>,
    matcher: &dyn BindingStrategy,
    line: u32,
    text: &str,
    ident: &str,
    depth: usize,
) -> Option<LineMatch> {
    if is_boundary(text) {
        let signature = inference.source().logical_line(line);
        let ctx = LineContext {
            text: &signature,
            line,
            ident,
            inference,
            depth,
        };
        return match ParameterAnnotation.match_line(&ctx) {
            Some(bound @ LineMatch::Bound(_)) => Some(bound),
            _ => None,
        };
    }

    let ctx = LineContext {
        text,
        line,
        ident,
        inference,
        depth,
    };
    matcher.match_line(&ctx)
}
