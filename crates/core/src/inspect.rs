//! What the cursor is pointing at, for hover.

use crate::inference::TypeInference;
use crate::inference::patterns::CHAIN;
use crate::schema::{RoleView, role_info};
use crate::util::word_span;
use vtscope_api::{Binding, Class, EnrichedAssociation, EnrichedMember, Position, RoleInfo};

#[derive(Debug, Clone)]
pub enum HoverTarget<'a> {
    Member {
        owner: &'a Class,
        member: EnrichedMember<'a>,
        /// The class the member's declared type names, if any.
        target: Option<&'a Class>,
    },
    Association {
        owner: &'a Class,
        association: EnrichedAssociation<'a>,
        far: Option<RoleInfo<'a>>,
    },
    Variable {
        name: String,
        binding: Binding,
    },
    Class(&'a Class),
}

impl HoverTarget<'_> {
    /// The name under the cursor as declared in the schema.
    pub fn name(&self) -> &str {
        match self {
            HoverTarget::Member { member, .. } => &member.member.name,
            HoverTarget::Association { association, .. } => association.association.perceived(),
            HoverTarget::Variable { name, .. } => name,
            HoverTarget::Class(class) => &class.name,
        }
    }
}

/// Identify the schema element at `position` (byte column).
pub fn hover_target<'a>(
    inference: &TypeInference<'a>,
    position: Position,
) -> Option<HoverTarget<'a>> {
    let line = inference.source().line(position.line)?;
    let (start, end) = word_span(line, position.column as usize)?;
    let word = &line[start..end];
    let before = &line[..start];

    if let Some(chain_text) = before.strip_suffix('.').and_then(trailing_chain) {
        return segment_target(inference, position, chain_text, word);
    }

    let binding = inference
        .find_binding(position, word)
        .or_else(|| inference.binding_on_line(position.line, word));
    if let Some(binding) = binding {
        return Some(HoverTarget::Variable {
            name: word.to_string(),
            binding,
        });
    }

    inference.model().class_by_name(word).map(HoverTarget::Class)
}

fn segment_target<'a>(
    inference: &TypeInference<'a>,
    position: Position,
    chain: &str,
    segment: &str,
) -> Option<HoverTarget<'a>> {
    let model = inference.model();
    let result = inference.resolve_chain(position, chain);
    let owner = model.class_by_name(result.single()?)?;
    let flat = model.flatten(owner);

    if let Some(member) = flat.find_member(segment) {
        return Some(HoverTarget::Member {
            owner,
            member: *member,
            target: model.class_by_name(&member.member.type_name),
        });
    }

    let association = *flat.find_association(segment)?;
    let far = role_info(association.association, owner, model, RoleView::Target);
    Some(HoverTarget::Association {
        owner,
        association,
        far,
    })
}

/// Longest chain that ends exactly at the end of `text`.
fn trailing_chain(text: &str) -> Option<&str> {
    text.char_indices()
        .map(|(i, _)| i)
        .filter(|&i| !text[..i].chars().next_back().is_some_and(continues_expression))
        .map(|i| &text[i..])
        .find(|candidate| CHAIN.is_match(candidate))
}

fn continues_expression(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | ']' | ')')
}
