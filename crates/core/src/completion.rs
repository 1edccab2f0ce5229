//! Completion candidates for the text before the cursor.

use crate::inference::TypeInference;
use crate::inference::patterns::{TRAILING_CHAIN, TYPE_POSITION};
use crate::schema::{RoleView, SchemaModel, role_info};
use serde::Serialize;
use vtscope_api::{Class, DisplayLanguage, Position, names_match};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Member,
    Association,
    Class,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionCandidate {
    pub label: String,
    pub alt_label: Option<String>,
    pub kind: CandidateKind,
    /// Member type, or target class with `[]` for collections.
    pub detail: String,
    pub documentation: Option<String>,
    pub inherited: bool,
    pub source_class: String,
}

/// What the text before the cursor asks to complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext<'a> {
    /// `<chain>.<partial>`
    Navigation { chain: &'a str, partial: &'a str },
    /// A class name inside a `# type:` or `# param` comment.
    TypeName { partial: &'a str },
}

/// Classify the text left of the cursor on its line.
pub fn completion_context(prefix: &str) -> Option<CompletionContext<'_>> {
    if let Some(caps) = TYPE_POSITION.captures(prefix) {
        let partial = caps.name("partial").map_or("", |m| m.as_str());
        return Some(CompletionContext::TypeName { partial });
    }
    let caps = TRAILING_CHAIN.captures(prefix)?;
    Some(CompletionContext::Navigation {
        chain: caps.name("chain")?.as_str(),
        partial: caps.name("partial").map_or("", |m| m.as_str()),
    })
}

/// Candidates at `position`, whose column is a byte offset into the line.
///
/// Empty when the chain can't be resolved or ends on a collection.
pub fn complete(
    inference: &TypeInference<'_>,
    position: Position,
    language: DisplayLanguage,
) -> Vec<CompletionCandidate> {
    let Some(line) = inference.source().line(position.line) else {
        return Vec::new();
    };
    let col = (position.column as usize).min(line.len());
    let Some(prefix) = line.get(..col) else {
        return Vec::new();
    };

    match completion_context(prefix) {
        Some(CompletionContext::TypeName { partial }) => {
            class_candidates(inference.model(), partial, language)
        }
        Some(CompletionContext::Navigation { chain, partial }) => {
            let result = inference.resolve_chain(position, chain);
            let Some(type_name) = result.single() else {
                tracing::trace!("No completions for '{}': {:?}", chain, result);
                return Vec::new();
            };
            let model = inference.model();
            model
                .class_by_name(type_name)
                .map(|class| candidates_for(class, model, language))
                .unwrap_or_default()
                .into_iter()
                .filter(|c| {
                    starts_with_ci(&c.label, partial)
                        || c.alt_label
                            .as_deref()
                            .is_some_and(|alt| starts_with_ci(alt, partial))
                })
                .collect()
        }
        None => Vec::new(),
    }
}

/// Everything navigable from a single `class`, own items first.
pub fn candidates_for(
    class: &Class,
    model: &SchemaModel,
    language: DisplayLanguage,
) -> Vec<CompletionCandidate> {
    let flat = model.flatten(class);
    let mut out = Vec::with_capacity(flat.members.len() + flat.associations.len());

    for m in &flat.members {
        let member = m.member;
        let (label, alt) = labels(language, &member.name, member.alt_name.as_deref());
        out.push(CompletionCandidate {
            label,
            alt_label: alt,
            kind: CandidateKind::Member,
            detail: member.type_name.clone(),
            documentation: member.description.clone(),
            inherited: m.source_id != class.id,
            source_class: m.source_class.to_string(),
        });
    }

    for a in &flat.associations {
        let assoc = a.association;
        let Some(far) = role_info(assoc, class, model, RoleView::Target) else {
            continue;
        };
        if !far.role.navigable {
            continue;
        }
        let target = model
            .resolve_ref(far.class())
            .map_or(far.class().name.as_str(), |c| c.name.as_str());
        let detail = if far.is_collection() {
            format!("{}[]", target)
        } else {
            target.to_string()
        };
        let (label, alt) = labels(
            language,
            assoc.perceived(),
            assoc.alt_perceived_name.as_deref(),
        );
        out.push(CompletionCandidate {
            label,
            alt_label: alt,
            kind: CandidateKind::Association,
            detail,
            documentation: far
                .description()
                .or(assoc.description.as_deref())
                .map(str::to_string),
            inherited: a.source_id != class.id,
            source_class: a.source_class.to_string(),
        });
    }

    out
}

fn class_candidates(
    model: &SchemaModel,
    partial: &str,
    language: DisplayLanguage,
) -> Vec<CompletionCandidate> {
    model
        .classes_with_prefix(partial)
        .into_iter()
        .filter(|c| !c.hidden)
        .map(|class| {
            let (label, alt) = labels(language, &class.name, class.alt_name.as_deref());
            CompletionCandidate {
                label,
                alt_label: alt,
                kind: CandidateKind::Class,
                detail: class
                    .superclass
                    .as_ref()
                    .map(|s| format!("extends {}", s.name))
                    .unwrap_or_default(),
                documentation: class.description.clone(),
                inherited: false,
                source_class: class.name.clone(),
            }
        })
        .collect()
}

fn labels(
    language: DisplayLanguage,
    primary: &str,
    alternate: Option<&str>,
) -> (String, Option<String>) {
    let label = language.pick(primary, alternate);
    let other = language.other().pick(primary, alternate);
    let alt = (!names_match(label, other)).then(|| other.to_string());
    (label.to_string(), alt)
}

fn starts_with_ci(text: &str, prefix: &str) -> bool {
    text.to_lowercase().starts_with(&prefix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_context() {
        assert_eq!(
            completion_context("    projekt.phasen[0].ak"),
            Some(CompletionContext::Navigation {
                chain: "projekt.phasen[0]",
                partial: "ak"
            })
        );
        assert_eq!(
            completion_context("x = projekt."),
            Some(CompletionContext::Navigation {
                chain: "projekt",
                partial: ""
            })
        );
        assert_eq!(completion_context("x = projekt"), None);
    }

    #[test]
    fn type_comment_context() {
        assert_eq!(
            completion_context("p = argobject  # type: Proj"),
            Some(CompletionContext::TypeName { partial: "Proj" })
        );
        assert_eq!(
            completion_context("# param phasen: list[Pro"),
            Some(CompletionContext::TypeName { partial: "Pro" })
        );
    }

    #[test]
    fn labels_follow_display_language() {
        assert_eq!(
            labels(DisplayLanguage::En, "Projekt", Some("Project")),
            ("Project".to_string(), Some("Projekt".to_string()))
        );
        assert_eq!(labels(DisplayLanguage::De, "Code", None), ("Code".to_string(), None));
    }
}
