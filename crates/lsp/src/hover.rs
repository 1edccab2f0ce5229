use crate::LspServer;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use vtscope_api::{DisplayLanguage, Translation};
use vtscope_core::TypeInference;
use vtscope_core::inspect::{HoverTarget, hover_target};

pub async fn hover(server: &LspServer, params: HoverParams) -> Result<Option<Hover>> {
    let uri = params.text_document_position_params.text_document.uri;
    let position = params.text_document_position_params.position;
    let Some(doc) = server.documents.get(&uri).map(|d| d.value().clone()) else {
        return Ok(None);
    };

    let Some(engine) = server.engine().await else {
        return Ok(None);
    };
    let Some(model) = engine.snapshot().await else {
        tracing::debug!("hover before schema load: {}", uri);
        return Ok(None);
    };
    let language = server.language().await;
    let table = engine.translation_table().await;

    let inference = TypeInference::new(&model, &doc.content);
    let Some(target) = hover_target(&inference, doc.position(position)) else {
        return Ok(None);
    };
    let translation = table.translate(target.name());
    let hover_text = build_hover_text(&target, language, translation.as_ref());

    Ok(Some(Hover {
        contents: HoverContents::Scalar(MarkedString::String(hover_text)),
        range: None,
    }))
}

pub(crate) fn build_hover_text(
    target: &HoverTarget<'_>,
    language: DisplayLanguage,
    translation: Option<&Translation>,
) -> String {
    let mut hover_text = match target {
        HoverTarget::Member {
            owner,
            member,
            target,
        } => {
            let m = member.member;
            let mut text = format!(
                "**{}**: `{}`\n\n",
                language.pick(&m.name, m.alt_name.as_deref()),
                m.type_name
            );
            text.push_str(&format!(
                "Member of `{}`",
                language.pick(&owner.name, owner.alt_name.as_deref())
            ));
            if member.source_id != owner.id {
                text.push_str(&format!(" (inherited from `{}`)", member.source_class));
            }
            text.push_str("\n\n");
            if let Some(class) = target {
                text.push_str(&format!("*Object of class `{}`*\n\n", class.name));
            }
            if let Some(doc) = &m.description {
                text.push_str(doc);
                text.push_str("\n\n");
            }
            text
        }
        HoverTarget::Association {
            owner,
            association,
            far,
        } => {
            let a = association.association;
            let name = language.pick(a.perceived(), a.alt_perceived_name.as_deref());
            let mut text = match far {
                Some(far) if far.is_collection() => {
                    format!("**{}**: `{}[]`\n\n", name, far.class().name)
                }
                Some(far) => format!("**{}**: `{}`\n\n", name, far.class().name),
                None => format!("**{}**\n\n", name),
            };
            text.push_str(&format!(
                "Association `{}` of `{}`",
                a.name,
                language.pick(&owner.name, owner.alt_name.as_deref())
            ));
            if association.source_id != owner.id {
                text.push_str(&format!(" (inherited from `{}`)", association.source_class));
            }
            text.push_str("\n\n");
            if let Some(doc) = far
                .as_ref()
                .and_then(|f| f.description())
                .or(a.description.as_deref())
            {
                text.push_str(doc);
                text.push_str("\n\n");
            }
            text
        }
        HoverTarget::Variable { name, binding } => {
            let suffix = if binding.is_collection { "[]" } else { "" };
            format!(
                "**{}**: `{}{}`\n\n*{} on line {}*\n\n",
                name,
                binding.type_name,
                suffix,
                binding.kind,
                binding.line + 1
            )
        }
        HoverTarget::Class(class) => {
            let mut text = format!("**{}** *class*\n\n", class.name);
            if let Some(alt) = &class.alt_name {
                text.push_str(&format!("Also known as `{}`\n\n", alt));
            }
            if let Some(superclass) = &class.superclass {
                text.push_str(&format!("Extends `{}`\n\n", superclass.name));
            }
            if let Some(doc) = &class.description {
                text.push_str(doc);
                text.push_str("\n\n");
            }
            text
        }
    };

    if let Some(t) = translation {
        hover_text.push_str(&format!(
            "*{}: `{}`*",
            t.target_language.as_str().to_uppercase(),
            t.target
        ));
    }
    hover_text.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtscope_api::{
        Association, AssociationRole, Binding, BindingKind, Class, ClassRef,
        EnrichedAssociation, EnrichedMember, Member, RoleIndex, RoleInfo, TranslationKind,
    };

    fn projekt() -> Class {
        Class::new(3, "Projekt")
            .with_alt_name("Project")
            .with_description("Ein Kundenprojekt")
    }

    #[test]
    fn hover_variable_shows_type_and_origin() {
        let target = HoverTarget::Variable {
            name: "phasen".into(),
            binding: Binding {
                type_name: "Projektphase".into(),
                is_collection: true,
                kind: BindingKind::AnnotatedAssignment,
                line: 3,
            },
        };
        let text = build_hover_text(&target, DisplayLanguage::De, None);
        assert!(text.contains("`Projektphase[]`"));
        assert!(text.contains("annotated assignment on line 4"));
    }

    #[test]
    fn hover_member_marks_inherited_source() {
        let owner = projekt();
        let member = Member::new("code", "String").with_alt_name("code_en");
        let target = HoverTarget::Member {
            owner: &owner,
            member: EnrichedMember {
                member: &member,
                source_class: "ProjektBase",
                source_id: 2,
            },
            target: None,
        };
        let text = build_hover_text(&target, DisplayLanguage::En, None);
        assert!(text.starts_with("**code_en**: `String`"));
        assert!(text.contains("Member of `Project`"));
        assert!(text.contains("inherited from `ProjektBase`"));
    }

    #[test]
    fn hover_association_shows_collection_target() {
        let owner = projekt();
        let role1 = AssociationRole::new(owner.to_ref(), "projekt");
        let role2 = AssociationRole::new(ClassRef::new(4, "Projektphase"), "phasen")
            .many()
            .with_description("Alle Phasen");
        let assoc = Association::new("ProjektPhasen", "phasen", role1, role2.clone());
        let target = HoverTarget::Association {
            owner: &owner,
            association: EnrichedAssociation {
                association: &assoc,
                source_class: "Projekt",
                source_id: 3,
            },
            far: Some(RoleInfo {
                index: RoleIndex::Role2,
                role: &role2,
            }),
        };
        let text = build_hover_text(&target, DisplayLanguage::De, None);
        assert!(text.starts_with("**phasen**: `Projektphase[]`"));
        assert!(text.contains("Association `ProjektPhasen` of `Projekt`"));
        assert!(text.contains("Alle Phasen"));
        assert!(!text.contains("inherited"));
    }

    #[test]
    fn hover_class_appends_translation() {
        let class = projekt();
        let translation = Translation {
            source: "Projekt".into(),
            target: "Project".into(),
            target_language: DisplayLanguage::En,
            kind: TranslationKind::Class,
        };
        let text = build_hover_text(
            &HoverTarget::Class(&class),
            DisplayLanguage::De,
            Some(&translation),
        );
        assert!(text.contains("Also known as `Project`"));
        assert!(text.contains("Ein Kundenprojekt"));
        assert!(text.ends_with("*EN: `Project`*"));
    }
}
