//! Folding the English class set into the German one.

use std::collections::{HashMap, HashSet};
use vtscope_api::{Association, Class, Member};

/// Merge the two language variants of a class set.
///
/// The German set defines the universe; English-only classes are dropped.
/// Duplicate ids keep their first occurrence.
pub fn merge_languages(german: Vec<Class>, english: Vec<Class>) -> Vec<Class> {
    let english_by_id: HashMap<i64, Class> = english
        .into_iter()
        .map(|class| (class.id, class))
        .rev()
        .collect();

    let mut seen = HashSet::with_capacity(german.len());
    let mut merged = Vec::with_capacity(german.len());
    let mut unmatched = 0usize;

    for mut class in german {
        if !seen.insert(class.id) {
            continue;
        }
        match english_by_id.get(&class.id) {
            Some(en) => apply_alternates(&mut class, en),
            None => unmatched += 1,
        }
        merged.push(class);
    }

    if unmatched > 0 {
        tracing::debug!("{} classes have no English counterpart", unmatched);
    }
    merged
}

fn apply_alternates(class: &mut Class, en: &Class) {
    if class.alt_name.is_none() && en.name != class.name {
        class.alt_name = Some(en.name.clone());
    }

    for assoc in &mut class.associations {
        if let Some(en_assoc) = en.associations.iter().find(|a| a.name == assoc.name) {
            merge_association(assoc, en_assoc);
        }
    }

    if members_line_up(&class.members, &en.members) {
        for (member, en_member) in class.members.iter_mut().zip(&en.members) {
            if member.alt_name.is_none() && en_member.name != member.name {
                member.alt_name = Some(en_member.name.clone());
            }
        }
    }
}

fn merge_association(assoc: &mut Association, en: &Association) {
    if assoc.alt_perceived_name.is_none() && !en.perceived_name.is_empty() {
        assoc.alt_perceived_name = Some(en.perceived_name.clone());
    }
    if assoc.description.is_none() {
        assoc.description = en.description.clone();
    }
}

// Member names are translated, so only position and declared type identify them.
fn members_line_up(de: &[Member], en: &[Member]) -> bool {
    de.len() == en.len()
        && de
            .iter()
            .zip(en)
            .all(|(a, b)| a.type_name.eq_ignore_ascii_case(&b.type_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtscope_api::{AssociationRole, ClassRef};

    fn phasen(perceived: &str) -> Association {
        Association::new(
            "ProjektPhasen",
            perceived,
            AssociationRole::new(ClassRef::new(1, "Projekt"), "projekt"),
            AssociationRole::new(ClassRef::new(2, "ProjektPhase"), "phasen").many(),
        )
    }

    #[test]
    fn english_names_become_alternates() {
        let de = vec![
            Class::new(1, "Projekt")
                .with_member(Member::new("Code", "String"))
                .with_member(Member::new("Aktiv", "Boolean"))
                .with_association(phasen("Phasen")),
        ];
        let en = vec![
            Class::new(1, "Project")
                .with_member(Member::new("Code", "String"))
                .with_member(Member::new("Active", "Boolean"))
                .with_association(phasen("Phases")),
        ];

        let merged = merge_languages(de, en);
        let projekt = &merged[0];
        assert_eq!(projekt.alt_name.as_deref(), Some("Project"));
        assert_eq!(projekt.members[0].alt_name, None);
        assert_eq!(projekt.members[1].alt_name.as_deref(), Some("Active"));
        assert_eq!(
            projekt.associations[0].alt_perceived_name.as_deref(),
            Some("Phases")
        );
    }

    #[test]
    fn unmatched_association_keeps_no_alternate() {
        let de = vec![Class::new(1, "Projekt").with_association(phasen("Phasen"))];
        let en = vec![Class::new(1, "Project")];

        let merged = merge_languages(de, en);
        assert_eq!(merged[0].associations[0].alt_perceived_name, None);
    }

    #[test]
    fn misaligned_members_are_left_alone() {
        let de = vec![
            Class::new(1, "Projekt")
                .with_member(Member::new("Code", "String"))
                .with_member(Member::new("Aktiv", "Boolean")),
        ];
        let en = vec![Class::new(1, "Project").with_member(Member::new("Active", "Boolean"))];

        let merged = merge_languages(de, en);
        assert!(merged[0].members.iter().all(|m| m.alt_name.is_none()));
    }

    #[test]
    fn duplicates_and_english_only_classes_are_dropped() {
        let de = vec![
            Class::new(1, "Projekt"),
            Class::new(2, "Phase"),
            Class::new(1, "ProjektDuplikat"),
        ];
        let en = vec![Class::new(1, "Project"), Class::new(99, "EnglishOnly")];

        let merged = merge_languages(de, en);
        let names: Vec<_> = merged.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Projekt", "Phase"]);
    }
}
