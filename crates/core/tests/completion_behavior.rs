//! Completion and hover projection over resolved chains.

mod common;

use common::{PREAMBLE, vertec_model};
use vtscope_api::{BindingKind, DisplayLanguage, Position};
use vtscope_core::TypeInference;
use vtscope_core::completion::{CandidateKind, CompletionCandidate, complete};
use vtscope_core::inspect::{HoverTarget, hover_target};

/// Complete at the end of the last line of `script`.
fn complete_at_end(script: &str, language: DisplayLanguage) -> Vec<CompletionCandidate> {
    let model = vertec_model();
    let inference = TypeInference::new(&model, script);
    let line = script.lines().count() as u32 - 1;
    let column = script.lines().last().map_or(0, |l| l.len()) as u32;
    complete(&inference, Position::new(line, column), language)
}

fn labels(candidates: &[CompletionCandidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.label.as_str()).collect()
}

#[test]
fn own_items_come_before_inherited_ones() {
    let script = format!("{}projekt.", PREAMBLE);
    let candidates = complete_at_end(&script, DisplayLanguage::De);

    assert_eq!(
        labels(&candidates),
        vec!["Waehrung", "Code", "Aktiv", "Bemerkung", "Phasen", "Projektleiter"]
    );

    let waehrung = &candidates[0];
    assert!(!waehrung.inherited);
    assert_eq!(waehrung.source_class, "Projekt");

    let code = &candidates[1];
    assert!(code.inherited);
    assert_eq!(code.source_class, "Projektbase");
    assert_eq!(code.kind, CandidateKind::Member);
}

#[test]
fn association_detail_marks_collections() {
    let script = format!("{}projekt.pha", PREAMBLE);
    let candidates = complete_at_end(&script, DisplayLanguage::De);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].kind, CandidateKind::Association);
    assert_eq!(candidates[0].detail, "ProjektPhase[]");
    assert_eq!(candidates[0].alt_label.as_deref(), Some("Phases"));
}

#[test]
fn chain_ending_in_collection_offers_nothing() {
    let script = format!("{}projekt.phasen.", PREAMBLE);
    assert!(complete_at_end(&script, DisplayLanguage::De).is_empty());
}

#[test]
fn indexed_collection_offers_element_members() {
    let script = format!("{}projekt.phasen[0].", PREAMBLE);
    let candidates = complete_at_end(&script, DisplayLanguage::De);
    assert!(labels(&candidates).contains(&"Status"));
    assert!(labels(&candidates).contains(&"Verantwortlicher"));
}

#[test]
fn unresolvable_chain_offers_nothing() {
    let script = format!("{}niemand.", PREAMBLE);
    assert!(complete_at_end(&script, DisplayLanguage::De).is_empty());
}

#[test]
fn partial_matches_either_language() {
    let script = format!("{}projekt.curr", PREAMBLE);
    let candidates = complete_at_end(&script, DisplayLanguage::En);
    assert_eq!(labels(&candidates), vec!["Currency"]);
    assert_eq!(candidates[0].alt_label.as_deref(), Some("Waehrung"));
}

#[test]
fn type_comment_completes_class_names() {
    let script = "x = argobject  # type: Projekt";
    let candidates = complete_at_end(script, DisplayLanguage::De);
    let names = labels(&candidates);
    assert!(names.contains(&"Projekt"));
    assert!(names.contains(&"Projektbase"));
    assert!(!names.contains(&"Waehrung"));
    assert!(candidates.iter().all(|c| c.kind == CandidateKind::Class));
}

#[test]
fn hover_on_member_segment() {
    let model = vertec_model();
    let script = format!("{}x = projekt.phasen[0].status", PREAMBLE);
    let inference = TypeInference::new(&model, &script);
    let column = script.lines().nth(1).unwrap().find("status").unwrap() as u32 + 2;

    match hover_target(&inference, Position::new(1, column)) {
        Some(HoverTarget::Member { owner, member, .. }) => {
            assert_eq!(owner.name, "ProjektPhase");
            assert_eq!(member.member.type_name, "Integer");
        }
        other => panic!("unexpected hover target: {:?}", other),
    }
}

#[test]
fn hover_on_inherited_association() {
    let model = vertec_model();
    let script = format!("{}projekt.projektleiter", PREAMBLE);
    let inference = TypeInference::new(&model, &script);

    match hover_target(&inference, Position::new(1, 10)) {
        Some(HoverTarget::Association {
            owner,
            association,
            far,
        }) => {
            assert_eq!(owner.name, "Projekt");
            assert_eq!(association.source_class, "Projektbase");
            assert_eq!(far.unwrap().class().name, "Projektbearbeiter");
        }
        other => panic!("unexpected hover target: {:?}", other),
    }
}

#[test]
fn hover_on_variable_and_class_name() {
    let model = vertec_model();
    let script = format!("{}projekt.code\nWaehrung", PREAMBLE);
    let inference = TypeInference::new(&model, &script);

    match hover_target(&inference, Position::new(1, 2)) {
        Some(HoverTarget::Variable { name, binding }) => {
            assert_eq!(name, "projekt");
            assert_eq!(binding.type_name, "Projekt");
            assert_eq!(binding.kind, BindingKind::AnnotatedAssignment);
        }
        other => panic!("unexpected hover target: {:?}", other),
    }

    assert!(matches!(
        hover_target(&inference, Position::new(2, 3)),
        Some(HoverTarget::Class(class)) if class.id == common::WAEHRUNG
    ));
}
