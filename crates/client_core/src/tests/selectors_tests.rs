use super::*;
use crate::session::{SessionEvent, SessionStore};
use crate::test_fixtures::{
    arg, linked_annotation, predicate, sale_annotation, sale_annotation_with_modifier,
};
use shared::domain::ViewFlag;

fn store_with(annotation: Annotation) -> SessionStore {
    let mut store = SessionStore::new();
    let generation = store.begin_submission();
    store.dispatch(SessionEvent::SubmitSucceeded {
        generation,
        annotation,
    });
    store
}

fn span_starting_at(proposition: &Proposition, start_offset: usize) -> &RoleSpan {
    proposition
        .spans
        .iter()
        .find(|span| span.start_offset == start_offset)
        .expect("span at offset")
}

fn only(prop_bank: bool, verb_net: bool, modifiers: bool) -> ViewToggles {
    ViewToggles {
        show_prop_bank: prop_bank,
        show_verb_net: verb_net,
        show_modifiers: modifiers,
        ..ViewToggles::default()
    }
}

#[test]
fn clamps_active_index_into_proposition_range() {
    let mut store = store_with(linked_annotation());
    for (stored, expected) in [(0, 0), (1, 1), (2, 1), (99, 1)] {
        store.dispatch(SessionEvent::SetActiveIndex(stored));
        let clamped = clamped_active_index(store.session());
        assert_eq!(clamped, expected, "stored {stored}");
        assert_eq!(clamp_index(clamped, 2), clamped, "idempotent for {stored}");
    }
}

#[test]
fn clamps_to_zero_without_propositions() {
    let mut store = store_with(Annotation {
        tokens: Vec::new(),
        propositions: Vec::new(),
    });
    store.dispatch(SessionEvent::SetActiveIndex(7));
    assert_eq!(clamped_active_index(store.session()), 0);
    assert!(active_proposition(store.session()).is_none());

    let idle = SessionStore::new();
    assert_eq!(clamped_active_index(idle.session()), 0);
    assert!(active_proposition(idle.session()).is_none());
}

#[test]
fn active_proposition_follows_clamped_index() {
    let mut store = store_with(linked_annotation());
    store.dispatch(SessionEvent::SetActiveIndex(5));
    let proposition = active_proposition(store.session()).expect("proposition");
    assert_eq!(proposition.sense, "drop.01");
    assert_eq!(
        proposition_tabs(store.session().annotation().expect("annotation")),
        vec!["eat.01", "drop.01"]
    );
}

#[test]
fn propbank_only_shows_core_propbank_spans() {
    let annotation = sale_annotation();
    let proposition = &annotation.propositions[0];
    let toggles = only(true, false, false);

    let visible: Vec<&str> = visible_role_spans(proposition, &toggles)
        .iter()
        .map(|span| span.text.as_str())
        .collect();
    assert_eq!(visible, vec!["Alice", "sold", "Bob"]);

    let sold = span_starting_at(proposition, 1);
    let chips = span_chips(sold, &proposition.sense, &toggles);
    assert_eq!(
        chips,
        vec![SpanChip {
            kind: ChipKind::Sense,
            text: "sell.01",
            detail: None,
        }]
    );
    assert!(chips.iter().all(|chip| chip.text != "Transfer"));
}

#[test]
fn modifiers_follow_their_own_toggle() {
    let annotation = sale_annotation_with_modifier();
    let proposition = &annotation.propositions[0];

    let without: Vec<&str> = visible_role_spans(proposition, &only(true, false, false))
        .iter()
        .map(|span| span.text.as_str())
        .collect();
    assert_eq!(without, vec!["Alice", "sold", "Bob"]);

    let with: Vec<&str> = visible_role_spans(proposition, &only(false, false, true))
        .iter()
        .map(|span| span.text.as_str())
        .collect();
    assert_eq!(with, vec!["sold", "for $300"]);

    let price = span_starting_at(proposition, 5);
    let chips = span_chips(price, &proposition.sense, &only(true, true, true));
    assert_eq!(
        chips,
        vec![SpanChip {
            kind: ChipKind::Modifier,
            text: "AM-MNR",
            detail: Some("manner"),
        }]
    );
}

#[test]
fn verbnet_only_keeps_predicate_and_verbnet_spans() {
    let annotation = sale_annotation_with_modifier();
    let proposition = &annotation.propositions[0];
    let toggles = only(false, true, false);

    let visible: Vec<&str> = visible_role_spans(proposition, &toggles)
        .iter()
        .map(|span| span.text.as_str())
        .collect();
    assert_eq!(visible, vec!["Alice", "sold", "Bob"]);

    let seller = span_starting_at(proposition, 0);
    let chips = span_chips(seller, &proposition.sense, &toggles);
    assert_eq!(chips.len(), 1);
    assert_eq!(chips[0].kind, ChipKind::VerbNet);
    assert_eq!(chips[0].text, "Agent");
}

#[test]
fn everything_hidden_still_shows_predicate() {
    let annotation = sale_annotation_with_modifier();
    let visible = visible_role_spans(&annotation.propositions[0], &only(false, false, false));
    assert_eq!(visible.len(), 1);
    assert!(visible[0].is_predicate);
}

#[test]
fn truncation_keeps_short_labels() {
    let exact = "x".repeat(50);
    assert_eq!(truncated_label("Alice", 50), "Alice");
    assert_eq!(truncated_label(&exact, 50), exact);
}

#[test]
fn truncation_splits_around_ellipsis() {
    let text: String = ('a'..='z').cycle().take(80).collect();
    let label = truncated_label(&text, 50);

    assert_eq!(label.chars().count(), 50);
    assert_eq!(&label[..24], &text[..24]);
    assert_eq!(&label[24..27], "...");
    assert_eq!(&label[27..], &text[80 - 23..]);
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let text = "é".repeat(60);
    let label = truncated_label(&text, 10);
    assert_eq!(label.chars().count(), 10);
    assert_eq!(label, format!("{}...{}", "é".repeat(4), "é".repeat(3)));
}

#[test]
fn relational_predicates_have_two_display_forms() {
    let cause = predicate("Cause", vec![arg("Event", Some("E1")), arg("Event", Some("E2"))]);
    assert_eq!(predicate_display_form(&cause, false), "E1 causes E2");
    assert_eq!(predicate_display_form(&cause, true), "CAUSE(E1, E2)");

    let cotemporal = predicate(
        "Co-temporal",
        vec![arg("Event", Some("E1")), arg("Event", Some("E2"))],
    );
    assert_eq!(
        predicate_display_form(&cotemporal, false),
        "E1 is co-temporal with E2"
    );
    assert_eq!(
        predicate_display_form(&cotemporal, true),
        "CO-TEMPORAL(E1, E2)"
    );
}

#[test]
fn other_predicates_fall_back_to_argument_list() {
    let transfer = predicate(
        "Transfer",
        vec![
            arg("Agent", Some("Alice")),
            arg("Recipient", Some("Bob")),
            arg("Theme", None),
        ],
    );
    let expected = "Transfer(Agent=Alice, Recipient=Bob, Theme=?)";
    assert_eq!(predicate_display_form(&transfer, false), expected);
    assert_eq!(predicate_display_form(&transfer, true), expected);

    let lonely_cause = predicate("cause", vec![arg("Event", Some("E1"))]);
    assert_eq!(predicate_display_form(&lonely_cause, true), "cause(Event=E1)");
}

#[test]
fn negated_predicates_are_marked() {
    let mut motion = predicate("Motion", vec![arg("Theme", Some("core"))]);
    motion.polarity = false;
    assert_eq!(predicate_display_form(&motion, false), "NOT Motion(Theme=core)");
    assert_eq!(predicate_display_form(&motion, true), "¬Motion(Theme=core)");
}

#[test]
fn semantics_view_respects_toggle() {
    let mut store = store_with(linked_annotation());
    let view = semantics_view(store.session()).expect("semantics");
    assert_eq!(view.events.len(), 3);
    assert_eq!(view.main_event.map(|event| event.name.as_str()), Some("E"));

    store.dispatch(SessionEvent::Toggle(ViewFlag::Semantics));
    assert!(semantics_view(store.session()).is_none());
}
