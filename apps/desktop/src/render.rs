//! Plain-text panes for one session: sentence bar, proposition tabs, role labels, semantics.

use std::fmt::Write as _;

use client_core::{
    navigation::{linked_event_target, proposition_for_token},
    selectors::{
        active_proposition, clamped_active_index, predicate_display_form, proposition_tabs,
        semantics_view, span_chips, truncated_label, visible_role_spans, ChipKind,
        SemanticsView,
    },
    EventTabState, Session,
};
use shared::{
    domain::{RequestStatus, ViewToggles},
    protocol::{Annotation, Event, Proposition},
};

pub fn render_session(session: &Session, tabs: &EventTabState, truncate_len: usize) -> String {
    match session.request_status() {
        RequestStatus::Idle => "No sentence submitted yet.\n".to_string(),
        RequestStatus::Pending => "Analyzing...\n".to_string(),
        RequestStatus::Failed => format!(
            "{}\n",
            session.error_message().unwrap_or("Request failed.")
        ),
        RequestStatus::Succeeded => {
            let Some(annotation) = session.annotation() else {
                return String::new();
            };
            let active = clamped_active_index(session);
            let mut out = String::new();
            out.push_str(&render_tokens(annotation, active));
            out.push('\n');
            out.push_str(&render_proposition_tabs(annotation, active));
            if let Some(proposition) = active_proposition(session) {
                out.push_str(&render_role_labels(
                    proposition,
                    session.view_toggles(),
                    truncate_len,
                ));
                if let Some(view) = semantics_view(session) {
                    out.push_str(&render_semantics(
                        proposition,
                        &view,
                        tabs,
                        session.view_toggles().functional_view,
                    ));
                }
            } else {
                out.push_str("No predicates found.\n");
            }
            out
        }
    }
}

/// Predicate tokens are bracketed with their label; the active one is starred.
pub fn render_tokens(annotation: &Annotation, active: usize) -> String {
    let parts: Vec<String> = annotation
        .tokens
        .iter()
        .map(|token| match proposition_for_token(token) {
            Some(target) => {
                let marker = if target == active { "*" } else { "" };
                match &token.label {
                    Some(label) => format!("[{}|{label}]{marker}", token.text),
                    None => format!("[{}]{marker}", token.text),
                }
            }
            None => token.text.clone(),
        })
        .collect();
    parts.join(" ")
}

pub fn render_proposition_tabs(annotation: &Annotation, active: usize) -> String {
    let tabs: Vec<String> = proposition_tabs(annotation)
        .into_iter()
        .enumerate()
        .map(|(idx, sense)| {
            if idx == active {
                format!("<{sense}>")
            } else {
                sense.to_string()
            }
        })
        .collect();
    format!("Propositions: {}\n", tabs.join(" | "))
}

pub fn render_role_labels(
    proposition: &Proposition,
    toggles: &ViewToggles,
    truncate_len: usize,
) -> String {
    let mut out = String::new();
    for span in visible_role_spans(proposition, toggles) {
        let chips: Vec<String> = span_chips(span, &proposition.sense, toggles)
            .into_iter()
            .map(|chip| {
                let tag = match chip.kind {
                    ChipKind::Sense => "sense",
                    ChipKind::VerbNet => "vn",
                    ChipKind::Modifier => "mod",
                    ChipKind::PropBank => "pb",
                };
                match chip.detail {
                    Some(detail) => format!("{tag}:{} ({detail})", chip.text),
                    None => format!("{tag}:{}", chip.text),
                }
            })
            .collect();
        let _ = writeln!(
            out,
            "  {:<width$} {}",
            truncated_label(&span.text, truncate_len),
            chips.join("  "),
            width = 20
        );
    }
    out
}

fn render_event(out: &mut String, proposition: &Proposition, event: &Event, functional: bool) {
    for predicate in &event.predicates {
        let _ = writeln!(out, "    {}", predicate_display_form(predicate, functional));
        for argument in &predicate.args {
            if let Some(target) = linked_event_target(argument, proposition) {
                let _ = writeln!(
                    out,
                    "      {} -> event #{target} ({})",
                    argument.arg_type, proposition.events[target].name
                );
            }
        }
    }
}

pub fn render_semantics(
    proposition: &Proposition,
    view: &SemanticsView<'_>,
    tabs: &EventTabState,
    functional: bool,
) -> String {
    let mut out = String::new();
    if let Some(main_event) = view.main_event {
        let _ = writeln!(out, "Main event {}:", main_event.name);
        render_event(&mut out, proposition, main_event, functional);
    }
    if view.events.is_empty() {
        return out;
    }

    let active = tabs.clamped(view.events.len());
    let names: Vec<String> = view
        .events
        .iter()
        .enumerate()
        .map(|(idx, event)| {
            if idx == active {
                format!("<{}>", event.name)
            } else {
                event.name.clone()
            }
        })
        .collect();
    let _ = writeln!(out, "Events: {}", names.join(" | "));
    render_event(&mut out, proposition, &view.events[active], functional);
    out
}
