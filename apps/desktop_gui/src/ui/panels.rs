//! Stateless analysis panels. Each returns the intents raised during the frame.

use client_core::{
    navigation::{linked_event_target, token_activation},
    selectors::{
        predicate_display_form, proposition_tabs, span_chips, truncated_label,
        visible_role_spans, ChipKind, SemanticsView,
    },
    EventTabEvent, EventTabState, Session, SessionEvent,
};
use eframe::egui;
use shared::{
    domain::{RequestStatus, ViewFlag, ViewToggles},
    protocol::{Annotation, Event, Proposition},
};

use crate::controller::reducer::UiIntent;

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(0xd9, 0x48, 0x48);
const ACTIVE_PREDICATE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x3b, 0x82, 0xf6);

fn chip_color(kind: ChipKind) -> egui::Color32 {
    match kind {
        ChipKind::Sense => egui::Color32::from_rgb(0x6d, 0x28, 0xd9),
        ChipKind::VerbNet => egui::Color32::from_rgb(0x04, 0x78, 0x57),
        ChipKind::Modifier => egui::Color32::from_rgb(0xb4, 0x53, 0x09),
        ChipKind::PropBank => egui::Color32::from_rgb(0x1d, 0x4e, 0xd8),
    }
}

pub fn input_bar(ui: &mut egui::Ui, input: &mut String, max_length: usize) -> Vec<UiIntent> {
    let mut intents = Vec::new();
    ui.horizontal(|ui| {
        let width = (ui.available_width() - 90.0).max(120.0);
        let edit = ui.add(
            egui::TextEdit::singleline(input)
                .hint_text("Enter a sentence, or submit empty for an example")
                .desired_width(width),
        );
        if edit.changed() {
            intents.push(UiIntent::Session(SessionEvent::SetUtteranceText(
                input.clone(),
            )));
        }
        let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Analyze").clicked() || entered {
            intents.push(UiIntent::Submit);
        }
    });
    ui.small(
        egui::RichText::new(format!("{} / {max_length} characters", input.chars().count()))
            .weak(),
    );
    intents
}

pub fn status_line(ui: &mut egui::Ui, session: &Session) {
    match session.request_status() {
        RequestStatus::Idle => {
            ui.label(egui::RichText::new("Submit a sentence to see its analysis.").weak());
        }
        RequestStatus::Pending => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Analyzing...");
            });
        }
        RequestStatus::Failed => {
            if let Some(message) = session.error_message() {
                ui.colored_label(ERROR_COLOR, message);
            }
        }
        RequestStatus::Succeeded => {}
    }
}

/// Options toggle plus, when open, one checkbox per annotation layer.
pub fn options_panel(ui: &mut egui::Ui, toggles: &ViewToggles) -> Vec<UiIntent> {
    let mut intents = Vec::new();
    ui.horizontal_wrapped(|ui| {
        let label = if toggles.show_options_panel {
            "Hide options"
        } else {
            "Options"
        };
        if ui.button(label).clicked() {
            intents.push(UiIntent::Session(SessionEvent::Toggle(ViewFlag::OptionsPanel)));
        }
        if !toggles.show_options_panel {
            return;
        }
        for flag in ViewFlag::ALL {
            if flag == ViewFlag::OptionsPanel {
                continue;
            }
            let mut value = toggles.get(flag);
            if ui.checkbox(&mut value, flag.label()).changed() {
                intents.push(UiIntent::Session(SessionEvent::Toggle(flag)));
            }
        }
    });
    intents
}

/// The sentence with predicate tokens as buttons; the active predicate is highlighted.
pub fn token_bar(ui: &mut egui::Ui, annotation: &Annotation, active: usize) -> Vec<UiIntent> {
    let mut intents = Vec::new();
    ui.horizontal_wrapped(|ui| {
        for token in &annotation.tokens {
            match token_activation(token) {
                Some(event) => {
                    let is_active = token.token_index == active;
                    let mut text = egui::RichText::new(token.text.as_str()).strong();
                    if is_active {
                        text = text.color(ACTIVE_PREDICATE_COLOR);
                    }
                    let response = ui.selectable_label(is_active, text);
                    let response = match &token.label {
                        Some(label) => response.on_hover_text(label.as_str()),
                        None => response,
                    };
                    if response.clicked() {
                        intents.push(UiIntent::Session(event));
                    }
                }
                None => {
                    ui.label(token.text.as_str());
                }
            }
        }
    });
    intents
}

pub fn proposition_tab_strip(
    ui: &mut egui::Ui,
    annotation: &Annotation,
    active: usize,
) -> Vec<UiIntent> {
    let mut intents = Vec::new();
    ui.horizontal_wrapped(|ui| {
        for (idx, sense) in proposition_tabs(annotation).into_iter().enumerate() {
            if ui.selectable_label(idx == active, sense).clicked() && idx != active {
                intents.push(UiIntent::Session(SessionEvent::SetActiveIndex(idx)));
            }
        }
    });
    intents
}

pub fn role_labels(
    ui: &mut egui::Ui,
    proposition: &Proposition,
    toggles: &ViewToggles,
    truncate_len: usize,
) {
    let spans = visible_role_spans(proposition, toggles);
    if spans.is_empty() {
        ui.label(egui::RichText::new("No labels visible with the current options.").weak());
        return;
    }
    egui::Grid::new(("role_labels", proposition.sense.as_str()))
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for span in spans {
                ui.label(truncated_label(&span.text, truncate_len))
                    .on_hover_text(span.text.as_str());
                ui.horizontal_wrapped(|ui| {
                    for chip in span_chips(span, &proposition.sense, toggles) {
                        let response = ui.label(
                            egui::RichText::new(chip.text)
                                .monospace()
                                .color(chip_color(chip.kind)),
                        );
                        if let Some(detail) = chip.detail {
                            response.on_hover_text(detail);
                        }
                    }
                });
                ui.end_row();
            }
        });
}

fn event_body(
    ui: &mut egui::Ui,
    proposition: &Proposition,
    event: &Event,
    functional: bool,
) -> Vec<UiIntent> {
    let mut intents = Vec::new();
    for predicate in &event.predicates {
        ui.horizontal_wrapped(|ui| {
            ui.monospace(predicate_display_form(predicate, functional));
            for argument in &predicate.args {
                if let Some(target) = linked_event_target(argument, proposition) {
                    let name = &proposition.events[target].name;
                    if ui
                        .link(format!("{} \u{2192} {name}", argument.arg_type))
                        .clicked()
                    {
                        intents.push(UiIntent::FollowLink(argument.clone()));
                    }
                }
            }
        });
    }
    if event.predicates.is_empty() {
        ui.label(egui::RichText::new("No predicates.").weak());
    }
    intents
}

/// Main event pane followed by the event tab strip of the active proposition.
pub fn semantics(
    ui: &mut egui::Ui,
    proposition: &Proposition,
    view: &SemanticsView<'_>,
    tabs: &EventTabState,
    functional: bool,
) -> Vec<UiIntent> {
    let mut intents = Vec::new();
    if let Some(main_event) = view.main_event {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new(format!("Main event {}", main_event.name)).strong());
            intents.extend(event_body(ui, proposition, main_event, functional));
        });
    }
    if view.events.is_empty() {
        return intents;
    }

    let active = tabs.clamped(view.events.len());
    ui.horizontal_wrapped(|ui| {
        for (idx, event) in view.events.iter().enumerate() {
            if ui.selectable_label(idx == active, event.name.as_str()).clicked() {
                intents.push(UiIntent::EventTab(EventTabEvent::SetActiveIndex(idx)));
            }
        }
    });
    egui::Frame::group(ui.style()).show(ui, |ui| {
        intents.extend(event_body(ui, proposition, &view.events[active], functional));
    });
    intents
}
