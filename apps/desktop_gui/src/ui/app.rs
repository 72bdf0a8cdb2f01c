use std::time::Duration;

use client_core::{
    selectors::{active_proposition, clamped_active_index, semantics_view},
    Settings, SubmissionPolicy,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{domain::ViewToggles, error::SERVICE_UNAVAILABLE_MESSAGE};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::{UiIntent, ViewState},
};
use crate::ui::panels;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub settings: Settings,
    pub view_toggles: ViewToggles,
}

struct StatusBanner {
    message: String,
    fatal: bool,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: ViewState,
    policy: SubmissionPolicy,
    truncate_length: usize,
    input: String,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: ViewState::new(startup.view_toggles),
            policy: SubmissionPolicy::from_settings(&startup.settings),
            truncate_length: startup.settings.truncate_length,
            input: String::new(),
            status: "Backend worker starting...".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => self.show_error(err),
                UiEvent::Session(event) => {
                    self.view.apply_session_event(event);
                }
            }
        }
    }

    fn show_error(&mut self, err: UiError) {
        tracing::warn!(
            category = ?err.category(),
            context = ?err.context(),
            "{}",
            err.message()
        );
        self.status = err.message().to_string();
        self.status_banner = Some(StatusBanner {
            message: err.message().to_string(),
            fatal: err.is_fatal(),
        });
    }

    fn apply_intents(&mut self, intents: Vec<UiIntent>) {
        if intents.is_empty() {
            return;
        }
        let commands = self.view.apply_intents(intents, &self.policy);
        for cmd in commands {
            if let Err(reason) = dispatch_backend_command(&self.cmd_tx, cmd) {
                self.view.abandon_submission(SERVICE_UNAVAILABLE_MESSAGE);
                self.show_error(UiError::from_message(UiErrorContext::Submit, reason));
            }
        }
    }

    fn show_banner(&mut self, ctx: &egui::Context) {
        let Some(banner) = &self.status_banner else {
            return;
        };
        let mut dismissed = false;
        egui::TopBottomPanel::top("status_banner").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    egui::Color32::from_rgb(0xd9, 0x48, 0x48),
                    banner.message.as_str(),
                );
                if !banner.fatal && ui.small_button("Dismiss").clicked() {
                    dismissed = true;
                }
            });
        });
        if dismissed {
            self.status_banner = None;
        }
    }

    fn show_workspace(&mut self, ctx: &egui::Context) -> Vec<UiIntent> {
        let mut intents = Vec::new();
        let blocked = self
            .status_banner
            .as_ref()
            .is_some_and(|banner| banner.fatal);

        egui::TopBottomPanel::top("input_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.add_enabled_ui(!blocked, |ui| {
                intents.extend(panels::input_bar(
                    ui,
                    &mut self.input,
                    self.policy.max_length(),
                ));
            });
            intents.extend(panels::options_panel(ui, self.view.session().view_toggles()));
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(egui::RichText::new(&self.status).weak());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let session = self.view.session();
            panels::status_line(ui, session);

            let Some(annotation) = session.annotation() else {
                return;
            };
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let active = clamped_active_index(session);
                    intents.extend(panels::token_bar(ui, annotation, active));
                    ui.separator();
                    intents.extend(panels::proposition_tab_strip(ui, annotation, active));

                    let Some(proposition) = active_proposition(session) else {
                        ui.label(egui::RichText::new("No predicates found.").weak());
                        return;
                    };
                    ui.add_space(6.0);
                    panels::role_labels(
                        ui,
                        proposition,
                        session.view_toggles(),
                        self.truncate_length,
                    );

                    if let Some(view) = semantics_view(session) {
                        ui.separator();
                        ui.heading("Semantics");
                        intents.extend(panels::semantics(
                            ui,
                            proposition,
                            &view,
                            self.view.tabs(),
                            session.view_toggles().functional_view,
                        ));
                    }
                });
        });
        intents
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_banner(ctx);
        let intents = self.show_workspace(ctx);
        self.apply_intents(intents);

        if self.view.session().is_pending() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
