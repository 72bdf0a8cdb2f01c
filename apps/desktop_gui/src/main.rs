mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{
    config::{apply_env_overrides, load_settings_from},
    load_settings, Settings,
};
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::{ViewFlag, ViewToggles};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{DesktopGuiApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Open with the options panel expanded.
    #[arg(long)]
    options: bool,
    /// Start in the natural-language reading of relations.
    #[arg(long)]
    natural: bool,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                let mut settings = load_settings_from(path)
                    .with_context(|| format!("loading {}", path.display()))?;
                apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
                settings
            }
            None => load_settings().context("loading settings")?,
        };
        if let Some(url) = &self.server_url {
            settings.service_url = url.clone();
        }
        Ok(settings)
    }

    fn startup_config(&self) -> Result<StartupConfig> {
        let mut view_toggles = ViewToggles::default();
        view_toggles.set(ViewFlag::OptionsPanel, self.options);
        view_toggles.set(ViewFlag::FunctionalView, !self.natural);
        Ok(StartupConfig {
            settings: self.settings()?,
            view_toggles,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let startup = Args::parse().startup_config()?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(startup.settings.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Semantic Parse Viewer")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Semantic Parse Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow!("gui exited with error: {err}"))
}
