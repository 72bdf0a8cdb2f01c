mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    config::{apply_env_overrides, load_settings_from},
    load_settings,
    selectors::clamped_active_index,
    AnnotationClient, EventTabEvent, EventTabState, SessionEvent, SessionStore, Settings,
};
use shared::domain::{RequestStatus, ViewFlag, ViewToggles};
use tracing_subscriber::EnvFilter;

/// Annotate one sentence and print the analysis panes as text.
#[derive(Parser, Debug)]
struct Args {
    /// Sentence to analyze; empty picks the next example sentence.
    #[arg(default_value = "")]
    utterance: String,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Proposition tab to show (out-of-range values clamp to the last one).
    #[arg(long, default_value_t = 0)]
    proposition: usize,
    /// Event tab to show within the selected proposition.
    #[arg(long, default_value_t = 0)]
    event: usize,
    #[arg(long)]
    hide_propbank: bool,
    #[arg(long)]
    hide_verbnet: bool,
    #[arg(long)]
    hide_modifiers: bool,
    #[arg(long)]
    hide_semantics: bool,
    /// Read relations as sentences instead of function calls.
    #[arg(long)]
    natural: bool,
    /// Print the raw annotation as JSON instead of the text panes.
    #[arg(long)]
    json: bool,
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
            None => load_settings()?,
        };
        if let Some(url) = &self.server_url {
            settings.service_url = url.clone();
        }
        Ok(settings)
    }

    fn view_toggles(&self) -> ViewToggles {
        let mut toggles = ViewToggles::default();
        toggles.set(ViewFlag::PropBank, !self.hide_propbank);
        toggles.set(ViewFlag::VerbNet, !self.hide_verbnet);
        toggles.set(ViewFlag::Modifiers, !self.hide_modifiers);
        toggles.set(ViewFlag::Semantics, !self.hide_semantics);
        toggles.set(ViewFlag::FunctionalView, !self.natural);
        toggles
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let settings = args.settings()?;
    tracing::debug!(service_url = %settings.service_url, "annotation service");

    let client = AnnotationClient::from_settings(&settings)?;
    let mut store = SessionStore::with_view_toggles(args.view_toggles());
    store.dispatch(SessionEvent::SetUtteranceText(args.utterance.clone()));

    let generation = store.begin_submission();
    let event = client
        .submit_for(store.session().utterance_text(), generation)
        .await;
    store.dispatch(event);

    let session = store.session();
    if session.request_status() == RequestStatus::Failed {
        bail!("{}", session.error_message().unwrap_or("request failed"));
    }

    if args.json {
        if let Some(annotation) = session.annotation() {
            println!("{}", serde_json::to_string_pretty(annotation)?);
        }
        return Ok(());
    }

    store.dispatch(SessionEvent::SetActiveIndex(args.proposition));
    let mut tabs = EventTabState::new();
    tabs.apply(EventTabEvent::SyncProposition(clamped_active_index(
        store.session(),
    )));
    tabs.apply(EventTabEvent::SetActiveIndex(args.event));

    print!(
        "{}",
        render::render_session(store.session(), &tabs, settings.truncate_length)
    );
    Ok(())
}
