use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use shared::protocol::Annotation;
use tracing::info;

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a stored annotation for every `GET /predict/semantics`.
    Serve {
        #[arg(long)]
        fixture: PathBuf,
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
        /// Answer every request with this status instead of the fixture.
        #[arg(long)]
        fail_status: Option<u16>,
    },
    /// Decode and validate a fixture, then print a summary.
    Check { fixture: PathBuf },
}

struct FixtureState {
    annotation: Annotation,
    fail_status: Option<StatusCode>,
}

#[derive(Debug, Deserialize)]
struct PredictQuery {
    #[serde(default)]
    utterance: String,
}

fn load_fixture(path: &Path) -> Result<Annotation> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let annotation: Annotation =
        serde_json::from_str(&raw).with_context(|| format!("decoding {}", path.display()))?;
    annotation
        .validate()
        .with_context(|| format!("validating {}", path.display()))?;
    Ok(annotation)
}

fn parse_fail_status(code: Option<u16>) -> Result<Option<StatusCode>> {
    let Some(code) = code else {
        return Ok(None);
    };
    let status = StatusCode::from_u16(code).with_context(|| format!("invalid status {code}"))?;
    if status.is_success() {
        bail!("--fail-status must be a non-2xx status, got {code}");
    }
    Ok(Some(status))
}

fn build_router(state: Arc<FixtureState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/predict/semantics", get(predict_semantics))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn predict_semantics(
    State(state): State<Arc<FixtureState>>,
    Query(query): Query<PredictQuery>,
) -> Response {
    info!(utterance = %query.utterance, "predict request");
    match state.fail_status {
        Some(status) => status.into_response(),
        None => Json(&state.annotation).into_response(),
    }
}

fn summarize(annotation: &Annotation) -> String {
    let mut lines = vec![format!(
        "{} tokens, {} propositions",
        annotation.tokens.len(),
        annotation.propositions.len()
    )];
    for proposition in &annotation.propositions {
        lines.push(format!(
            "  {}: {} spans, {} events{}",
            proposition.sense,
            proposition.spans.len(),
            proposition.events.len(),
            if proposition.main_event.is_some() {
                ", main event"
            } else {
                ""
            }
        ));
    }
    lines.join("\n")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            fixture,
            bind,
            fail_status,
        } => {
            let state = FixtureState {
                annotation: load_fixture(&fixture)?,
                fail_status: parse_fail_status(fail_status)?,
            };
            let app = build_router(Arc::new(state));

            let addr: SocketAddr = bind.parse().with_context(|| format!("bind address {bind}"))?;
            info!(%addr, fixture = %fixture.display(), "fixture server listening");
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
        Command::Check { fixture } => {
            let annotation = load_fixture(&fixture)?;
            println!("{}", summarize(&annotation));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
