//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{
    lifecycle_event, AnnotationService, HttpAnnotationService, MissingAnnotationService,
    SessionEvent, Settings,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

fn build_service(settings: &Settings, ui_tx: &Sender<UiEvent>) -> Arc<dyn AnnotationService> {
    match HttpAnnotationService::from_settings(settings) {
        Ok(service) => {
            info!(endpoint = %service.endpoint(), "annotation service configured");
            Arc::new(service)
        }
        Err(err) => {
            warn!("annotation service unavailable: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("invalid service url: {err}"),
            )));
            Arc::new(MissingAnnotationService)
        }
    }
}

/// Hands a settled result to the UI without blocking a runtime worker.
/// A full or closed queue drops the result.
fn forward_result(ui_tx: &Sender<UiEvent>, generation: u64, event: SessionEvent) -> bool {
    match ui_tx.try_send(UiEvent::Session(event)) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            warn!(generation, "ui event queue full; dropping annotation result");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            warn!(generation, "ui event channel closed; dropping annotation result");
            false
        }
    }
}

/// Spawns the worker thread. Each command runs as its own task, so a slow
/// request never blocks a newer one; stale results are dropped by the store.
pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let service = build_service(&settings, &ui_tx);
        let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

        for cmd in cmd_rx.iter() {
            match cmd {
                BackendCommand::Annotate {
                    utterance,
                    generation,
                } => {
                    let service = Arc::clone(&service);
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        info!(generation, chars = utterance.chars().count(), "submitting utterance");
                        let result = service.annotate(&utterance).await;
                        let event = lifecycle_event(generation, result);
                        forward_result(&ui_tx, generation, event);
                    });
                }
            }
        }
        info!("backend command queue closed; worker exiting");
    });
}
