//! Session state store: one analysis session and its transition table.

use shared::{
    domain::{RequestStatus, ViewFlag, ViewToggles},
    protocol::Annotation,
};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SetUtteranceText(String),
    SubmitRequested,
    SubmitSucceeded {
        generation: u64,
        annotation: Annotation,
    },
    SubmitFailed {
        generation: u64,
        message: String,
    },
    /// Stored as given; clamping happens in the selectors.
    SetActiveIndex(usize),
    Toggle(ViewFlag),
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetUtteranceText(_) => "set_utterance_text",
            Self::SubmitRequested => "submit_requested",
            Self::SubmitSucceeded { .. } => "submit_succeeded",
            Self::SubmitFailed { .. } => "submit_failed",
            Self::SetActiveIndex(_) => "set_active_index",
            Self::Toggle(_) => "toggle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// A lifecycle event issued under an older generation; the session is unchanged.
    StaleResponse { generation: u64, current: u64 },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    utterance_text: String,
    request_status: RequestStatus,
    error_message: Option<String>,
    annotation: Option<Annotation>,
    active_index: usize,
    view_toggles: ViewToggles,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utterance_text(&self) -> &str {
        &self.utterance_text
    }

    pub fn request_status(&self) -> RequestStatus {
        self.request_status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn annotation(&self) -> Option<&Annotation> {
        self.annotation.as_ref()
    }

    /// Raw stored index, possibly out of range for the current annotation.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn view_toggles(&self) -> &ViewToggles {
        &self.view_toggles
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.request_status == RequestStatus::Pending
    }

    pub fn apply(&mut self, event: SessionEvent) -> Transition {
        match event {
            SessionEvent::SetUtteranceText(text) => {
                self.utterance_text = text;
            }
            SessionEvent::SubmitRequested => {
                self.generation += 1;
                self.request_status = RequestStatus::Pending;
                self.error_message = None;
                self.annotation = None;
            }
            SessionEvent::SubmitSucceeded {
                generation,
                annotation,
            } => {
                if generation != self.generation {
                    return self.stale(generation);
                }
                self.request_status = RequestStatus::Succeeded;
                self.error_message = None;
                self.annotation = Some(annotation);
                self.active_index = 0;
            }
            SessionEvent::SubmitFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    return self.stale(generation);
                }
                self.request_status = RequestStatus::Failed;
                self.annotation = None;
                self.error_message = Some(message);
            }
            SessionEvent::SetActiveIndex(index) => {
                self.active_index = index;
            }
            SessionEvent::Toggle(flag) => {
                self.view_toggles.toggle(flag);
            }
        }
        Transition::Applied
    }

    fn stale(&self, generation: u64) -> Transition {
        Transition::StaleResponse {
            generation,
            current: self.generation,
        }
    }
}

/// Owns the one live [`Session`]; every mutation goes through [`SessionStore::dispatch`].
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Session,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view_toggles(view_toggles: ViewToggles) -> Self {
        Self {
            session: Session {
                view_toggles,
                ..Session::default()
            },
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> Transition {
        let name = event.name();
        let transition = self.session.apply(event);
        match transition {
            Transition::Applied => {
                debug!(
                    event = name,
                    status = self.session.request_status.label(),
                    "session transition"
                );
            }
            Transition::StaleResponse {
                generation,
                current,
            } => {
                debug!(
                    event = name,
                    generation, current, "discarded stale annotation response"
                );
            }
        }
        transition
    }

    /// Dispatches [`SessionEvent::SubmitRequested`] and returns the generation the
    /// resulting request must be tagged with.
    pub fn begin_submission(&mut self) -> u64 {
        self.dispatch(SessionEvent::SubmitRequested);
        self.session.generation
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
