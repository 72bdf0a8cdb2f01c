//! Applies panel intents and backend results to the session store and event tabs.

use client_core::{
    selectors::{active_proposition, clamped_active_index},
    EventTabEvent, EventTabState, Session, SessionEvent,
    SessionStore, SubmissionPolicy, Transition,
};
use shared::{domain::ViewToggles, protocol::Argument};

use crate::backend_bridge::commands::BackendCommand;

/// What a panel asks for; applied after the frame has been drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum UiIntent {
    Session(SessionEvent),
    EventTab(EventTabEvent),
    /// Linked-event argument activated in the semantics pane of the active proposition.
    FollowLink(Argument),
    Submit,
}

#[derive(Debug, Default)]
pub struct ViewState {
    store: SessionStore,
    tabs: EventTabState,
}

impl ViewState {
    pub fn new(view_toggles: ViewToggles) -> Self {
        Self {
            store: SessionStore::with_view_toggles(view_toggles),
            tabs: EventTabState::new(),
        }
    }

    pub fn session(&self) -> &Session {
        self.store.session()
    }

    pub fn tabs(&self) -> &EventTabState {
        &self.tabs
    }

    pub fn apply_session_event(&mut self, event: SessionEvent) -> Transition {
        let fresh_annotation = matches!(event, SessionEvent::SubmitSucceeded { .. });
        let transition = self.store.dispatch(event);
        if fresh_annotation && transition == Transition::Applied {
            self.tabs = EventTabState::new();
        }
        self.tabs.apply(EventTabEvent::SyncProposition(clamped_active_index(
            self.store.session(),
        )));
        transition
    }

    /// Starts a submission for the current utterance. Input that fails the policy
    /// settles immediately; otherwise the returned command must be queued.
    pub fn start_submission(&mut self, policy: &SubmissionPolicy) -> Option<BackendCommand> {
        let generation = self.store.begin_submission();
        match policy.prepare(self.store.session().utterance_text()) {
            Ok(utterance) => Some(BackendCommand::Annotate {
                utterance,
                generation,
            }),
            Err(err) => {
                tracing::info!(error = %err, "submission rejected before sending");
                self.apply_session_event(SessionEvent::SubmitFailed {
                    generation,
                    message: err.user_message(),
                });
                None
            }
        }
    }

    /// Fails the in-flight submission when its command never reached the worker.
    pub fn abandon_submission(&mut self, message: impl Into<String>) {
        let generation = self.store.session().generation();
        self.apply_session_event(SessionEvent::SubmitFailed {
            generation,
            message: message.into(),
        });
    }

    pub fn apply_intents(
        &mut self,
        intents: impl IntoIterator<Item = UiIntent>,
        policy: &SubmissionPolicy,
    ) -> Vec<BackendCommand> {
        let mut commands = Vec::new();
        for intent in intents {
            match intent {
                UiIntent::Session(event) => {
                    self.apply_session_event(event);
                }
                UiIntent::EventTab(event) => self.tabs.apply(event),
                UiIntent::FollowLink(argument) => {
                    if let Some(proposition) = active_proposition(self.store.session()) {
                        self.tabs.follow(&argument, proposition);
                    }
                }
                UiIntent::Submit => commands.extend(self.start_submission(policy)),
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{domain::RequestStatus, protocol::Annotation};

    const TWO_PROPOSITIONS: &str = r#"{
        "tokens": [
            {"index": 0, "isPredicate": false, "text": "John"},
            {"index": 0, "isPredicate": true, "label": "eat.01", "text": "ate"},
            {"index": 0, "isPredicate": false, "text": "an apple and"},
            {"index": 1, "isPredicate": true, "label": "drop.01", "text": "dropped"}
        ],
        "props": [
            {"sense": "eat.01", "spans": [],
             "events": [{"name": "E1", "predicates": []}, {"name": "E2", "predicates": []},
                        {"name": "E3", "predicates": []}]},
            {"sense": "drop.01", "spans": [],
             "events": [{"name": "E1", "predicates": []}, {"name": "E2", "predicates": []}]}
        ]
    }"#;

    fn annotation() -> Annotation {
        serde_json::from_str(TWO_PROPOSITIONS).expect("fixture")
    }

    fn policy(max: usize) -> SubmissionPolicy {
        SubmissionPolicy::new(max, vec!["Alice sold Bob her laptop for $300".to_string()])
    }

    fn loaded() -> ViewState {
        let mut state = ViewState::default();
        let generation = state.store.begin_submission();
        state.apply_session_event(SessionEvent::SubmitSucceeded {
            generation,
            annotation: annotation(),
        });
        state
    }

    #[test]
    fn submit_intent_queues_annotate_command() {
        let mut state = ViewState::default();
        let commands = state.apply_intents(
            [
                UiIntent::Session(SessionEvent::SetUtteranceText("John ate".into())),
                UiIntent::Submit,
            ],
            &policy(256),
        );

        assert_eq!(state.session().request_status(), RequestStatus::Pending);
        match commands.as_slice() {
            [BackendCommand::Annotate {
                utterance,
                generation,
            }] => {
                assert_eq!(utterance, "John ate");
                assert_eq!(*generation, 1);
            }
            _ => panic!("expected exactly one annotate command"),
        }
    }

    #[test]
    fn empty_input_submits_next_example() {
        let mut state = ViewState::default();
        let commands = state.apply_intents([UiIntent::Submit], &policy(256));
        match commands.as_slice() {
            [BackendCommand::Annotate { utterance, .. }] => {
                assert_eq!(utterance, "Alice sold Bob her laptop for $300")
            }
            _ => panic!("expected exactly one annotate command"),
        }
    }

    #[test]
    fn too_long_input_fails_without_command() {
        let mut state = ViewState::default();
        let commands = state.apply_intents(
            [
                UiIntent::Session(SessionEvent::SetUtteranceText("far too long".into())),
                UiIntent::Submit,
            ],
            &policy(4),
        );

        assert!(commands.is_empty());
        assert_eq!(state.session().request_status(), RequestStatus::Failed);
        assert_eq!(
            state.session().error_message(),
            Some("Sorry, the maximum sentence length is currently 4 characters. Please try a shorter sentence.")
        );
    }

    #[test]
    fn selecting_another_proposition_resets_event_tab() {
        let mut state = loaded();
        state.apply_intents(
            [UiIntent::EventTab(EventTabEvent::SetActiveIndex(2))],
            &policy(256),
        );
        assert_eq!(state.tabs().active_index(), 2);

        state.apply_intents(
            [UiIntent::Session(SessionEvent::SetActiveIndex(1))],
            &policy(256),
        );
        assert_eq!(state.tabs().proposition(), 1);
        assert_eq!(state.tabs().active_index(), 0);
        assert_eq!(state.session().active_index(), 1);
    }

    #[test]
    fn event_tab_change_leaves_proposition_alone() {
        let mut state = loaded();
        state.apply_intents(
            [UiIntent::EventTab(EventTabEvent::SetActiveIndex(1))],
            &policy(256),
        );
        assert_eq!(state.session().active_index(), 0);
        assert_eq!(state.tabs().active_index(), 1);
    }

    fn link_to(target: Option<usize>) -> Argument {
        Argument {
            arg_type: "Event".to_string(),
            value: Some("e2".to_string()),
            linked_event_index: target,
        }
    }

    #[test]
    fn following_link_switches_event_tab_only() {
        let mut state = loaded();
        state.apply_intents([UiIntent::FollowLink(link_to(Some(2)))], &policy(256));
        assert_eq!(state.tabs().active_index(), 2);
        assert_eq!(state.session().active_index(), 0);
    }

    #[test]
    fn unlinked_or_dangling_argument_is_ignored() {
        let mut state = loaded();
        state.apply_intents(
            [
                UiIntent::EventTab(EventTabEvent::SetActiveIndex(1)),
                UiIntent::FollowLink(link_to(None)),
            ],
            &policy(256),
        );
        assert_eq!(state.tabs().active_index(), 1);

        // drop.01 only has two events
        state.apply_intents(
            [
                UiIntent::Session(SessionEvent::SetActiveIndex(1)),
                UiIntent::FollowLink(link_to(Some(2))),
            ],
            &policy(256),
        );
        assert_eq!(state.tabs().proposition(), 1);
        assert_eq!(state.tabs().active_index(), 0);
    }

    #[test]
    fn following_link_without_annotation_does_nothing() {
        let mut state = ViewState::default();
        state.apply_intents([UiIntent::FollowLink(link_to(Some(1)))], &policy(256));
        assert_eq!(state.tabs().active_index(), 0);
    }

    #[test]
    fn new_annotation_resets_event_tab() {
        let mut state = loaded();
        state.apply_intents(
            [UiIntent::EventTab(EventTabEvent::SetActiveIndex(2))],
            &policy(256),
        );

        let generation = state.store.begin_submission();
        state.apply_session_event(SessionEvent::SubmitSucceeded {
            generation,
            annotation: annotation(),
        });
        assert_eq!(state.tabs().active_index(), 0);
    }

    #[test]
    fn stale_result_keeps_current_tabs() {
        let mut state = loaded();
        state.apply_intents(
            [UiIntent::EventTab(EventTabEvent::SetActiveIndex(2))],
            &policy(256),
        );
        state.store.begin_submission();

        let transition = state.apply_session_event(SessionEvent::SubmitSucceeded {
            generation: 1,
            annotation: annotation(),
        });
        assert_eq!(
            transition,
            Transition::StaleResponse {
                generation: 1,
                current: 2
            }
        );
        assert_eq!(state.tabs().active_index(), 2);
        assert!(state.session().is_pending());
    }

    #[test]
    fn abandoned_submission_fails_current_generation() {
        let mut state = ViewState::default();
        state.apply_intents([UiIntent::Submit], &policy(256));
        state.abandon_submission("Sorry, we're unable to make predictions at this time.");
        assert_eq!(state.session().request_status(), RequestStatus::Failed);
    }
}
