//! Cross-reference navigation between tokens, propositions and event tabs.

use shared::protocol::{Argument, Proposition, Token};

use crate::{selectors::clamp_index, session::SessionEvent};

/// Proposition a token opens when activated; only predicate tokens navigate.
pub fn proposition_for_token(token: &Token) -> Option<usize> {
    token.is_predicate.then_some(token.token_index)
}

pub fn token_activation(token: &Token) -> Option<SessionEvent> {
    proposition_for_token(token).map(SessionEvent::SetActiveIndex)
}

/// Event an argument links to, if the link resolves inside `proposition`.
pub fn linked_event_target(argument: &Argument, proposition: &Proposition) -> Option<usize> {
    argument
        .linked_event_index
        .filter(|target| *target < proposition.events.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTabEvent {
    /// Stored as given, like the proposition index.
    SetActiveIndex(usize),
    /// Resets the tab to 0 whenever the selected proposition differs from the tracked one.
    SyncProposition(usize),
}

/// Active event tab, scoped to the currently selected proposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventTabState {
    proposition: usize,
    active_index: usize,
}

impl EventTabState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn proposition(&self) -> usize {
        self.proposition
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn clamped(&self, event_count: usize) -> usize {
        clamp_index(self.active_index, event_count)
    }

    pub fn apply(&mut self, event: EventTabEvent) {
        match event {
            EventTabEvent::SetActiveIndex(index) => {
                self.active_index = index;
            }
            EventTabEvent::SyncProposition(proposition) => {
                if proposition != self.proposition {
                    self.proposition = proposition;
                    self.active_index = 0;
                }
            }
        }
    }

    /// Follows an argument's event link; returns false when the argument is not a link.
    pub fn follow(&mut self, argument: &Argument, proposition: &Proposition) -> bool {
        match linked_event_target(argument, proposition) {
            Some(target) => {
                self.apply(EventTabEvent::SetActiveIndex(target));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        selectors::clamped_active_index,
        session::SessionStore,
        test_fixtures::{arg, linked_annotation},
    };

    #[test]
    fn predicate_tokens_navigate_to_their_proposition() {
        let annotation = linked_annotation();
        let targets: Vec<Option<usize>> =
            annotation.tokens.iter().map(proposition_for_token).collect();
        assert_eq!(targets, vec![None, Some(0), None, Some(1), None]);

        let mut store = SessionStore::new();
        if let Some(event) = token_activation(&annotation.tokens[3]) {
            store.dispatch(event);
        }
        assert_eq!(store.session().active_index(), 1);
    }

    #[test]
    fn only_resolvable_links_are_actionable() {
        let annotation = linked_annotation();
        let proposition = &annotation.propositions[0];
        let main_event = proposition.main_event.as_ref().expect("main event");
        let cause = &main_event.predicates[0];

        assert_eq!(linked_event_target(&cause.args[1], proposition), Some(1));
        assert_eq!(linked_event_target(&arg("Agent", Some("John")), proposition), None);

        let mut dangling = cause.args[0].clone();
        dangling.linked_event_index = Some(9);
        assert_eq!(linked_event_target(&dangling, proposition), None);
    }

    #[test]
    fn following_a_link_moves_only_the_event_tab() {
        let mut store = SessionStore::new();
        let generation = store.begin_submission();
        store.dispatch(SessionEvent::SubmitSucceeded {
            generation,
            annotation: linked_annotation(),
        });

        let mut tabs = EventTabState::new();
        tabs.apply(EventTabEvent::SyncProposition(clamped_active_index(
            store.session(),
        )));

        let proposition = store
            .session()
            .annotation()
            .and_then(|annotation| annotation.proposition(0))
            .expect("proposition")
            .clone();
        let meets = &proposition.main_event.as_ref().expect("main event").predicates[1];

        assert!(tabs.follow(&meets.args[1], &proposition));
        assert_eq!(tabs.active_index(), 2);
        assert_eq!(store.session().active_index(), 0);

        assert!(!tabs.follow(&arg("Agent", Some("John")), &proposition));
        assert_eq!(tabs.active_index(), 2);
    }

    #[test]
    fn changing_proposition_resets_event_tab() {
        let mut tabs = EventTabState::new();
        tabs.apply(EventTabEvent::SetActiveIndex(2));

        tabs.apply(EventTabEvent::SyncProposition(0));
        assert_eq!(tabs.active_index(), 2);

        tabs.apply(EventTabEvent::SyncProposition(1));
        assert_eq!(tabs.proposition(), 1);
        assert_eq!(tabs.active_index(), 0);
    }

    #[test]
    fn event_tab_clamps_like_proposition_index() {
        let mut tabs = EventTabState::new();
        tabs.apply(EventTabEvent::SetActiveIndex(5));
        assert_eq!(tabs.clamped(3), 2);
        assert_eq!(tabs.clamped(0), 0);
        assert_eq!(tabs.active_index(), 5);
    }
}
