//! Client-side analysis session: annotation client, session store, view selectors and
//! cross-reference navigation.

pub mod annotation_client;
pub mod config;
pub mod error;
pub mod navigation;
pub mod selectors;
pub mod session;

pub use annotation_client::{
    lifecycle_event, AnnotationClient, AnnotationService, ExamplePool, HttpAnnotationService,
    MissingAnnotationService, SubmissionPolicy,
};
pub use config::{load_settings, Settings};
pub use error::{ConfigError, SubmitError};
pub use navigation::{EventTabEvent, EventTabState};
pub use session::{Session, SessionEvent, SessionStore, Transition};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod test_fixtures;
