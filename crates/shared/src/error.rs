use thiserror::Error;

pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Sorry, we're unable to make predictions at this time.";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Sorry, something went wrong and we were unable to handle your request. Please try again later.";

pub fn input_too_long_message(max_length: usize) -> String {
    format!(
        "Sorry, the maximum sentence length is currently {max_length} characters. Please try a shorter sentence."
    )
}

/// Structural problems in an otherwise well-formed annotation payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error(
        "proposition {proposition} event {event} predicate {predicate} argument {argument} links to event {target}, but only {event_count} events exist"
    )]
    DanglingEventLink {
        proposition: usize,
        event: usize,
        predicate: usize,
        argument: usize,
        target: usize,
        event_count: usize,
    },
    #[error(
        "proposition {proposition} main event argument {argument} links to event {target}, but only {event_count} events exist"
    )]
    DanglingMainEventLink {
        proposition: usize,
        argument: usize,
        target: usize,
        event_count: usize,
    },
}
