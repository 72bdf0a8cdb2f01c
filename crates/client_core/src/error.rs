use shared::error::{input_too_long_message, GENERIC_FAILURE_MESSAGE, SERVICE_UNAVAILABLE_MESSAGE};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("utterance has {length} characters, maximum is {max}")]
    InputTooLong { length: usize, max: usize },
    #[error("annotation service unreachable: {0}")]
    Transport(String),
    #[error("annotation service responded with status {status}")]
    Service { status: u16 },
    #[error("malformed annotation response: {0}")]
    MalformedResponse(String),
}

impl SubmitError {
    /// The only text the session ever sees; the underlying cause stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::InputTooLong { max, .. } => input_too_long_message(*max),
            Self::Transport(_) => SERVICE_UNAVAILABLE_MESSAGE.to_string(),
            Self::Service { .. } | Self::MalformedResponse(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid annotation service url '{url}': {source}")]
    InvalidServiceUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("annotation service url '{0}' cannot be used as a base url")]
    NotABaseUrl(String),
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}
