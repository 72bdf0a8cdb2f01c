use std::{fs, io::ErrorKind, path::Path};

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::{error::ConfigError, selectors::DEFAULT_TRUNCATE_LENGTH};

pub const DEFAULT_CONFIG_FILE: &str = "semparse.toml";
pub const DEFAULT_MAX_UTTERANCE_LENGTH: usize = 256;

pub const DEFAULT_EXAMPLES: [&str; 9] = [
    "If you liked the music we were playing last night, you will absolutely love what we're playing tomorrow!",
    "I didn't want to spend the next thirty years writing about bad things happening in the same small town",
    "John ate an apple and dropped the core into the trash",
    "Alice sold Bob her laptop for $300",
    "Where did John take the train after leaving the office?",
    "To whom did John lend his guitar last week?",
    "Alice went to the corner shop to buy some eggs, milk and bread for breakfast",
    "Mary discovered the impending layoffs from taking a look at her boss's computer",
    "In 2018, crude futures rose 74 cents, or 1.4 percent, to $53.95 from $53.21",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub service_url: String,
    pub max_utterance_length: usize,
    pub truncate_length: usize,
    pub examples: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:8080".into(),
            max_utterance_length: DEFAULT_MAX_UTTERANCE_LENGTH,
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
            examples: DEFAULT_EXAMPLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Parsed service base url, normalized to end in `/` so endpoint joins keep any path prefix.
    pub fn service_base_url(&self) -> Result<Url, ConfigError> {
        parse_base_url(&self.service_url)
    }
}

pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|source| ConfigError::InvalidServiceUrl {
        url: trimmed.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABaseUrl(trimmed.to_string()));
    }
    Ok(url)
}

/// Loads `SEMPARSE_CONFIG` (or `semparse.toml`) and then applies environment overrides.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let path = std::env::var("SEMPARSE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
    let mut settings = load_settings_from(Path::new(&path))?;
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

/// A missing file yields the defaults; an unreadable or invalid one is an error.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let mut settings: Settings = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    if settings.examples.is_empty() {
        warn!(path = %path.display(), "config lists no example sentences; using defaults");
        settings.examples = Settings::default().examples;
    }
    Ok(settings)
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SEMPARSE_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = lookup("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = lookup("APP__MAX_UTTERANCE_LENGTH") {
        match v.parse::<usize>() {
            Ok(parsed) => settings.max_utterance_length = parsed,
            Err(err) => warn!(value = %v, "ignoring APP__MAX_UTTERANCE_LENGTH: {err}"),
        }
    }

    if let Some(v) = lookup("APP__TRUNCATE_LENGTH") {
        match v.parse::<usize>() {
            Ok(parsed) => settings.truncate_length = parsed,
            Err(err) => warn!(value = %v, "ignoring APP__TRUNCATE_LENGTH: {err}"),
        }
    }
}
