//! UI/backend events and error modeling for desktop GUI controller.

use client_core::SessionEvent;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    /// Settled annotation request, already normalized into a lifecycle event.
    Session(SessionEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid service url")
            || message_lower.contains("not a base url")
            || message_lower.contains("config")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue is full")
            || message_lower.contains("runtime")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Blocks further submissions until the app is restarted with a fixed setup.
    pub fn is_fatal(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
            && self.category != UiErrorCategory::Configuration
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
