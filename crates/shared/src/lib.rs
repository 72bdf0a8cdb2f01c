//! Wire model shared between the analysis client, the desktop apps and the fixture server.

pub mod domain;
pub mod error;
pub mod protocol;
