//! Backend bridge: command queue from the UI thread to the annotation worker.

pub mod commands;
pub mod runtime;
