//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    /// Already length-checked on the UI thread; `generation` tags the settled result.
    Annotate { utterance: String, generation: u64 },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Annotate { .. } => "annotate",
        }
    }
}
