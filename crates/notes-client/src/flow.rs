//! Upload → extract → summarize → render, as an explicit state machine.
//!
//! ```text
//! Idle ──submit──▶ Extracting ──ok──▶ Requesting ──ok──▶ Rendered
//!                      │                  │
//!                      └──err──▶ Failed ◀─┘
//! ```
//!
//! `Failed` and `Rendered` accept another `submit`; selecting or clearing a
//! file returns to `Idle`. `submit` borrows the session mutably, so a second
//! submission cannot start while one is in flight.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::ClientError;
use crate::extract::TextExtractor;
use crate::gateway::Summarizer;
use crate::render::{render_notes, RenderedNotes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Extracting,
    Requesting,
    Rendered {
        summary: String,
        notes: RenderedNotes,
    },
    Failed(ClientError),
}

impl FlowState {
    /// User-facing progress line for this state.
    pub fn progress(&self) -> &'static str {
        match self {
            FlowState::Idle => "",
            FlowState::Extracting => "Extracting text from PDF…",
            FlowState::Requesting => "Sending text to API…",
            FlowState::Rendered { .. } => "Summary received!",
            FlowState::Failed(_) => "Failed",
        }
    }
}

#[derive(Debug)]
pub struct Session {
    file: Option<PathBuf>,
    state: FlowState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            file: None,
            state: FlowState::Idle,
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Select or replace the file. Any previous result is dropped.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) {
        self.file = Some(path.into());
        self.state = FlowState::Idle;
    }

    pub fn clear_file(&mut self) {
        self.file = None;
        self.state = FlowState::Idle;
    }

    /// Run one attempt for the selected file. Without a file this does nothing.
    pub async fn submit<E, S>(&mut self, extractor: &E, summarizer: &S) -> &FlowState
    where
        E: TextExtractor,
        S: Summarizer,
    {
        let Some(file) = self.file.clone() else {
            warn!("submit without a selected file");
            return &self.state;
        };
        info!(file = %file.display(), "submitting");

        self.transition(FlowState::Extracting);
        let text = match extractor.extract(&file) {
            Ok(text) => text,
            Err(e) => return self.fail(e),
        };

        self.transition(FlowState::Requesting);
        let summary = match summarizer.summarize(&text).await {
            Ok(summary) => summary,
            Err(e) => return self.fail(e),
        };

        let notes = render_notes(&summary);
        self.transition(FlowState::Rendered { summary, notes });
        &self.state
    }

    fn transition(&mut self, next: FlowState) {
        self.state = next;
        if !self.state.progress().is_empty() {
            info!(progress = self.state.progress(), "status");
        }
    }

    fn fail(&mut self, err: ClientError) -> &FlowState {
        warn!(error = %err, "submission failed");
        self.transition(FlowState::Failed(err));
        &self.state
    }
}
