//! Per-session state: chat transcript, current summaries, upload and model.

use crate::model::SummaryModel;
use crate::types::{ChatMessage, Role, Summary, UploadedDocument};

/// Everything one user's interaction remembers between actions.
///
/// A session is created empty and handed to the controller explicitly; there
/// is no process-wide instance.
#[derive(Debug, Clone, Default)]
pub struct Session {
    messages: Vec<ChatMessage>,
    summaries: Option<Vec<Summary>>,
    summarized_with: Option<SummaryModel>,
    document: Option<UploadedDocument>,
    model: SummaryModel,
}

impl Session {
    /// Create an empty session using the default model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the given model selected.
    pub fn with_model(model: SummaryModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    /// Clear the chat transcript. Summaries are left in place.
    pub fn reset(&mut self) {
        log::debug!("Clearing {} chat messages", self.messages.len());
        self.messages.clear();
    }

    /// Replace the summary list wholesale. The producing model is forgotten.
    pub fn replace_summaries(&mut self, summaries: Vec<Summary>) {
        self.summaries = Some(summaries);
        self.summarized_with = None;
    }

    /// Replace the summary list with one produced by `model`.
    pub fn replace_summaries_from(&mut self, model: SummaryModel, summaries: Vec<Summary>) {
        self.replace_summaries(summaries);
        self.summarized_with = Some(model);
    }

    /// Append one message to the transcript.
    pub fn append_message(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(role, content));
    }

    /// Remember the most recently uploaded file.
    pub fn set_document(&mut self, document: UploadedDocument) {
        self.document = Some(document);
    }

    /// Change the selected model. Stored summaries are not touched.
    pub fn select_model(&mut self, model: SummaryModel) {
        self.model = model;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The current summaries, or `None` before anything has been processed.
    pub fn summaries(&self) -> Option<&[Summary]> {
        self.summaries.as_deref()
    }

    /// The model the current summaries came from, when known.
    pub fn summarized_with(&self) -> Option<SummaryModel> {
        self.summarized_with
    }

    pub fn document(&self) -> Option<&UploadedDocument> {
        self.document.as_ref()
    }

    pub fn model(&self) -> SummaryModel {
        self.model
    }
}
