//! Wires user actions to the session, the extractor, and the summarizer.
//!
//! Every action runs to completion before the next one starts, and the
//! frame returned by [`Controller::render`] always reflects the whole
//! current state.

use deck_core::chat::{self, Notice};
use deck_core::render::render_frame;
use deck_core::{Deck, Result, Role, Session, Summary, SummaryModel, UploadedDocument};
use deck_pptx::PptxParser;
use deck_summarizer::Summarizer;
use std::io::Cursor;

/// Extract the per-slide text of an uploaded document.
pub fn extract_deck(document: &UploadedDocument) -> Result<Deck> {
    PptxParser::new().parse(Cursor::new(&document.bytes), &document.filename)
}

/// One user's interactive session.
pub struct Controller {
    session: Session,
    summarizer: Summarizer,
}

impl Controller {
    /// Start an empty session with `model` selected.
    pub fn new(summarizer: Summarizer, model: SummaryModel) -> Self {
        Self {
            session: Session::with_model(model),
            summarizer,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Extract and summarize a newly uploaded deck, replacing the summaries.
    ///
    /// Returns the number of slides. On failure the previous document and
    /// summaries stay in place.
    pub fn upload(&mut self, document: UploadedDocument) -> Result<usize> {
        log::info!("Processing upload {}", document.filename);
        let model = self.session.model();
        let summaries = self.process(&document)?;
        let count = summaries.len();

        self.session.set_document(document);
        self.session.replace_summaries_from(model, summaries);
        Ok(count)
    }

    /// Change the selected model. Existing summaries are kept until the next
    /// upload or update.
    pub fn select_model(&mut self, model: SummaryModel) {
        log::debug!("Selected model {}", model);
        self.session.select_model(model);
    }

    /// Re-run extraction and summarization on the current document with the
    /// selected model, even if neither changed.
    pub fn update_settings(&mut self) -> Result<Option<Notice>> {
        let Some(document) = self.session.document().cloned() else {
            return Ok(Some(Notice::NoDocument));
        };

        let model = self.session.model();
        let summaries = self.process(&document)?;
        self.session.replace_summaries_from(model, summaries);
        Ok(None)
    }

    /// Clear the conversation.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Answer a chat query.
    ///
    /// On success the query and the answer are appended to the transcript.
    /// Otherwise a notice is returned and the transcript is left alone.
    pub fn chat(&mut self, input: &str) -> Option<Notice> {
        let Some(summaries) = self.session.summaries() else {
            return Some(Notice::NoDocument);
        };

        match chat::answer(input, summaries) {
            Ok(response) => {
                self.session.append_message(Role::User, input);
                self.session.append_message(Role::Assistant, response);
                None
            }
            Err(err) => {
                log::debug!("Unanswerable query {:?}: {}", input, err);
                Some(Notice::from(err))
            }
        }
    }

    /// Render the full current frame.
    pub fn render(&self, notice: Option<&Notice>) -> String {
        render_frame(&self.session, notice)
    }

    fn process(&mut self, document: &UploadedDocument) -> Result<Vec<Summary>> {
        let deck = extract_deck(document)?;
        let texts = deck.slide_texts();
        let summaries = self.summarizer.summarize(&texts, self.session.model())?;
        Ok(Summary::from_texts(summaries))
    }
}
