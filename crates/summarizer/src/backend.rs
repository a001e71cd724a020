//! The seam between the summarizer and whatever runs the model.

use crate::config::GenerationParams;
use deck_core::{Result, SummaryModel};

/// Something that can summarize one block of text with a given model.
pub trait SummarizationBackend {
    /// Produce the single best summary of `text`.
    ///
    /// Implementations must decode deterministically when
    /// `params.do_sample` is false, so equal inputs give equal outputs.
    fn summarize(&self, model: SummaryModel, text: &str, params: &GenerationParams)
        -> Result<String>;
}
