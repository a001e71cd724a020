//! Ordered per-slide summarization with a memoization table.

use crate::backend::SummarizationBackend;
use crate::config::GenerationParams;
use deck_core::{Result, SummaryModel};
use std::collections::HashMap;

/// Memoization key: the model plus the full input content.
type CacheKey = (SummaryModel, Vec<String>);

/// Summarizes slide text blocks, one summary per block, in order.
///
/// Results are remembered per (model, texts). Entries are written once and
/// never evicted; a different deck or model simply produces a different key.
pub struct Summarizer {
    backend: Box<dyn SummarizationBackend>,
    params: GenerationParams,
    cache: HashMap<CacheKey, Vec<String>>,
}

impl Summarizer {
    /// Create a summarizer with the default generation bounds.
    pub fn new(backend: Box<dyn SummarizationBackend>) -> Self {
        Self {
            backend,
            params: GenerationParams::default(),
            cache: HashMap::new(),
        }
    }

    /// Override the generation bounds.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Previously computed summaries for exactly these inputs.
    pub fn lookup(&self, texts: &[String], model: SummaryModel) -> Option<&[String]> {
        self.cache
            .get(&(model, texts.to_vec()))
            .map(Vec::as_slice)
    }

    /// Record summaries for these inputs. An existing entry is kept as is.
    pub fn insert(
        &mut self,
        texts: Vec<String>,
        model: SummaryModel,
        summaries: Vec<String>,
    ) -> &[String] {
        self.cache.entry((model, texts)).or_insert(summaries)
    }

    /// Number of memoized (model, texts) entries.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Summarize every block with `model`.
    ///
    /// Blank blocks summarize to an empty string without a model call. The
    /// first backend failure aborts the whole run and nothing is cached.
    pub fn summarize(&mut self, texts: &[String], model: SummaryModel) -> Result<Vec<String>> {
        if let Some(cached) = self.lookup(texts, model) {
            log::debug!("Reusing {} memoized summaries ({})", cached.len(), model);
            return Ok(cached.to_vec());
        }

        log::info!("Summarizing {} slides with {}", texts.len(), model);

        let mut summaries = Vec::with_capacity(texts.len());
        for (idx, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                log::debug!("Slide {} has no text, skipping model call", idx + 1);
                summaries.push(String::new());
                continue;
            }

            let summary = self.backend.summarize(model, text, &self.params)?;
            log::debug!("Slide {} summarized ({} chars)", idx + 1, summary.chars().count());
            summaries.push(summary);
        }

        Ok(self.insert(texts.to_vec(), model, summaries).to_vec())
    }

    /// Summarize with a model given by name, rejecting unsupported names.
    pub fn summarize_named(&mut self, texts: &[String], model_name: &str) -> Result<Vec<String>> {
        let model: SummaryModel = model_name.parse()?;
        self.summarize(texts, model)
    }
}
