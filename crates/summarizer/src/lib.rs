//! Per-slide summarization.
//!
//! A [`Summarizer`] turns an ordered list of slide text blocks into an
//! equally long list of summaries, delegating each block to a
//! [`SummarizationBackend`] and remembering results per (texts, model).

pub mod backend;
pub mod config;
pub mod inference_api;
pub mod summarizer;

pub use backend::SummarizationBackend;
pub use config::{GenerationParams, SummarizerConfig};
pub use inference_api::InferenceApiBackend;
pub use summarizer::Summarizer;
