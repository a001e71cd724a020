//! PPTX (Office Open XML) slide-text extractor.
//!
//! Parses .pptx files which are ZIP archives containing XML documents, and
//! yields one text block per slide.

#[cfg(any(test, feature = "fixture"))]
pub mod fixture;
pub mod parser;

pub use parser::PptxParser;
