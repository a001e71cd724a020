//! Core domain types, session state, chat query handling, and rendering
//! for slide-deck summarization.

pub mod chat;
pub mod error;
pub mod model;
pub mod render;
pub mod session;
pub mod types;

pub use chat::{Notice, QueryError};
pub use error::{Error, Result};
pub use model::SummaryModel;
pub use session::Session;
pub use types::{
    ChatMessage, Deck, ExtractedSlide, PresentationFormat, Role, SlideText, Summary,
    UploadedDocument,
};
