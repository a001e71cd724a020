//! Domain types for extracted slide text, summaries, and chat messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An entire slide deck with its extracted text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Original filename (without path).
    pub filename: String,

    /// Slides in presentation order.
    pub slides: Vec<ExtractedSlide>,
}

impl Deck {
    /// Create an empty deck for the given filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            slides: Vec::new(),
        }
    }

    /// Add a slide to the deck.
    pub fn add_slide(&mut self, slide: ExtractedSlide) {
        self.slides.push(slide);
    }

    /// One text block per slide, in slide order.
    ///
    /// Slides without text still produce an entry, so the result always has
    /// exactly `slides.len()` elements.
    pub fn slide_texts(&self) -> Vec<String> {
        self.slides.iter().map(ExtractedSlide::text).collect()
    }
}

/// The container format of an uploaded file, detected from its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary).
    Ppt,
}

impl PresentationFormat {
    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Ppt);
        }

        None
    }
}

/// A single extracted slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSlide {
    /// 1-based slide number.
    pub number: usize,

    /// Text of every text-bearing shape, in shape-tree order.
    pub shapes: Vec<SlideText>,
}

impl ExtractedSlide {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            shapes: Vec::new(),
        }
    }

    /// Add the text of one shape. Empty text is kept.
    pub fn add_shape_text(&mut self, text: impl Into<String>) {
        self.shapes.push(SlideText::new(text));
    }

    /// The slide's text block: shape texts joined with newlines.
    pub fn text(&self) -> String {
        self.shapes
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Text content from a single shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideText {
    /// The shape's paragraphs, newline-joined.
    pub text: String,
}

impl SlideText {
    /// Create new slide text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The summary of one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// 1-based slide number this summary was produced from.
    pub slide: usize,

    /// Summary text. Empty when the slide had no text.
    pub text: String,
}

impl Summary {
    /// Pair summary strings with 1-based slide numbers, preserving order.
    pub fn from_texts(texts: Vec<String>) -> Vec<Summary> {
        texts
            .into_iter()
            .enumerate()
            .map(|(idx, text)| Summary {
                slide: idx + 1,
                text,
            })
            .collect()
    }
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a new message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// The raw bytes of the most recently uploaded file.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Original filename (without path).
    pub filename: String,

    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    /// Create a new uploaded document.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_text_joins_shapes_with_newlines() {
        let mut slide = ExtractedSlide::new(1);
        slide.add_shape_text("Title");
        slide.add_shape_text("Body line one\nBody line two");

        assert_eq!(slide.text(), "Title\nBody line one\nBody line two");
    }

    #[test]
    fn test_empty_shape_still_contributes_separator() {
        let mut slide = ExtractedSlide::new(1);
        slide.add_shape_text("Title");
        slide.add_shape_text("");

        assert_eq!(slide.text(), "Title\n");
    }

    #[test]
    fn test_slide_texts_keeps_empty_slides() {
        let mut deck = Deck::new("deck.pptx");
        let mut first = ExtractedSlide::new(1);
        first.add_shape_text("Hello world");
        deck.add_slide(first);
        deck.add_slide(ExtractedSlide::new(2));

        assert_eq!(deck.slide_texts(), vec!["Hello world".to_string(), String::new()]);
    }

    #[test]
    fn test_from_magic() {
        assert_eq!(
            PresentationFormat::from_magic(&[0x50, 0x4B, 0x03, 0x04, 0, 0]),
            Some(PresentationFormat::Pptx)
        );
        assert_eq!(
            PresentationFormat::from_magic(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
            Some(PresentationFormat::Ppt)
        );
        assert_eq!(PresentationFormat::from_magic(b"%PDF-1.7"), None);
        assert_eq!(PresentationFormat::from_magic(b"PK"), None);
    }

    #[test]
    fn test_summaries_are_numbered_from_one() {
        let summaries = Summary::from_texts(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(summaries[0].slide, 1);
        assert_eq!(summaries[1].slide, 2);
        assert_eq!(summaries[1].text, "b");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
