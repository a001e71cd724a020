//! Answering chat queries against the current summaries.
//!
//! Queries are slide lookups: a bare number (`"2"`) or a phrase that names a
//! slide (`"show summary for slide 2"`, `"2번 슬라이드"`). Anything else, and
//! any number outside the current deck, is reported back as a [`Notice`]
//! without touching the transcript.

use crate::types::Summary;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Input that is nothing but a number.
static BARE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*$").unwrap());

/// A number attached to a slide reference inside a longer phrase.
static SLIDE_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:slide|슬라이드)\s*#?\s*(\d+)|(\d+)\s*번").unwrap()
});

/// Shown when a query arrives before any deck has been summarized.
pub const UPLOAD_WARNING: &str = "파일을 업로드 해주세요.";

/// Why a chat query could not be answered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The input does not name a slide.
    #[error("슬라이드 번호를 입력해주세요: {0:?}")]
    NotASlideNumber(String),

    /// The summarized deck has no slides at all.
    #[error("업로드한 파일에 슬라이드가 없습니다.")]
    EmptyDeck,

    /// The slide number is outside `1..=available`.
    #[error("Slide {requested}은(는) 없습니다. 1부터 {available} 사이의 번호를 입력해주세요.")]
    OutOfRange { requested: usize, available: usize },
}

/// A warning rendered under the transcript instead of a chat reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Nothing has been uploaded and summarized yet.
    NoDocument,
    /// The query could not be resolved to a slide.
    InvalidQuery(QueryError),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoDocument => f.write_str(UPLOAD_WARNING),
            Notice::InvalidQuery(err) => write!(f, "{}", err),
        }
    }
}

impl From<QueryError> for Notice {
    fn from(err: QueryError) -> Self {
        Notice::InvalidQuery(err)
    }
}

/// Extract the 1-based slide number a query refers to.
pub fn parse_slide_number(input: &str) -> Result<usize, QueryError> {
    let captured = BARE_NUMBER_REGEX
        .captures(input)
        .and_then(|caps| caps.get(1))
        .or_else(|| {
            SLIDE_REFERENCE_REGEX
                .captures(input)
                .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        })
        .ok_or_else(|| QueryError::NotASlideNumber(input.trim().to_string()))?;

    captured
        .as_str()
        .parse::<usize>()
        .map_err(|_| QueryError::NotASlideNumber(input.trim().to_string()))
}

/// Format the assistant's reply quoting one slide's summary.
pub fn format_answer(slide: usize, summary: &str) -> String {
    format!("Slide {}에 대한 요약: {}", slide, summary)
}

/// Resolve a query against the summaries and build the reply.
pub fn answer(input: &str, summaries: &[Summary]) -> Result<String, QueryError> {
    if summaries.is_empty() {
        return Err(QueryError::EmptyDeck);
    }

    let slide = parse_slide_number(input)?;

    if slide == 0 || slide > summaries.len() {
        return Err(QueryError::OutOfRange {
            requested: slide,
            available: summaries.len(),
        });
    }

    Ok(format_answer(slide, &summaries[slide - 1].text))
}
