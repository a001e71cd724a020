//! Plain-text rendering of the session.
//!
//! Rendering is a pure function of the session, so redrawing the same state
//! always yields the same frame.

use crate::chat::Notice;
use crate::model::SummaryModel;
use crate::session::Session;
use crate::types::{ChatMessage, Deck, Summary};

/// Format one entry of the summaries list.
pub fn format_summary_line(summary: &Summary) -> String {
    format!("Slide {} Summary: {}", summary.slide, summary.text)
}

/// Render the summaries list, one line per slide.
pub fn render_summaries(summaries: &[Summary]) -> String {
    summaries
        .iter()
        .map(format_summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single chat message with its role label.
///
/// Continuation lines are indented under the label.
pub fn render_message(message: &ChatMessage) -> String {
    let label = format!("[{}] ", message.role);
    let indent = " ".repeat(label.chars().count());
    let body = message.content.lines().collect::<Vec<_>>().join(&format!("\n{}", indent));
    format!("{}{}", label, body)
}

/// Render the whole transcript in append order.
pub fn render_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the extracted text of every slide, for inspection without a model.
///
/// # Example output
/// ```text
/// --- Slide 1 ---
/// Quarterly results
/// Revenue grew 12%
///
/// --- Slide 2 ---
/// ```
pub fn render_slide_texts(deck: &Deck) -> String {
    deck.slides
        .iter()
        .map(|slide| format!("--- Slide {} ---\n{}", slide.number, slide.text()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Heading naming the model the summaries came from, and the pending
/// selection when it differs.
pub fn render_summaries_heading(summarized_with: SummaryModel, selected: SummaryModel) -> String {
    if summarized_with == selected {
        format!("Summaries ({}):", summarized_with)
    } else {
        format!(
            "Summaries ({}; {} selected, run /update to apply):",
            summarized_with, selected
        )
    }
}

/// Render the full frame: transcript, then summaries, then any warning.
pub fn render_frame(session: &Session, notice: Option<&Notice>) -> String {
    let mut sections = Vec::new();

    if !session.messages().is_empty() {
        sections.push(render_transcript(session.messages()));
    }

    // An empty list renders nothing, same as no list at all.
    if let Some(summaries) = session.summaries().filter(|s| !s.is_empty()) {
        let list = render_summaries(summaries);
        match session.summarized_with() {
            Some(model) => sections.push(format!(
                "{}\n{}",
                render_summaries_heading(model, session.model()),
                list
            )),
            None => sections.push(list),
        }
    }

    if let Some(notice) = notice {
        sections.push(format!("! {}", notice));
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExtractedSlide, Role};

    #[test]
    fn test_format_summary_line() {
        let summary = Summary {
            slide: 2,
            text: "Revenue grew.".to_string(),
        };
        assert_eq!(format_summary_line(&summary), "Slide 2 Summary: Revenue grew.");
    }

    #[test]
    fn test_render_summaries_one_line_per_slide() {
        let summaries = Summary::from_texts(vec!["a".into(), String::new(), "c".into()]);
        assert_eq!(
            render_summaries(&summaries),
            "Slide 1 Summary: a\nSlide 2 Summary: \nSlide 3 Summary: c"
        );
    }

    #[test]
    fn test_render_message_indents_continuation_lines() {
        let message = ChatMessage::new(Role::User, "line one\nline two");
        assert_eq!(render_message(&message), "[user] line one\n       line two");
    }

    #[test]
    fn test_render_slide_texts() {
        let mut deck = Deck::new("deck.pptx");
        let mut slide = ExtractedSlide::new(1);
        slide.add_shape_text("Hello");
        deck.add_slide(slide);
        deck.add_slide(ExtractedSlide::new(2));

        assert_eq!(
            render_slide_texts(&deck),
            "--- Slide 1 ---\nHello\n\n--- Slide 2 ---\n"
        );
    }

    #[test]
    fn test_render_frame_empty_session() {
        assert_eq!(render_frame(&Session::new(), None), "");
    }

    #[test]
    fn test_render_frame_warning_only() {
        let frame = render_frame(&Session::new(), Some(&Notice::NoDocument));
        assert_eq!(frame, "! 파일을 업로드 해주세요.");
    }

    #[test]
    fn test_render_frame_order() {
        let mut session = Session::new();
        session.replace_summaries(Summary::from_texts(vec!["a".into()]));
        session.append_message(Role::User, "1");
        session.append_message(Role::Assistant, "Slide 1에 대한 요약: a");

        let frame = render_frame(&session, None);
        assert_eq!(
            frame,
            "[user] 1\n[assistant] Slide 1에 대한 요약: a\n\nSlide 1 Summary: a"
        );
    }

    #[test]
    fn test_render_frame_names_summary_model() {
        let mut session = Session::with_model(SummaryModel::DistilBartCnn12_6);
        session.replace_summaries_from(
            SummaryModel::DistilBartCnn12_6,
            Summary::from_texts(vec!["a".into()]),
        );

        assert_eq!(
            render_frame(&session, None),
            "Summaries (distilbart-cnn-12-6):\nSlide 1 Summary: a"
        );
    }

    #[test]
    fn test_render_frame_flags_stale_model() {
        let mut session = Session::with_model(SummaryModel::DistilBartCnn12_6);
        session.replace_summaries_from(
            SummaryModel::DistilBartCnn12_6,
            Summary::from_texts(vec!["a".into()]),
        );
        session.select_model(SummaryModel::BartLargeCnn);

        assert_eq!(
            render_frame(&session, None),
            "Summaries (distilbart-cnn-12-6; facebook/bart-large-cnn selected, run /update to apply):\nSlide 1 Summary: a"
        );
    }

    #[test]
    fn test_render_frame_is_repeatable() {
        let mut session = Session::new();
        session.replace_summaries(Summary::from_texts(vec!["a".into(), "b".into()]));
        session.append_message(Role::User, "2");

        assert_eq!(render_frame(&session, None), render_frame(&session, None));
    }
}
