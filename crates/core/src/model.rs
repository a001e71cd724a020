//! The fixed set of supported summarization models.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pretrained summarization model the tool knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SummaryModel {
    /// Distilled BART fine-tuned on CNN/DailyMail (12 encoder / 6 decoder layers).
    #[default]
    DistilBartCnn12_6,
    /// BART large fine-tuned on CNN/DailyMail.
    BartLargeCnn,
}

impl SummaryModel {
    /// Every supported model, in selector order.
    pub const ALL: [SummaryModel; 2] = [SummaryModel::DistilBartCnn12_6, SummaryModel::BartLargeCnn];

    /// The name shown in the model selector and accepted on input.
    pub fn label(&self) -> &'static str {
        match self {
            SummaryModel::DistilBartCnn12_6 => "distilbart-cnn-12-6",
            SummaryModel::BartLargeCnn => "facebook/bart-large-cnn",
        }
    }

    /// The model-hub repository that hosts the weights.
    pub fn repo_id(&self) -> &'static str {
        match self {
            SummaryModel::DistilBartCnn12_6 => "sshleifer/distilbart-cnn-12-6",
            SummaryModel::BartLargeCnn => "facebook/bart-large-cnn",
        }
    }
}

impl fmt::Display for SummaryModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SummaryModel {
    type Err = Error;

    /// Accepts the selector label or the hub repository id.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        SummaryModel::ALL
            .into_iter()
            .find(|m| m.label() == name || m.repo_id() == name)
            .ok_or_else(|| Error::UnknownModel(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!(
            "distilbart-cnn-12-6".parse::<SummaryModel>().unwrap(),
            SummaryModel::DistilBartCnn12_6
        );
        assert_eq!(
            "facebook/bart-large-cnn".parse::<SummaryModel>().unwrap(),
            SummaryModel::BartLargeCnn
        );
    }

    #[test]
    fn test_parse_repo_id() {
        assert_eq!(
            "sshleifer/distilbart-cnn-12-6".parse::<SummaryModel>().unwrap(),
            SummaryModel::DistilBartCnn12_6
        );
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let err = "t5-small".parse::<SummaryModel>().unwrap_err();
        assert!(matches!(err, Error::UnknownModel(name) if name == "t5-small"));
    }

    #[test]
    fn test_default_is_first_selector_entry() {
        assert_eq!(SummaryModel::default(), SummaryModel::ALL[0]);
        assert_eq!(SummaryModel::default().to_string(), "distilbart-cnn-12-6");
    }
}
