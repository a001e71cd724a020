//! Backend that calls a hosted inference API over HTTP.
//!
//! Each call posts one text block to `{endpoint}/{repo_id}` and expects the
//! summarization pipeline's output shape, `[{"summary_text": "..."}]`.

use crate::backend::SummarizationBackend;
use crate::config::{GenerationParams, SummarizerConfig};
use deck_core::{Error, Result, SummaryModel};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Summarizes text through a hosted inference API.
pub struct InferenceApiBackend {
    client: Client,
    config: SummarizerConfig,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Summaries(Vec<SummaryOutput>),
    Failure { error: String },
}

impl InferenceApiBackend {
    /// Create a backend with its own HTTP client.
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::InferenceError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// The URL a model is served from.
    pub fn model_url(&self, model: SummaryModel) -> String {
        format!("{}/{}", self.config.endpoint.trim_end_matches('/'), model.repo_id())
    }
}

impl SummarizationBackend for InferenceApiBackend {
    fn summarize(
        &self,
        model: SummaryModel,
        text: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        let url = self.model_url(model);
        log::debug!("POST {} ({} chars)", url, text.chars().count());

        let body = InferenceRequest {
            inputs: text,
            parameters: params,
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| Error::InferenceError(format!("Request to {} failed: {}", url, e)))?;
        let status = response.status();
        let payload = response
            .text()
            .map_err(|e| Error::InferenceError(format!("Failed to read response: {}", e)))?;

        map_response(status, &payload, model)
    }
}

/// Turn a response status and body into a summary or a typed error.
///
/// 404 means the service does not serve the model; any other non-success
/// status, or a success body carrying `{"error": ...}`, is an inference error.
fn map_response(status: StatusCode, payload: &str, model: SummaryModel) -> Result<String> {
    if status == StatusCode::NOT_FOUND {
        return Err(Error::ModelUnavailable {
            model: model.label().to_string(),
            reason: error_message(payload).unwrap_or_else(|| status.to_string()),
        });
    }

    if !status.is_success() {
        return Err(Error::InferenceError(format!(
            "{} returned {}: {}",
            model.repo_id(),
            status,
            error_message(payload).unwrap_or_else(|| payload.to_string())
        )));
    }

    parse_summary(payload)
}

/// Pull the first summary out of a successful response body.
fn parse_summary(payload: &str) -> Result<String> {
    let response: InferenceResponse = serde_json::from_str(payload)
        .map_err(|e| Error::InferenceError(format!("Unexpected response body: {}", e)))?;

    match response {
        InferenceResponse::Summaries(outputs) => outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .ok_or_else(|| Error::InferenceError("Response contained no summary".to_string())),
        InferenceResponse::Failure { error } => Err(Error::InferenceError(error)),
    }
}

/// The `error` field of an error body, if there is one.
fn error_message(payload: &str) -> Option<String> {
    match serde_json::from_str::<InferenceResponse>(payload) {
        Ok(InferenceResponse::Failure { error }) => Some(error),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let params = GenerationParams::default();
        let body = InferenceRequest {
            inputs: "Quarterly revenue grew.",
            parameters: &params,
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inputs": "Quarterly revenue grew.",
                "parameters": {"max_length": 150, "min_length": 40, "do_sample": false},
                "options": {"wait_for_model": true}
            })
        );
    }

    #[test]
    fn test_parse_summary() {
        let payload = r#"[{"summary_text": "Revenue grew 12% in Q3."}]"#;
        assert_eq!(parse_summary(payload).unwrap(), "Revenue grew 12% in Q3.");
    }

    #[test]
    fn test_parse_error_body() {
        let payload = r#"{"error": "Model is overloaded"}"#;
        let err = parse_summary(payload).unwrap_err();
        assert!(matches!(err, Error::InferenceError(msg) if msg == "Model is overloaded"));
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(matches!(
            parse_summary("[]"),
            Err(Error::InferenceError(_))
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_summary("<html>bad gateway</html>"),
            Err(Error::InferenceError(_))
        ));
    }

    #[test]
    fn test_error_message_only_for_error_bodies() {
        assert_eq!(
            error_message(r#"{"error": "not found"}"#).as_deref(),
            Some("not found")
        );
        assert_eq!(error_message(r#"[{"summary_text": "x"}]"#), None);
        assert_eq!(error_message("plain text"), None);
    }

    #[test]
    fn test_map_response_success() {
        let summary = map_response(
            StatusCode::OK,
            r#"[{"summary_text": "Costs fell."}]"#,
            SummaryModel::BartLargeCnn,
        )
        .unwrap();
        assert_eq!(summary, "Costs fell.");
    }

    #[test]
    fn test_map_response_not_found_is_model_unavailable() {
        let err = map_response(
            StatusCode::NOT_FOUND,
            r#"{"error": "Model sshleifer/distilbart-cnn-12-6 does not exist"}"#,
            SummaryModel::DistilBartCnn12_6,
        )
        .unwrap_err();

        match err {
            Error::ModelUnavailable { model, reason } => {
                assert_eq!(model, "distilbart-cnn-12-6");
                assert!(reason.contains("does not exist"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_map_response_not_found_without_body() {
        let err = map_response(StatusCode::NOT_FOUND, "", SummaryModel::BartLargeCnn).unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable { reason, .. } if reason.contains("404")));
    }

    #[test]
    fn test_map_response_service_unavailable_is_inference_error() {
        let err = map_response(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error": "Model is currently loading"}"#,
            SummaryModel::BartLargeCnn,
        )
        .unwrap_err();

        match err {
            Error::InferenceError(msg) => {
                assert!(msg.contains("facebook/bart-large-cnn"));
                assert!(msg.contains("503"));
                assert!(msg.contains("Model is currently loading"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_map_response_keeps_plain_error_body() {
        let err = map_response(
            StatusCode::BAD_GATEWAY,
            "upstream timed out",
            SummaryModel::BartLargeCnn,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InferenceError(msg) if msg.ends_with("upstream timed out")));
    }

    #[test]
    fn test_map_response_error_body_with_ok_status() {
        let err = map_response(
            StatusCode::OK,
            r#"{"error": "Input is too long"}"#,
            SummaryModel::BartLargeCnn,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InferenceError(msg) if msg == "Input is too long"));
    }

    #[test]
    fn test_model_url() {
        let backend = InferenceApiBackend::new(
            SummarizerConfig::default().with_endpoint("http://localhost:8080/models/"),
        )
        .unwrap();

        assert_eq!(
            backend.model_url(SummaryModel::DistilBartCnn12_6),
            "http://localhost:8080/models/sshleifer/distilbart-cnn-12-6"
        );
        assert_eq!(
            backend.model_url(SummaryModel::BartLargeCnn),
            "http://localhost:8080/models/facebook/bart-large-cnn"
        );
    }
}
