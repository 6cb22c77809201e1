//! Presentation client: collects a patient record in the terminal, sends it
//! to `POST /predict` and shows the outcome.

pub mod form;

use diabetes_types::PatientRecord;
use log::{error, info};
use serde_json::Value;

pub use form::{collect_record, parse_field, FieldError};

pub const DEFAULT_PREDICT_URL: &str = "http://127.0.0.1:8000/predict";
pub const FETCH_ERROR_MESSAGE: &str = "Error occurred while fetching prediction.";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("server answered HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unreadable response: {0}")]
    Body(String),
}

/// Blocking HTTP caller for the predict endpoint.
pub struct PredictClient {
    agent: ureq::Agent,
    url: String,
}

impl PredictClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            url: url.into(),
        }
    }

    /// One POST, no retry.
    pub fn submit(&self, record: &PatientRecord) -> Result<Value, SubmitError> {
        let payload = serde_json::to_string(record).map_err(|e| SubmitError::Body(e.to_string()))?;
        info!("POST {} {}", self.url, payload);

        let response = match self
            .agent
            .post(&self.url)
            .set("content-type", "application/json")
            .send_string(&payload)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(SubmitError::Status(code)),
            Err(e) => return Err(SubmitError::Transport(e.to_string())),
        };

        let body = response
            .into_string()
            .map_err(|e| SubmitError::Body(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| SubmitError::Body(e.to_string()))
    }
}

/// Lines shown to the user for a submission outcome.
pub fn render_outcome(outcome: &Result<Value, SubmitError>) -> Vec<String> {
    match outcome {
        Ok(prediction) => {
            let result = prediction
                .get("result")
                .and_then(Value::as_str)
                .unwrap_or("Unknown");
            let confidence = prediction
                .get("confidence")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            vec![
                format!("Prediction Response: {prediction}"),
                format!("Prediction: {result}"),
                format!("Confidence: {:.2}%", confidence * 100.0),
            ]
        }
        Err(e) => {
            error!("Prediction request failed: {e}");
            vec![FETCH_ERROR_MESSAGE.to_string()]
        }
    }
}
