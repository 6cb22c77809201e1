// Prediction response types

use serde::{Deserialize, Serialize};

/// Human-readable category for a predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnosis {
    #[serde(rename = "Diabetic")]
    Diabetic,
    #[serde(rename = "Not Diabetic")]
    NotDiabetic,
}

impl Diagnosis {
    /// Class 1 is diabetic, anything else is not.
    pub fn from_class(class: u8) -> Self {
        if class == 1 {
            Diagnosis::Diabetic
        } else {
            Diagnosis::NotDiabetic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Diabetic => "Diabetic",
            Diagnosis::NotDiabetic => "Not Diabetic",
        }
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response body of `POST /predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: u8,
    pub result: Diagnosis,
    /// Probability of the predicted class, rounded to 6 decimals.
    pub confidence: f64,
}

impl PredictionResult {
    pub fn new(class: u8, probability: f64) -> Self {
        Self {
            prediction: class,
            result: Diagnosis::from_class(class),
            confidence: round_confidence(probability),
        }
    }
}

/// Round to 6 decimal digits.
pub fn round_confidence(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
