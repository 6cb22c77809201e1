// Linear estimators: logistic regression and linear SVM

use diabetes_types::{FeatureVector, FEATURE_COUNT, FEATURE_ORDER};
use serde::{Deserialize, Serialize};

use super::{Classifier, ModelError};

/// Per-feature standardisation applied before the linear term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Weights shared by every linear estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    /// Column names the model was trained on, checked against `FEATURE_ORDER`.
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl LinearModel {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::Invalid(format!(
                "expected {FEATURE_COUNT} coefficients, got {}",
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Invalid("non-finite weight".to_string()));
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != FEATURE_COUNT || scaler.scale.len() != FEATURE_COUNT {
                return Err(ModelError::Invalid(format!(
                    "scaler must have {FEATURE_COUNT} mean and scale entries"
                )));
            }
            if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return Err(ModelError::Invalid("scaler has a zero or non-finite scale".to_string()));
            }
        }
        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_ORDER.iter().copied()) {
                return Err(ModelError::Invalid(format!(
                    "feature order {names:?} does not match {FEATURE_ORDER:?}"
                )));
            }
        }
        Ok(())
    }

    /// `w . x + b`, after scaling when a scaler is present.
    pub fn score(&self, row: &FeatureVector) -> f64 {
        let linear: f64 = row
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let x = match &self.scaler {
                    Some(s) => (x - s.mean[i]) / s.scale[i],
                    None => *x,
                };
                x * self.coefficients[i]
            })
            .sum();
        linear + self.intercept
    }

    fn classes(&self, rows: &[FeatureVector]) -> Vec<u8> {
        rows.iter().map(|r| u8::from(self.score(r) > 0.0)).collect()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    model: LinearModel,
}

impl LogisticRegression {
    pub fn new(model: LinearModel) -> Self {
        Self { model }
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn predict(&self, rows: &[FeatureVector]) -> Vec<u8> {
        self.model.classes(rows)
    }

    fn predict_proba(&self, rows: &[FeatureVector]) -> Option<Vec<[f64; 2]>> {
        Some(
            rows.iter()
                .map(|r| {
                    let p = sigmoid(self.model.score(r));
                    [1.0 - p, p]
                })
                .collect(),
        )
    }

    fn decision_function(&self, rows: &[FeatureVector]) -> Option<Vec<f64>> {
        Some(rows.iter().map(|r| self.model.score(r)).collect())
    }
}

/// Margin classifier without calibrated probabilities.
#[derive(Debug, Clone)]
pub struct LinearSvm {
    model: LinearModel,
}

impl LinearSvm {
    pub fn new(model: LinearModel) -> Self {
        Self { model }
    }
}

impl Classifier for LinearSvm {
    fn kind(&self) -> &'static str {
        "linear_svm"
    }

    fn predict(&self, rows: &[FeatureVector]) -> Vec<u8> {
        self.model.classes(rows)
    }

    fn predict_proba(&self, _rows: &[FeatureVector]) -> Option<Vec<[f64; 2]>> {
        None
    }

    fn decision_function(&self, rows: &[FeatureVector]) -> Option<Vec<f64>> {
        Some(rows.iter().map(|r| self.model.score(r)).collect())
    }
}
