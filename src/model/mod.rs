// Classifier abstraction and the process-wide model handle

pub mod artifact;
pub mod linear;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use diabetes_types::{FeatureVector, PatientRecord, PredictionResult};
use log::{error, info};

pub use artifact::{load_model, ModelArtifact};
pub use linear::{LinearModel, LinearSvm, LogisticRegression, StandardScaler};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact: {0}")]
    Invalid(String),
    #[error("Model not loaded: {0}")]
    NotLoaded(String),
    #[error("model '{0}' does not support probability output")]
    ProbabilityUnsupported(&'static str),
    #[error("model returned no prediction")]
    EmptyOutput,
}

/// A trained binary classifier over `FeatureVector` rows.
///
/// `predict_proba` and `decision_function` are optional capabilities; a
/// model that lacks one returns `None`.
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Short name of the estimator family, used in logs and errors.
    fn kind(&self) -> &'static str;

    /// Predicted class (0 or 1) for each row.
    fn predict(&self, rows: &[FeatureVector]) -> Vec<u8>;

    /// `[P(class 0), P(class 1)]` for each row.
    fn predict_proba(&self, rows: &[FeatureVector]) -> Option<Vec<[f64; 2]>>;

    /// Signed distance from the decision boundary for each row.
    fn decision_function(&self, rows: &[FeatureVector]) -> Option<Vec<f64>>;
}

/// Classifier loaded at startup, or the reason it could not be.
#[derive(Debug)]
pub struct ModelHandle {
    state: Result<Box<dyn Classifier>, String>,
}

pub type SharedModel = Arc<ModelHandle>;

impl ModelHandle {
    /// Load the artifact at `path`. Failure is logged and kept in the
    /// handle; it surfaces again on every call that needs the model.
    pub fn load(path: &Path) -> Self {
        let state = match load_model(path) {
            Ok(model) => {
                info!("Loaded {} model from {}", model.kind(), path.display());
                Ok(model)
            }
            Err(e) => {
                error!("Error loading model: {e}");
                Err(e.to_string())
            }
        };
        Self { state }
    }

    pub fn from_classifier(model: Box<dyn Classifier>) -> Self {
        Self { state: Ok(model) }
    }

    pub fn unloaded(reason: impl Into<String>) -> Self {
        Self {
            state: Err(reason.into()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_ok()
    }

    pub fn classifier(&self) -> Result<&dyn Classifier, ModelError> {
        match &self.state {
            Ok(model) => Ok(model.as_ref()),
            Err(reason) => Err(ModelError::NotLoaded(reason.clone())),
        }
    }

    /// Classify one patient and report the probability of the chosen class.
    pub fn predict_record(&self, record: &PatientRecord) -> Result<PredictionResult, ModelError> {
        let model = self.classifier()?;
        let rows = [record.to_features()];

        let class = model
            .predict(&rows)
            .first()
            .copied()
            .ok_or(ModelError::EmptyOutput)?;
        let proba = model
            .predict_proba(&rows)
            .ok_or(ModelError::ProbabilityUnsupported(model.kind()))?;
        let confidence = proba
            .first()
            .and_then(|p| p.get(usize::from(class)))
            .copied()
            .ok_or(ModelError::EmptyOutput)?;

        Ok(PredictionResult::new(class, confidence))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use diabetes_types::Diagnosis;

    #[test]
    fn test_predict_record_diabetic() {
        let result = logistic_handle().predict_record(&record(180)).unwrap();
        assert_eq!(result.prediction, 1);
        assert_eq!(result.result, Diagnosis::Diabetic);
        // sigmoid(0.125 * 180 - 17.5) = sigmoid(5)
        assert_eq!(result.confidence, 0.993307);
    }

    #[test]
    fn test_predict_record_not_diabetic() {
        let result = logistic_handle().predict_record(&record(100)).unwrap();
        assert_eq!(result.prediction, 0);
        assert_eq!(result.result, Diagnosis::NotDiabetic);
        assert_eq!(result.confidence, 0.993307);
    }

    #[test]
    fn test_unloaded_model_fails_with_reason() {
        let handle = ModelHandle::unloaded("file missing");
        assert!(!handle.is_loaded());
        let err = handle.predict_record(&record(120)).unwrap_err();
        assert!(matches!(err, ModelError::NotLoaded(_)));
        assert_eq!(err.to_string(), "Model not loaded: file missing");
    }

    #[test]
    fn test_model_without_probabilities_fails() {
        let err = svm_handle().predict_record(&record(180)).unwrap_err();
        assert!(matches!(err, ModelError::ProbabilityUnsupported("linear_svm")));
    }

    #[test]
    fn test_load_missing_file_keeps_error() {
        let handle = ModelHandle::load(Path::new("/nonexistent/diabetes_model.json"));
        assert!(!handle.is_loaded());
        assert!(handle.classifier().is_err());
    }
}
