// On-disk model artifact

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::linear::{LinearModel, LinearSvm, LogisticRegression};
use super::{Classifier, ModelError};

/// JSON model file, tagged by estimator family:
///
/// ```json
/// {"kind": "logistic_regression", "coefficients": [...8], "intercept": -8.4}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression(LinearModel),
    LinearSvm(LinearModel),
}

impl ModelArtifact {
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, ModelError> {
        match self {
            ModelArtifact::LogisticRegression(model) => {
                model.validate()?;
                Ok(Box::new(LogisticRegression::new(model)))
            }
            ModelArtifact::LinearSvm(model) => {
                model.validate()?;
                Ok(Box::new(LinearSvm::new(model)))
            }
        }
    }
}

/// Read, parse and validate the model artifact at `path`.
pub fn load_model(path: &Path) -> Result<Box<dyn Classifier>, ModelError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: ModelArtifact = serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    artifact.into_classifier()
}
