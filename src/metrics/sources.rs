// Ordered metric providers with accumulated failures

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use diabetes_types::{ComputedMetrics, MetricsReport};
use log::{info, warn};
use serde_json::Value;

use super::{accuracy, f1_score, load_test_set, precision, recall, roc_auc, Confusion, MetricsError, TestSet};
use crate::model::{Classifier, ModelHandle};

pub const METRICS_UNAVAILABLE: &str = "Metrics not available on server.";

/// Somewhere a metrics report can come from.
pub trait MetricsSource: Send + Sync {
    /// Key prefix for this source's entry in the error `details`.
    fn name(&self) -> &'static str;

    fn load(&self, model: &ModelHandle) -> Result<MetricsReport, MetricsError>;
}

/// Computes metrics live by running the model over a held-out CSV.
#[derive(Debug, Clone)]
pub struct TestSetSource {
    path: PathBuf,
}

impl TestSetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetricsSource for TestSetSource {
    fn name(&self) -> &'static str {
        "test_set"
    }

    fn load(&self, model: &ModelHandle) -> Result<MetricsReport, MetricsError> {
        let test_set = load_test_set(&self.path)?;
        let model = model.classifier()?;
        let metrics = evaluate(model, &test_set)?;
        info!("Computed metrics on {} held-out rows", test_set.len());
        Ok(MetricsReport::Computed(metrics))
    }
}

/// Score a classifier against labelled rows.
pub fn evaluate(model: &dyn Classifier, test_set: &TestSet) -> Result<ComputedMetrics, MetricsError> {
    let y_pred = model.predict(&test_set.features);
    let counts = Confusion::from_labels(&test_set.labels, &y_pred);

    let scores = match model.predict_proba(&test_set.features) {
        Some(proba) => Some(proba.iter().map(|p| p[1]).collect::<Vec<_>>()),
        None => model.decision_function(&test_set.features),
    };
    let roc_auc = match scores {
        Some(scores) => Some(roc_auc(&test_set.labels, &scores)?),
        None => None,
    };

    Ok(ComputedMetrics {
        accuracy: accuracy(&counts),
        precision: precision(&counts),
        recall: recall(&counts),
        f1_score: f1_score(&counts),
        roc_auc,
    })
}

/// Reads a metrics mapping written when the model was trained.
#[derive(Debug, Clone)]
pub struct PrecomputedSource {
    path: PathBuf,
}

impl PrecomputedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetricsSource for PrecomputedSource {
    fn name(&self) -> &'static str {
        "metrics_file"
    }

    fn load(&self, _model: &ModelHandle) -> Result<MetricsReport, MetricsError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| MetricsError::Open {
            path: self.path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&raw).map_err(|source| MetricsError::Json {
            path: self.path.clone(),
            source,
        })?;
        let Value::Object(entries) = value else {
            return Err(MetricsError::NotAnObject);
        };

        let mut metrics = BTreeMap::new();
        for (key, value) in entries {
            let coerced = coerce_float(&key, &value)?;
            metrics.insert(key, coerced);
        }
        Ok(MetricsReport::Precomputed(metrics))
    }
}

/// Numbers pass through, numeric strings parse, booleans map to 1/0,
/// null stays null.
fn coerce_float(key: &str, value: &Value) -> Result<Option<f64>, MetricsError> {
    let invalid = || MetricsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<f64>().map(Some).map_err(|_| invalid()),
        Value::Array(_) | Value::Object(_) => Err(invalid()),
    }
}

/// Try each source in order and return the first report. When every
/// source fails, the report lists each failure under `<name>_error`.
pub fn collect_metrics(sources: &[Box<dyn MetricsSource>], model: &ModelHandle) -> MetricsReport {
    let mut details = BTreeMap::new();
    for source in sources {
        match source.load(model) {
            Ok(report) => return report,
            Err(e) => {
                warn!("Metrics source '{}' failed: {e}", source.name());
                details.insert(format!("{}_error", source.name()), e.to_string());
            }
        }
    }
    MetricsReport::Unavailable {
        error: METRICS_UNAVAILABLE.to_string(),
        details,
    }
}

/// The test set first, then the precomputed file.
pub fn default_sources(test_set_path: &Path, metrics_path: &Path) -> Vec<Box<dyn MetricsSource>> {
    vec![
        Box::new(TestSetSource::new(test_set_path)),
        Box::new(PrecomputedSource::new(metrics_path)),
    ]
}
