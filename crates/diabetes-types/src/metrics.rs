// Metrics report shapes returned by `GET /metrics`

use std::collections::BTreeMap;

use serde::Serialize;

/// Metrics computed live against the held-out test set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComputedMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// `None` when the model exposes neither probabilities nor decision scores.
    pub roc_auc: Option<f64>,
}

/// Body of `GET /metrics`. Serialized without a tag; the key set tells
/// the variants apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricsReport {
    Computed(ComputedMetrics),
    /// Values loaded from the precomputed metrics file.
    Precomputed(BTreeMap<String, Option<f64>>),
    /// Every source failed; `details` maps `<source>_error` to its reason.
    Unavailable {
        error: String,
        details: BTreeMap<String, String>,
    },
    Failed {
        error: String,
    },
}
