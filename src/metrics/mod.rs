//! Classification metrics and the sources `GET /metrics` reads them from.
//!
//! Precision, recall and F1 treat a zero denominator as 0. ROC-AUC uses the
//! rank-sum statistic with averaged ranks for tied scores.

pub mod sources;
pub mod testset;

use std::path::PathBuf;

use crate::model::ModelError;

pub use sources::{collect_metrics, MetricsSource, PrecomputedSource, TestSetSource};
pub use testset::{load_test_set, TestSet};

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed test set {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed metrics file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid test set: {0}")]
    InvalidTestSet(String),
    #[error("could not convert metric '{key}' to float: {value}")]
    InvalidValue { key: String, value: String },
    #[error("metrics file must contain a JSON object")]
    NotAnObject,
    #[error("Only one class present in y_true. ROC AUC score is not defined in that case.")]
    SingleClass,
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Confusion counts for the positive class 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confusion {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_: usize,
}

impl Confusion {
    pub fn from_labels(y_true: &[u8], y_pred: &[u8]) -> Self {
        let mut counts = Confusion::default();
        for (&truth, &pred) in y_true.iter().zip(y_pred) {
            match (truth == 1, pred == 1) {
                (true, true) => counts.tp += 1,
                (false, true) => counts.fp += 1,
                (false, false) => counts.tn += 1,
                (true, false) => counts.fn_ += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

pub fn accuracy(counts: &Confusion) -> f64 {
    ratio(counts.tp + counts.tn, counts.total())
}

pub fn precision(counts: &Confusion) -> f64 {
    ratio(counts.tp, counts.tp + counts.fp)
}

pub fn recall(counts: &Confusion) -> f64 {
    ratio(counts.tp, counts.tp + counts.fn_)
}

pub fn f1_score(counts: &Confusion) -> f64 {
    let p = precision(counts);
    let r = recall(counts);
    if p + r == 0.0 {
        0.0
    } else {
        2.0 * p * r / (p + r)
    }
}

/// Area under the ROC curve for scores where larger means "more class 1".
pub fn roc_auc(y_true: &[u8], scores: &[f64]) -> Result<f64, MetricsError> {
    let n_pos = y_true.iter().filter(|&&y| y == 1).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return Err(MetricsError::SingleClass);
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    // 1-based ranks, ties share the mean of the ranks they span
    let mut ranks = vec![0.0; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && scores[order[end + 1]] == scores[order[start]] {
            end += 1;
        }
        let mean_rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = mean_rank;
        }
        start = end + 1;
    }

    let pos_rank_sum: f64 = y_true
        .iter()
        .zip(&ranks)
        .filter(|(&y, _)| y == 1)
        .map(|(_, r)| r)
        .sum();
    let n_pos = n_pos as f64;
    Ok((pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg as f64))
}
