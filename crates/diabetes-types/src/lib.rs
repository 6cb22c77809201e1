//! Wire types shared by the inference service and the terminal client.

pub mod metrics;
pub mod patient;
pub mod prediction;

pub use metrics::{ComputedMetrics, MetricsReport};
pub use patient::{FeatureVector, FieldKind, FieldSpec, PatientRecord, FEATURE_COUNT, FEATURE_ORDER, PATIENT_FIELDS};
pub use prediction::{round_confidence, Diagnosis, PredictionResult};
