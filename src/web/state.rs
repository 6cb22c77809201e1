// Shared, read-only service state handed to every request

use std::sync::Arc;

use diabetes_config::ServiceConfig;

use crate::metrics::sources::default_sources;
use crate::metrics::MetricsSource;
use crate::model::{ModelHandle, SharedModel};

pub struct ServiceState {
    pub model: SharedModel,
    pub metrics_sources: Arc<Vec<Box<dyn MetricsSource>>>,
}

pub type SharedServiceState = Arc<ServiceState>;

impl ServiceState {
    pub fn new(model: ModelHandle, metrics_sources: Vec<Box<dyn MetricsSource>>) -> Self {
        Self {
            model: Arc::new(model),
            metrics_sources: Arc::new(metrics_sources),
        }
    }

    /// Load the model once and wire the configured metrics sources.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let model = ModelHandle::load(&config.model_path);
        let sources = default_sources(&config.test_set_path, &config.metrics_path);
        Self::new(model, sources)
    }
}
