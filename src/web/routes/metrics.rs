// Metrics route handler

use hyper::{Body, Response, StatusCode};
use log::error;
use std::convert::Infallible;

use diabetes_types::MetricsReport;

use crate::metrics::collect_metrics;
use crate::web::{response_helpers::json_response, state::SharedServiceState};

/// Recomputed on every call; the body carries `error` when no source works.
pub async fn handle(state: SharedServiceState) -> Result<Response<Body>, Infallible> {
    let report = tokio::task::spawn_blocking(move || {
        collect_metrics(&state.metrics_sources, &state.model)
    })
    .await
    .unwrap_or_else(|e| {
        error!("[METRICS] Worker failed: {e}");
        MetricsReport::Failed {
            error: format!("Unexpected error computing metrics: {e}"),
        }
    });

    Ok(json_response(StatusCode::OK, &report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricsError, MetricsSource};
    use crate::model::ModelHandle;
    use crate::web::state::ServiceState;
    use std::sync::Arc;

    struct Broken;

    impl MetricsSource for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn load(&self, _model: &ModelHandle) -> Result<MetricsReport, MetricsError> {
            panic!("metrics worker crashed");
        }
    }

    #[tokio::test]
    async fn test_worker_panic_returns_generic_error() {
        let state = Arc::new(ServiceState::new(
            ModelHandle::unloaded("not needed"),
            vec![Box::new(Broken)],
        ));
        let response = handle(state).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        let error = obj["error"].as_str().unwrap();
        assert!(error.starts_with("Unexpected error computing metrics: "));
        assert!(error.contains("panicked"));
    }
}
