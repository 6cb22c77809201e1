// Inference service: GET /health, POST /predict, GET /metrics
use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Context;
use hyper::service::{make_service_fn, service_fn};
use hyper::Server;
use log::{info, warn};

use diabetes_predict::config::ServiceConfig;
use diabetes_predict::logger::setup_logging;
use diabetes_predict::web::{handle_request, ServiceState, SharedServiceState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = ServiceConfig::from_args(&args)?;

    if let Err(e) = setup_logging(&config.log_dir, "diabetes_service", true) {
        eprintln!("Failed to set up logging: {e}");
    }
    if let Some(w) = args.windows(2).find(|w| w[0] == "--config") {
        info!("Loaded service config from {}", w[1]);
    }

    // Model load failure is not fatal; /predict reports it per request.
    let state: SharedServiceState = Arc::new(ServiceState::from_config(&config));
    if !state.model.is_loaded() {
        warn!("Starting without a model; /predict will answer 503");
    }

    let make_svc = make_service_fn({
        let state = state.clone();
        move |_conn| {
            let state = state.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |req| handle_request(req, state.clone())))
            }
        }
    });

    let addr = config.socket_addr()?;
    let server = Server::try_bind(&addr)
        .with_context(|| format!("failed to bind {addr}"))?
        .serve(make_svc);

    info!("Diabetes prediction service listening on http://{addr}");
    info!("Available endpoints:");
    info!("  GET  /health   - Health check");
    info!("  POST /predict  - Classify a patient record");
    info!("  GET  /metrics  - Model metrics on held-out data");

    server.await.context("server error")?;
    Ok(())
}
