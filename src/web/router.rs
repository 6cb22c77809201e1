// Request routing for the inference service

use hyper::{Body, Method, Request, Response, StatusCode};
use log::debug;
use std::convert::Infallible;

use super::response_helpers::{cors_preflight, json_error};
use super::routes;
use super::state::SharedServiceState;

pub async fn handle_request(
    req: Request<Body>,
    state: SharedServiceState,
) -> Result<Response<Body>, Infallible> {
    debug!("{} {}", req.method(), req.uri().path());

    match (req.method(), req.uri().path()) {
        (&Method::GET, "/health") => routes::health::handle().await,
        (&Method::POST, "/predict") => routes::predict::handle(req, state).await,
        (&Method::GET, "/metrics") => routes::metrics::handle(state).await,
        (&Method::OPTIONS, _) => Ok(cors_preflight()),
        _ => Ok(json_error(StatusCode::NOT_FOUND, "Not found")),
    }
}
