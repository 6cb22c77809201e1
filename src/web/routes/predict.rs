// Prediction route handler

use hyper::{Body, Request, Response, StatusCode};
use log::{error, info};
use std::convert::Infallible;

use diabetes_types::PatientRecord;

use crate::model::ModelError;
use crate::web::{
    request_parsing::parse_json_body,
    response_helpers::{json_error, json_response},
    state::SharedServiceState,
};

pub async fn handle(req: Request<Body>, state: SharedServiceState) -> Result<Response<Body>, Infallible> {
    let record: PatientRecord = match parse_json_body(req.into_body()).await {
        Ok(record) => record,
        Err(error_response) => return Ok(error_response),
    };

    match state.model.predict_record(&record) {
        Ok(result) => {
            info!(
                "[PREDICT] {} (class {}, confidence {})",
                result.result, result.prediction, result.confidence
            );
            Ok(json_response(StatusCode::OK, &result))
        }
        Err(e @ ModelError::NotLoaded(_)) => {
            error!("[PREDICT] {e}");
            Ok(json_error(StatusCode::SERVICE_UNAVAILABLE, &e.to_string()))
        }
        Err(e) => {
            error!("[PREDICT] Prediction failed: {e}");
            Ok(json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Prediction failed: {e}"),
            ))
        }
    }
}
