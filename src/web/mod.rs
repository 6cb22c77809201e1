// Inference service HTTP layer

pub mod request_parsing;
pub mod response_helpers;
pub mod router;
pub mod routes;
pub mod state;

pub use router::handle_request;
pub use state::{ServiceState, SharedServiceState};
