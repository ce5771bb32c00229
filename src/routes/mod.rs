// Route exports
pub mod matches;
pub mod profiles;
pub mod requests;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use crate::core::MatchError;
use crate::models::ErrorResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(profiles::configure)
            .configure(requests::configure),
    );
}

/// 400 response with the shared error body
pub fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: StatusCode::BAD_REQUEST.as_u16(),
    })
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let response = bad_request("invalid_json", format!("Invalid JSON: {}", err));
    error::InternalError::from_response(err, response).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = bad_request("invalid_query", format!("Invalid query: {}", err));
    error::InternalError::from_response(err, response).into()
}

/// HTTP status for a core error
pub fn status_for(err: &MatchError) -> StatusCode {
    match err {
        MatchError::NotFound(_) => StatusCode::NOT_FOUND,
        MatchError::Validation(_) => StatusCode::BAD_REQUEST,
        MatchError::Forbidden(_) => StatusCode::FORBIDDEN,
        MatchError::Resolution(_) | MatchError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error body for a core error
pub fn error_response(err: &MatchError) -> HttpResponse {
    let status = status_for(err);
    HttpResponse::build(status).json(ErrorResponse {
        error: err.kind().to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}
