// Route exports
pub mod matching;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};

use crate::error::MatchError;
use crate::models::ApiResponse;

pub use matching::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api/v1")
            .configure(matching::configure)
            .default_service(web::route().to(not_found)),
    );
}

/// Fallback for unknown endpoints
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::failure("Endpoint not found"))
}

/// JSON extractor config that reports payload errors in the response envelope
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::failure(format!("Invalid JSON: {}", err)));
    error::InternalError::from_response(err, response).into()
}

impl ResponseError for MatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            MatchError::Validation(_) => StatusCode::BAD_REQUEST,
            MatchError::NotFound(_) => StatusCode::NOT_FOUND,
            MatchError::Store(_) => StatusCode::BAD_GATEWAY,
            MatchError::InvalidRecord(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::failure(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(MatchError::missing("user_id").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            MatchError::NotFound("Project not found".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            MatchError::InvalidRecord("bad".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
