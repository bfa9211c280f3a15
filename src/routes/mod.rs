//! HTTP handlers. Each handler converts its input into domain values, calls a
//! service and maps the result to a JSON response.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::dto::error::StandardError;
use crate::services::ServiceError;

pub mod auth;
pub mod client;
pub mod service_order;

fn status_of(err: &ServiceError) -> (StatusCode, &'static str) {
    match err {
        ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "Não encontrado"),
        ServiceError::DataIntegrity(_) => (StatusCode::CONFLICT, "Integridade de dados"),
        ServiceError::Conflict(_) => (StatusCode::CONFLICT, "Conflito"),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            (StatusCode::BAD_REQUEST, "Erro de validação")
        }
        ServiceError::Notification(_) => (StatusCode::BAD_GATEWAY, "Falha no envio de email"),
        ServiceError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Erro interno"),
    }
}

pub fn error_body(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(StandardError::new(status.as_u16(), error, message))
}

/// Maps a service failure to its status code and a [`StandardError`] body.
/// Server-side details are logged instead of returned.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let (status, error) = status_of(err);

    let message = if status.is_server_error() {
        log::error!("{err}");
        error.to_string()
    } else {
        err.to_string()
    };

    error_body(status, error, message)
}

pub fn internal_error() -> HttpResponse {
    error_body(StatusCode::INTERNAL_SERVER_ERROR, "Erro interno", "Erro interno")
}

/// Malformed JSON bodies answer with a [`StandardError`] like every other
/// client error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let response = error_body(StatusCode::BAD_REQUEST, "Erro de validação", err.to_string());
        InternalError::from_response(err, response).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        let response = error_body(StatusCode::BAD_REQUEST, "Erro de validação", err.to_string());
        InternalError::from_response(err, response).into()
    })
}
