//! Error types shared by every endpoint.

use actix_web::{http::StatusCode, HttpResponse, HttpResponseBuilder, ResponseError};
use derive_more::{Display, Error};

/// Errors raised while handling an authenticated resource request.
///
/// Every failure short-circuits the request with the matching HTTP status
/// and an empty body; no internal detail reaches the client.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Credential or token verification failed, or a create-only endpoint
    /// was addressed with fetch semantics.
    #[display("unauthorized")]
    Unauthorized,

    /// The request method is not in the endpoint's allow-list.
    #[display("method not allowed")]
    MethodNotAllowed,

    /// The addressed user or session does not exist.
    #[display("not found")]
    NotFound,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AuthError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    #[test]
    fn test_unauthorized_status() {
        assert_eq!(
            AuthError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_method_not_allowed_status() {
        assert_eq!(
            AuthError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(AuthError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_response_body_is_empty() {
        let resp = AuthError::Unauthorized.error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = resp.into_body().try_into_bytes().unwrap();
        assert!(body.is_empty());
    }
}
