//! Error responses for the spread server

use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pdf_spread::{ErrorKind, SpreadError};
use serde::Serialize;
use thiserror::Error;

pub const MISSING_INPUT_MESSAGE: &str = "No PDF data provided.";
pub const MALFORMED_MESSAGE: &str = "The uploaded file could not be read as a PDF.";
pub const GENERIC_MESSAGE: &str =
    "Please verify your PDF page numbers or try again due to a technical issue.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Spread(#[from] SpreadError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// An extractor refused the request before it reached the handler
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // A body that parses but does not fit the upload shape is still a bad request
        let status = match &rejection {
            JsonRejection::JsonDataError(_) => StatusCode::BAD_REQUEST,
            _ => rejection.status(),
        };
        ApiError::Rejected {
            status,
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        ApiError::Rejected {
            status: error.status(),
            message: error.body_text(),
        }
    }
}

impl ApiError {
    /// Status and caller-facing message. Internal detail stays in the log.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Spread(e) => match e.kind() {
                ErrorKind::MissingInput => {
                    (StatusCode::BAD_REQUEST, MISSING_INPUT_MESSAGE.to_string())
                }
                ErrorKind::InvalidRequest => (StatusCode::BAD_REQUEST, e.to_string()),
                ErrorKind::MalformedDocument => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    MALFORMED_MESSAGE.to_string(),
                ),
                ErrorKind::PageOutOfRange => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
                ErrorKind::RenderingFailure => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_MESSAGE.to_string(),
                ),
            },
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Base64(_) => (
                StatusCode::BAD_REQUEST,
                "The pdfBase64 field is not valid base64.".to_string(),
            ),
            ApiError::Rejected { status, message } => (*status, message.clone()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        tracing::error!("Request failed with {}: {}", status, self);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> lopdf::Error {
        lopdf::Document::load_mem(b"not a pdf").unwrap_err()
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (SpreadError::MissingInput, StatusCode::BAD_REQUEST),
            (
                SpreadError::InvalidPairings("empty".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                SpreadError::MalformedDocument(parse_error()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                SpreadError::PageOutOfRange {
                    index: 16,
                    page_count: 3,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                SpreadError::InvalidPageBox { index: 0 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            let (status, _) = ApiError::from(error).status_and_message();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_rendering_failure_hides_detail() {
        let error = ApiError::from(SpreadError::Io(std::io::Error::other("disk on fire")));
        let (_, message) = error.status_and_message();
        assert_eq!(message, GENERIC_MESSAGE);
    }

    #[test]
    fn test_out_of_range_names_index() {
        let error = ApiError::from(SpreadError::PageOutOfRange {
            index: 16,
            page_count: 3,
        });
        let (_, message) = error.status_and_message();
        assert!(message.contains("16"));
        assert!(message.contains('3'));
    }
}
