use aws_sdk_s3::{
    error::SdkError, presigning::PresigningConfigError, primitives::ByteStreamError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0} param required")]
    MissingParameter(&'static str),

    #[error("No title found for {0}")]
    TitleNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("OMDb API error ({status}): {message}")]
    OmdbApi {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Gist upstream returned {status}")]
    GistUpstream { status: reqwest::StatusCode },

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Object store error: {0}")]
    S3(Box<aws_sdk_s3::Error>),

    #[error("Object body error: {0}")]
    ByteStream(#[from] ByteStreamError),

    #[error("Presigning error: {0}")]
    Presigning(#[from] PresigningConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl<E, R> From<SdkError<E, R>> for GatewayError
where
    aws_sdk_s3::Error: From<SdkError<E, R>>,
{
    fn from(err: SdkError<E, R>) -> Self {
        GatewayError::S3(Box::new(err.into()))
    }
}

impl GatewayError {
    /// HTTP status reported to the caller for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            GatewayError::TitleNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::GistUpstream { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::Config(_)
            | GatewayError::OmdbApi { .. }
            | GatewayError::Reqwest(_)
            | GatewayError::Json(_)
            | GatewayError::S3(_)
            | GatewayError::ByteStream(_)
            | GatewayError::Presigning(_)
            | GatewayError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!("Request failed ({status}): {message}");
        } else {
            warn!("Request rejected ({status}): {message}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
