use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::list_client;

use super::types::DataParsingError;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("request body rejected: {0}")]
    JsonRejection(String),

    #[error("provider rejected the request with status {status}: {message:?}")]
    ProviderRejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("list client error: {0}")]
    ListClient(#[from] list_client::Error),
}

impl From<JsonRejection> for Error {
    fn from(value: JsonRejection) -> Self {
        Self::JsonRejection(value.body_text())
    }
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::DataParsing(_) => (StatusCode::BAD_REQUEST, InvalidEmail),
            Error::JsonRejection(reason) => (StatusCode::BAD_REQUEST, InvalidInput(reason.clone())),
            Error::ProviderRejected { status, message } => (
                *status,
                ProviderError(message.clone().unwrap_or_else(|| "Mailchimp error".to_string())),
            ),
            Error::ListClient(er) => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError(er.to_string())),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The error message a caller gets to see in `{ "success": false, "error": ... }`.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Invalid email address")]
    InvalidEmail,
    #[display("{_0}")]
    InvalidInput(String),
    #[display("{_0}")]
    ProviderError(String),
    #[display("Server error: {_0}")]
    ServiceError(String),
}
