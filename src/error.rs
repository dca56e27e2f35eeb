use thiserror::Error;

use crate::domain::FormField;

/// Failures talking to the product collection resource.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Server responded {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Could not decode response: {0}")]
    Decode(String),
    #[error("Invalid resource URL: {0}")]
    InvalidUrl(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Input constraint violations on the product form.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(FormField),
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: FormField, value: String },
    #[error("{field} must not be negative, got {value:?}")]
    Negative { field: FormField, value: String },
    #[error("{0} must be a date (YYYY-MM-DD), got {1:?}")]
    InvalidDate(FormField, String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScreenError {
    #[error("The product form is not open")]
    FormClosed,
    #[error("The product code cannot be changed while editing")]
    CodeLocked,
    #[error("Product not in the current list: {0}")]
    NotListed(String),
    #[error("Invalid form input: {0}")]
    Form(#[from] FormError),
    #[error("Request failed: {0}")]
    Api(#[from] ApiError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
