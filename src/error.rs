//! Defines the app level error type and conversions to rendered HTML pages, alerts and JSON.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HxReswap, SwapOption};
use serde_json::json;

use crate::{
    alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The request body for creating or updating a transaction was missing a
    /// field, had the wrong type or contained an invalid value.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// A query parameter used to filter transactions could not be parsed.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code that best describes the error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                StatusCode::NOT_FOUND
            }
            Error::InvalidTransaction(_) | Error::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            Error::SqlError(_) | Error::DatabaseLockError | Error::InvalidTimezoneError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// A message that is safe to show to the client.
    ///
    /// Internal errors are replaced with a generic message, the details
    /// should be logged on the server instead.
    pub fn client_message(&self) -> String {
        match self {
            Error::SqlError(_) | Error::DatabaseLockError => {
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            Error::UpdateMissingTransaction => "The transaction could not be found.".to_owned(),
            Error::DeleteMissingTransaction => "The transaction could not be found. \
                Try refreshing the page to see if the transaction has already been deleted."
                .to_owned(),
            error => error.to_string(),
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// `message` is the headline of the alert, the error provides the details.
    /// The response swaps its inner HTML into the target even when the
    /// requesting element has `hx-swap="none"`.
    pub fn into_alert_response(self, message: &str) -> Response {
        let alert = Alert {
            message: message.to_owned(),
            details: self.client_message(),
        };

        (
            self.status_code(),
            HxReswap(SwapOption::InnerHtml),
            alert.into_html(),
        )
            .into_response()
    }

    /// Convert the error into an HTTP response with a JSON body of the form
    /// `{"error": "..."}`.
    pub fn into_json_response(self) -> Response {
        let body = Json(json!({ "error": self.client_message() }));

        (self.status_code(), body).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidFilter(ref details) => InternalServerError {
                description: "Invalid filter",
                fix: &format!("{details}. Clear the filters and try again."),
            }
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
