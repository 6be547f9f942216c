//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{auth::Profile, tag::TagId};

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

    /// An empty string was used to create a tag name.
    #[error("Tag name cannot be empty")]
    EmptyTagName,

    /// Another tag already uses this name.
    #[error("a tag named \"{0}\" already exists")]
    DuplicateTagName(String),

    /// A tag was inserted with an ID that is already taken.
    #[error("a tag with the ID {0} already exists")]
    DuplicateTagId(TagId),

    /// The largest possible tag ID is taken, so no new ID can be assigned.
    #[error("no tag ID is left to assign")]
    TagIdsExhausted,

    /// The operation needs a logged in user, but the request carried no valid
    /// session.
    #[error("you must be logged in to do this")]
    NotAuthenticated,

    /// The logged in user's profile is below the one the operation requires.
    #[error("this requires the {0} profile")]
    InsufficientPrivileges(Profile),

    /// The user provided an invalid combination of username and password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The auth cookie is missing, expired or could not be decoded.
    #[error("no valid auth cookie in the cookie jar")]
    CookieMissing,

    /// There was an error formatting or parsing the expiry date of a token.
    #[error("could not format expiry date-time: {0}")]
    InvalidDateFormat(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The username is already taken by another user.
    #[error("the username \"{0}\" already exists in the database")]
    DuplicateUsername(String),

    /// A string could not be parsed as a [Profile].
    #[error("\"{0}\" is not a valid profile")]
    InvalidProfile(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
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

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::EmptyTagName => StatusCode::BAD_REQUEST,
            Error::DuplicateTagName(_) | Error::DuplicateTagId(_) => StatusCode::CONFLICT,
            Error::NotAuthenticated | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::InsufficientPrivileges(_) => StatusCode::FORBIDDEN,
            // Any errors that are not handled above are not intended to be shown to the client.
            _ => {
                tracing::error!("An unexpected error occurred: {}", self);

                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "An unexpected error occurred, check the server logs for more details.",
                    })),
                )
                    .into_response();
            }
        };

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
