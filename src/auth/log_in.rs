//! This file defines the route for handling log-in requests.
//! The rest of the auth module handles the lower level cookie and session logic.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    auth::{User, get_user_by_username, set_auth_cookie},
};

/// How long the auth cookie should last if the user selects "remember me" at log-in.
const REMEMBER_ME_COOKIE_DURATION: Duration = Duration::days(7);

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection holding the user table.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl<S> FromRef<AppState<S>> for LoginState {
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

/// The credentials sent by the client when logging in.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// The user's login name.
    pub username: String,

    /// Password entered during log-in.
    pub password: String,

    /// Whether to extend the initial auth cookie duration to one week.
    #[serde(default)]
    pub remember_me: bool,
}

/// Handler for log-in requests via the POST method.
///
/// On success the auth cookie is set and a 204 response is returned.
///
/// # Errors
///
/// Responds with 401 if the username is unknown or the password is wrong,
/// and with 500 if an internal error occurred while checking the password.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Json(user_data): Json<LogInData>,
) -> Response {
    match log_in(&state, jar, &user_data) {
        Ok(jar) => (StatusCode::NO_CONTENT, jar).into_response(),
        Err(error) => error.into_response(),
    }
}

fn log_in(
    state: &LoginState,
    jar: PrivateCookieJar,
    user_data: &LogInData,
) -> Result<PrivateCookieJar, Error> {
    let user = find_user(state, &user_data.username)?;

    let is_password_valid = user
        .password_hash
        .verify(&user_data.password)
        .map_err(|error| {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            Error::HashingError(error.to_string())
        })?;

    if !is_password_valid {
        tracing::info!("Rejected log in for {}: wrong password", user.username);
        return Err(Error::InvalidCredentials);
    }

    let cookie_duration = if user_data.remember_me {
        REMEMBER_ME_COOKIE_DURATION
    } else {
        state.cookie_duration
    };

    tracing::info!("{} logged in as {}", user.username, user.profile);
    set_auth_cookie(jar, user.id, user.profile, cookie_duration)
}

fn find_user(state: &LoginState, username: &str) -> Result<User, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match get_user_by_username(username, &connection) {
        Ok(user) => Ok(user),
        Err(Error::NotFound) => {
            tracing::info!("Rejected log in for unknown user {username}");
            Err(Error::InvalidCredentials)
        }
        Err(error) => Err(error),
    }
}
