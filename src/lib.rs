//! Tagkeeper is a small REST service for managing the tags used to
//! classify records in a catalogue.
//!
//! Tags are listed, fetched, created, renamed and deleted over a JSON API
//! under `/api/tags`. Writes are checked against an [AccessPolicy] using the
//! profile of the logged in user, whose session is held in a private cookie.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod db;
pub mod endpoints;
mod error;
mod logging;
mod routing;
mod tag;
#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, create_cookie_key};
pub use auth::{
    AuthContext, COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, LogInData, PasswordHash, Profile, User,
    UserID, ValidatedPassword, create_user, get_user_by_username,
};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use tag::{
    AccessPolicy, DEFAULT_TAG_NAMES, InMemoryTagStore, SQLiteTagStore, Tag, TagId, TagName,
    TagPayload, TagService, TagStore, UNASSIGNED_TAG_ID,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
