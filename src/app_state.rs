//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rusqlite::Connection;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    Error,
    auth::DEFAULT_COOKIE_DURATION,
    db::initialize,
    tag::{AccessPolicy, SQLiteTagStore, TagService, TagStore},
};

/// The state of the REST server.
///
/// `S` is the store backing the tag service.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// The database connection, used for the user table.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The service that owns the tags.
    pub tag_service: TagService<S>,
}

impl AppState<SQLiteTagStore> {
    /// Create a new [AppState] with tags stored in the SQLite database behind `db_connection`.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        cookie_secret: &str,
        policy: AccessPolicy,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));
        let tag_store = SQLiteTagStore::new(connection.clone());

        Ok(Self::with_store(connection, cookie_secret, tag_store, policy))
    }
}

impl<S> AppState<S>
where
    S: TagStore,
{
    /// Create a new [AppState] with tags kept in `tag_store`.
    ///
    /// The caller should ensure the user table exists in `db_connection`.
    pub fn with_store(
        db_connection: Arc<Mutex<Connection>>,
        cookie_secret: &str,
        tag_store: S,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            db_connection,
            tag_service: TagService::new(tag_store, policy),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl<S> FromRef<AppState<S>> for Key {
    fn from_ref(state: &AppState<S>) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
