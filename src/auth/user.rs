//! Code for creating the user table and fetching users from the database.

use std::{fmt::Display, str::FromStr};

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, auth::PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The privilege level of a user.
///
/// Profiles are ordered, so `Profile::Administrator > Profile::Editor` and a
/// user satisfies a requirement if their profile is at least the required one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub enum Profile {
    /// A logged in user without any editing rights.
    RegisteredUser,
    /// May edit catalogue content.
    Editor,
    /// May manage users.
    UserAdmin,
    /// May do anything, including managing tags.
    Administrator,
}

impl Profile {
    /// The name used for this profile in the database and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::RegisteredUser => "RegisteredUser",
            Profile::Editor => "Editor",
            Profile::UserAdmin => "UserAdmin",
            Profile::Administrator => "Administrator",
        }
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RegisteredUser" => Ok(Profile::RegisteredUser),
            "Editor" => Ok(Profile::Editor),
            "UserAdmin" => Ok(Profile::UserAdmin),
            "Administrator" => Ok(Profile::Administrator),
            other => Err(Error::InvalidProfile(other.to_owned())),
        }
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The name the user logs in with.
    pub username: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// What the user is allowed to do.
    pub profile: Profile,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                profile TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a [Error::DuplicateUsername] if `username` is taken, or a
/// [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(
    username: &str,
    password_hash: PasswordHash,
    profile: Profile,
    connection: &Connection,
) -> Result<User, Error> {
    connection
        .execute(
            "INSERT INTO user (username, password, profile) VALUES (?1, ?2, ?3)",
            (username, password_hash.as_ref(), profile.as_str()),
        )
        .map_err(|error| match error {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.username") =>
            {
                Error::DuplicateUsername(username.to_owned())
            }
            error => error.into(),
        })?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        username: username.to_owned(),
        password_hash,
        profile,
    })
}

/// Get the user from the database with the login name `username`.
///
/// # Errors
///
/// This function will return an error if:
/// - `username` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_username(username: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, username, password, profile FROM user WHERE username = :username")?
        .query_row(&[(":username", username)], map_row)
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_id = row.get(0)?;
    let username = row.get(1)?;
    let raw_password_hash: String = row.get(2)?;
    let raw_profile: String = row.get(3)?;

    let profile = raw_profile.parse().map_err(|error: Error| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(error))
    })?;

    Ok(User {
        id: UserID::new(raw_id),
        username,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        profile,
    })
}

#[cfg(test)]
mod user_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        auth::{PasswordHash, Profile, create_user, create_user_table, get_user_by_username},
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_user_table(&connection).expect("Could not create user table");
        connection
    }

    #[test]
    fn create_and_get_user() {
        let connection = get_test_db_connection();
        let hash = PasswordHash::new_unchecked("not-a-real-hash");

        let user = create_user("admin", hash, Profile::Administrator, &connection)
            .expect("Could not create user");
        let got = get_user_by_username("admin", &connection);

        assert_eq!(got, Ok(user));
    }

    #[test]
    fn create_user_with_taken_username_fails() {
        let connection = get_test_db_connection();
        let hash = PasswordHash::new_unchecked("not-a-real-hash");
        create_user("admin", hash.clone(), Profile::Administrator, &connection).unwrap();

        let result = create_user("admin", hash, Profile::Editor, &connection);

        assert_eq!(result, Err(Error::DuplicateUsername("admin".to_owned())));
    }

    #[test]
    fn get_unknown_user_returns_not_found() {
        let connection = get_test_db_connection();

        assert_eq!(
            get_user_by_username("nobody", &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn profiles_are_ordered_by_privilege() {
        assert!(Profile::Administrator > Profile::UserAdmin);
        assert!(Profile::UserAdmin > Profile::Editor);
        assert!(Profile::Editor > Profile::RegisteredUser);
    }

    #[test]
    fn profile_round_trips_through_its_name() {
        for profile in [
            Profile::RegisteredUser,
            Profile::Editor,
            Profile::UserAdmin,
            Profile::Administrator,
        ] {
            assert_eq!(profile.as_str().parse::<Profile>(), Ok(profile));
        }

        assert_eq!(
            "Superuser".parse::<Profile>(),
            Err(Error::InvalidProfile("Superuser".to_owned()))
        );
    }
}
