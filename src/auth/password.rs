//! Password strength checks for new accounts and bcrypt hashes for stored ones.

use std::fmt;

use bcrypt::BcryptError;
use zxcvbn::{Score, feedback::Feedback, zxcvbn};

use crate::Error;

/// The lowest zxcvbn score a new password may have.
const MINIMUM_SCORE: Score = Score::Three;

/// A password that passed the strength checks for a particular user.
///
/// Only exists to be turned into a [PasswordHash]. The `Debug` output never
/// shows the password.
#[derive(Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Check `raw_password` as the password for the user called `username`.
    ///
    /// # Errors
    ///
    /// Returns [Error::TooWeak] if the password contains the username
    /// (ignoring case) or zxcvbn scores it below three. The message carries
    /// zxcvbn's warning and suggestions for a stronger password.
    pub fn new(raw_password: &str, username: &str) -> Result<Self, Error> {
        let username = username.trim();

        if !username.is_empty()
            && raw_password
                .to_lowercase()
                .contains(&username.to_lowercase())
        {
            return Err(Error::TooWeak(
                "The password must not contain the username.".to_owned(),
            ));
        }

        let entropy = zxcvbn(raw_password, &[username]);

        if entropy.score() >= MINIMUM_SCORE {
            Ok(Self(raw_password.to_owned()))
        } else {
            Err(Error::TooWeak(describe_weakness(entropy.feedback())))
        }
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(raw_password: &str) -> Self {
        Self(raw_password.to_owned())
    }
}

impl fmt::Debug for ValidatedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidatedPassword(********)")
    }
}

/// Join zxcvbn's warning and suggestions into one sentence-per-hint message.
fn describe_weakness(feedback: Option<&Feedback>) -> String {
    let Some(feedback) = feedback else {
        return "Choose a longer, less predictable password.".to_owned();
    };

    feedback
        .warning()
        .map(|warning| warning.to_string())
        .into_iter()
        .chain(feedback.suggestions().iter().map(|hint| hint.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A salted bcrypt hash of a user's password, as stored in the user table.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// The bcrypt cost used for real accounts.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash `password` with bcrypt at `cost` rounds.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if bcrypt rejects the cost or fails.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        bcrypt::hash(password.0, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Wrap a hash read back from the database.
    pub fn new_unchecked(stored_hash: &str) -> Self {
        Self(stored_hash.to_owned())
    }

    /// Whether `raw_password` is the password this hash was made from.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        bcrypt::verify(raw_password, &self.0)
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}


#[cfg(test)]
mod password_hash_tests {
    use crate::auth::{PasswordHash, ValidatedPassword};

    #[test]
    fn verify_accepts_the_hashed_password() {
        let password = ValidatedPassword::new("turkeysgogobblegobble", "admin").unwrap();
        let hash = PasswordHash::new(password, 4).unwrap();

        assert!(hash.verify("turkeysgogobblegobble").unwrap());
        assert!(!hash.verify("turkeysgogobble").unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let password = ValidatedPassword::new_unchecked("averysafeandsecurepassword");

        let first = PasswordHash::new(password.clone(), 4).unwrap();
        let second = PasswordHash::new(password, 4).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn stored_hash_round_trips_through_as_ref() {
        let hash = PasswordHash::new_unchecked(
            "$2b$12$Gwf0uvxH3L7JLfo0CC/NCOoijK2vQ/wbgP.LeNup8vj6gg31IiFkm",
        );

        assert!(hash.as_ref().starts_with("$2b$12$"));
        assert!(hash.verify("okon").unwrap());
    }

    #[test]
    fn invalid_cost_is_a_hashing_error() {
        let password = ValidatedPassword::new_unchecked("averysafeandsecurepassword");

        let result = PasswordHash::new(password, 1);

        assert!(matches!(result, Err(crate::Error::HashingError(_))));
    }
}
