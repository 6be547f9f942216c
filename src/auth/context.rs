//! The caller's identity, as seen by the service layer.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{
    Error,
    auth::{Profile, UserID, get_token_from_cookies},
};

/// Who is making a request.
///
/// Service operations that change data take an `AuthContext` and check it
/// against their access policy. Handlers get one by extracting it from the
/// request; tests can build one directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthContext {
    /// No valid session.
    Anonymous,
    /// A logged in user.
    User {
        /// The logged in user's ID.
        user_id: UserID,
        /// The logged in user's profile.
        profile: Profile,
    },
}

impl AuthContext {
    /// Shorthand for a logged in administrator.
    pub fn administrator(user_id: UserID) -> Self {
        Self::User {
            user_id,
            profile: Profile::Administrator,
        }
    }

    /// Check the caller against `required`.
    ///
    /// `None` means anyone, including anonymous callers, may proceed.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotAuthenticated] if a profile is required and the
    /// caller is anonymous, and [Error::InsufficientPrivileges] if the caller's
    /// profile is lower than the required one.
    pub fn require(&self, required: Option<Profile>) -> Result<(), Error> {
        let Some(required) = required else {
            return Ok(());
        };

        match self {
            AuthContext::Anonymous => Err(Error::NotAuthenticated),
            AuthContext::User { profile, .. } if *profile >= required => Ok(()),
            AuthContext::User { .. } => Err(Error::InsufficientPrivileges(required)),
        }
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_headers(&parts.headers, Key::from_ref(state));

        Ok(match get_token_from_cookies(&jar) {
            Ok(token) => AuthContext::User {
                user_id: token.user_id,
                profile: token.profile,
            },
            Err(_) => AuthContext::Anonymous,
        })
    }
}

#[cfg(test)]
mod auth_context_tests {
    use crate::{
        Error,
        auth::{AuthContext, Profile, UserID},
    };

    #[test]
    fn anyone_passes_an_open_check() {
        assert_eq!(AuthContext::Anonymous.require(None), Ok(()));
    }

    #[test]
    fn anonymous_fails_a_guarded_check() {
        assert_eq!(
            AuthContext::Anonymous.require(Some(Profile::Editor)),
            Err(Error::NotAuthenticated)
        );
    }

    #[test]
    fn lower_profile_fails_a_guarded_check() {
        let context = AuthContext::User {
            user_id: UserID::new(2),
            profile: Profile::Editor,
        };

        assert_eq!(
            context.require(Some(Profile::Administrator)),
            Err(Error::InsufficientPrivileges(Profile::Administrator))
        );
    }

    #[test]
    fn higher_profile_passes_a_guarded_check() {
        let context = AuthContext::administrator(UserID::new(1));

        assert_eq!(context.require(Some(Profile::Editor)), Ok(()));
        assert_eq!(context.require(Some(Profile::Administrator)), Ok(()));
    }
}
