//! Defines functions for storing the auth token in a private cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    auth::{Profile, Token, UserID},
};

/// The name of the cookie holding the serialized [Token].
pub const COOKIE_TOKEN: &str = "auth_token";

/// The default duration for which auth cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(15);

/// Add an auth cookie to the cookie jar, indicating that a user is logged in and authenticated.
///
/// Sets the expiry of the cookie and the token inside it to `duration` from the current time.
///
/// # Errors
///
/// Returns an [Error::JSONSerializationError] if the token could not be serialized.
pub fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    profile: Profile,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expires_at = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or_else(|| Error::InvalidDateFormat(format!("now + {duration} overflowed")))?;
    let token = Token {
        user_id,
        profile,
        expires_at,
    };
    let token_string = serde_json::to_string(&token)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((COOKIE_TOKEN, token_string))
            .path("/")
            .expires(expires_at)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Set the auth cookie to an invalid value and set its max age to zero, which should delete the cookie on the client side.
pub fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Get the token from the auth cookie if it exists and has not expired.
///
/// # Errors
///
/// Returns an [Error::CookieMissing] if there is no auth cookie, it cannot be
/// decoded, or the token inside has expired.
pub fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::CookieMissing)?;
    let token: Token =
        serde_json::from_str(cookie.value_trimmed()).map_err(|_| Error::CookieMissing)?;

    if token.is_live_at(OffsetDateTime::now_utc()) {
        Ok(token)
    } else {
        Err(Error::CookieMissing)
    }
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        auth::{Profile, UserID},
    };

    use super::{
        COOKIE_TOKEN, get_token_from_cookies, invalidate_auth_cookie, set_auth_cookie,
    };

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"foobar");
        let key = Key::from(&hash);

        PrivateCookieJar::new(key)
    }

    #[test]
    fn set_cookie_then_read_token() {
        let jar = set_auth_cookie(
            get_jar(),
            UserID::new(7),
            Profile::Administrator,
            Duration::minutes(5),
        )
        .unwrap();

        let token = get_token_from_cookies(&jar).unwrap();

        assert_eq!(token.user_id, UserID::new(7));
        assert_eq!(token.profile, Profile::Administrator);
        assert!(token.expires_at > OffsetDateTime::now_utc() + Duration::minutes(4));
    }

    #[test]
    fn auth_cookie_is_locked_down() {
        let jar = set_auth_cookie(
            get_jar(),
            UserID::new(1),
            Profile::Editor,
            Duration::minutes(5),
        )
        .unwrap();

        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn expired_token_is_rejected() {
        let jar = set_auth_cookie(
            get_jar(),
            UserID::new(1),
            Profile::Administrator,
            Duration::seconds(-1),
        )
        .unwrap();

        assert_eq!(get_token_from_cookies(&jar), Err(Error::CookieMissing));
    }

    #[test]
    fn missing_cookie_is_rejected() {
        assert_eq!(get_token_from_cookies(&get_jar()), Err(Error::CookieMissing));
    }

    #[test]
    fn invalidated_cookie_is_rejected() {
        let jar = set_auth_cookie(
            get_jar(),
            UserID::new(1),
            Profile::Administrator,
            Duration::minutes(5),
        )
        .unwrap();

        let jar = invalidate_auth_cookie(jar);

        assert_eq!(get_token_from_cookies(&jar), Err(Error::CookieMissing));
    }
}
