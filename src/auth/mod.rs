//! Users, passwords, session cookies and the [AuthContext] handed to the service layer.

mod context;
mod cookie;
mod log_in;
mod log_out;
mod password;
mod token;
mod user;

pub use context::AuthContext;
pub(crate) use cookie::get_token_from_cookies;
pub use cookie::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{LogInData, post_log_in};
pub use log_out::post_log_out;
pub use password::{PasswordHash, ValidatedPassword};
pub(crate) use token::Token;
pub use user::{Profile, User, UserID, create_user, create_user_table, get_user_by_username};
