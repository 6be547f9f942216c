//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/tags/{tag_id}', use [format_endpoint].

/// The route to list tags and to create them.
pub const TAGS: &str = "/api/tags";
/// The route to get, update or delete a single tag.
pub const TAG: &str = "/api/tags/{tag_id}";
/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/tags/{tag_id}', '{tag_id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };
    let Some(length) = endpoint_path[start..].find('}') else {
        return endpoint_path.to_owned();
    };
    let end = start + length;

    let is_parameter = endpoint_path[start + 1..end]
        .chars()
        .all(|c| c.is_ascii_lowercase() || c == '_');

    if !is_parameter || end == start + 1 {
        return endpoint_path.to_owned();
    }

    format!(
        "{}{}{}",
        &endpoint_path[..start],
        id,
        &endpoint_path[end + 1..]
    )
}
