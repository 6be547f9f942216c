//! Tag creation endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::AuthContext,
    tag::{TagName, TagPayload, TagStore, list::TagState},
};

/// Handle `PUT /api/tags`: create a tag, or replace the name of the tag whose ID is given.
///
/// Responds with 204 on success.
pub async fn create_tag_endpoint<S>(
    State(state): State<TagState<S>>,
    auth: AuthContext,
    Json(payload): Json<TagPayload>,
) -> Response
where
    S: TagStore,
{
    let result = TagName::new(&payload.name).and_then(|name| {
        state
            .tag_service
            .create_or_replace(&auth, payload.requested_id(), name)
    });

    match result {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error @ (Error::NotAuthenticated | Error::InsufficientPrivileges(_))) => {
            tracing::warn!("Refused to create tag \"{}\": {error}", payload.name);
            error.into_response()
        }
        Err(error) => error.into_response(),
    }
}
