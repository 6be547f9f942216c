//! Tag update endpoint.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::AuthContext,
    tag::{TagId, TagName, TagPayload, TagStore, list::TagState},
};

/// Handle `PUT /api/tags/{tag_id}`: rename an existing tag.
///
/// Any `id` in the body is ignored in favour of the one in the path.
/// Responds with 204 on success and 404 if the tag does not exist.
pub async fn update_tag_endpoint<S>(
    Path(tag_id): Path<TagId>,
    State(state): State<TagState<S>>,
    auth: AuthContext,
    Json(payload): Json<TagPayload>,
) -> Response
where
    S: TagStore,
{
    let result = TagName::new(&payload.name)
        .and_then(|name| state.tag_service.update(&auth, tag_id, name));

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(Error::NotFound) => {
            tracing::debug!("Tried to update tag {tag_id}, which does not exist");
            Error::NotFound.into_response()
        }
        Err(error) => error.into_response(),
    }
}
