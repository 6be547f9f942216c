//! Tag deletion endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::AuthContext,
    tag::{TagId, TagStore, list::TagState},
};

/// Handle tag deletion. Responds with 204, or 404 if the tag does not exist.
pub async fn delete_tag_endpoint<S>(
    Path(tag_id): Path<TagId>,
    State(state): State<TagState<S>>,
    auth: AuthContext,
) -> Response
where
    S: TagStore,
{
    match state.tag_service.delete(&auth, tag_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(Error::NotFound) => {
            tracing::debug!("Tried to delete tag {tag_id}, which does not exist");
            Error::NotFound.into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting tag {tag_id}: {error}");
            error.into_response()
        }
    }
}
