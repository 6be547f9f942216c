//! Application router configuration.

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState, Error,
    auth::{post_log_in, post_log_out},
    endpoints,
    tag::{
        TagStore, create_tag_endpoint, delete_tag_endpoint, get_tag_endpoint, list_tags_endpoint,
        update_tag_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Reads are open to everyone. Which writes need a logged in user is
/// decided by the [AccessPolicy](crate::AccessPolicy) of the tag service.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TagStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::TAGS,
            get(list_tags_endpoint::<S>).put(create_tag_endpoint::<S>),
        )
        .route(
            endpoints::TAG,
            get(get_tag_endpoint::<S>)
                .put(update_tag_endpoint::<S>)
                .delete(delete_tag_endpoint::<S>),
        )
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, post(post_log_out))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
