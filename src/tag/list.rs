//! Endpoints for reading tags.

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    tag::{TagId, TagService, TagStore},
};

/// The state needed by the tag endpoints.
#[derive(Debug, Clone)]
pub struct TagState<S> {
    /// The service that owns the tags.
    pub tag_service: TagService<S>,
}

impl<S> FromRef<AppState<S>> for TagState<S>
where
    S: Clone,
{
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            tag_service: state.tag_service.clone(),
        }
    }
}

/// Respond with every tag as a JSON array.
pub async fn list_tags_endpoint<S>(State(state): State<TagState<S>>) -> Response
where
    S: TagStore,
{
    match state.tag_service.list() {
        Ok(tags) => Json(tags).into_response(),
        Err(error) => {
            tracing::error!("Could not list tags: {error}");
            error.into_response()
        }
    }
}

/// Respond with the tag with the ID in the path as a JSON object, or 404.
pub async fn get_tag_endpoint<S>(
    Path(tag_id): Path<TagId>,
    State(state): State<TagState<S>>,
) -> Response
where
    S: TagStore,
{
    match state.tag_service.get(tag_id) {
        Ok(tag) => Json(tag).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod get_tag_endpoint_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use serde_json::{Value, json};

    use crate::{
        tag::{
            AccessPolicy, InMemoryTagStore, TagName, TagService, TagStore, get_tag_endpoint,
            list::TagState, list_tags_endpoint,
        },
        test_utils::{assert_content_type, parse_json_body},
    };

    fn get_tag_state() -> TagState<InMemoryTagStore> {
        let store = InMemoryTagStore::new();
        store.insert(Some(1), TagName::new_unchecked("maps")).unwrap();
        store
            .insert(Some(2), TagName::new_unchecked("datasets"))
            .unwrap();

        TagState {
            tag_service: TagService::new(store, AccessPolicy::default()),
        }
    }

    #[tokio::test]
    async fn list_returns_all_tags() {
        let response = list_tags_endpoint(State(get_tag_state())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "application/json");
        let body: Value = parse_json_body(response).await;
        assert_eq!(
            body,
            json!([{"id": 1, "name": "maps"}, {"id": 2, "name": "datasets"}])
        );
    }

    #[tokio::test]
    async fn list_of_empty_store_is_empty_array() {
        let state = TagState {
            tag_service: TagService::new(InMemoryTagStore::new(), AccessPolicy::default()),
        };

        let response = list_tags_endpoint(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = parse_json_body(response).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn get_returns_tag_name() {
        let response = get_tag_endpoint(Path(1), State(get_tag_state())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = parse_json_body(response).await;
        assert_eq!(body["name"], "maps");
    }

    #[tokio::test]
    async fn get_unknown_tag_is_404() {
        let response = get_tag_endpoint(Path(222), State(get_tag_state())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
