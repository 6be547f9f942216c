//! Tag management: named labels for classifying catalogue records.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod service;
mod store;

pub use create::create_tag_endpoint;
pub use db::create_tag_table;
pub use delete::delete_tag_endpoint;
pub use domain::{Tag, TagId, TagName, TagPayload, UNASSIGNED_TAG_ID};
pub use edit::update_tag_endpoint;
pub use list::{get_tag_endpoint, list_tags_endpoint};
pub use service::{AccessPolicy, DEFAULT_TAG_NAMES, TagService};
pub use store::{InMemoryTagStore, SQLiteTagStore, TagStore};
