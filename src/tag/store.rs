//! The tag store trait and its SQLite and in-memory implementations.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{
    Error,
    tag::{
        Tag, TagId, TagName,
        db::{
            create_tag, delete_tag, get_all_tags, get_tag, get_tag_by_name, update_tag, upsert_tag,
        },
    },
};

/// Creates, retrieves, updates and deletes tags.
///
/// Implementations must keep tag IDs and tag names unique, and must leave the
/// store unchanged when an operation fails.
pub trait TagStore {
    /// Get every tag, ordered by ID.
    fn list(&self) -> Result<Vec<Tag>, Error>;

    /// Get a tag by its ID, or [Error::NotFound].
    fn get(&self, tag_id: TagId) -> Result<Tag, Error>;

    /// Get a tag by its exact name, or [Error::NotFound].
    fn get_by_name(&self, name: &TagName) -> Result<Tag, Error>;

    /// Insert a new tag, using `requested_id` if given, otherwise a fresh ID.
    fn insert(&self, requested_id: Option<TagId>, name: TagName) -> Result<Tag, Error>;

    /// Name the tag with `tag_id` `name`, creating the tag if it does not exist.
    ///
    /// The check and the write happen atomically.
    fn upsert(&self, tag_id: TagId, name: TagName) -> Result<Tag, Error>;

    /// Rename the tag with `tag_id`, or [Error::NotFound].
    fn update(&self, tag_id: TagId, name: TagName) -> Result<(), Error>;

    /// Remove the tag with `tag_id`, or [Error::NotFound].
    fn delete(&self, tag_id: TagId) -> Result<(), Error>;
}

/// Stores tags in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTagStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTagStore {
    /// Create a new tag store with a SQLite database.
    ///
    /// The caller should ensure the tag table exists, e.g. with [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TagStore for SQLiteTagStore {
    fn list(&self) -> Result<Vec<Tag>, Error> {
        let connection = self.lock()?;
        get_all_tags(&connection)
    }

    fn get(&self, tag_id: TagId) -> Result<Tag, Error> {
        let connection = self.lock()?;
        get_tag(tag_id, &connection)
    }

    fn get_by_name(&self, name: &TagName) -> Result<Tag, Error> {
        let connection = self.lock()?;
        get_tag_by_name(name, &connection)
    }

    fn insert(&self, requested_id: Option<TagId>, name: TagName) -> Result<Tag, Error> {
        let connection = self.lock()?;
        create_tag(requested_id, name, &connection)
    }

    fn upsert(&self, tag_id: TagId, name: TagName) -> Result<Tag, Error> {
        let connection = self.lock()?;
        upsert_tag(tag_id, name, &connection)
    }

    fn update(&self, tag_id: TagId, name: TagName) -> Result<(), Error> {
        let connection = self.lock()?;
        update_tag(tag_id, name, &connection)
    }

    fn delete(&self, tag_id: TagId) -> Result<(), Error> {
        let connection = self.lock()?;
        delete_tag(tag_id, &connection)
    }
}

/// Keeps tags in memory. Clones share the same tags.
///
/// Mirrors the behaviour of [SQLiteTagStore], which makes it a drop-in fake
/// for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTagStore {
    tags: Arc<Mutex<Vec<Tag>>>,
}

impl InMemoryTagStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Tag>>, Error> {
        self.tags.lock().map_err(|_| Error::DatabaseLockError)
    }
}

impl TagStore for InMemoryTagStore {
    fn list(&self) -> Result<Vec<Tag>, Error> {
        let mut tags = self.lock()?.clone();
        tags.sort_by_key(|tag| tag.id);

        Ok(tags)
    }

    fn get(&self, tag_id: TagId) -> Result<Tag, Error> {
        self.lock()?
            .iter()
            .find(|tag| tag.id == tag_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_by_name(&self, name: &TagName) -> Result<Tag, Error> {
        self.lock()?
            .iter()
            .find(|tag| &tag.name == name)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn insert(&self, requested_id: Option<TagId>, name: TagName) -> Result<Tag, Error> {
        let mut tags = self.lock()?;

        if tags.iter().any(|tag| tag.name == name) {
            return Err(Error::DuplicateTagName(name.to_string()));
        }

        let id = match requested_id {
            Some(id) if tags.iter().any(|tag| tag.id == id) => {
                return Err(Error::DuplicateTagId(id));
            }
            Some(id) => id,
            // One past the largest ID, like SQLite's rowid allocation.
            None => tags
                .iter()
                .map(|tag| tag.id)
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or(Error::TagIdsExhausted)?,
        };

        let tag = Tag { id, name };
        tags.push(tag.clone());

        Ok(tag)
    }

    fn upsert(&self, tag_id: TagId, name: TagName) -> Result<Tag, Error> {
        let mut tags = self.lock()?;

        if tags.iter().any(|tag| tag.name == name && tag.id != tag_id) {
            return Err(Error::DuplicateTagName(name.to_string()));
        }

        let tag = Tag { id: tag_id, name };
        match tags.iter_mut().find(|existing| existing.id == tag_id) {
            Some(existing) => existing.name = tag.name.clone(),
            None => tags.push(tag.clone()),
        }

        Ok(tag)
    }

    fn update(&self, tag_id: TagId, name: TagName) -> Result<(), Error> {
        let mut tags = self.lock()?;

        if tags.iter().any(|tag| tag.name == name && tag.id != tag_id) {
            return Err(Error::DuplicateTagName(name.to_string()));
        }

        let tag = tags
            .iter_mut()
            .find(|tag| tag.id == tag_id)
            .ok_or(Error::NotFound)?;
        tag.name = name;

        Ok(())
    }

    fn delete(&self, tag_id: TagId) -> Result<(), Error> {
        let mut tags = self.lock()?;
        let position = tags
            .iter()
            .position(|tag| tag.id == tag_id)
            .ok_or(Error::NotFound)?;
        tags.remove(position);

        Ok(())
    }
}
