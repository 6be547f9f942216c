//! Database operations for tags.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    tag::{Tag, TagId, TagName},
};

/// Create a tag and return it with its ID.
///
/// If `requested_id` is `None` the database generates the ID.
///
/// # Errors
///
/// Returns [Error::DuplicateTagName] if another tag already has `name` and
/// [Error::DuplicateTagId] if `requested_id` is already taken.
pub fn create_tag(
    requested_id: Option<TagId>,
    name: TagName,
    connection: &Connection,
) -> Result<Tag, Error> {
    let result = match requested_id {
        Some(id) => connection.execute(
            "INSERT INTO tag (id, name) VALUES (?1, ?2);",
            (id, name.as_ref()),
        ),
        None => connection.execute("INSERT INTO tag (name) VALUES (?1);", (name.as_ref(),)),
    };
    result.map_err(|error| map_constraint_error(error, requested_id, &name))?;

    let id = connection.last_insert_rowid();

    Ok(Tag { id, name })
}

/// Retrieve a single tag by ID.
pub fn get_tag(tag_id: TagId, connection: &Connection) -> Result<Tag, Error> {
    connection
        .prepare("SELECT id, name FROM tag WHERE id = :id;")?
        .query_row(&[(":id", &tag_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve a single tag by its exact name.
pub fn get_tag_by_name(name: &TagName, connection: &Connection) -> Result<Tag, Error> {
    connection
        .prepare("SELECT id, name FROM tag WHERE name = :name;")?
        .query_row(&[(":name", name.as_ref())], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all tags ordered by ID.
pub fn get_all_tags(connection: &Connection) -> Result<Vec<Tag>, Error> {
    connection
        .prepare("SELECT id, name FROM tag ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_tag| maybe_tag.map_err(|error| error.into()))
        .collect()
}

/// Update a tag's name. Returns an error if tag doesn't exist.
pub fn update_tag(tag_id: TagId, new_name: TagName, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE tag SET name = ?1 WHERE id = ?2",
            (new_name.as_ref(), tag_id),
        )
        .map_err(|error| map_constraint_error(error, Some(tag_id), &new_name))?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Give the tag with `tag_id` the name `name`, creating it if it does not exist.
///
/// Runs as a single statement, so the tag cannot disappear between the
/// existence check and the write.
///
/// # Errors
///
/// Returns [Error::DuplicateTagName] if a different tag already has `name`.
pub fn upsert_tag(tag_id: TagId, name: TagName, connection: &Connection) -> Result<Tag, Error> {
    connection
        .execute(
            "INSERT INTO tag (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name;",
            (tag_id, name.as_ref()),
        )
        .map_err(|error| map_constraint_error(error, Some(tag_id), &name))?;

    Ok(Tag { id: tag_id, name })
}

/// Delete a tag by ID. Returns an error if the tag doesn't exist.
pub fn delete_tag(tag_id: TagId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM tag WHERE id = ?1", [tag_id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Initialize the tag table and indexes.
pub fn create_tag_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS tag (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );

        CREATE INDEX IF NOT EXISTS idx_tag_name ON tag(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Tag, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = TagName::new_unchecked(&raw_name);

    Ok(Tag { id, name })
}

fn map_constraint_error(error: rusqlite::Error, tag_id: Option<TagId>, name: &TagName) -> Error {
    match error {
        // Code 2067 occurs when a UNIQUE constraint failed.
        rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
            if sql_error.extended_code == 2067 && desc.ends_with("tag.name") =>
        {
            Error::DuplicateTagName(name.to_string())
        }
        // Code 1555 occurs when a PRIMARY KEY constraint failed.
        rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 1555 => {
            Error::DuplicateTagId(tag_id.unwrap_or_default())
        }
        error => error.into(),
    }
}
