//! Core tag domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A validated, non-empty tag name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

impl TagName {
    /// Create a tag name.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyTagName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyTagName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a tag name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TagName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagName::new(s)
    }
}

impl TryFrom<String> for TagName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TagName::new(&value)
    }
}

impl From<TagName> for String {
    fn from(value: TagName) -> Self {
        value.0
    }
}

impl Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a tag.
pub type TagId = i64;

/// The conventional ID clients send when they want the store to pick one.
///
/// Any negative ID is treated the same way.
pub const UNASSIGNED_TAG_ID: TagId = -99;

/// A named label used to classify records elsewhere in the catalogue (e.g., 'maps', 'datasets').
///
/// Serialized as `{"id": 1, "name": "maps"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Tag {
    /// The store-assigned identifier.
    pub id: TagId,
    /// The unique, human-readable name.
    pub name: TagName,
}

/// The JSON body accepted when creating or updating a tag.
///
/// The name is kept as a raw string so that an empty name is reported as
/// [Error::EmptyTagName] rather than a generic deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagPayload {
    /// The requested ID. Missing or negative means "assign one for me".
    #[serde(default)]
    pub id: Option<TagId>,
    /// The tag name.
    pub name: String,
}

impl TagPayload {
    /// The requested ID if it is a real one, i.e. not missing and not negative.
    pub fn requested_id(&self) -> Option<TagId> {
        self.id.filter(|id| *id >= 0)
    }
}
