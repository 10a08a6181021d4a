//! Content nodes and the todo domain types projected from them.
//!
//! # Design
//! The store only knows generic typed nodes: a name, a type alias and a
//! property bag. `Todo` and `TodoList` are read-only projections built from a
//! node whose `content_type` matches the corresponding alias. Mutations always
//! go through the node (`set_value` then `save_and_publish`), never through the
//! projection.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Type alias of the root container node.
pub const TODO_LIST_ALIAS: &str = "todos";

/// Type alias of a single todo item.
pub const TODO_ALIAS: &str = "todo";

/// Property holding the completion flag of a todo.
pub const COMPLETED_PROPERTY: &str = "completed";

/// Property marking a todo as protected from deletion.
pub const CANNOT_BE_DELETED_PROPERTY: &str = "cannotBeDeleted";

/// Store-assigned identifier of a content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(pub i64);

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ContentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A typed node held by a `ContentStore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: ContentId,
    pub key: Uuid,
    pub name: String,
    pub content_type: String,
    pub parent_id: Option<ContentId>,
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
    #[serde(default)]
    pub published: bool,
}

impl Content {
    pub fn is_of_type(&self, alias: &str) -> bool {
        self.content_type == alias
    }

    pub fn set_value(&mut self, property: &str, value: impl Into<Value>) {
        self.values.insert(property.to_string(), value.into());
    }

    /// Read a boolean property. Missing or non-boolean values read as `false`.
    pub fn bool_value(&self, property: &str) -> bool {
        self.values
            .get(property)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: ContentId,
    pub title: String,
    pub completed: bool,
    pub cannot_be_deleted: bool,
    pub parent_id: ContentId,
}

impl Todo {
    /// Project a node into a `Todo`. Returns `None` for nodes of another type
    /// or for a todo that somehow sits at the root.
    pub fn from_content(content: &Content) -> Option<Self> {
        if !content.is_of_type(TODO_ALIAS) {
            return None;
        }
        Some(Self {
            id: content.id,
            title: content.name.clone(),
            completed: content.bool_value(COMPLETED_PROPERTY),
            cannot_be_deleted: content.bool_value(CANNOT_BE_DELETED_PROPERTY),
            parent_id: content.parent_id?,
        })
    }
}

/// The root container owning all todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ContentId,
    pub key: Uuid,
    pub name: String,
}

impl TodoList {
    pub fn from_content(content: &Content) -> Option<Self> {
        if !content.is_of_type(TODO_LIST_ALIAS) {
            return None;
        }
        Some(Self {
            id: content.id,
            key: content.key,
            name: content.name.clone(),
        })
    }
}
