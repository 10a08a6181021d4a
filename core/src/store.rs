//! The content store interface and an in-memory implementation.
//!
//! # Design
//! Every node carries a draft and, once published, a published copy.
//! `get_by_id` returns the draft; everything that renders or counts goes
//! through the published side (`get_published`, `content_at_root`,
//! `children`). A freshly created node is therefore invisible to listings
//! until `save_and_publish` runs.
//!
//! Ids come from a counter that only ever moves forward, so an id is never
//! handed out twice even after its node is deleted.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{Content, ContentId};

/// Synchronous content repository used by the todo handler.
pub trait ContentStore: Send + Sync {
    /// Draft version of a node.
    fn get_by_id(&self, id: ContentId) -> Result<Option<Content>, StoreError>;

    /// Published version of a node.
    fn get_published(&self, id: ContentId) -> Result<Option<Content>, StoreError>;

    /// Create an unpublished node under the node carrying `parent_key`.
    fn create(&self, name: &str, parent_key: Uuid, content_type: &str) -> Result<Content, StoreError>;

    /// Delete a node and all of its descendants.
    fn delete(&self, content: &Content) -> Result<(), StoreError>;

    /// Replace the draft with `content` and publish it.
    fn save_and_publish(&self, content: &Content) -> Result<Content, StoreError>;

    /// Published root-level nodes in creation order.
    fn content_at_root(&self) -> Result<Vec<Content>, StoreError>;

    /// Published direct children of `parent` in creation order.
    fn children(&self, parent: ContentId) -> Result<Vec<Content>, StoreError>;
}

/// First published root node of the given type, if any.
pub fn root_by_type<S: ContentStore + ?Sized>(
    store: &S,
    content_type: &str,
) -> Result<Option<Content>, StoreError> {
    Ok(store
        .content_at_root()?
        .into_iter()
        .find(|content| content.is_of_type(content_type)))
}

#[derive(Debug)]
struct Entry {
    draft: Content,
    published: Option<Content>,
}

#[derive(Debug)]
struct Inner {
    next_id: i64,
    // BTreeMap keyed by id doubles as creation order since ids only grow.
    entries: BTreeMap<ContentId, Entry>,
}

/// `ContentStore` backed by a map behind a read/write lock.
#[derive(Debug)]
pub struct InMemoryContentStore {
    inner: RwLock<Inner>,
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                entries: BTreeMap::new(),
            }),
        }
    }

    /// Create a root-level node. Root nodes are managed outside the todo
    /// handler, so this lives on the concrete store rather than the trait.
    pub fn create_at_root(&self, name: &str, content_type: &str) -> Content {
        let mut inner = self.inner.write();
        let content = inner.allocate(name, content_type, None);
        inner.entries.insert(
            content.id,
            Entry {
                draft: content.clone(),
                published: None,
            },
        );
        content
    }

    /// Number of nodes held, published or not.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Inner {
    fn allocate(&mut self, name: &str, content_type: &str, parent_id: Option<ContentId>) -> Content {
        let id = ContentId(self.next_id);
        self.next_id += 1;
        Content {
            id,
            key: Uuid::new_v4(),
            name: name.to_string(),
            content_type: content_type.to_string(),
            parent_id,
            values: BTreeMap::new(),
            published: false,
        }
    }

    fn published_where(&self, pred: impl Fn(&Content) -> bool) -> Vec<Content> {
        self.entries
            .values()
            .filter_map(|entry| entry.published.as_ref())
            .filter(|content| pred(content))
            .cloned()
            .collect()
    }
}

impl ContentStore for InMemoryContentStore {
    fn get_by_id(&self, id: ContentId) -> Result<Option<Content>, StoreError> {
        Ok(self.inner.read().entries.get(&id).map(|entry| entry.draft.clone()))
    }

    fn get_published(&self, id: ContentId) -> Result<Option<Content>, StoreError> {
        Ok(self
            .inner
            .read()
            .entries
            .get(&id)
            .and_then(|entry| entry.published.clone()))
    }

    fn create(&self, name: &str, parent_key: Uuid, content_type: &str) -> Result<Content, StoreError> {
        let mut inner = self.inner.write();
        let parent_id = inner
            .entries
            .values()
            .find(|entry| entry.draft.key == parent_key)
            .map(|entry| entry.draft.id)
            .ok_or(StoreError::ParentNotFound(parent_key))?;
        let content = inner.allocate(name, content_type, Some(parent_id));
        inner.entries.insert(
            content.id,
            Entry {
                draft: content.clone(),
                published: None,
            },
        );
        Ok(content)
    }

    fn delete(&self, content: &Content) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if !inner.entries.contains_key(&content.id) {
            return Err(StoreError::NotFound(content.id));
        }

        let mut doomed = vec![content.id];
        let mut cursor = 0;
        while let Some(&parent) = doomed.get(cursor) {
            doomed.extend(
                inner
                    .entries
                    .values()
                    .filter(|entry| entry.draft.parent_id == Some(parent))
                    .map(|entry| entry.draft.id),
            );
            cursor += 1;
        }
        for id in doomed {
            inner.entries.remove(&id);
        }
        Ok(())
    }

    fn save_and_publish(&self, content: &Content) -> Result<Content, StoreError> {
        let mut inner = self.inner.write();
        let entry = inner
            .entries
            .get_mut(&content.id)
            .ok_or(StoreError::NotFound(content.id))?;

        // Identity fields belong to the store; only name and values are taken
        // from the caller.
        let mut saved = entry.draft.clone();
        saved.name = content.name.clone();
        saved.values = content.values.clone();
        saved.published = true;

        entry.draft = saved.clone();
        entry.published = Some(saved.clone());
        Ok(saved)
    }

    fn content_at_root(&self) -> Result<Vec<Content>, StoreError> {
        Ok(self
            .inner
            .read()
            .published_where(|content| content.parent_id.is_none()))
    }

    fn children(&self, parent: ContentId) -> Result<Vec<Content>, StoreError> {
        Ok(self
            .inner
            .read()
            .published_where(|content| content.parent_id == Some(parent)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TODO_ALIAS, TODO_LIST_ALIAS};

    fn store_with_list() -> (InMemoryContentStore, Content) {
        let store = InMemoryContentStore::new();
        let list = store.create_at_root("Todos", TODO_LIST_ALIAS);
        let list = store.save_and_publish(&list).unwrap();
        (store, list)
    }

    #[test]
    fn ids_are_never_reused() {
        let (store, list) = store_with_list();
        let first = store.create("A", list.key, TODO_ALIAS).unwrap();
        store.delete(&first).unwrap();
        let second = store.create("B", list.key, TODO_ALIAS).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn created_content_is_unpublished_until_saved() {
        let (store, list) = store_with_list();
        let draft = store.create("A", list.key, TODO_ALIAS).unwrap();

        assert!(store.get_by_id(draft.id).unwrap().is_some());
        assert!(store.get_published(draft.id).unwrap().is_none());
        assert!(store.children(list.id).unwrap().is_empty());

        store.save_and_publish(&draft).unwrap();
        assert_eq!(store.children(list.id).unwrap().len(), 1);
    }

    #[test]
    fn create_with_unknown_parent_key_fails() {
        let store = InMemoryContentStore::new();
        let key = Uuid::new_v4();
        let err = store.create("A", key, TODO_ALIAS).unwrap_err();
        assert_eq!(err, StoreError::ParentNotFound(key));
    }

    #[test]
    fn save_and_publish_keeps_identity_fields() {
        let (store, list) = store_with_list();
        let draft = store.create("A", list.key, TODO_ALIAS).unwrap();
        let mut tampered = draft.clone();
        tampered.parent_id = None;
        tampered.content_type = TODO_LIST_ALIAS.to_string();
        tampered.set_value("completed", true);

        let saved = store.save_and_publish(&tampered).unwrap();
        assert_eq!(saved.parent_id, Some(list.id));
        assert_eq!(saved.content_type, TODO_ALIAS);
        assert!(saved.bool_value("completed"));
        assert!(saved.published);
    }

    #[test]
    fn save_and_publish_after_delete_is_not_found() {
        let (store, list) = store_with_list();
        let draft = store.create("A", list.key, TODO_ALIAS).unwrap();
        store.delete(&draft).unwrap();
        assert_eq!(
            store.save_and_publish(&draft).unwrap_err(),
            StoreError::NotFound(draft.id)
        );
        assert_eq!(store.delete(&draft).unwrap_err(), StoreError::NotFound(draft.id));
    }

    #[test]
    fn delete_removes_descendants() {
        let (store, list) = store_with_list();
        let child = store.create("A", list.key, TODO_ALIAS).unwrap();
        store.save_and_publish(&child).unwrap();

        store.delete(&list).unwrap();
        assert!(store.get_by_id(child.id).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn root_by_type_returns_first_match() {
        let store = InMemoryContentStore::new();
        let other = store.create_at_root("Home", "home");
        store.save_and_publish(&other).unwrap();
        let first = store.create_at_root("First", TODO_LIST_ALIAS);
        store.save_and_publish(&first).unwrap();
        let second = store.create_at_root("Second", TODO_LIST_ALIAS);
        store.save_and_publish(&second).unwrap();

        let found = root_by_type(&store, TODO_LIST_ALIAS).unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[test]
    fn root_by_type_ignores_unpublished_roots() {
        let store = InMemoryContentStore::new();
        store.create_at_root("Todos", TODO_LIST_ALIAS);
        assert!(root_by_type(&store, TODO_LIST_ALIAS).unwrap().is_none());
    }
}
