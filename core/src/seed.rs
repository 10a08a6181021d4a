//! Demo content so a fresh in-memory store has something to show.

use crate::error::StoreError;
use crate::store::{ContentStore, InMemoryContentStore};
use crate::types::{Content, CANNOT_BE_DELETED_PROPERTY, COMPLETED_PROPERTY, TODO_ALIAS, TODO_LIST_ALIAS};

/// Create and publish a `Todos` list with a few items. The last item is
/// protected so the failing delete path can be tried from the page.
pub fn seed_demo(store: &InMemoryContentStore) -> Result<Content, StoreError> {
    let list = store.create_at_root("Todos", TODO_LIST_ALIAS);
    let list = store.save_and_publish(&list)?;

    let items = [
        ("Buy milk", false, false),
        ("Water the plants", true, false),
        ("Try to delete me", false, true),
    ];
    for (title, completed, protected) in items {
        let mut todo = store.create(title, list.key, TODO_ALIAS)?;
        todo.set_value(COMPLETED_PROPERTY, completed);
        todo.set_value(CANNOT_BE_DELETED_PROPERTY, protected);
        store.save_and_publish(&todo)?;
    }
    Ok(list)
}
