//! Todo lifecycle operations over a `ContentStore`.
//!
//! # Design
//! `TodoHandler` holds only a shared reference to the store and carries no
//! state of its own. Each operation is a short sequence of store calls that
//! ends in an `Outcome`; the caller decides how to render it.
//!
//! Failure modes are deliberately uneven:
//! - an unknown id is `HandlerError::NotFound`;
//! - deleting a protected todo is `HandlerError::Protected`, which callers map
//!   to a server error;
//! - adding with an empty title or without a list is not an error at all and
//!   yields the current page.

use std::sync::Arc;

use crate::error::HandlerError;
use crate::store::{root_by_type, ContentStore};
use crate::types::{ContentId, Todo, TodoList, COMPLETED_PROPERTY, TODO_ALIAS, TODO_LIST_ALIAS};
use crate::view::{ClientEvent, Outcome, Page, View};

/// Message returned when deletion of a protected todo is attempted.
pub const PROTECTED_DELETE_MESSAGE: &str = "Something went wrong on the server example";

/// Stateless orchestration of the four todo operations.
#[derive(Debug)]
pub struct TodoHandler<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for TodoHandler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ContentStore + ?Sized> TodoHandler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of todos in the list, or no count when no list exists.
    pub fn count_todos(&self) -> Result<Outcome, HandlerError> {
        let count = match root_by_type(&*self.store, TODO_LIST_ALIAS)? {
            Some(list) => Some(self.todos_under(list.id)?.len()),
            None => None,
        };
        Ok(Outcome::new(View::TodoCount(count)))
    }

    pub fn delete_todo(&self, id: ContentId) -> Result<Outcome, HandlerError> {
        let protected = self
            .store
            .get_published(id)?
            .as_ref()
            .and_then(Todo::from_content)
            .is_some_and(|todo| todo.cannot_be_deleted);
        if protected {
            return Err(HandlerError::Protected {
                message: PROTECTED_DELETE_MESSAGE.to_string(),
            });
        }

        let content = self.store.get_by_id(id)?.ok_or(HandlerError::NotFound)?;
        self.store.delete(&content)?;
        Ok(Outcome::new(View::EmptyItem(id)).with_event(ClientEvent::TodoCountUpdated))
    }

    pub fn mark_completed(&self, id: ContentId) -> Result<Outcome, HandlerError> {
        self.set_completed(id, true)
    }

    pub fn unmark_completed(&self, id: ContentId) -> Result<Outcome, HandlerError> {
        self.set_completed(id, false)
    }

    /// Add a todo titled `title` to the list.
    ///
    /// A missing or blank title, or a missing list, returns the current page
    /// without creating anything.
    pub fn add_todo(&self, title: Option<&str>) -> Result<Outcome, HandlerError> {
        let title = title.map(str::trim).unwrap_or_default();
        let list = root_by_type(&*self.store, TODO_LIST_ALIAS)?;
        let list = match list {
            Some(list) if !title.is_empty() => list,
            _ => return Ok(Outcome::new(View::CurrentPage(self.page()?))),
        };

        let draft = self.store.create(title, list.key, TODO_ALIAS)?;
        let saved = self.store.save_and_publish(&draft)?;
        let todo = self.published_todo(saved.id)?;
        Ok(Outcome::new(View::Todo(todo)).with_event(ClientEvent::TodoCountUpdated))
    }

    /// The list and all of its published todos.
    pub fn page(&self) -> Result<Page, HandlerError> {
        let Some(list) = root_by_type(&*self.store, TODO_LIST_ALIAS)? else {
            return Ok(Page {
                list: None,
                todos: Vec::new(),
            });
        };
        Ok(Page {
            todos: self.todos_under(list.id)?,
            list: TodoList::from_content(&list),
        })
    }

    fn set_completed(&self, id: ContentId, completed: bool) -> Result<Outcome, HandlerError> {
        let mut content = self.store.get_by_id(id)?.ok_or(HandlerError::NotFound)?;
        if Todo::from_content(&content).is_none() {
            return Err(HandlerError::NotFound);
        }
        content.set_value(COMPLETED_PROPERTY, completed);
        self.store.save_and_publish(&content)?;

        let todo = self.published_todo(id)?;
        Ok(Outcome::new(View::Todo(todo)))
    }

    /// Re-read a todo from the published side, as the client will see it.
    fn published_todo(&self, id: ContentId) -> Result<Todo, HandlerError> {
        self.store
            .get_published(id)?
            .as_ref()
            .and_then(Todo::from_content)
            .ok_or(HandlerError::NotFound)
    }

    fn todos_under(&self, list: ContentId) -> Result<Vec<Todo>, HandlerError> {
        Ok(self
            .store
            .children(list)?
            .iter()
            .filter_map(Todo::from_content)
            .collect())
    }
}
