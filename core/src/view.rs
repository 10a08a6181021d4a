//! View data and client events produced by the todo handler.
//!
//! # Design
//! The handler never renders markup. It returns an `Outcome` describing which
//! fragment to show and with what data, plus the client events the transport
//! layer should signal (for htmx, via the `HX-Trigger` response header). This
//! keeps the handler free of any template or HTTP dependency.

use serde::Serialize;

use crate::types::{ContentId, Todo, TodoList};

/// Event the client is told about alongside a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClientEvent {
    /// The number of todos changed; the count fragment should refresh.
    TodoCountUpdated,
}

impl ClientEvent {
    /// Name the client listens for.
    pub fn name(self) -> &'static str {
        match self {
            ClientEvent::TodoCountUpdated => "todoCountUpdated",
        }
    }
}

/// State of the whole page: the list (if configured) and its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub list: Option<TodoList>,
    pub todos: Vec<Todo>,
}

/// Which fragment to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Number of todos, or `None` when no list is configured.
    TodoCount(Option<usize>),
    /// Placeholder left in the slot of a deleted todo.
    EmptyItem(ContentId),
    /// A single todo item.
    Todo(Todo),
    /// The full page as it currently stands.
    CurrentPage(Page),
}

/// Result of a successful handler operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub view: View,
    pub events: Vec<ClientEvent>,
}

impl Outcome {
    pub fn new(view: View) -> Self {
        Self {
            view,
            events: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: ClientEvent) -> Self {
        self.events.push(event);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_updated_event_name() {
        assert_eq!(ClientEvent::TodoCountUpdated.name(), "todoCountUpdated");
    }

    #[test]
    fn outcome_starts_without_events() {
        let outcome = Outcome::new(View::TodoCount(Some(3)));
        assert!(outcome.events.is_empty());

        let outcome = outcome.with_event(ClientEvent::TodoCountUpdated);
        assert_eq!(outcome.events, vec![ClientEvent::TodoCountUpdated]);
    }
}
