//! htmx transport adapter for the todo handler.
//!
//! # Design
//! Every route calls exactly one `TodoHandler` operation, renders the
//! resulting view with the `Renderer`, and translates the outcome's client
//! events into a single `HX-Trigger` header. Status codes are decided in one
//! place, the `IntoResponse` impl of `ApiError`.

pub mod config;
pub mod render;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post, put},
    Form, Router,
};
use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;
use todo_htmx_core::{ClientEvent, ContentId, ContentStore, HandlerError, Outcome, TodoHandler, View};
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerConfig};
pub use render::{RenderError, Renderer};

/// Response header htmx reads client events from.
pub const HX_TRIGGER: &str = "hx-trigger";

/// Response header overriding the swap style the request asked for.
pub const HX_RESWAP: &str = "hx-reswap";

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    handler: TodoHandler<dyn ContentStore>,
    renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>) -> Result<Self, RenderError> {
        Ok(Self {
            handler: TodoHandler::new(store),
            renderer: Arc::new(Renderer::new()?),
        })
    }

    fn respond(&self, outcome: Outcome) -> Result<Fragment, ApiError> {
        Ok(Fragment {
            html: self.renderer.render(&outcome.view)?,
            events: outcome.events,
            reswap: None,
        })
    }
}

/// Form posted by the add box.
#[derive(Debug, Deserialize)]
pub struct AddTodoForm {
    #[serde(default)]
    pub todo: Option<String>,
}

/// Rendered HTML plus the events to trigger on the client.
#[derive(Debug)]
pub struct Fragment {
    pub html: String,
    pub events: Vec<ClientEvent>,
    /// Swap style sent as `HX-Reswap`, replacing the one the element asked for.
    pub reswap: Option<&'static str>,
}

impl IntoResponse for Fragment {
    fn into_response(self) -> Response {
        let mut response = Html(self.html).into_response();
        if let Some(value) = trigger_header(&self.events) {
            response.headers_mut().insert(HX_TRIGGER, value);
        }
        if let Some(swap) = self.reswap {
            response
                .headers_mut()
                .insert(HX_RESWAP, HeaderValue::from_static(swap));
        }
        response
    }
}

/// Join event names into one `HX-Trigger` value. `None` when there is nothing
/// to trigger.
pub fn trigger_header(events: &[ClientEvent]) -> Option<HeaderValue> {
    if events.is_empty() {
        return None;
    }
    let names: Vec<&str> = events.iter().map(|event| event.name()).collect();
    HeaderValue::from_str(&names.join(", ")).ok()
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Handler(HandlerError::NotFound) => StatusCode::NOT_FOUND.into_response(),
            ApiError::Handler(HandlerError::Protected { message }) => {
                tracing::warn!("refused to delete a protected todo");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::Handler(HandlerError::Store(e)) => {
                tracing::error!("content store failure: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            ApiError::Render(e) => {
                tracing::error!("{e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(page))
        .route("/health", get(health_check))
        .route("/todos", post(add_todo))
        .route("/todos/count", get(count_todos))
        .route("/todos/{id}", delete(delete_todo))
        .route("/todos/{id}/complete", put(mark_completed))
        .route("/todos/{id}/uncomplete", put(unmark_completed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn health_check() -> &'static str {
    "OK"
}

async fn page(State(state): State<AppState>) -> Result<Fragment, ApiError> {
    let page = state.handler.page()?;
    state.respond(Outcome::new(View::CurrentPage(page)))
}

async fn count_todos(State(state): State<AppState>) -> Result<Fragment, ApiError> {
    let outcome = state.handler.count_todos()?;
    state.respond(outcome)
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Fragment, ApiError> {
    let outcome = state.handler.delete_todo(ContentId(id))?;
    tracing::info!(id, "todo deleted");
    state.respond(outcome)
}

async fn mark_completed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Fragment, ApiError> {
    let outcome = state.handler.mark_completed(ContentId(id))?;
    tracing::info!(id, "todo marked completed");
    state.respond(outcome)
}

async fn unmark_completed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Fragment, ApiError> {
    let outcome = state.handler.unmark_completed(ContentId(id))?;
    tracing::info!(id, "todo unmarked completed");
    state.respond(outcome)
}

async fn add_todo(
    State(state): State<AppState>,
    Form(form): Form<AddTodoForm>,
) -> Result<Fragment, ApiError> {
    let outcome = state.handler.add_todo(form.todo.as_deref())?;
    let ignored = matches!(outcome.view, View::CurrentPage(_));
    match &outcome.view {
        View::Todo(todo) => tracing::info!(id = todo.id.0, "todo added"),
        _ => tracing::debug!("add ignored: blank title or no todo list"),
    }

    // The add form appends into the list; a whole page must not land there.
    let mut fragment = state.respond(outcome)?;
    if ignored {
        fragment.reswap = Some("none");
    }
    Ok(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_events_means_no_header() {
        assert!(trigger_header(&[]).is_none());
    }

    #[test]
    fn reswap_becomes_a_header() {
        let response = Fragment {
            html: String::new(),
            events: Vec::new(),
            reswap: Some("none"),
        }
        .into_response();
        assert_eq!(response.headers()[HX_RESWAP], "none");
        assert!(response.headers().get(HX_TRIGGER).is_none());
    }

    #[test]
    fn events_are_comma_joined() {
        let value = trigger_header(&[ClientEvent::TodoCountUpdated, ClientEvent::TodoCountUpdated]).unwrap();
        assert_eq!(value, "todoCountUpdated, todoCountUpdated");
    }
}
