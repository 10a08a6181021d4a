//! Turns handler views into HTML with minijinja.
//!
//! Templates are compiled into the binary. File names end in `.html`, so
//! minijinja escapes every interpolated value.

use minijinja::{context, Environment};
use thiserror::Error;
use todo_htmx_core::View;

const PAGE: &str = "page.html";
const TODO: &str = "_todo.html";
const TODO_COUNT: &str = "_todo_count.html";
const EMPTY_ITEM: &str = "_empty_item.html";

#[derive(Debug, Error)]
#[error("template rendering failed: {0}")]
pub struct RenderError(#[from] minijinja::Error);

#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(PAGE, include_str!("../templates/page.html"))?;
        env.add_template(TODO, include_str!("../templates/_todo.html"))?;
        env.add_template(TODO_COUNT, include_str!("../templates/_todo_count.html"))?;
        env.add_template(EMPTY_ITEM, include_str!("../templates/_empty_item.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, view: &View) -> Result<String, RenderError> {
        let html = match view {
            View::TodoCount(count) => self.env.get_template(TODO_COUNT)?.render(context! { count => count })?,
            View::EmptyItem(id) => self.env.get_template(EMPTY_ITEM)?.render(context! { id => id })?,
            View::Todo(todo) => self.env.get_template(TODO)?.render(context! { todo => todo })?,
            View::CurrentPage(page) => {
                let count = page.list.as_ref().map(|_| page.todos.len());
                self.env.get_template(PAGE)?.render(context! {
                    list => page.list,
                    todos => page.todos,
                    count => count,
                })?
            }
        };
        Ok(html)
    }
}
