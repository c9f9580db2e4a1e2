use axum::{
    Router,
    routing::{get, post},
};
use sqlx::MySqlPool;

use crate::db::SnippetModel;
use crate::handlers::{home, snippet_create, snippet_view};

/// Shared state handed to every request handler. Constructed once, after
/// the database connection has been validated.
#[derive(Clone)]
pub struct AppState {
    pub snippets: SnippetModel,
}

impl AppState {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            snippets: SnippetModel::new(pool),
        }
    }
}

/// Builds the application router. Unmatched paths fall through to the
/// framework's 404.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/snippet/view/{id}", get(snippet_view))
        .route("/snippet/create", post(snippet_create))
        .with_state(state)
}
