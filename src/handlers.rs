use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::Snippet;
use crate::error::SnippetboxError;
use crate::router::AppState;

const MAX_TITLE_LEN: usize = 100;
const VALID_EXPIRES_DAYS: [i64; 3] = [1, 7, 365];

#[derive(Debug, Deserialize)]
pub struct CreateSnippet {
    pub title: String,
    pub content: String,
    pub expires_days: i64,
}

#[derive(Debug, Serialize)]
pub struct SnippetCreated {
    pub id: u64,
}

/// The latest snippets, newest first.
pub async fn home(
    State(state): State<AppState>,
) -> Result<Json<Vec<Snippet>>, SnippetboxError> {
    Ok(Json(state.snippets.latest().await?))
}

pub async fn snippet_view(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Snippet>, SnippetboxError> {
    Ok(Json(state.snippets.get(id).await?))
}

/// Stores a new snippet. The payload is validated before the database is
/// touched; a rejected payload never reaches the pool.
pub async fn snippet_create(
    State(state): State<AppState>,
    Json(body): Json<CreateSnippet>,
) -> Result<(StatusCode, Json<SnippetCreated>), SnippetboxError> {
    validate(&body)?;

    let id = state
        .snippets
        .insert(&body.title, &body.content, body.expires_days)
        .await?;

    info!(id, "snippet created");
    Ok((StatusCode::CREATED, Json(SnippetCreated { id })))
}

fn validate(body: &CreateSnippet) -> Result<(), SnippetboxError> {
    if body.title.trim().is_empty() {
        return Err(SnippetboxError::Validation(
            "title must not be blank".to_string(),
        ));
    }
    if body.title.chars().count() > MAX_TITLE_LEN {
        return Err(SnippetboxError::Validation(format!(
            "title must not exceed {MAX_TITLE_LEN} characters"
        )));
    }
    if body.content.trim().is_empty() {
        return Err(SnippetboxError::Validation(
            "content must not be blank".to_string(),
        ));
    }
    if !VALID_EXPIRES_DAYS.contains(&body.expires_days) {
        return Err(SnippetboxError::Validation(
            "expires_days must be 1, 7 or 365".to_string(),
        ));
    }
    Ok(())
}
