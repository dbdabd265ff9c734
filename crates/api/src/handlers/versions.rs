//! Handlers for the `/games/{game_id}/versions` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use gamecraft_core::types::DbId;
use gamecraft_db::repositories::GameVersionRepo;

use crate::error::AppResult;
use crate::lifecycle;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/games/{game_id}/versions
///
/// List all versions for a game, newest first.
pub async fn list_versions(
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let versions = GameVersionRepo::list_by_game(&state.pool, game_id).await?;

    tracing::debug!(count = versions.len(), game_id, "Listed game versions");
    Ok(Json(DataResponse { data: versions }))
}

/// DELETE /api/v1/games/{game_id}/versions/{id}
///
/// Delete one version. Returns 409 when it is the game's only version.
pub async fn delete_version(
    State(state): State<AppState>,
    Path((game_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    lifecycle::delete_version(&state, game_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
