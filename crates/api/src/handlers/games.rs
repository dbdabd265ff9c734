//! Handlers for the `/games` resource: listing, creation, titles, and the
//! launch state machine.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use gamecraft_core::error::CoreError;
use gamecraft_core::owner::validate_owner_key;
use gamecraft_core::types::DbId;
use gamecraft_db::models::game::{CreateGame, Game};
use gamecraft_db::repositories::GameRepo;

use crate::error::AppResult;
use crate::lifecycle;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the game listing.
#[derive(Debug, Deserialize)]
pub struct OwnerParams {
    pub owner_key: String,
}

/// Request body for saving a game title.
#[derive(Debug, Deserialize)]
pub struct SaveTitleRequest {
    pub title: String,
}

/// Request body for launch/unlaunch operations.
#[derive(Debug, Deserialize)]
pub struct LaunchRequest {
    pub owner_key: String,
}

/// Response payload for a successful launch.
#[derive(Debug, Serialize)]
pub struct LaunchResponse {
    pub game: Game,
    pub public_url: String,
}

/// GET /api/v1/games?owner_key=
///
/// List the owner's games, newest first. An owner with no games gets the
/// default "Untitled Game" created on the spot.
pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<OwnerParams>,
) -> AppResult<impl IntoResponse> {
    validate_owner_key(&params.owner_key)?;

    let games = lifecycle::games_for_owner(&state, &params.owner_key).await?;

    tracing::debug!(count = games.len(), owner_key = %params.owner_key, "Listed games");
    Ok(Json(DataResponse { data: games }))
}

/// POST /api/v1/games
///
/// Explicitly create a game (with its seed version).
pub async fn create_game(
    State(state): State<AppState>,
    Json(body): Json<CreateGame>,
) -> AppResult<impl IntoResponse> {
    validate_owner_key(&body.owner_key)?;

    let game = GameRepo::create(&state.pool, &body).await?;

    tracing::info!(game_id = game.id, owner_key = %game.owner_key, "Game created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: game })))
}

/// PATCH /api/v1/games/{id}
///
/// Save the game's title. An empty title is allowed.
pub async fn save_title(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<SaveTitleRequest>,
) -> AppResult<impl IntoResponse> {
    let game = lifecycle::save_title(&state, id, &body.title).await?;
    Ok(Json(DataResponse { data: game }))
}

/// POST /api/v1/games/{game_id}/versions/{id}/launch
///
/// Publish the version's HTML at the owner's public slot and mark the game
/// launched.
pub async fn launch(
    State(state): State<AppState>,
    Path((game_id, version_id)): Path<(DbId, DbId)>,
    Json(body): Json<LaunchRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_access(&state, &body.owner_key).await?;

    let (game, public_url) = lifecycle::launch(&state, game_id, version_id, &body.owner_key).await?;

    Ok(Json(DataResponse {
        data: LaunchResponse { game, public_url },
    }))
}

/// POST /api/v1/games/{id}/unlaunch
///
/// Remove the published artifact (best-effort) and mark the game
/// unlaunched.
pub async fn unlaunch(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<LaunchRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_access(&state, &body.owner_key).await?;

    let game = lifecycle::unlaunch(&state, id, &body.owner_key).await?;
    Ok(Json(DataResponse { data: game }))
}

/// Reject owners the access policy does not admit.
pub(crate) async fn ensure_access(state: &AppState, owner_key: &str) -> AppResult<()> {
    validate_owner_key(owner_key)?;
    if !state.access.has_access(owner_key).await {
        return Err(CoreError::Forbidden(
            "owner does not have access to this operation".to_string(),
        )
        .into());
    }
    Ok(())
}
