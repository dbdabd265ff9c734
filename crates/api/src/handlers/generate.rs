//! Handler for the generate-or-iterate operation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use gamecraft_db::models::game::Game;
use gamecraft_db::models::game_version::GameVersion;

use crate::error::AppResult;
use crate::handlers::games::ensure_access;
use crate::lifecycle::{self, GenerateRequest};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for a successful generation.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub game: Game,
    pub version: GameVersion,
}

/// POST /api/v1/generate
///
/// Generate a game document from the prompt (iterating on an existing
/// version when requested) and persist it as the next version, creating the
/// game first when no id is supplied.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_access(&state, &body.owner_key).await?;

    let (game, version) = lifecycle::generate_or_iterate(&state, body).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: GenerateResponse { game, version },
        }),
    ))
}
