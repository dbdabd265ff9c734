//! Game lifecycle orchestration.
//!
//! Ties the collaborators together: validate input, resolve the baseline
//! document, call the generation backend, persist the resulting version,
//! and drive the launch/unlaunch publish pipeline. Handlers stay thin
//! wrappers over these functions.
//!
//! Access control is not enforced here; handlers consult the
//! [`crate::auth::AccessPolicy`] before calling in.

use serde::Deserialize;

use gamecraft_core::error::CoreError;
use gamecraft_core::html::{extract_game_document, PLACEHOLDER_HTML};
use gamecraft_core::types::DbId;
use gamecraft_db::models::game::{CreateGame, Game};
use gamecraft_db::models::game_version::{CreateGameVersion, GameVersion, VersionDeleteOutcome};
use gamecraft_db::repositories::{GameRepo, GameVersionRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for the generate-or-iterate operation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub owner_key: String,
    /// Absent when the request should create a new game for the output.
    pub game_id: Option<DbId>,
    pub prompt: String,
    /// True when refining an existing version rather than starting fresh.
    #[serde(default)]
    pub is_iteration: bool,
    /// The version whose content is the iteration baseline.
    pub current_version_id: Option<DbId>,
}

/// Generate a new game document and persist it as the next version.
///
/// On any failure the database is untouched: the version row and the
/// `updated_at` bump only happen after the generator has produced a usable
/// document.
pub async fn generate_or_iterate(
    state: &AppState,
    request: GenerateRequest,
) -> AppResult<(Game, GameVersion)> {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(CoreError::Validation("prompt must not be empty".to_string()).into());
    }

    // Baseline: the version being iterated on, or the fixed placeholder.
    let baseline = match (request.is_iteration, request.game_id, request.current_version_id) {
        (true, Some(game_id), Some(version_id)) => {
            let version = GameVersionRepo::find_by_id(&state.pool, game_id, version_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "GameVersion",
                    id: version_id,
                })?;
            version.html_content
        }
        _ => PLACEHOLDER_HTML.to_string(),
    };

    let raw = state
        .generator
        .generate(prompt, &baseline, &request.owner_key)
        .await?;
    let html = extract_game_document(&raw)?;

    let (game, version) = match request.game_id {
        None => {
            GameRepo::create_with_version(&state.pool, &request.owner_key, None, &html, prompt)
                .await?
        }
        Some(game_id) => {
            let input = CreateGameVersion {
                game_id,
                html_content: html,
                prompt: prompt.to_string(),
            };
            let version = GameVersionRepo::create(&state.pool, &input)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Game",
                    id: game_id,
                })?;
            GameRepo::touch_updated_at(&state.pool, game_id).await?;
            let game = GameRepo::find_by_id(&state.pool, game_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Game",
                    id: game_id,
                })?;
            (game, version)
        }
    };

    tracing::info!(
        game_id = game.id,
        version_id = version.id,
        version_number = version.version_number,
        owner_key = %game.owner_key,
        "Game version generated"
    );

    Ok((game, version))
}

/// List an owner's games, creating the default game when they have none.
pub async fn games_for_owner(state: &AppState, owner_key: &str) -> AppResult<Vec<Game>> {
    let games = GameRepo::list_by_owner(&state.pool, owner_key).await?;
    if !games.is_empty() {
        return Ok(games);
    }

    let input = CreateGame {
        owner_key: owner_key.to_string(),
        title: None,
    };
    let game = GameRepo::create(&state.pool, &input).await?;
    tracing::info!(game_id = game.id, owner_key, "Created default game for new owner");
    Ok(vec![game])
}

/// Publish a version's HTML at the owner's public slot and mark the game
/// launched.
///
/// Idempotent: each owner has a single publish slot, so launching any
/// version (of any of the owner's games) overwrites the previous artifact.
/// A publish failure leaves the launch flag untouched.
pub async fn launch(
    state: &AppState,
    game_id: DbId,
    version_id: DbId,
    owner_key: &str,
) -> AppResult<(Game, String)> {
    let version = GameVersionRepo::find_by_id(&state.pool, game_id, version_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "GameVersion",
            id: version_id,
        })?;

    let public_url = state.publisher.publish(owner_key, &version.html_content).await?;

    let game = GameRepo::set_launch_state(&state.pool, game_id, Some(&public_url))
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Game",
            id: game_id,
        })?;

    tracing::info!(
        game_id,
        version_id,
        version_number = version.version_number,
        url = %public_url,
        "Game launched"
    );

    Ok((game, public_url))
}

/// Remove the owner's published artifact and mark the game unlaunched.
///
/// Artifact removal is best-effort: a missing file is fine, and even a
/// failing removal does not stop the state change. The recorded state
/// reflects intent, not filesystem success.
pub async fn unlaunch(state: &AppState, game_id: DbId, owner_key: &str) -> AppResult<Game> {
    if let Err(e) = state.publisher.unpublish(owner_key).await {
        tracing::warn!(game_id, owner_key, error = %e, "Failed to remove published artifact");
    }

    let game = GameRepo::set_launch_state(&state.pool, game_id, None)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Game",
            id: game_id,
        })?;

    tracing::info!(game_id, owner_key, "Game unlaunched");
    Ok(game)
}

/// Delete one version of a game, never its last.
pub async fn delete_version(state: &AppState, game_id: DbId, version_id: DbId) -> AppResult<()> {
    match GameVersionRepo::delete(&state.pool, game_id, version_id).await? {
        VersionDeleteOutcome::Deleted => {
            tracing::info!(game_id, version_id, "Game version deleted");
            Ok(())
        }
        VersionDeleteOutcome::LastVersion => Err(CoreError::Conflict(
            "Cannot delete the only version of a game".to_string(),
        )
        .into()),
        VersionDeleteOutcome::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "GameVersion",
            id: version_id,
        })),
    }
}

/// Update a game's title. Empty titles are allowed.
pub async fn save_title(state: &AppState, game_id: DbId, title: &str) -> AppResult<Game> {
    let game = GameRepo::update_title(&state.pool, game_id, title)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Game",
            id: game_id,
        })?;

    tracing::info!(game_id, title = %game.title, "Game title saved");
    Ok(game)
}
