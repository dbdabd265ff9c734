//! Route definitions for games and their versions.
//!
//! ```text
//! GET    /                                 list_games (?owner_key=)
//! POST   /                                 create_game
//! PATCH  /{id}                             save_title
//! POST   /{id}/unlaunch                    unlaunch
//! GET    /{game_id}/versions               list_versions
//! DELETE /{game_id}/versions/{id}          delete_version
//! POST   /{game_id}/versions/{id}/launch   launch
//! ```

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers::{games, versions};
use crate::state::AppState;

/// Game routes -- mounted at `/games`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(games::list_games).post(games::create_game))
        .route("/{id}", patch(games::save_title))
        .route("/{id}/unlaunch", post(games::unlaunch))
        .route("/{game_id}/versions", get(versions::list_versions))
        .route(
            "/{game_id}/versions/{id}",
            delete(versions::delete_version),
        )
        .route("/{game_id}/versions/{id}/launch", post(games::launch))
}
