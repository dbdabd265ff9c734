pub mod games;
pub mod health;
pub mod uploads;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /games                                   list (?owner_key=), create
/// /games/{id}                              save title (PATCH)
/// /games/{id}/unlaunch                     unlaunch (POST)
/// /games/{game_id}/versions                list
/// /games/{game_id}/versions/{id}           delete
/// /games/{game_id}/versions/{id}/launch    launch (POST)
///
/// /generate                                generate or iterate (POST)
///
/// /uploads/{owner_key}/files               list, upload (multipart)
/// /uploads/{owner_key}/files/{file_id}     delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Games, their versions, and the launch state machine.
        .nest("/games", games::router())
        // Game generation via the external model.
        .route("/generate", post(handlers::generate::generate))
        // Per-owner image uploads.
        .nest("/uploads", uploads::router())
}
