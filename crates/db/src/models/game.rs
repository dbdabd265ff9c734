//! Game entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gamecraft_core::types::{DbId, Timestamp};

/// A game row from the `games` table.
///
/// `is_launched` and `launch_link` always change together: the link is
/// non-null exactly when the game is launched.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub owner_key: String,
    pub title: String,
    pub is_launched: bool,
    pub launch_link: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new game.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGame {
    pub owner_key: String,
    /// Defaults to "Untitled Game" if omitted.
    pub title: Option<String>,
}
