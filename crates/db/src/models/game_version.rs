//! Game version models and DTOs.
//!
//! Versions are immutable snapshots: a full self-contained HTML document
//! plus the prompt that produced it. They are appended with densely
//! increasing version numbers and individually deletable, except for the
//! last one remaining on a game.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gamecraft_core::types::{DbId, Timestamp};

/// A version row from the `game_versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameVersion {
    pub id: DbId,
    pub game_id: DbId,
    pub version_number: i32,
    pub html_content: String,
    pub prompt: String,
    pub created_at: Timestamp,
}

/// Input for appending a new version to a game.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGameVersion {
    pub game_id: DbId,
    pub html_content: String,
    pub prompt: String,
}

/// Outcome of a version delete attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionDeleteOutcome {
    /// The version was removed. Remaining numbers are not reshuffled.
    Deleted,
    /// Refused: this was the game's only version.
    LastVersion,
    /// No such version for this game.
    NotFound,
}
