//! Repository for the `game_versions` table.
//!
//! Version numbers are assigned as `max(existing) + 1` per game. The
//! read-max-then-insert step runs inside a transaction that first locks the
//! owning game row, so concurrent creates for the same game serialize while
//! different games proceed independently. The unique constraint on
//! `(game_id, version_number)` backstops the lock.

use sqlx::PgPool;

use gamecraft_core::types::DbId;

use crate::models::game_version::{CreateGameVersion, GameVersion, VersionDeleteOutcome};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, game_id, version_number, html_content, prompt, created_at";

/// Provides append, read, and delete operations for game versions.
pub struct GameVersionRepo;

impl GameVersionRepo {
    /// Append a new version to a game, auto-assigning the next version
    /// number.
    ///
    /// Returns `None` when the game does not exist. Touching the game's
    /// `updated_at` is the caller's responsibility.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGameVersion,
    ) -> Result<Option<GameVersion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Serializes number assignment per game.
        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM games WHERE id = $1 FOR UPDATE")
                .bind(input.game_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO game_versions (game_id, version_number, html_content, prompt)
             VALUES (
                $1,
                (SELECT COALESCE(MAX(version_number), 0) + 1 FROM game_versions WHERE game_id = $1),
                $2, $3
             )
             RETURNING {COLUMNS}"
        );
        let version = sqlx::query_as::<_, GameVersion>(&query)
            .bind(input.game_id)
            .bind(&input.html_content)
            .bind(&input.prompt)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(version))
    }

    /// Find a version by ID, scoped to its game.
    ///
    /// Returns `None` when the version does not exist or belongs to a
    /// different game.
    pub async fn find_by_id(
        pool: &PgPool,
        game_id: DbId,
        id: DbId,
    ) -> Result<Option<GameVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM game_versions WHERE id = $1 AND game_id = $2");
        sqlx::query_as::<_, GameVersion>(&query)
            .bind(id)
            .bind(game_id)
            .fetch_optional(pool)
            .await
    }

    /// List all versions for a game, ordered by version number descending.
    pub async fn list_by_game(
        pool: &PgPool,
        game_id: DbId,
    ) -> Result<Vec<GameVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM game_versions
             WHERE game_id = $1
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, GameVersion>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }

    /// Count the versions a game currently has.
    pub async fn count_for_game(pool: &PgPool, game_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM game_versions WHERE game_id = $1")
                .bind(game_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Delete a version, refusing to remove a game's last one.
    ///
    /// Locks the game row so the count-then-delete step cannot race with a
    /// concurrent delete leaving the game empty. Remaining versions keep
    /// their numbers; gaps are expected.
    pub async fn delete(
        pool: &PgPool,
        game_id: DbId,
        id: DbId,
    ) -> Result<VersionDeleteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM games WHERE id = $1 FOR UPDATE")
                .bind(game_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(VersionDeleteOutcome::NotFound);
        }

        let exists: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM game_versions WHERE id = $1 AND game_id = $2")
                .bind(id)
                .bind(game_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(VersionDeleteOutcome::NotFound);
        }

        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM game_versions WHERE game_id = $1")
                .bind(game_id)
                .fetch_one(&mut *tx)
                .await?;
        if count.0 <= 1 {
            return Ok(VersionDeleteOutcome::LastVersion);
        }

        sqlx::query("DELETE FROM game_versions WHERE id = $1 AND game_id = $2")
            .bind(id)
            .bind(game_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(VersionDeleteOutcome::Deleted)
    }
}
