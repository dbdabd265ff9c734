//! Repository for the `games` table.

use sqlx::PgPool;

use gamecraft_core::html::PLACEHOLDER_HTML;
use gamecraft_core::types::DbId;

use crate::models::game::{CreateGame, Game};
use crate::models::game_version::GameVersion;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_key, title, is_launched, launch_link, created_at, updated_at";

/// Column list for the version rows created alongside a game.
const VERSION_COLUMNS: &str = "id, game_id, version_number, html_content, prompt, created_at";

/// Provides CRUD operations for games.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new game together with its seed version (number 1,
    /// placeholder HTML, empty prompt) in one transaction, so a game is
    /// never visible without at least one version.
    ///
    /// If `title` is `None` in the input, defaults to "Untitled Game".
    pub async fn create(pool: &PgPool, input: &CreateGame) -> Result<Game, sqlx::Error> {
        Self::create_with_version(pool, &input.owner_key, input.title.as_deref(), PLACEHOLDER_HTML, "")
            .await
            .map(|(game, _)| game)
    }

    /// Insert a new game whose first version carries the given content.
    ///
    /// Used both for explicit game creation (placeholder content) and for
    /// generation requests that arrive without a game id.
    pub async fn create_with_version(
        pool: &PgPool,
        owner_key: &str,
        title: Option<&str>,
        html_content: &str,
        prompt: &str,
    ) -> Result<(Game, GameVersion), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO games (owner_key, title)
             VALUES ($1, COALESCE($2, 'Untitled Game'))
             RETURNING {COLUMNS}"
        );
        let game = sqlx::query_as::<_, Game>(&query)
            .bind(owner_key)
            .bind(title)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO game_versions (game_id, version_number, html_content, prompt)
             VALUES ($1, 1, $2, $3)
             RETURNING {VERSION_COLUMNS}"
        );
        let version = sqlx::query_as::<_, GameVersion>(&query)
            .bind(game.id)
            .bind(html_content)
            .bind(prompt)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((game, version))
    }

    /// Find a game by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's games, most recently created first.
    pub async fn list_by_owner(pool: &PgPool, owner_key: &str) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM games WHERE owner_key = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(owner_key)
            .fetch_all(pool)
            .await
    }

    /// Update a game's title and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists. An empty title
    /// is allowed.
    pub async fn update_title(
        pool: &PgPool,
        id: DbId,
        title: &str,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET title = $2, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Bump a game's `updated_at` to the current time.
    pub async fn touch_updated_at(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE games SET updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the launch state from the launch link: launched with a link, or
    /// unlaunched with none. Both columns change in one statement, which
    /// keeps the `is_launched <=> launch_link IS NOT NULL` pairing intact.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_launch_state(
        pool: &PgPool,
        id: DbId,
        launch_link: Option<&str>,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET is_launched = $2, launch_link = $3, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(launch_link.is_some())
            .bind(launch_link)
            .fetch_optional(pool)
            .await
    }
}
