//! Integration tests for game CRUD and launch-state transitions.
//!
//! Exercises the repository layer against a real database: seed-version
//! creation, owner scoping, title updates, and the launched/unlaunched
//! pairing of `is_launched` and `launch_link`.

use sqlx::PgPool;

use gamecraft_db::models::game::CreateGame;
use gamecraft_db::repositories::{GameRepo, GameVersionRepo};

fn new_game(owner: &str) -> CreateGame {
    CreateGame {
        owner_key: owner.to_string(),
        title: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_game_gets_default_title_and_seed_version(pool: PgPool) {
    let game = GameRepo::create(&pool, &new_game("wallet-a")).await.unwrap();

    assert_eq!(game.title, "Untitled Game");
    assert!(!game.is_launched);
    assert!(game.launch_link.is_none());

    let versions = GameVersionRepo::list_by_game(&pool, game.id).await.unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].version_number, 1);
    assert_eq!(versions[0].html_content, "<div>New Game</div>");
    assert_eq!(versions[0].prompt, "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_game_with_explicit_title(pool: PgPool) {
    let input = CreateGame {
        owner_key: "wallet-a".to_string(),
        title: Some("Space Invaders".to_string()),
    };
    let game = GameRepo::create(&pool, &input).await.unwrap();
    assert_eq!(game.title, "Space Invaders");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_owner_is_scoped(pool: PgPool) {
    GameRepo::create(&pool, &new_game("wallet-a")).await.unwrap();
    GameRepo::create(&pool, &new_game("wallet-a")).await.unwrap();
    GameRepo::create(&pool, &new_game("wallet-b")).await.unwrap();

    let games = GameRepo::list_by_owner(&pool, "wallet-a").await.unwrap();
    assert_eq!(games.len(), 2);
    assert!(games.iter().all(|g| g.owner_key == "wallet-a"));

    assert!(GameRepo::list_by_owner(&pool, "wallet-c").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_title_bumps_updated_at(pool: PgPool) {
    let game = GameRepo::create(&pool, &new_game("wallet-a")).await.unwrap();

    let updated = GameRepo::update_title(&pool, game.id, "Renamed")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Renamed");
    assert!(updated.updated_at >= game.updated_at);

    // Empty titles are allowed.
    let cleared = GameRepo::update_title(&pool, game.id, "")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.title, "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_title_unknown_game_returns_none(pool: PgPool) {
    let result = GameRepo::update_title(&pool, 999_999, "Nope").await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn launch_state_roundtrip(pool: PgPool) {
    let game = GameRepo::create(&pool, &new_game("wallet-a")).await.unwrap();

    let launched = GameRepo::set_launch_state(
        &pool,
        game.id,
        Some("https://gamecraft.rocks/uploads/wallet-a/game.html"),
    )
    .await
    .unwrap()
    .unwrap();
    assert!(launched.is_launched);
    assert_eq!(
        launched.launch_link.as_deref(),
        Some("https://gamecraft.rocks/uploads/wallet-a/game.html")
    );

    let unlaunched = GameRepo::set_launch_state(&pool, game.id, None)
        .await
        .unwrap()
        .unwrap();
    assert!(!unlaunched.is_launched);
    assert!(unlaunched.launch_link.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn launch_state_unknown_game_returns_none(pool: PgPool) {
    let result = GameRepo::set_launch_state(&pool, 999_999, Some("https://x/game.html"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn touch_updated_at_moves_timestamp_forward(pool: PgPool) {
    let game = GameRepo::create(&pool, &new_game("wallet-a")).await.unwrap();

    let touched = GameRepo::touch_updated_at(&pool, game.id).await.unwrap();
    assert!(touched);

    let reloaded = GameRepo::find_by_id(&pool, game.id).await.unwrap().unwrap();
    assert!(reloaded.updated_at >= game.updated_at);

    assert!(!GameRepo::touch_updated_at(&pool, 999_999).await.unwrap());
}
