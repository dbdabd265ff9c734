//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod game_repo;
pub mod game_version_repo;

pub use game_repo::GameRepo;
pub use game_version_repo::GameVersionRepo;
