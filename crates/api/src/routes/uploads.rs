//! Route definitions for the upload store.
//!
//! ```text
//! GET    /{owner_key}/files             list_files
//! POST   /{owner_key}/files             upload_file (multipart)
//! DELETE /{owner_key}/files/{file_id}   delete_file
//! ```

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Upload store routes -- mounted at `/uploads`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{owner_key}/files",
            get(uploads::list_files).post(uploads::upload_file),
        )
        .route("/{owner_key}/files/{file_id}", delete(uploads::delete_file))
}
