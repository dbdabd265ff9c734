//! GameCraft domain layer.
//!
//! Holds the pieces of the platform that are independent of the HTTP and
//! database layers: the error taxonomy, HTML document extraction for
//! generator output, the publish pipeline that materializes a version at an
//! owner's public URL, and the per-owner image upload store.

pub mod error;
pub mod html;
pub mod owner;
pub mod publish;
pub mod types;
pub mod uploads;
