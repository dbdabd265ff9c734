//! Owner access policy.
//!
//! Whether an owner may use the platform is decided outside this system
//! (the production deployment gates on a wallet token balance). The HTTP
//! boundary consults the policy before mutating lifecycle operations; the
//! lifecycle module itself assumes the caller is already authorized.

use async_trait::async_trait;

/// Opaque boolean access predicate over owner keys.
#[async_trait]
pub trait AccessPolicy: Send + Sync {
    async fn has_access(&self, owner_key: &str) -> bool;
}

/// Policy that admits every owner. The default when no external gate is
/// configured.
pub struct AllowAll;

#[async_trait]
impl AccessPolicy for AllowAll {
    async fn has_access(&self, _owner_key: &str) -> bool {
        true
    }
}
