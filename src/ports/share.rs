//! Sharing port: native share sheet with clipboard fallback

use anyhow::Result;
use async_trait::async_trait;

/// Payload handed to the platform share facility.
#[derive(Clone, Debug, PartialEq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Platform sharing surface. `share` may be unavailable or rejected
/// (user dismissal, missing capability); the engine then falls back to
/// `copy_to_clipboard`, whose failure is the final user-visible one.
#[async_trait]
pub trait ShareTarget: Send + Sync {
    async fn share(&self, request: &ShareRequest) -> Result<()>;
    async fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}
