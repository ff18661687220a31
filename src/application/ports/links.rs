// src/application/ports/links.rs
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// The URL answered successfully after following redirects.
    Reachable { final_url: String },
    Unreachable { reason: String },
}

impl LinkStatus {
    pub fn is_reachable(&self) -> bool {
        matches!(self, LinkStatus::Reachable { .. })
    }
}

/// Follows redirects for a URL and reports whether it resolves. Network
/// failures and timeouts are reported as `Unreachable`, never as errors.
#[async_trait]
pub trait RedirectValidator: Send + Sync {
    async fn check(&self, url: &str) -> LinkStatus;
}
