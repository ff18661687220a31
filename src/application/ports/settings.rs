// src/application/ports/settings.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the stored value, storing `default` first if the key is unset.
    async fn find_or_set(&self, key: &str, default: Value, scope: &str) -> ApplicationResult<Value>;
    async fn set(&self, key: &str, value: Value, scope: &str) -> ApplicationResult<()>;
}
