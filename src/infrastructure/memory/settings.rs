use super::InMemoryBlogStore;
use crate::application::{ApplicationResult, ports::settings::SettingsStore};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
impl SettingsStore for InMemoryBlogStore {
    async fn find_or_set(&self, key: &str, default: Value, scope: &str) -> ApplicationResult<Value> {
        let value = self.write(|state| {
            Ok(state
                .settings
                .entry((scope.to_string(), key.to_string()))
                .or_insert(default)
                .clone())
        })?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Value, scope: &str) -> ApplicationResult<()> {
        self.write(|state| {
            state
                .settings
                .insert((scope.to_string(), key.to_string()), value);
            Ok(())
        })?;
        tracing::info!(scope, key, "setting stored");
        Ok(())
    }
}
