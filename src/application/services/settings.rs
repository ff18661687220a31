// src/application/services/settings.rs
use std::sync::Arc;

use serde_json::Value;

use crate::application::{
    dto::BlogSettingsDto,
    error::{ApplicationError, ApplicationResult},
    ports::settings::SettingsStore,
};

pub const COMMENTS_ALLOWED: &str = "comments_allowed";
pub const TEASERS_ENABLED: &str = "teasers_enabled";

/// Blog toggles stored in the shared settings store under one scope. Every
/// toggle read goes to the store; nothing is memoized. Page size is
/// configuration only.
pub struct BlogSettingsService {
    store: Arc<dyn SettingsStore>,
    scope: String,
    default_per_page: u32,
}

impl BlogSettingsService {
    pub fn new(store: Arc<dyn SettingsStore>, scope: impl Into<String>, default_per_page: u32) -> Self {
        Self {
            store,
            scope: scope.into(),
            default_per_page: default_per_page.max(1),
        }
    }

    async fn flag(&self, key: &str, default: bool) -> ApplicationResult<bool> {
        let value = self
            .store
            .find_or_set(key, Value::Bool(default), &self.scope)
            .await?;
        value.as_bool().ok_or_else(|| {
            ApplicationError::infrastructure(format!("setting {}.{key} is not a boolean", self.scope))
        })
    }

    pub async fn comments_allowed(&self) -> ApplicationResult<bool> {
        self.flag(COMMENTS_ALLOWED, true).await
    }

    pub async fn set_comments_allowed(&self, allowed: bool) -> ApplicationResult<()> {
        self.store
            .set(COMMENTS_ALLOWED, Value::Bool(allowed), &self.scope)
            .await
    }

    pub async fn teasers_enabled(&self) -> ApplicationResult<bool> {
        self.flag(TEASERS_ENABLED, true).await
    }

    /// Flips the teaser toggle and returns the new value.
    pub async fn toggle_teasers(&self) -> ApplicationResult<bool> {
        let current = self.teasers_enabled().await?;
        self.store
            .set(TEASERS_ENABLED, Value::Bool(!current), &self.scope)
            .await?;
        tracing::info!(teasers_enabled = !current, "teaser setting toggled");
        Ok(!current)
    }

    /// Listing page size. Comes from configuration on every call and is
    /// never written to the store, so a restart with a new value applies.
    pub fn posts_per_page(&self) -> u32 {
        self.default_per_page
    }

    pub async fn snapshot(&self) -> ApplicationResult<BlogSettingsDto> {
        Ok(BlogSettingsDto {
            comments_allowed: self.comments_allowed().await?,
            teasers_enabled: self.teasers_enabled().await?,
        })
    }
}
