use crate::application::{ApplicationResult, ports::settings::SettingsStore};
use crate::infrastructure::repositories::map_sqlx;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, types::Json};

/// Settings rows keyed by `(scope, key)` with a JSON value.
#[derive(Clone)]
pub struct PostgresSettingsStore {
    pool: PgPool,
}

impl PostgresSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PostgresSettingsStore {
    async fn find_or_set(&self, key: &str, default: Value, scope: &str) -> ApplicationResult<Value> {
        sqlx::query(
            "INSERT INTO settings (scope, key, value) VALUES ($1, $2, $3)
             ON CONFLICT (scope, key) DO NOTHING",
        )
        .bind(scope)
        .bind(key)
        .bind(Json(default))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let Json(value): Json<Value> =
            sqlx::query_scalar("SELECT value FROM settings WHERE scope = $1 AND key = $2")
                .bind(scope)
                .bind(key)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Value, scope: &str) -> ApplicationResult<()> {
        sqlx::query(
            "INSERT INTO settings (scope, key, value) VALUES ($1, $2, $3)
             ON CONFLICT (scope, key) DO UPDATE SET value = EXCLUDED.value",
        )
        .bind(scope)
        .bind(key)
        .bind(Json(value))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        tracing::info!(scope, key, "setting stored");
        Ok(())
    }
}
