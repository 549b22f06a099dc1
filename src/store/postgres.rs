// region:    --- Imports
use super::queries;
use super::KeyValueStore;
use crate::database::DatabaseManager;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;
// endregion: --- Imports

// region:    --- Postgres Store
/// `kv_store` 테이블 기반 저장소 구현체
pub struct PostgresStore {
    pool: Arc<PgPool>,
}

impl PostgresStore {
    pub fn new(db_manager: &DatabaseManager) -> Self {
        Self {
            pool: db_manager.get_pool(),
        }
    }
}

#[async_trait]
impl KeyValueStore for PostgresStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        debug!("{:<12} --> 조회 key: {}", "Store", key);
        let value = sqlx::query_scalar::<_, Value>(queries::GET_VALUE)
            .bind(key)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        debug!("{:<12} --> 저장 key: {}", "Store", key);
        sqlx::query(queries::UPSERT_VALUE)
            .bind(key)
            .bind(value)
            .bind(Utc::now())
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        debug!("{:<12} --> 삭제 key: {}", "Store", key);
        sqlx::query(queries::DELETE_VALUE)
            .bind(key)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}
// endregion: --- Postgres Store
