//! 키-값 저장소 추상화.
//!
//! 모든 상태는 문자열 키 아래 JSON 값 하나로 저장된다.

// region:    --- Imports
use crate::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
// endregion: --- Imports

// region:    --- Modules
mod memory;
mod postgres;
mod queries;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
// endregion: --- Modules

// region:    --- Keys
pub const USERS_KEY: &str = "users";
pub const CURRENT_USER_KEY: &str = "user";
pub const TENDERS_KEY: &str = "tenders";
pub const BIDS_KEY: &str = "bids";
pub const NOTIFICATIONS_KEY: &str = "notifications";

/// 사용자별 관심 입찰 공고 키
pub fn favorites_key(user_id: &str) -> String {
    format!("favorites_{}", user_id)
}
// endregion: --- Keys

// region:    --- Key Value Store Trait
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// 키 조회 후 역직렬화 (키가 없으면 None)
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub async fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    store.set(key, serde_json::to_value(value)?).await
}
// endregion: --- Key Value Store Trait
