// region:    --- Imports
use super::KeyValueStore;
use crate::error::{Result, TenderError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
// endregion: --- Imports

// region:    --- Memory Store
/// 프로세스 내 저장소. 테스트와 DATABASE_URL 없는 실행에 사용
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
    fail_writes: AtomicBool,
    failing_keys: RwLock<HashSet<String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이후 set/remove 호출을 실패시킨다
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 특정 키에 대한 set/remove 호출만 실패시킨다
    pub async fn set_fail_key(&self, key: &str, fail: bool) {
        let mut failing_keys = self.failing_keys.write().await;
        if fail {
            failing_keys.insert(key.to_string());
        } else {
            failing_keys.remove(key);
        }
    }

    /// 성공한 쓰기 횟수
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn check_writable(&self, key: &str) -> Result<()> {
        let failing = self.fail_writes.load(Ordering::SeqCst)
            || self.failing_keys.read().await.contains(key);
        if failing {
            return Err(TenderError::Storage(format!("write rejected for key {}", key)));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.check_writable(key).await?;
        self.entries.write().await.insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.check_writable(key).await?;
        self.entries.write().await.remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
// endregion: --- Memory Store
