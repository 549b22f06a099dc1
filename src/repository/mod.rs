//! 엔티티 저장소.
//!
//! 입찰 공고, 입찰, 알림 컬렉션의 정본을 메모리에 보관하고 키-값 저장소와 동기화한다.
//! 컬렉션마다 잠금이 하나씩 있으며, 변경은 항상 잠금을 쥔 채로
//! 읽기 → 변환 → 저장 → 교체 순서로 진행된다. 저장에 실패하면 메모리는 바뀌지 않는다.
//!
//! 여러 컬렉션을 함께 잠글 때의 순서: tenders → bids → notifications.

// region:    --- Imports
use crate::bidding::model::Bid;
use crate::error::Result;
use crate::notification::model::Notification;
use crate::store::{self, KeyValueStore};
use crate::tender::model::Tender;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};
use uuid::Uuid;
// endregion: --- Imports

// region:    --- Ids
/// `<prefix>-<uuid>` 형식의 식별자 생성
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}
// endregion: --- Ids

// region:    --- Collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Tenders,
    Bids,
    Notifications,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Tenders => store::TENDERS_KEY,
            Collection::Bids => store::BIDS_KEY,
            Collection::Notifications => store::NOTIFICATIONS_KEY,
        }
    }
}

/// 빈 컬렉션 저장 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistPolicy {
    /// 빈 컬렉션은 저장하지 않는다. 마지막 항목을 지워도 이전 스냅샷이 남는다
    #[default]
    SkipEmpty,
    /// 항상 저장
    Always,
}

/// 저장소가 관리하는 엔티티
pub trait Stored: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn slot(repository: &Repository) -> &Mutex<Vec<Self>>;
}

impl Stored for Tender {
    const COLLECTION: Collection = Collection::Tenders;

    fn slot(repository: &Repository) -> &Mutex<Vec<Self>> {
        &repository.tenders
    }
}

impl Stored for Bid {
    const COLLECTION: Collection = Collection::Bids;

    fn slot(repository: &Repository) -> &Mutex<Vec<Self>> {
        &repository.bids
    }
}

impl Stored for Notification {
    const COLLECTION: Collection = Collection::Notifications;

    fn slot(repository: &Repository) -> &Mutex<Vec<Self>> {
        &repository.notifications
    }
}
// endregion: --- Collections

// region:    --- Collection Guard
/// 컬렉션 잠금. 전체 교체(`replace`)로만 변경할 수 있다
pub struct CollectionGuard<'a, T: Stored> {
    items: MutexGuard<'a, Vec<T>>,
    store: &'a dyn KeyValueStore,
    policy: PersistPolicy,
}

impl<T: Stored> CollectionGuard<'_, T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// 새 배열을 저장한 뒤 메모리 컬렉션을 교체
    pub async fn replace(&mut self, next: Vec<T>) -> Result<()> {
        persist(self.store, self.policy, T::COLLECTION, &next).await?;
        *self.items = next;
        Ok(())
    }
}

async fn persist<T: Stored>(
    store: &dyn KeyValueStore,
    policy: PersistPolicy,
    collection: Collection,
    items: &[T],
) -> Result<()> {
    if items.is_empty() && policy == PersistPolicy::SkipEmpty {
        debug!(
            "{:<12} --> 빈 컬렉션 저장 생략: {}",
            "Repository",
            collection.key()
        );
        return Ok(());
    }
    store::set_json(store, collection.key(), items).await
}
// endregion: --- Collection Guard

// region:    --- Repository
pub struct Repository {
    store: Arc<dyn KeyValueStore>,
    policy: PersistPolicy,
    tenders: Mutex<Vec<Tender>>,
    bids: Mutex<Vec<Bid>>,
    notifications: Mutex<Vec<Notification>>,
    favorites: Mutex<()>,
}

impl Repository {
    pub fn new(store: Arc<dyn KeyValueStore>, policy: PersistPolicy) -> Self {
        Self {
            store,
            policy,
            tenders: Mutex::new(Vec::new()),
            bids: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
            favorites: Mutex::new(()),
        }
    }

    /// 시작 시 저장소에서 컬렉션 로드. 키가 없으면 빈 컬렉션
    pub async fn load(&self) -> Result<()> {
        let tenders = self.load_collection::<Tender>().await?;
        let bids = self.load_collection::<Bid>().await?;
        let notifications = self.load_collection::<Notification>().await?;
        info!(
            "{:<12} --> 로드 완료: tenders={}, bids={}, notifications={}",
            "Repository", tenders, bids, notifications
        );
        Ok(())
    }

    async fn load_collection<T: Stored>(&self) -> Result<usize> {
        let items: Vec<T> = store::get_json(&*self.store, T::COLLECTION.key())
            .await?
            .unwrap_or_default();
        let count = items.len();
        *T::slot(self).lock().await = items;
        Ok(count)
    }

    /// 컬렉션 잠금 획득
    pub async fn lock<T: Stored>(&self) -> CollectionGuard<'_, T> {
        CollectionGuard {
            items: T::slot(self).lock().await,
            store: &*self.store,
            policy: self.policy,
        }
    }

    /// 현재 컬렉션 복사본
    pub async fn snapshot<T: Stored>(&self) -> Vec<T> {
        T::slot(self).lock().await.clone()
    }

    /// 컬렉션 전체 교체
    pub async fn replace<T: Stored>(&self, items: Vec<T>) -> Result<()> {
        self.lock::<T>().await.replace(items).await
    }

    // region:    --- Favorites
    pub async fn favorites(&self, user_id: &str) -> Result<Vec<String>> {
        let _guard = self.favorites.lock().await;
        self.read_favorites(user_id).await
    }

    /// 관심 목록에 추가. 새로 추가되었으면 true
    pub async fn add_favorite(&self, user_id: &str, tender_id: &str) -> Result<bool> {
        let _guard = self.favorites.lock().await;
        let mut favorites = self.read_favorites(user_id).await?;
        if favorites.iter().any(|id| id == tender_id) {
            return Ok(false);
        }
        favorites.push(tender_id.to_string());
        store::set_json(&*self.store, &store::favorites_key(user_id), &favorites).await?;
        Ok(true)
    }

    /// 관심 목록에서 제거. 실제로 제거되었으면 true
    pub async fn remove_favorite(&self, user_id: &str, tender_id: &str) -> Result<bool> {
        let _guard = self.favorites.lock().await;
        let favorites = self.read_favorites(user_id).await?;
        let remaining: Vec<String> = favorites
            .iter()
            .filter(|id| id.as_str() != tender_id)
            .cloned()
            .collect();
        if remaining.len() == favorites.len() {
            return Ok(false);
        }
        store::set_json(&*self.store, &store::favorites_key(user_id), &remaining).await?;
        Ok(true)
    }

    async fn read_favorites(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(
            store::get_json(&*self.store, &store::favorites_key(user_id))
                .await?
                .unwrap_or_default(),
        )
    }
    // endregion: --- Favorites
}
// endregion: --- Repository
