//! 조회 전용 파사드. 호출마다 현재 스냅샷에서 다시 계산하며 캐시하지 않는다.

// region:    --- Imports
use crate::bidding::model::Bid;
use crate::clock::Clock;
use crate::error::Result;
use crate::notification::model::Notification;
use crate::repository::Repository;
use crate::tender::model::Tender;
use crate::tender::status::{effective_status, EffectiveStatus};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

/// 사용자 입찰과 해당 공고 요약
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTenderSummary {
    pub bid: Bid,
    pub tender: Option<Tender>,
    pub tender_status: Option<EffectiveStatus>,
}

// region:    --- Query Handlers
pub struct TenderQueries {
    repository: Arc<Repository>,
    clock: Arc<dyn Clock>,
}

impl TenderQueries {
    pub fn new(repository: Arc<Repository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 공고 단건 조회
    pub async fn get_tender_by_id(&self, tender_id: &str) -> Option<Tender> {
        info!("{:<12} --> 입찰 공고 조회 id: {}", "Query", tender_id);
        self.repository
            .snapshot::<Tender>()
            .await
            .into_iter()
            .find(|tender| tender.id == tender_id)
    }

    pub async fn get_all_tenders(&self) -> Vec<Tender> {
        self.repository.snapshot::<Tender>().await
    }

    /// 진행 중인 공고 (연장된 공고 포함, 취소/완료 제외)
    pub async fn get_active_tenders(&self) -> Vec<Tender> {
        info!("{:<12} --> 진행 중인 입찰 공고 조회", "Query");
        let now = self.clock.now();
        self.repository
            .snapshot::<Tender>()
            .await
            .into_iter()
            .filter(|tender| effective_status(tender, now).is_open())
            .collect()
    }

    pub async fn get_completed_tenders(&self) -> Vec<Tender> {
        self.repository
            .snapshot::<Tender>()
            .await
            .into_iter()
            .filter(|tender| tender.completed)
            .collect()
    }

    /// 관리자 화면 상태별 필터
    pub async fn get_tenders_by_status(&self, status: EffectiveStatus) -> Vec<Tender> {
        let now = self.clock.now();
        self.repository
            .snapshot::<Tender>()
            .await
            .into_iter()
            .filter(|tender| effective_status(tender, now) == status)
            .collect()
    }

    /// 사용자 관심 공고 (삭제된 공고 id는 무시)
    pub async fn get_user_favorites(&self, user_id: &str) -> Result<Vec<Tender>> {
        info!("{:<12} --> 관심 공고 조회 user: {}", "Query", user_id);
        let favorite_ids = self.repository.favorites(user_id).await?;
        Ok(self
            .repository
            .snapshot::<Tender>()
            .await
            .into_iter()
            .filter(|tender| favorite_ids.contains(&tender.id))
            .collect())
    }

    pub async fn is_favorite(&self, user_id: &str, tender_id: &str) -> Result<bool> {
        let favorite_ids = self.repository.favorites(user_id).await?;
        Ok(favorite_ids.iter().any(|id| id == tender_id))
    }

    /// 사용자에게 보이는 알림 (최신순)
    pub async fn get_user_notifications(&self, user_id: &str, is_admin: bool) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = self
            .repository
            .snapshot::<Notification>()
            .await
            .into_iter()
            .filter(|notification| notification.is_visible_to(user_id, is_admin))
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications
    }

    /// 사용자 입찰 + 공고 요약
    pub async fn get_user_tender_summaries(&self, user_id: &str) -> Vec<UserTenderSummary> {
        let now = self.clock.now();
        let tenders = self.repository.snapshot::<Tender>().await;
        self.repository
            .snapshot::<Bid>()
            .await
            .into_iter()
            .filter(|bid| bid.user_id == user_id)
            .map(|bid| {
                let tender = tenders.iter().find(|tender| tender.id == bid.tender_id).cloned();
                let tender_status = tender.as_ref().map(|tender| effective_status(tender, now));
                UserTenderSummary {
                    bid,
                    tender,
                    tender_status,
                }
            })
            .collect()
    }
}
// endregion: --- Query Handlers
