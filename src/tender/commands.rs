/// 입찰 공고 관련 커맨드 처리
/// 1. 생성 / 병합 패치 / 취소 / 완료
/// 2. 삭제 (연관 입찰 함께 삭제)
/// 3. 마감 연장
/// 4. 마감 임박 스윕
/// 5. 관심 목록
// region:    --- Imports
use super::events::TenderEvent;
use super::model::{StoredStatus, Tender, TenderDraft, TenderPatch};
use super::status::effective_status;
use crate::bidding::model::Bid;
use crate::clock::Clock;
use crate::error::{Result, TenderError};
use crate::notification::{Notification, NotificationDispatcher};
use crate::repository::{generate_id, Repository};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Tender Service
pub struct TenderService {
    repository: Arc<Repository>,
    dispatcher: Arc<NotificationDispatcher>,
    clock: Arc<dyn Clock>,
    ending_soon_buffer: Duration,
}

impl TenderService {
    pub fn new(
        repository: Arc<Repository>,
        dispatcher: Arc<NotificationDispatcher>,
        clock: Arc<dyn Clock>,
        ending_soon_buffer: Duration,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            clock,
            ending_soon_buffer,
        }
    }

    /// 1. 입찰 공고 생성
    pub async fn create_tender(&self, draft: TenderDraft) -> Result<Tender> {
        info!("{:<12} --> 입찰 공고 생성 요청: {}", "Command", draft.name);
        let now = self.clock.now();
        let tender = Tender {
            id: generate_id("tender"),
            name: draft.name,
            description: draft.description,
            category: draft.category,
            department: draft.department,
            reference_number: draft.reference_number,
            requirements: draft.requirements,
            budget: draft.budget,
            start_time: draft.start_time,
            end_time: draft.end_time,
            status: StoredStatus::Active,
            cancelled: false,
            completed: false,
            notification_sent: false,
            created_by: draft.created_by,
            created_at: now,
            updated_at: now,
        };
        tender.validate()?;

        {
            let mut tenders = self.repository.lock::<Tender>().await;
            let mut next = tenders.items().to_vec();
            next.push(tender.clone());
            tenders.replace(next).await?;
        }

        self.dispatcher
            .notify(&[TenderEvent::TenderCreated {
                tender_id: tender.id.clone(),
                name: tender.name.clone(),
            }])
            .await;
        info!("{:<12} --> 입찰 공고 생성 완료 id: {}", "Command", tender.id);
        Ok(tender)
    }

    /// 병합 패치. 관리자 수정과 상태 변경 모두 이 경로를 사용한다
    pub async fn apply_tender_patch(&self, tender_id: &str, patch: TenderPatch) -> Result<Tender> {
        info!("{:<12} --> 입찰 공고 패치 id: {}", "Command", tender_id);
        let tender = self.mutate(tender_id, |tender| patch.apply_to(tender)).await?;
        self.dispatcher
            .notify(&[TenderEvent::TenderUpdated {
                tender_id: tender.id.clone(),
                name: tender.name.clone(),
            }])
            .await;
        Ok(tender)
    }

    /// 입찰 공고 취소 (이미 취소된 경우에도 성공)
    pub async fn cancel_tender(&self, tender_id: &str) -> Result<Tender> {
        info!("{:<12} --> 입찰 공고 취소 id: {}", "Command", tender_id);
        let tender = self
            .mutate(tender_id, |tender| TenderPatch::cancel().apply_to(tender))
            .await?;
        self.dispatcher
            .notify(&[TenderEvent::TenderCancelled {
                tender_id: tender.id.clone(),
                name: tender.name.clone(),
            }])
            .await;
        Ok(tender)
    }

    /// 입찰 공고 완료 (이미 완료된 경우에도 성공)
    pub async fn complete_tender(&self, tender_id: &str) -> Result<Tender> {
        info!("{:<12} --> 입찰 공고 완료 id: {}", "Command", tender_id);
        let tender = self
            .mutate(tender_id, |tender| TenderPatch::complete().apply_to(tender))
            .await?;
        self.dispatcher
            .notify(&[TenderEvent::TenderCompleted {
                tender_id: tender.id.clone(),
                name: tender.name.clone(),
            }])
            .await;
        Ok(tender)
    }

    /// 2. 입찰 공고 삭제. 삭제된 공고를 반환
    pub async fn delete_tender(&self, tender_id: &str) -> Result<Tender> {
        info!("{:<12} --> 입찰 공고 삭제 id: {}", "Command", tender_id);
        let (removed, removed_bids) = {
            let mut tenders = self.repository.lock::<Tender>().await;
            let mut bids = self.repository.lock::<Bid>().await;

            let position = tenders
                .items()
                .iter()
                .position(|tender| tender.id == tender_id)
                .ok_or_else(|| TenderError::not_found("tender", tender_id))?;

            let mut next_tenders = tenders.items().to_vec();
            let removed = next_tenders.remove(position);
            let next_bids: Vec<Bid> = bids
                .items()
                .iter()
                .filter(|bid| bid.tender_id != tender_id)
                .cloned()
                .collect();
            let removed_bids = bids.items().len() - next_bids.len();

            let previous_tenders = tenders.items().to_vec();
            tenders.replace(next_tenders).await?;
            if let Err(e) = bids.replace(next_bids).await {
                warn!(
                    "{:<12} --> 입찰 삭제 실패, 공고 복원 id: {}: {}",
                    "Command", tender_id, e
                );
                if let Err(restore) = tenders.replace(previous_tenders).await {
                    error!(
                        "{:<12} --> 공고 복원 실패 id: {}: {:?}",
                        "Command", tender_id, restore
                    );
                }
                return Err(e);
            }
            (removed, removed_bids)
        };

        self.dispatcher
            .notify(&[TenderEvent::TenderDeleted {
                tender_id: removed.id.clone(),
                removed_bids,
            }])
            .await;
        info!(
            "{:<12} --> 입찰 공고 삭제 완료 id: {}, 삭제된 입찰 수: {}",
            "Command", removed.id, removed_bids
        );
        Ok(removed)
    }

    /// 3. 마감 연장
    pub async fn extend_tender_deadline(
        &self,
        tender_id: &str,
        new_end_time: DateTime<Utc>,
    ) -> Result<Tender> {
        info!(
            "{:<12} --> 마감 연장 id: {}, 새 마감: {}",
            "Command", tender_id, new_end_time
        );
        let tender = self
            .mutate(tender_id, |tender| {
                tender.end_time = new_end_time;
                tender.status = StoredStatus::Extended;
            })
            .await?;
        self.dispatcher
            .notify(&[TenderEvent::TenderExtended {
                tender_id: tender.id.clone(),
                name: tender.name.clone(),
                new_end_time: tender.end_time,
                automatic: false,
            }])
            .await;
        Ok(tender)
    }

    /// 4. 마감 임박 스윕
    /// 마감 전 버퍼 구간 안에 있고 아직 알림을 보내지 않은 공고마다 알림을 한 번만 보낸다
    pub async fn check_tender_statuses(&self) -> Result<Vec<Notification>> {
        let now = self.clock.now();
        let mut tenders = self.repository.lock::<Tender>().await;
        let mut next = tenders.items().to_vec();
        let mut events = Vec::new();

        for tender in next.iter_mut() {
            if tender.notification_sent || effective_status(tender, now).is_terminal() {
                continue;
            }
            let window_start = tender.end_time - self.ending_soon_buffer;
            if now < window_start || now > tender.end_time {
                continue;
            }
            tender.notification_sent = true;
            events.push(TenderEvent::TenderEndingSoon {
                tender_id: tender.id.clone(),
                name: tender.name.clone(),
                buffer_minutes: self.ending_soon_buffer.num_minutes(),
            });
        }

        if events.is_empty() {
            return Ok(Vec::new());
        }
        info!(
            "{:<12} --> 마감 임박 알림 대상: {}건",
            "Scheduler",
            events.len()
        );

        // 알림을 먼저 저장한 뒤 발송 플래그를 기록한다.
        // 알림 저장이 실패하면 플래그는 그대로라 다음 스윕에서 다시 시도된다
        let sent = self.dispatcher.dispatch(&events).await?;
        if let Err(e) = tenders.replace(next).await {
            warn!(
                "{:<12} --> 발송 플래그 저장 실패, 다음 스윕에서 재발송될 수 있음: {}",
                "Scheduler", e
            );
            return Err(e);
        }
        Ok(sent)
    }

    // region:    --- Favorites
    /// 5. 관심 목록 추가
    pub async fn add_favorite(&self, user_id: &str, tender_id: &str) -> Result<bool> {
        self.ensure_exists(tender_id).await?;
        self.repository.add_favorite(user_id, tender_id).await
    }

    /// 관심 목록 제거 (삭제된 공고도 제거 가능)
    pub async fn remove_favorite(&self, user_id: &str, tender_id: &str) -> Result<bool> {
        self.repository.remove_favorite(user_id, tender_id).await
    }
    // endregion: --- Favorites

    async fn ensure_exists(&self, tender_id: &str) -> Result<()> {
        let tenders = self.repository.lock::<Tender>().await;
        if tenders.items().iter().any(|tender| tender.id == tender_id) {
            Ok(())
        } else {
            Err(TenderError::not_found("tender", tender_id))
        }
    }

    /// 단일 공고 변경 공통 경로. 변경 후 유효성 검사를 통과해야 저장된다
    async fn mutate(&self, tender_id: &str, change: impl FnOnce(&mut Tender)) -> Result<Tender> {
        let now = self.clock.now();
        let mut tenders = self.repository.lock::<Tender>().await;
        let mut next = tenders.items().to_vec();
        let tender = next
            .iter_mut()
            .find(|tender| tender.id == tender_id)
            .ok_or_else(|| TenderError::not_found("tender", tender_id))?;

        change(tender);
        tender.updated_at = now;
        if let Err(e) = tender.validate() {
            warn!("{:<12} --> 유효하지 않은 변경 id: {}: {}", "Command", tender_id, e);
            return Err(e);
        }
        let updated = tender.clone();

        tenders.replace(next).await?;
        Ok(updated)
    }
}
// endregion: --- Tender Service
