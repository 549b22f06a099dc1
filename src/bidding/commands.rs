/// 입찰 관련 커맨드 처리
/// 1. 입찰 (마감 직전 입찰은 마감 자동 연장)
/// 2. 상태 변경 / 낙찰 / 유찰
/// 3. 삭제
/// 4. 조회 및 통계
// region:    --- Imports
use super::model::{Bid, BidDraft, BidStatus};
use super::stats::{self, BidStats};
use crate::clock::Clock;
use crate::error::{Result, TenderError};
use crate::notification::NotificationDispatcher;
use crate::repository::{generate_id, Repository};
use crate::tender::events::TenderEvent;
use crate::tender::model::{StoredStatus, Tender};
use crate::tender::status::effective_status;
use chrono::Duration;
use std::sync::Arc;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Bid Service
pub struct BidService {
    repository: Arc<Repository>,
    dispatcher: Arc<NotificationDispatcher>,
    clock: Arc<dyn Clock>,
    ending_soon_buffer: Duration,
    late_bid_extension: Duration,
}

impl BidService {
    pub fn new(
        repository: Arc<Repository>,
        dispatcher: Arc<NotificationDispatcher>,
        clock: Arc<dyn Clock>,
        ending_soon_buffer: Duration,
        late_bid_extension: Duration,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            clock,
            ending_soon_buffer,
            late_bid_extension,
        }
    }

    /// 1. 입찰
    pub async fn create_bid(&self, draft: BidDraft) -> Result<Bid> {
        info!(
            "{:<12} --> 입찰 요청 처리 시작: tender={}, user={}, amount={}",
            "Command", draft.tender_id, draft.user.id, draft.amount
        );
        draft.validate()?;
        let now = self.clock.now();

        let (bid, events) = {
            let mut tenders = self.repository.lock::<Tender>().await;
            let mut bids = self.repository.lock::<Bid>().await;

            let mut next_tenders = tenders.items().to_vec();
            let tender = next_tenders
                .iter_mut()
                .find(|tender| tender.id == draft.tender_id)
                .ok_or_else(|| TenderError::not_found("tender", &draft.tender_id))?;

            let status = effective_status(tender, now);
            if !status.is_open() {
                warn!(
                    "{:<12} --> 입찰 불가 상태: tender={}, status={:?}",
                    "Command", tender.id, status
                );
                return Err(TenderError::TenderClosed(format!(
                    "tender {} is {:?}",
                    tender.id, status
                )));
            }

            let bid = Bid {
                id: generate_id("bid"),
                tender_id: draft.tender_id.clone(),
                user_id: draft.user.id.clone(),
                user: draft.user,
                amount: draft.amount,
                proposal: draft.proposal,
                delivery_timeline: draft.delivery_timeline,
                company_name: draft.company_name,
                status: BidStatus::Pending,
                created_at: now,
                updated_at: now,
                accepted_at: None,
                rejected_at: None,
            };
            let mut events = vec![TenderEvent::BidPlaced {
                bid_id: bid.id.clone(),
                tender_id: bid.tender_id.clone(),
                user_id: bid.user_id.clone(),
            }];

            // 마감 임박 구간의 입찰은 마감을 뒤로 미룬다
            let late_bid =
                now >= tender.end_time - self.ending_soon_buffer && now <= tender.end_time;
            if late_bid {
                tender.end_time += self.late_bid_extension;
                tender.status = StoredStatus::Extended;
                tender.updated_at = now;
                events.push(TenderEvent::TenderExtended {
                    tender_id: tender.id.clone(),
                    name: tender.name.clone(),
                    new_end_time: tender.end_time,
                    automatic: true,
                });
                info!(
                    "{:<12} --> 마감 직전 입찰로 마감 자동 연장: tender={}, 새 마감={}",
                    "Command", tender.id, tender.end_time
                );
            }

            let mut next_bids = bids.items().to_vec();
            next_bids.push(bid.clone());
            if late_bid {
                let previous_tenders = tenders.items().to_vec();
                tenders.replace(next_tenders).await?;
                // 입찰 저장이 실패하면 마감 연장도 되돌린다
                if let Err(e) = bids.replace(next_bids).await {
                    warn!(
                        "{:<12} --> 입찰 저장 실패, 마감 연장 복원 tender: {}: {}",
                        "Command", bid.tender_id, e
                    );
                    if let Err(restore) = tenders.replace(previous_tenders).await {
                        error!(
                            "{:<12} --> 마감 연장 복원 실패 tender: {}: {:?}",
                            "Command", bid.tender_id, restore
                        );
                    }
                    return Err(e);
                }
            } else {
                bids.replace(next_bids).await?;
            }
            (bid, events)
        };

        self.dispatcher.notify(&events).await;
        info!("{:<12} --> 입찰 완료 id: {}", "Command", bid.id);
        Ok(bid)
    }

    /// 2. 입찰 상태 변경
    /// 낙찰(Accepted)로 바꾸는 경우 같은 공고의 다른 입찰은 모두 유찰 처리된다
    pub async fn update_bid_status(&self, bid_id: &str, status: BidStatus) -> Result<Bid> {
        info!(
            "{:<12} --> 입찰 상태 변경 id: {}, status: {}",
            "Command",
            bid_id,
            status.label()
        );
        self.transition(bid_id, None, status).await
    }

    /// 낙찰. 같은 공고의 다른 입찰은 유찰 처리하고 대상 입찰을 낙찰 처리한다
    pub async fn accept_bid(&self, bid_id: &str, tender_id: &str) -> Result<Bid> {
        info!(
            "{:<12} --> 낙찰 처리 id: {}, tender: {}",
            "Command", bid_id, tender_id
        );
        self.transition(bid_id, Some(tender_id), BidStatus::Accepted)
            .await
    }

    /// 유찰 (다른 입찰에는 영향 없음)
    pub async fn reject_bid(&self, bid_id: &str) -> Result<Bid> {
        info!("{:<12} --> 유찰 처리 id: {}", "Command", bid_id);
        self.transition(bid_id, None, BidStatus::Rejected).await
    }

    /// 입찰 잠금을 쥔 채 한 번의 교체로 적용되므로 두 건이 동시에 낙찰 상태가 되는 순간은 없다
    async fn transition(
        &self,
        bid_id: &str,
        expected_tender: Option<&str>,
        status: BidStatus,
    ) -> Result<Bid> {
        let now = self.clock.now();
        let (updated, events) = {
            let mut bids = self.repository.lock::<Bid>().await;
            let target = bids
                .items()
                .iter()
                .find(|bid| bid.id == bid_id)
                .ok_or_else(|| TenderError::not_found("bid", bid_id))?;
            let tender_id = target.tender_id.clone();

            if let Some(expected) = expected_tender {
                if expected != tender_id {
                    return Err(TenderError::Validation(format!(
                        "bid {} does not belong to tender {}",
                        bid_id, expected
                    )));
                }
            }

            let mut next = bids.items().to_vec();
            let mut events = Vec::new();
            let mut updated = None;
            for bid in next.iter_mut() {
                if bid.id == bid_id {
                    bid.transition(status, now);
                    events.push(status_event(bid));
                    updated = Some(bid.clone());
                } else if status == BidStatus::Accepted
                    && bid.tender_id == tender_id
                    && bid.status != BidStatus::Rejected
                {
                    bid.transition(BidStatus::Rejected, now);
                    events.push(status_event(bid));
                }
            }
            let updated = updated.ok_or_else(|| TenderError::not_found("bid", bid_id))?;

            bids.replace(next).await?;
            (updated, events)
        };

        self.dispatcher.notify(&events).await;
        Ok(updated)
    }

    /// 3. 입찰 삭제 (연쇄 없음)
    pub async fn delete_bid(&self, bid_id: &str) -> Result<Bid> {
        info!("{:<12} --> 입찰 삭제 id: {}", "Command", bid_id);
        let mut bids = self.repository.lock::<Bid>().await;
        let position = bids
            .items()
            .iter()
            .position(|bid| bid.id == bid_id)
            .ok_or_else(|| TenderError::not_found("bid", bid_id))?;
        let mut next = bids.items().to_vec();
        let removed = next.remove(position);
        bids.replace(next).await?;
        Ok(removed)
    }

    // region:    --- Queries
    /// 4. 공고별 입찰 목록
    pub async fn get_bids_by_tender(&self, tender_id: &str) -> Vec<Bid> {
        self.filtered(|bid| bid.tender_id == tender_id).await
    }

    /// 사용자의 공고별 입찰 목록
    pub async fn get_user_bids_by_tender(&self, tender_id: &str, user_id: &str) -> Vec<Bid> {
        self.filtered(|bid| bid.tender_id == tender_id && bid.user_id == user_id)
            .await
    }

    /// 사용자 입찰 목록
    pub async fn get_user_bids(&self, user_id: &str) -> Vec<Bid> {
        self.filtered(|bid| bid.user_id == user_id).await
    }

    pub async fn get_bid_by_id(&self, bid_id: &str) -> Option<Bid> {
        self.filtered(|bid| bid.id == bid_id).await.into_iter().next()
    }

    /// 최저 입찰 (동일 금액이면 먼저 접수된 입찰)
    pub async fn get_lowest_bid(&self, tender_id: &str) -> Option<Bid> {
        let bids = self.get_bids_by_tender(tender_id).await;
        stats::lowest_bid(&bids).cloned()
    }

    pub async fn get_tender_bid_stats(&self, tender_id: &str) -> BidStats {
        let bids = self.get_bids_by_tender(tender_id).await;
        stats::bid_stats(&bids)
    }

    async fn filtered(&self, predicate: impl Fn(&Bid) -> bool) -> Vec<Bid> {
        let bids = self.repository.lock::<Bid>().await;
        bids.items()
            .iter()
            .filter(|bid| predicate(bid))
            .cloned()
            .collect()
    }
    // endregion: --- Queries
}

fn status_event(bid: &Bid) -> TenderEvent {
    TenderEvent::BidStatusChanged {
        bid_id: bid.id.clone(),
        tender_id: bid.tender_id.clone(),
        user_id: bid.user_id.clone(),
        status: bid.status,
    }
}
// endregion: --- Bid Service

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::model::BidderSnapshot;
    use crate::clock::MockClock;
    use crate::notification::{Notification, NotificationType, ADMIN_RECIPIENT};
    use crate::repository::PersistPolicy;
    use crate::store::{
        get_json, KeyValueStore, MemoryStore, BIDS_KEY, NOTIFICATIONS_KEY, TENDERS_KEY,
    };
    use crate::tender::model::TenderDraft;
    use crate::tender::status::EffectiveStatus;
    use crate::tender::TenderService;

    struct Fixture {
        clock: MockClock,
        store: Arc<MemoryStore>,
        repository: Arc<Repository>,
        tenders: TenderService,
        bids: Arc<BidService>,
    }

    fn fixture() -> Fixture {
        let clock = MockClock::default();
        let store = Arc::new(MemoryStore::new());
        let repository = Arc::new(Repository::new(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            PersistPolicy::SkipEmpty,
        ));
        let dispatcher = Arc::new(NotificationDispatcher::new(
            Arc::clone(&repository),
            Arc::new(clock.clone()),
        ));
        let tenders = TenderService::new(
            Arc::clone(&repository),
            Arc::clone(&dispatcher),
            Arc::new(clock.clone()),
            Duration::minutes(5),
        );
        let bids = Arc::new(BidService::new(
            Arc::clone(&repository),
            dispatcher,
            Arc::new(clock.clone()),
            Duration::minutes(5),
            Duration::minutes(5),
        ));
        Fixture {
            clock,
            store,
            repository,
            tenders,
            bids,
        }
    }

    async fn open_tender(f: &Fixture, hours: i64) -> Tender {
        let now = f.clock.now();
        f.tenders
            .create_tender(TenderDraft {
                name: "IT Services Project".to_string(),
                description: String::new(),
                category: "IT Services".to_string(),
                department: String::new(),
                reference_number: String::new(),
                requirements: String::new(),
                budget: None,
                start_time: now - Duration::hours(1),
                end_time: now + Duration::hours(hours),
                created_by: None,
            })
            .await
            .unwrap()
    }

    fn draft(tender_id: &str, user_id: &str, amount: f64) -> BidDraft {
        BidDraft {
            tender_id: tender_id.to_string(),
            user: BidderSnapshot {
                id: user_id.to_string(),
                name: format!("{} name", user_id),
                email: format!("{}@demo.com", user_id),
            },
            amount,
            proposal: Some("We can deliver".to_string()),
            delivery_timeline: Some("30 days".to_string()),
            company_name: None,
        }
    }

    fn accepted_count(bids: &[Bid], tender_id: &str) -> usize {
        bids.iter()
            .filter(|bid| bid.tender_id == tender_id && bid.status == BidStatus::Accepted)
            .count()
    }

    #[tokio::test]
    async fn test_create_bid_notifies_admin() {
        let f = fixture();
        let tender = open_tender(&f, 24).await;
        let bid = f
            .bids
            .create_bid(draft(&tender.id, "user-1", 1200.0))
            .await
            .unwrap();

        assert_eq!(bid.status, BidStatus::Pending);
        assert_eq!(bid.user.email, "user-1@demo.com");

        let notification = f
            .repository
            .snapshot::<Notification>()
            .await
            .into_iter()
            .find(|n| n.kind == NotificationType::NewBid)
            .unwrap();
        assert_eq!(notification.user_id.as_deref(), Some(ADMIN_RECIPIENT));
        assert_eq!(notification.tender_id.as_deref(), Some(tender.id.as_str()));
    }

    #[tokio::test]
    async fn test_create_bid_validation() {
        let f = fixture();
        let tender = open_tender(&f, 24).await;

        let zero = f.bids.create_bid(draft(&tender.id, "user-1", 0.0)).await;
        assert!(matches!(zero, Err(TenderError::Validation(_))));

        let missing = f.bids.create_bid(draft("tender-missing", "user-1", 10.0)).await;
        assert!(matches!(missing, Err(TenderError::NotFound { .. })));

        f.tenders.cancel_tender(&tender.id).await.unwrap();
        let closed = f.bids.create_bid(draft(&tender.id, "user-1", 10.0)).await;
        assert!(matches!(closed, Err(TenderError::TenderClosed(_))));
        assert!(f.repository.snapshot::<Bid>().await.is_empty());
    }

    #[tokio::test]
    async fn test_bid_after_deadline_is_rejected() {
        let f = fixture();
        let tender = open_tender(&f, 1).await;
        f.clock.advance(Duration::hours(2));
        let result = f.bids.create_bid(draft(&tender.id, "user-1", 10.0)).await;
        assert!(matches!(result, Err(TenderError::TenderClosed(_))));
    }

    #[tokio::test]
    async fn test_late_bid_extends_deadline() {
        let f = fixture();
        let tender = open_tender(&f, 1).await;
        f.clock.advance(Duration::minutes(57));

        f.bids
            .create_bid(draft(&tender.id, "user-1", 10.0))
            .await
            .unwrap();

        let stored = f.repository.snapshot::<Tender>().await;
        assert_eq!(stored[0].end_time, tender.end_time + Duration::minutes(5));
        assert_eq!(stored[0].status, StoredStatus::Extended);
        assert_eq!(
            effective_status(&stored[0], f.clock.now()),
            EffectiveStatus::Active
        );
        assert!(f
            .repository
            .snapshot::<Notification>()
            .await
            .iter()
            .any(|n| n.title == "Tender Extended"));
    }

    #[tokio::test]
    async fn test_extended_tender_accepts_bids_after_deadline() {
        let f = fixture();
        let tender = open_tender(&f, 1).await;
        f.clock.advance(Duration::minutes(57));
        f.bids
            .create_bid(draft(&tender.id, "user-1", 10.0))
            .await
            .unwrap();
        let extended_end = tender.end_time + Duration::minutes(5);

        // 새 마감 이후에도 입찰 가능하며 마감은 다시 밀리지 않는다
        f.clock.advance(Duration::minutes(30));
        f.bids
            .create_bid(draft(&tender.id, "user-2", 9.0))
            .await
            .unwrap();
        let stored = f.repository.snapshot::<Tender>().await;
        assert_eq!(stored[0].end_time, extended_end);
        assert_eq!(
            effective_status(&stored[0], f.clock.now()),
            EffectiveStatus::Extended
        );
        assert_eq!(f.bids.get_bids_by_tender(&tender.id).await.len(), 2);
    }

    #[tokio::test]
    async fn test_late_bid_rolls_back_extension_when_bid_write_fails() {
        let f = fixture();
        let tender = open_tender(&f, 1).await;
        f.clock.advance(Duration::minutes(57));

        f.store.set_fail_key(BIDS_KEY, true).await;
        let result = f.bids.create_bid(draft(&tender.id, "user-1", 10.0)).await;
        assert!(matches!(result, Err(TenderError::Storage(_))));

        let stored = f.repository.snapshot::<Tender>().await;
        assert_eq!(stored[0].end_time, tender.end_time);
        assert_eq!(stored[0].status, StoredStatus::Active);
        assert!(f.repository.snapshot::<Bid>().await.is_empty());

        let persisted: Vec<Tender> = get_json(&*f.store, TENDERS_KEY).await.unwrap().unwrap();
        assert_eq!(persisted[0].end_time, tender.end_time);
    }

    #[tokio::test]
    async fn test_bid_kept_when_notification_write_fails() {
        let f = fixture();
        let tender = open_tender(&f, 24).await;
        f.store.set_fail_key(NOTIFICATIONS_KEY, true).await;

        let bid = f
            .bids
            .create_bid(draft(&tender.id, "user-1", 10.0))
            .await
            .unwrap();
        assert_eq!(f.bids.get_bid_by_id(&bid.id).await, Some(bid.clone()));

        let accepted = f.bids.accept_bid(&bid.id, &tender.id).await.unwrap();
        assert_eq!(accepted.status, BidStatus::Accepted);
        assert!(!f
            .repository
            .snapshot::<Notification>()
            .await
            .iter()
            .any(|n| n.title == "New Bid Received"));
    }

    #[tokio::test]
    async fn test_early_bid_keeps_deadline() {
        let f = fixture();
        let tender = open_tender(&f, 1).await;
        f.bids
            .create_bid(draft(&tender.id, "user-1", 10.0))
            .await
            .unwrap();
        let stored = f.repository.snapshot::<Tender>().await;
        assert_eq!(stored[0].end_time, tender.end_time);
        assert_eq!(stored[0].status, StoredStatus::Active);
    }

    #[tokio::test]
    async fn test_accept_rejects_siblings() {
        let f = fixture();
        let tender = open_tender(&f, 24).await;
        let other = open_tender(&f, 24).await;
        let b1 = f.bids.create_bid(draft(&tender.id, "u1", 500.0)).await.unwrap();
        let b2 = f.bids.create_bid(draft(&tender.id, "u2", 300.0)).await.unwrap();
        let b3 = f.bids.create_bid(draft(&tender.id, "u3", 700.0)).await.unwrap();
        let unrelated = f.bids.create_bid(draft(&other.id, "u1", 100.0)).await.unwrap();

        let accepted = f.bids.accept_bid(&b2.id, &tender.id).await.unwrap();
        assert_eq!(accepted.status, BidStatus::Accepted);
        assert!(accepted.accepted_at.is_some());

        let status_of = |bids: &[Bid], id: &str| {
            bids.iter().find(|bid| bid.id == id).map(|bid| bid.status)
        };
        let bids = f.repository.snapshot::<Bid>().await;
        assert_eq!(status_of(&bids, &b1.id), Some(BidStatus::Rejected));
        assert_eq!(status_of(&bids, &b2.id), Some(BidStatus::Accepted));
        assert_eq!(status_of(&bids, &b3.id), Some(BidStatus::Rejected));
        assert_eq!(status_of(&bids, &unrelated.id), Some(BidStatus::Pending));

        let notifications = f.repository.snapshot::<Notification>().await;
        let accepted_note = notifications
            .iter()
            .find(|n| n.kind == NotificationType::BidAccepted)
            .unwrap();
        assert_eq!(accepted_note.user_id.as_deref(), Some("u2"));
        assert_eq!(
            notifications
                .iter()
                .filter(|n| n.kind == NotificationType::BidRejected)
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_accept_twice_keeps_single_winner() {
        let f = fixture();
        let tender = open_tender(&f, 24).await;
        let b1 = f.bids.create_bid(draft(&tender.id, "u1", 500.0)).await.unwrap();
        let b2 = f.bids.create_bid(draft(&tender.id, "u2", 300.0)).await.unwrap();
        let b3 = f.bids.create_bid(draft(&tender.id, "u3", 700.0)).await.unwrap();

        f.bids.accept_bid(&b1.id, &tender.id).await.unwrap();
        f.bids.reject_bid(&b3.id).await.unwrap();
        f.bids
            .update_bid_status(&b2.id, BidStatus::Accepted)
            .await
            .unwrap();

        let bids = f.repository.snapshot::<Bid>().await;
        assert_eq!(accepted_count(&bids, &tender.id), 1);
        assert_eq!(
            f.bids.get_bid_by_id(&b2.id).await.map(|b| b.status),
            Some(BidStatus::Accepted)
        );
    }

    #[tokio::test]
    async fn test_concurrent_accepts_keep_single_winner() {
        let f = fixture();
        let tender = open_tender(&f, 24).await;
        let mut ids = Vec::new();
        for i in 0..10 {
            let bid = f
                .bids
                .create_bid(draft(&tender.id, &format!("u{}", i), 100.0 + i as f64))
                .await
                .unwrap();
            ids.push(bid.id);
        }

        let mut handles = Vec::new();
        for id in ids {
            let bids = Arc::clone(&f.bids);
            let tender_id = tender.id.clone();
            handles.push(tokio::spawn(async move {
                bids.accept_bid(&id, &tender_id).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let bids = f.repository.snapshot::<Bid>().await;
        assert_eq!(accepted_count(&bids, &tender.id), 1);
        assert_eq!(
            bids.iter()
                .filter(|bid| bid.status == BidStatus::Rejected)
                .count(),
            9
        );
    }

    #[tokio::test]
    async fn test_accept_with_wrong_tender() {
        let f = fixture();
        let tender = open_tender(&f, 24).await;
        let b1 = f.bids.create_bid(draft(&tender.id, "u1", 500.0)).await.unwrap();
        let result = f.bids.accept_bid(&b1.id, "tender-other").await;
        assert!(matches!(result, Err(TenderError::Validation(_))));

        let missing = f.bids.accept_bid("bid-missing", &tender.id).await;
        assert!(matches!(missing, Err(TenderError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_reject_does_not_cascade() {
        let f = fixture();
        let tender = open_tender(&f, 24).await;
        let b1 = f.bids.create_bid(draft(&tender.id, "u1", 500.0)).await.unwrap();
        let b2 = f.bids.create_bid(draft(&tender.id, "u2", 300.0)).await.unwrap();

        let rejected = f.bids.reject_bid(&b1.id).await.unwrap();
        assert_eq!(rejected.status, BidStatus::Rejected);
        assert!(rejected.rejected_at.is_some());
        assert_eq!(
            f.bids.get_bid_by_id(&b2.id).await.map(|b| b.status),
            Some(BidStatus::Pending)
        );
    }

    #[tokio::test]
    async fn test_delete_bid() {
        let f = fixture();
        let tender = open_tender(&f, 24).await;
        let b1 = f.bids.create_bid(draft(&tender.id, "u1", 500.0)).await.unwrap();

        f.bids.delete_bid(&b1.id).await.unwrap();
        assert!(f.bids.get_bid_by_id(&b1.id).await.is_none());
        let again = f.bids.delete_bid(&b1.id).await;
        assert!(matches!(again, Err(TenderError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_queries_and_stats() {
        let f = fixture();
        let tender = open_tender(&f, 24).await;
        let empty = open_tender(&f, 24).await;
        f.bids.create_bid(draft(&tender.id, "u1", 500.0)).await.unwrap();
        let lowest = f.bids.create_bid(draft(&tender.id, "u2", 300.0)).await.unwrap();
        f.bids.create_bid(draft(&tender.id, "u1", 700.0)).await.unwrap();

        assert_eq!(f.bids.get_bids_by_tender(&tender.id).await.len(), 3);
        assert_eq!(f.bids.get_user_bids("u1").await.len(), 2);
        assert_eq!(
            f.bids.get_user_bids_by_tender(&tender.id, "u2").await.len(),
            1
        );
        assert_eq!(
            f.bids.get_lowest_bid(&tender.id).await.map(|b| b.id),
            Some(lowest.id)
        );

        let stats = f.bids.get_tender_bid_stats(&tender.id).await;
        assert_eq!(stats.count, 3);
        assert_eq!(stats.average, 500.0);

        let none = f.bids.get_tender_bid_stats(&empty.id).await;
        assert_eq!(none.count, 0);
        assert_eq!(none.lowest, None);
        assert_eq!(none.highest, None);
        assert_eq!(none.average, 0.0);
        assert!(f.bids.get_lowest_bid(&empty.id).await.is_none());
    }
}
