// region:    --- Imports
use super::model::{NewNotification, Notification, NotificationType, ADMIN_RECIPIENT};
use crate::bidding::model::BidStatus;
use crate::clock::Clock;
use crate::error::{Result, TenderError};
use crate::repository::{generate_id, Repository};
use crate::tender::events::TenderEvent;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Notification Dispatcher
/// 알림 추가 및 읽음 처리. 푸시 전송은 하지 않는다 (조회 전용)
pub struct NotificationDispatcher {
    repository: Arc<Repository>,
    clock: Arc<dyn Clock>,
}

impl NotificationDispatcher {
    pub fn new(repository: Arc<Repository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 알림 추가
    pub async fn add_notification(&self, new: NewNotification) -> Result<Notification> {
        let mut added = self.append(vec![new]).await?;
        added
            .pop()
            .ok_or_else(|| TenderError::Storage("notification was not appended".to_string()))
    }

    /// 도메인 이벤트를 알림으로 변환해 한 번에 추가
    pub async fn dispatch(&self, events: &[TenderEvent]) -> Result<Vec<Notification>> {
        if events.is_empty() {
            return Ok(Vec::new());
        }
        let drafts = events.iter().map(notification_for).collect();
        self.append(drafts).await
    }

    /// 이미 저장된 변경에 대한 알림. 알림 저장이 실패해도 변경은 유지되므로 경고만 남긴다
    pub async fn notify(&self, events: &[TenderEvent]) -> Vec<Notification> {
        match self.dispatch(events).await {
            Ok(sent) => sent,
            Err(e) => {
                warn!(
                    "{:<12} --> 알림 저장 실패 (이벤트 {}건 누락): {:?}",
                    "Notification",
                    events.len(),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn append(&self, drafts: Vec<NewNotification>) -> Result<Vec<Notification>> {
        let now = self.clock.now();
        let added: Vec<Notification> = drafts
            .into_iter()
            .map(|draft| materialize(draft, now))
            .collect();

        let mut notifications = self.repository.lock::<Notification>().await;
        let mut next = notifications.items().to_vec();
        next.extend(added.iter().cloned());
        notifications.replace(next).await?;

        for notification in &added {
            info!(
                "{:<12} --> 알림 추가: {} (수신자: {})",
                "Notification",
                notification.title,
                notification.user_id.as_deref().unwrap_or("all")
            );
        }
        Ok(added)
    }

    /// 알림 읽음 처리
    pub async fn mark_notification_as_read(&self, notification_id: &str) -> Result<Notification> {
        let mut notifications = self.repository.lock::<Notification>().await;
        let mut next = notifications.items().to_vec();
        let notification = next
            .iter_mut()
            .find(|notification| notification.id == notification_id)
            .ok_or_else(|| TenderError::not_found("notification", notification_id))?;
        notification.read = true;
        let updated = notification.clone();

        notifications.replace(next).await?;
        Ok(updated)
    }

    /// 전체 알림 읽음 처리. 새로 읽음 처리된 개수를 반환
    pub async fn mark_all_notifications_as_read(&self) -> Result<usize> {
        let mut notifications = self.repository.lock::<Notification>().await;
        let mut next = notifications.items().to_vec();
        let mut changed = 0;
        for notification in next.iter_mut().filter(|notification| !notification.read) {
            notification.read = true;
            changed += 1;
        }
        if changed > 0 {
            notifications.replace(next).await?;
        }
        Ok(changed)
    }

    /// 읽지 않은 알림
    pub async fn get_unread_notifications(&self) -> Vec<Notification> {
        self.repository
            .snapshot::<Notification>()
            .await
            .into_iter()
            .filter(|notification| !notification.read)
            .collect()
    }
}

fn materialize(draft: NewNotification, now: DateTime<Utc>) -> Notification {
    Notification {
        id: draft.id.unwrap_or_else(|| generate_id("notif")),
        title: draft.title,
        message: draft.message,
        kind: draft.kind,
        user_id: draft.user_id,
        tender_id: draft.tender_id,
        read: draft.read.unwrap_or(false),
        created_at: draft.created_at.unwrap_or(now),
    }
}
// endregion: --- Notification Dispatcher

// region:    --- Event Mapping
/// 도메인 이벤트 → 알림 문구
pub fn notification_for(event: &TenderEvent) -> NewNotification {
    match event {
        TenderEvent::TenderCreated { tender_id, name } => NewNotification {
            title: "New Tender".to_string(),
            message: format!("A new tender \"{}\" has been published.", name),
            kind: NotificationType::NewTender,
            tender_id: Some(tender_id.clone()),
            ..NewNotification::default()
        },
        TenderEvent::TenderUpdated { tender_id, name } => NewNotification {
            title: "Tender Updated".to_string(),
            message: format!("The tender \"{}\" has been updated.", name),
            kind: NotificationType::TenderUpdated,
            tender_id: Some(tender_id.clone()),
            ..NewNotification::default()
        },
        TenderEvent::TenderCancelled { tender_id, name } => NewNotification {
            title: "Tender Cancelled".to_string(),
            message: format!("The tender \"{}\" has been cancelled.", name),
            kind: NotificationType::TenderClosed,
            tender_id: Some(tender_id.clone()),
            ..NewNotification::default()
        },
        TenderEvent::TenderCompleted { tender_id, name } => NewNotification {
            title: "Tender Completed".to_string(),
            message: format!("The tender \"{}\" has been marked as completed.", name),
            kind: NotificationType::TenderClosed,
            tender_id: Some(tender_id.clone()),
            ..NewNotification::default()
        },
        TenderEvent::TenderDeleted { .. } => NewNotification {
            title: "Tender Deleted".to_string(),
            message: "A tender has been deleted by an administrator.".to_string(),
            kind: NotificationType::TenderDeleted,
            ..NewNotification::default()
        },
        TenderEvent::TenderExtended {
            tender_id,
            name,
            new_end_time,
            automatic,
        } => {
            let message = if *automatic {
                format!(
                    "The tender \"{}\" received a last-minute bid and has been extended until {}.",
                    name,
                    new_end_time.format("%Y-%m-%d %H:%M UTC")
                )
            } else {
                format!(
                    "The tender \"{}\" has been extended until {}.",
                    name,
                    new_end_time.format("%Y-%m-%d %H:%M UTC")
                )
            };
            NewNotification {
                title: "Tender Extended".to_string(),
                message,
                kind: NotificationType::TenderUpdated,
                tender_id: Some(tender_id.clone()),
                ..NewNotification::default()
            }
        }
        TenderEvent::TenderEndingSoon {
            tender_id,
            name,
            buffer_minutes,
        } => NewNotification {
            title: "Tender Ending Soon".to_string(),
            message: format!(
                "The tender \"{}\" is ending in less than {} minutes!",
                name, buffer_minutes
            ),
            kind: NotificationType::General,
            tender_id: Some(tender_id.clone()),
            ..NewNotification::default()
        },
        TenderEvent::BidPlaced { tender_id, .. } => NewNotification {
            title: "New Bid Received".to_string(),
            message: format!("A new bid has been placed on tender: {}", tender_id),
            kind: NotificationType::NewBid,
            user_id: Some(ADMIN_RECIPIENT.to_string()),
            tender_id: Some(tender_id.clone()),
            ..NewNotification::default()
        },
        TenderEvent::BidStatusChanged {
            tender_id,
            user_id,
            status,
            ..
        } => {
            let (title, kind) = match status {
                BidStatus::Accepted => ("Bid Accepted", NotificationType::BidAccepted),
                BidStatus::Rejected => ("Bid Rejected", NotificationType::BidRejected),
                BidStatus::Pending => ("Bid Pending", NotificationType::BidStatus),
            };
            NewNotification {
                title: title.to_string(),
                message: format!("Your bid on tender has been {}", status.label()),
                kind,
                user_id: Some(user_id.clone()),
                tender_id: Some(tender_id.clone()),
                ..NewNotification::default()
            }
        }
    }
}
// endregion: --- Event Mapping
