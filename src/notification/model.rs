use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 모든 관리자를 뜻하는 예약 수신자
pub const ADMIN_RECIPIENT: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewTender,
    TenderUpdated,
    TenderClosed,
    #[serde(alias = "bid")]
    NewBid,
    BidStatus,
    BidAccepted,
    BidRejected,
    TenderDeleted,
    #[default]
    #[serde(other)]
    General,
}

// 알림 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationType,
    /// None 이면 전체 공지
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tender_id: Option<String>,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_visible_to(&self, user_id: &str, is_admin: bool) -> bool {
        match self.user_id.as_deref() {
            None => true,
            Some(ADMIN_RECIPIENT) => is_admin,
            Some(recipient) => recipient == user_id,
        }
    }
}

/// 알림 추가 입력. 비어 있는 id/createdAt/read 는 기본값으로 채운다
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationType,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub tender_id: Option<String>,
    #[serde(default)]
    pub read: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_type_names() {
        let kind: NotificationType = serde_json::from_str("\"bid\"").unwrap();
        assert_eq!(kind, NotificationType::NewBid);

        let kind: NotificationType = serde_json::from_str("\"something_else\"").unwrap();
        assert_eq!(kind, NotificationType::General);
    }

    #[test]
    fn test_visibility() {
        let mut notification = Notification {
            id: "notif-1".to_string(),
            title: "New Bid Received".to_string(),
            message: String::new(),
            kind: NotificationType::NewBid,
            user_id: Some(ADMIN_RECIPIENT.to_string()),
            tender_id: None,
            read: false,
            created_at: Utc::now(),
        };
        assert!(notification.is_visible_to("admin-1", true));
        assert!(!notification.is_visible_to("user-1", false));

        notification.user_id = Some("user-1".to_string());
        assert!(notification.is_visible_to("user-1", false));
        assert!(!notification.is_visible_to("user-2", false));

        notification.user_id = None;
        assert!(notification.is_visible_to("user-2", false));
    }
}
