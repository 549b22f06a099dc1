//! 입찰 공고의 유효 상태 계산.
//!
//! 저장된 `status` 필드와 `cancelled`/`completed` 플래그, 현재 시각으로부터
//! 매번 계산한다. 호출 측은 원시 필드로 분기하지 말고 이 함수를 사용한다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{StoredStatus, Tender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveStatus {
    Scheduled,
    Active,
    Extended,
    Ended,
    Completed,
    Cancelled,
}

impl EffectiveStatus {
    /// 입찰을 받을 수 있는 상태
    pub fn is_open(self) -> bool {
        matches!(self, EffectiveStatus::Active | EffectiveStatus::Extended)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, EffectiveStatus::Completed | EffectiveStatus::Cancelled)
    }
}

/// 마감 구간 안의 공고는 저장 상태와 관계없이 `Active`.
/// 마감이 지난 공고는 `status = extended` 이면 `Extended` (계속 입찰 가능), 아니면 `Ended`
pub fn effective_status(tender: &Tender, now: DateTime<Utc>) -> EffectiveStatus {
    if tender.cancelled {
        return EffectiveStatus::Cancelled;
    }
    if tender.completed {
        return EffectiveStatus::Completed;
    }
    if now < tender.start_time {
        return EffectiveStatus::Scheduled;
    }
    if now <= tender.end_time {
        return EffectiveStatus::Active;
    }
    match tender.status {
        StoredStatus::Extended => EffectiveStatus::Extended,
        StoredStatus::Active => EffectiveStatus::Ended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tender_around(now: DateTime<Utc>) -> Tender {
        Tender {
            id: "tender-1".to_string(),
            name: "Office supplies".to_string(),
            description: String::new(),
            category: String::new(),
            department: String::new(),
            reference_number: String::new(),
            requirements: String::new(),
            budget: None,
            start_time: now - Duration::hours(1),
            end_time: now + Duration::hours(1),
            status: StoredStatus::Active,
            cancelled: false,
            completed: false,
            notification_sent: false,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_active_then_ended_without_field_change() {
        let now = Utc::now();
        let tender = tender_around(now);
        assert_eq!(effective_status(&tender, now), EffectiveStatus::Active);

        let later = tender.end_time + Duration::seconds(1);
        assert_eq!(effective_status(&tender, later), EffectiveStatus::Ended);
    }

    #[test]
    fn test_flags_take_precedence() {
        let now = Utc::now();
        let mut tender = tender_around(now);
        tender.completed = true;
        assert_eq!(effective_status(&tender, now), EffectiveStatus::Completed);

        tender.cancelled = true;
        assert_eq!(effective_status(&tender, now), EffectiveStatus::Cancelled);
        assert!(!effective_status(&tender, now).is_open());
    }

    #[test]
    fn test_scheduled_before_start() {
        let now = Utc::now();
        let tender = tender_around(now);
        let before = tender.start_time - Duration::minutes(1);
        assert_eq!(effective_status(&tender, before), EffectiveStatus::Scheduled);
    }

    #[test]
    fn test_extended_is_active_inside_window() {
        let now = Utc::now();
        let mut tender = tender_around(now);
        tender.status = StoredStatus::Extended;
        assert_eq!(effective_status(&tender, now), EffectiveStatus::Active);

        // 경계 시각은 아직 구간 안
        assert_eq!(
            effective_status(&tender, tender.end_time),
            EffectiveStatus::Active
        );
    }

    #[test]
    fn test_extended_stays_open_past_end() {
        let now = Utc::now();
        let mut tender = tender_around(now);
        tender.status = StoredStatus::Extended;
        tender.end_time = now - Duration::hours(1);

        let status = effective_status(&tender, now);
        assert_eq!(status, EffectiveStatus::Extended);
        assert!(status.is_open());

        // 같은 시각, 연장되지 않은 공고는 마감
        tender.status = StoredStatus::Active;
        assert_eq!(effective_status(&tender, now), EffectiveStatus::Ended);
        assert!(!effective_status(&tender, now).is_open());
    }

    #[test]
    fn test_flags_override_extended() {
        let now = Utc::now();
        let mut tender = tender_around(now);
        tender.status = StoredStatus::Extended;
        tender.end_time = now - Duration::hours(1);
        tender.cancelled = true;
        assert_eq!(effective_status(&tender, now), EffectiveStatus::Cancelled);
    }
}
