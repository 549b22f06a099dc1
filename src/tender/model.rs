use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TenderError};

/// 저장되는 상태 필드. 취소/완료 여부는 별도 플래그로 관리한다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoredStatus {
    #[default]
    Active,
    Extended,
}

// 입찰 공고 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub reference_number: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub status: StoredStatus,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notification_sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tender {
    /// 생성/수정 후 항상 성립해야 하는 조건
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TenderError::Validation("tender name is required".to_string()));
        }
        if self.end_time <= self.start_time {
            return Err(TenderError::Validation(
                "end time must be after start time".to_string(),
            ));
        }
        if let Some(budget) = self.budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(TenderError::Validation(
                    "budget must be a non-negative number".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// 입찰 공고 생성 입력
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub reference_number: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub budget: Option<f64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// 병합 패치. 값이 있는 필드만 덮어쓴다 (필드 단위 last-write-wins)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub department: Option<String>,
    pub reference_number: Option<String>,
    pub requirements: Option<String>,
    pub budget: Option<f64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<StoredStatus>,
    pub cancelled: Option<bool>,
    pub completed: Option<bool>,
    pub notification_sent: Option<bool>,
}

impl TenderPatch {
    pub fn cancel() -> Self {
        Self {
            cancelled: Some(true),
            ..Self::default()
        }
    }

    pub fn complete() -> Self {
        Self {
            completed: Some(true),
            ..Self::default()
        }
    }

    pub fn apply_to(self, tender: &mut Tender) {
        if let Some(name) = self.name {
            tender.name = name;
        }
        if let Some(description) = self.description {
            tender.description = description;
        }
        if let Some(category) = self.category {
            tender.category = category;
        }
        if let Some(department) = self.department {
            tender.department = department;
        }
        if let Some(reference_number) = self.reference_number {
            tender.reference_number = reference_number;
        }
        if let Some(requirements) = self.requirements {
            tender.requirements = requirements;
        }
        if let Some(budget) = self.budget {
            tender.budget = Some(budget);
        }
        if let Some(start_time) = self.start_time {
            tender.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            tender.end_time = end_time;
        }
        if let Some(status) = self.status {
            tender.status = status;
        }
        if let Some(cancelled) = self.cancelled {
            tender.cancelled = cancelled;
        }
        if let Some(completed) = self.completed {
            tender.completed = completed;
        }
        if let Some(notification_sent) = self.notification_sent {
            tender.notification_sent = notification_sent;
        }
    }
}
