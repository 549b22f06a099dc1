use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TenderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

impl BidStatus {
    pub fn label(self) -> &'static str {
        match self {
            BidStatus::Pending => "pending",
            BidStatus::Accepted => "accepted",
            BidStatus::Rejected => "rejected",
        }
    }
}

/// 입찰 시점의 입찰자 정보 (이후 프로필이 바뀌어도 갱신하지 않음)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidderSnapshot {
    pub id: String,
    pub name: String,
    pub email: String,
}

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: String,
    pub tender_id: String,
    pub user_id: String,
    pub user: BidderSnapshot,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
}

impl Bid {
    /// 상태 전이 및 타임스탬프 갱신
    pub fn transition(&mut self, status: BidStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
        match status {
            BidStatus::Accepted => self.accepted_at = Some(now),
            BidStatus::Rejected => self.rejected_at = Some(now),
            BidStatus::Pending => {}
        }
    }
}

/// 입찰 생성 입력
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidDraft {
    pub tender_id: String,
    pub user: BidderSnapshot,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default)]
    pub proposal: Option<String>,
    #[serde(default)]
    pub delivery_timeline: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

impl BidDraft {
    pub fn validate(&self) -> Result<()> {
        if self.tender_id.trim().is_empty() {
            return Err(TenderError::Validation("tender id is required".to_string()));
        }
        if self.user.id.trim().is_empty() {
            return Err(TenderError::Validation("bidder id is required".to_string()));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(TenderError::Validation(
                "bid amount must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 금액은 숫자 또는 숫자 문자열로 저장될 수 있다
fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => Ok(value),
        RawAmount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid bid amount: {}", text))),
    }
}
