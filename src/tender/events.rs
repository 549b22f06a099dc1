use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bidding::model::BidStatus;

/// 변경 명령이 반환하는 도메인 이벤트. 알림 생성은 디스패처가 담당한다
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TenderEvent {
    // 입찰 공고 생성
    TenderCreated {
        tender_id: String,
        name: String,
    },
    // 입찰 공고 수정
    TenderUpdated {
        tender_id: String,
        name: String,
    },
    TenderCancelled {
        tender_id: String,
        name: String,
    },
    TenderCompleted {
        tender_id: String,
        name: String,
    },
    // 입찰 공고 삭제 (연관 입찰 함께 삭제)
    TenderDeleted {
        tender_id: String,
        removed_bids: usize,
    },
    // 마감 연장. 마감 직전 입찰로 인한 자동 연장이면 automatic = true
    TenderExtended {
        tender_id: String,
        name: String,
        new_end_time: DateTime<Utc>,
        automatic: bool,
    },
    // 마감 임박
    TenderEndingSoon {
        tender_id: String,
        name: String,
        buffer_minutes: i64,
    },
    // 입찰 접수
    BidPlaced {
        bid_id: String,
        tender_id: String,
        user_id: String,
    },
    // 입찰 상태 변경
    BidStatusChanged {
        bid_id: String,
        tender_id: String,
        user_id: String,
        status: BidStatus,
    },
}
