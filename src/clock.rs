//! 현재 시각 공급자.
//!
//! 상태 계산과 스윕은 모두 `Clock`을 통해 시각을 얻으므로
//! 테스트에서는 `MockClock`으로 시간을 고정하거나 앞당길 수 있다.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 조작 가능한 시계 (밀리초 단위)
#[derive(Debug, Clone)]
pub struct MockClock {
    current_millis: Arc<AtomicI64>,
}

impl MockClock {
    pub fn new(initial: DateTime<Utc>) -> Self {
        Self {
            current_millis: Arc::new(AtomicI64::new(initial.timestamp_millis())),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.current_millis
            .store(at.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.current_millis
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Default for MockClock {
    /// 2024-01-01 00:00:00 UTC
    fn default() -> Self {
        Self {
            current_millis: Arc::new(AtomicI64::new(1_704_067_200_000)),
        }
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.current_millis.load(Ordering::SeqCst);
        Utc.timestamp_millis_opt(millis)
            .single()
            .unwrap_or_else(Utc::now)
    }
}
