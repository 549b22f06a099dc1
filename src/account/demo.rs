//! 데모 데이터 초기화. `users`/`tenders` 키가 비어 있을 때만 채운다.

use super::model::{Role, UserRecord};
use crate::clock::Clock;
use crate::error::Result;
use crate::repository::generate_id;
use crate::store::{self, KeyValueStore, TENDERS_KEY, USERS_KEY};
use crate::tender::model::{StoredStatus, Tender};
use chrono::{DateTime, Duration, Utc};
use tracing::info;

const CATEGORIES: [&str; 5] = [
    "Construction",
    "IT Services",
    "Healthcare",
    "Transportation",
    "Consulting",
];

pub fn demo_users(now: DateTime<Utc>) -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: "admin-1".to_string(),
            name: "Admin User".to_string(),
            email: "admin@demo.com".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
            is_admin: true,
            company_name: Some("System Admin Inc.".to_string()),
            created_at: now,
            updated_at: None,
        },
        UserRecord {
            id: "user-1".to_string(),
            name: "Demo User".to_string(),
            email: "user@demo.com".to_string(),
            password: "user123".to_string(),
            role: Role::User,
            is_admin: false,
            company_name: Some("Demo Company".to_string()),
            created_at: now,
            updated_at: None,
        },
    ]
}

/// 진행 중 / 예정 / 마감 임박 / 완료 공고가 섞인 목록
pub fn demo_tenders(now: DateTime<Utc>, count: usize) -> Vec<Tender> {
    (1..=count)
        .map(|i| {
            let category = CATEGORIES[i % CATEGORIES.len()];
            let (start_time, end_time) = match i % 5 {
                // 마감 임박
                0 => (now - Duration::days(2), now + Duration::minutes(4)),
                1 => (now + Duration::days(1), now + Duration::days(8)),
                _ => (now - Duration::days(1), now + Duration::days(i as i64 + 6)),
            };
            Tender {
                id: generate_id("tender"),
                name: format!("{} Project {}", category, i),
                description: format!(
                    "This is a demo tender for {} services. The project involves providing \
                     high-quality services within the specified timeframe and budget.",
                    category
                ),
                category: category.to_string(),
                department: "Procurement".to_string(),
                reference_number: format!("DEMO-{:03}", i),
                requirements: "References from previous clients required".to_string(),
                budget: Some(10_000.0 * i as f64),
                start_time,
                end_time,
                status: StoredStatus::Active,
                cancelled: false,
                completed: i % 7 == 0,
                notification_sent: false,
                created_by: Some("admin-1".to_string()),
                created_at: now,
                updated_at: now,
            }
        })
        .collect()
}

/// 저장소 로드 전에 호출해야 한다
pub async fn seed_demo_data(store: &dyn KeyValueStore, clock: &dyn Clock) -> Result<()> {
    let now = clock.now();
    if store.get(USERS_KEY).await?.is_none() {
        store::set_json(store, USERS_KEY, &demo_users(now)).await?;
        info!("{:<12} --> 데모 사용자 초기화", "Demo");
    }
    if store.get(TENDERS_KEY).await?.is_none() {
        store::set_json(store, TENDERS_KEY, &demo_tenders(now, 10)).await?;
        info!("{:<12} --> 데모 입찰 공고 초기화", "Demo");
    }
    Ok(())
}
