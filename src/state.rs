//! 프로세스 시작 시 한 번 조립되는 서비스 묶음.
//!
//! HTTP 핸들러와 스케줄러는 모두 이 구조체를 통해 같은 저장소 인스턴스를 공유한다.

use crate::account::{demo, AccountService};
use crate::bidding::BidService;
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::error::Result;
use crate::notification::NotificationDispatcher;
use crate::query::TenderQueries;
use crate::repository::Repository;
use crate::scheduler::TenderScheduler;
use crate::store::KeyValueStore;
use crate::tender::TenderService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: Arc<Repository>,
    pub notifications: Arc<NotificationDispatcher>,
    pub tenders: Arc<TenderService>,
    pub bids: Arc<BidService>,
    pub queries: Arc<TenderQueries>,
    pub accounts: Arc<AccountService>,
}

impl AppState {
    /// 데모 데이터 초기화(설정 시) → 저장소 로드 → 서비스 조립
    pub async fn build(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        if config.seed_demo_data {
            demo::seed_demo_data(&*store, &*clock).await?;
        }

        let repository = Arc::new(Repository::new(Arc::clone(&store), config.persist_policy));
        repository.load().await?;

        let notifications = Arc::new(NotificationDispatcher::new(
            Arc::clone(&repository),
            Arc::clone(&clock),
        ));
        let tenders = Arc::new(TenderService::new(
            Arc::clone(&repository),
            Arc::clone(&notifications),
            Arc::clone(&clock),
            config.ending_soon_buffer(),
        ));
        let bids = Arc::new(BidService::new(
            Arc::clone(&repository),
            Arc::clone(&notifications),
            Arc::clone(&clock),
            config.ending_soon_buffer(),
            config.late_bid_extension(),
        ));
        let queries = Arc::new(TenderQueries::new(Arc::clone(&repository), Arc::clone(&clock)));
        let accounts = Arc::new(AccountService::new(store, clock));

        Ok(Self {
            config: Arc::new(config),
            repository,
            notifications,
            tenders,
            bids,
            queries,
            accounts,
        })
    }

    pub fn scheduler(&self) -> TenderScheduler {
        TenderScheduler::new(Arc::clone(&self.tenders), self.config.sweep_interval())
    }
}
