/// 마감 임박 스윕 스케줄러
/// 일정 주기마다 입찰 공고를 검사해 마감 임박 알림을 발송한다.
/// 주기는 마감 임박 구간보다 짧아야 한다 (설정 검증에서 보장)
// region:    --- Imports
use crate::tender::TenderService;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info};

// endregion: --- Imports

// region:    --- Tender Scheduler
pub struct TenderScheduler {
    tenders: Arc<TenderService>,
    period: Duration,
}

impl TenderScheduler {
    pub fn new(tenders: Arc<TenderService>, period: Duration) -> Self {
        Self { tenders, period }
    }

    /// 스케줄러 시작. 반환된 핸들을 종료하거나 drop 하면 작업이 멈춘다
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let tenders = self.tenders;
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!("{:<12} --> 스윕 시작 (주기: {:?})", "Scheduler", period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match tenders.check_tender_statuses().await {
                            Ok(sent) => debug!(
                                "{:<12} --> 스윕 완료, 발송 알림: {}건",
                                "Scheduler",
                                sent.len()
                            ),
                            Err(e) => error!(
                                "{:<12} --> 스윕 중 오류 발생: {:?}",
                                "Scheduler", e
                            ),
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            info!("{:<12} --> 스윕 종료", "Scheduler");
                            break;
                        }
                    }
                }
            }
        });

        SchedulerHandle {
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }
}

/// 스윕 작업 핸들
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// 진행 중인 스윕이 끝날 때까지 기다린 뒤 종료
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("{:<12} --> 스윕 작업 종료 오류: {:?}", "Scheduler", e);
            }
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = self.shutdown.send(true);
            task.abort();
        }
    }
}
// endregion: --- Tender Scheduler
