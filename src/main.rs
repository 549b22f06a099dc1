// region:    --- Imports
use std::sync::Arc;
use tender_service::clock::SystemClock;
use tender_service::config::AppConfig;
use tender_service::database::DatabaseManager;
use tender_service::handlers;
use tender_service::state::AppState;
use tender_service::store::{KeyValueStore, MemoryStore, PostgresStore};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .without_time()
        .with_target(false)
        .init();

    // .env 파일은 없어도 된다
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    info!(
        "{:<12} --> 설정 로드 완료: sweep={}s, buffer={}s, extension={}s, persist={:?}",
        "Main",
        config.sweep_interval_secs,
        config.ending_soon_buffer_secs,
        config.late_bid_extension_secs,
        config.persist_policy
    );

    // 저장소 선택 (DATABASE_URL 이 없으면 메모리 저장소)
    let store: Arc<dyn KeyValueStore> = match config.database_url.as_deref() {
        Some(database_url) => {
            let db_manager = DatabaseManager::new(database_url).await?;
            if let Err(e) = db_manager.initialize_database().await {
                error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
                return Err(e.into());
            }
            info!("{:<12} --> 데이터베이스 초기화 성공", "Main");
            Arc::new(PostgresStore::new(&db_manager))
        }
        None => {
            warn!(
                "{:<12} --> DATABASE_URL 미설정, 메모리 저장소 사용 (재시작 시 데이터 소실)",
                "Main"
            );
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::build(config, store, Arc::new(SystemClock)).await?;

    // 마감 임박 스윕 시작
    let scheduler = state.scheduler().start();

    let listener = TcpListener::bind(&state.config.listen_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행 (Ctrl+C 로 종료)
    let routes_all = handlers::router(state);
    if let Err(err) = axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("{:<12} --> Server error: {}", "Main", err);
    }

    scheduler.shutdown().await;
    info!("{:<12} --> 서버 종료", "Main");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("{:<12} --> 종료 시그널 대기 실패: {:?}", "Main", e);
    }
}
// endregion: --- Main
