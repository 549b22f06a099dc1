// region:    --- Imports
use crate::error::{Result, TenderError};
use crate::repository::PersistPolicy;
use std::env;
use std::str::FromStr;
use tracing::debug;
// endregion: --- Imports

// region:    --- App Config
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_ENDING_SOON_BUFFER_SECS: u64 = 300;
pub const DEFAULT_LATE_BID_EXTENSION_SECS: u64 = 300;
/// 마감 임박 구간 / 자동 연장 시간의 상한 (1년)
pub const MAX_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

/// 서비스 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 없으면 메모리 저장소로 실행
    pub database_url: Option<String>,
    pub listen_addr: String,
    pub sweep_interval_secs: u64,
    pub ending_soon_buffer_secs: u64,
    pub late_bid_extension_secs: u64,
    pub persist_policy: PersistPolicy,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            ending_soon_buffer_secs: DEFAULT_ENDING_SOON_BUFFER_SECS,
            late_bid_extension_secs: DEFAULT_LATE_BID_EXTENSION_SECS,
            persist_policy: PersistPolicy::SkipEmpty,
            seed_demo_data: false,
        }
    }
}

impl AppConfig {
    /// 환경 변수에서 설정 로드 (.env 는 호출 측에서 미리 읽는다)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let persist_empty: bool = parse_var("PERSIST_EMPTY_COLLECTIONS", false)?;

        let config = Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            listen_addr: env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            sweep_interval_secs: parse_var("SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs)?,
            ending_soon_buffer_secs: parse_var(
                "ENDING_SOON_BUFFER_SECS",
                defaults.ending_soon_buffer_secs,
            )?,
            late_bid_extension_secs: parse_var(
                "LATE_BID_EXTENSION_SECS",
                defaults.late_bid_extension_secs,
            )?,
            persist_policy: if persist_empty {
                PersistPolicy::Always
            } else {
                PersistPolicy::SkipEmpty
            },
            seed_demo_data: parse_var("SEED_DEMO_DATA", false)?,
        };
        config.validate()?;
        debug!("{:<12} --> 설정 로드 완료: {:?}", "Config", config);
        Ok(config)
    }

    /// 스윕 주기는 마감 임박 구간보다 짧아야 모든 입찰 공고가 구간 안에서 한 번 이상 검사된다
    pub fn validate(&self) -> Result<()> {
        if self.sweep_interval_secs == 0 {
            return Err(TenderError::Config(
                "SWEEP_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }
        for (name, secs) in [
            ("ENDING_SOON_BUFFER_SECS", self.ending_soon_buffer_secs),
            ("LATE_BID_EXTENSION_SECS", self.late_bid_extension_secs),
        ] {
            if secs > MAX_WINDOW_SECS {
                return Err(TenderError::Config(format!(
                    "{} must be at most {} seconds, got {}",
                    name, MAX_WINDOW_SECS, secs
                )));
            }
        }
        if self.sweep_interval_secs >= self.ending_soon_buffer_secs {
            return Err(TenderError::Config(format!(
                "sweep interval ({}s) must be shorter than the ending-soon buffer ({}s)",
                self.sweep_interval_secs, self.ending_soon_buffer_secs
            )));
        }
        Ok(())
    }

    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_secs)
    }

    /// `validate` 를 통과한 설정에서만 의미가 있다. 범위를 넘는 값은 상한으로 자른다
    pub fn ending_soon_buffer(&self) -> chrono::Duration {
        window_duration(self.ending_soon_buffer_secs)
    }

    pub fn late_bid_extension(&self) -> chrono::Duration {
        window_duration(self.late_bid_extension_secs)
    }
}

fn window_duration(secs: u64) -> chrono::Duration {
    let secs = i64::try_from(secs.min(MAX_WINDOW_SECS)).unwrap_or(0);
    chrono::Duration::try_seconds(secs).unwrap_or_else(chrono::Duration::zero)
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| TenderError::Config(format!("invalid value for {}: {}", name, raw))),
        _ => Ok(default),
    }
}
// endregion: --- App Config
