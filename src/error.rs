// region:    --- Imports
use thiserror::Error;
// endregion: --- Imports

// region:    --- Error
/// 입찰 서비스 공통 에러
#[derive(Debug, Error)]
pub enum TenderError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Tender is not accepting bids: {0}")]
    TenderClosed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TenderError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        TenderError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// 클라이언트에 전달되는 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            TenderError::Validation(_) => "VALIDATION_FAILED",
            TenderError::NotFound { .. } => "NOT_FOUND",
            TenderError::TenderClosed(_) => "TENDER_CLOSED",
            TenderError::Unauthorized(_) => "UNAUTHORIZED",
            TenderError::Storage(_) | TenderError::Database(_) => "STORAGE_FAILED",
            TenderError::Serialization(_) => "SERIALIZATION_FAILED",
            TenderError::Config(_) => "CONFIG_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, TenderError>;
// endregion: --- Error
