//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터베이스 오류
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP 전송 오류 (연결 실패, 타임아웃 등)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API가 오류 코드를 반환함
    #[error("API error [{code}]: {msg}")]
    Api { code: i64, msg: String },

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 테이블/컬럼 이름으로 쓸 수 없는 식별자
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
