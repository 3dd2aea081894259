//! 에러 타입 정의.

use thiserror::Error;

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 설정 에러 (인자 누락, 환경변수 누락 등)
    #[error("Configuration error: {0}")]
    Config(String),

    /// 분기/날짜 파싱 에러
    #[error("Configuration error: {0}")]
    Core(#[from] ashare_core::CoreError),

    /// 데이터 소스 또는 저장소 에러
    #[error("Data error: {0}")]
    Data(#[from] ashare_data::DataError),
}

impl CollectorError {
    /// 수집 시작 전에 발생하는 설정 단계 에러인지 여부.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Core(_))
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
