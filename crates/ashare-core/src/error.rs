//! 핵심 타입의 에러 정의.

use thiserror::Error;

/// 분기/날짜 파싱 에러.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    /// 알 수 없는 분기 라벨
    #[error("잘못된 분기: {0} (Q1, Q2, Q3, Q4 중 하나)")]
    InvalidQuarter(String),

    /// 4자리 숫자가 아닌 연도
    #[error("잘못된 연도: {0} (4자리 숫자)")]
    InvalidYear(String),

    /// YYYYMMDD 형식이 아니거나 존재하지 않는 날짜
    #[error("잘못된 날짜: {0} (YYYYMMDD)")]
    InvalidDate(String),

    /// 시작일이 종료일보다 늦음
    #[error("잘못된 기간: {start} > {end}")]
    InvalidRange { start: String, end: String },
}

/// 핵심 작업을 위한 Result 타입.
pub type Result<T> = std::result::Result<T, CoreError>;
