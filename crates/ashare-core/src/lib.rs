//! # A-Share Core
//!
//! 수집기 전반에서 사용되는 기본 타입을 제공합니다:
//! - 분기 및 수집 기간(날짜 범위) 타입
//! - 로깅 인프라 (파일 + 콘솔 이중 출력)
//! - 핵심 에러 타입

pub mod error;
pub mod logging;
pub mod types;

pub use error::*;
pub use logging::*;
pub use types::*;
