//! A-share 참조 데이터 증분 수집기.
//!
//! 이 crate는 Tushare Pro에서 데이터를 받아 날짜별 SQLite 파일에 저장합니다:
//! - 종목 기본 정보 갱신 (전체 교체)
//! - 10대 주주 / 10대 유통주주 수집 (아직 없는 종목만)

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;
pub mod window;

pub use config::{CollectorConfig, TableNames, TushareConfig};
pub use error::{CollectorError, Result};
pub use stats::CollectionStats;
pub use window::WindowArgs;
