//! 데이터 수집 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - Tushare Pro HTTP API 클라이언트 (`StockDataSource` 구현)
//! - 열 지향 결과 모델 `TableData`와 타입이 있는 레코드
//! - SQLite 테이블 저장소 (`TableStore` 구현)

pub mod error;
pub mod models;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};
pub use models::{
    tables, FloatHolderRecord, HolderKind, HolderRecord, StockBasic, TableData,
};

// Provider 재내보내기
pub use provider::{StockDataSource, TushareClient};

// 저장소 재내보내기
pub use storage::{SqliteStore, TableRead, TableStore, WriteMode};
