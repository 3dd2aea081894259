//! 테이블 저장소.
//!
//! 수집기는 테이블 단위로만 읽고 씁니다. 없는 테이블은 에러가 아니라
//! `TableRead::NotFound`로 구분되며, 호출자가 처리 방식을 결정합니다.

pub mod sqlite;

use async_trait::async_trait;

use crate::models::TableData;
use crate::Result;

pub use sqlite::SqliteStore;

/// 테이블 조회 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRead {
    /// 테이블이 존재함 (행이 없을 수도 있음)
    Found(TableData),
    /// 테이블이 존재하지 않음
    NotFound,
}

impl TableRead {
    /// 테이블 데이터. 없는 테이블이면 `None`.
    pub fn into_data(self) -> Option<TableData> {
        match self {
            TableRead::Found(data) => Some(data),
            TableRead::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, TableRead::Found(_))
    }
}

/// 쓰기 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// 기존 테이블을 삭제하고 새로 작성
    Replace,
    /// 기존 테이블 뒤에 추가 (없으면 생성)
    Append,
}

/// 테이블 저장소 trait.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// 테이블 전체 조회.
    async fn read_table(&self, name: &str) -> Result<TableRead>;

    /// 테이블에 행 쓰기. 기록된 행 수를 반환합니다.
    async fn write_table(&self, name: &str, data: &TableData, mode: WriteMode) -> Result<u64>;
}
