//! 데이터 Provider 모듈.
//!
//! 수집기가 필요로 하는 외부 API 기능을 `StockDataSource` trait으로 정의합니다.
//!
//! ## Tushare Pro
//! - `TushareClient`: Tushare Pro HTTP API 클라이언트 (토큰 필요)
//! - 종목 기본 정보, 10대 주주, 10대 유통주주

pub mod tushare;

use ashare_core::DateRange;
use async_trait::async_trait;

use crate::models::{HolderKind, TableData};
use crate::Result;

pub use tushare::TushareClient;

/// 종목 참조 데이터 Provider trait.
#[async_trait]
pub trait StockDataSource: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 현재 상장 종목 전체의 기본 정보 조회.
    async fn basic_universe(&self) -> Result<TableData>;

    /// 기간 내 10대 주주 조회.
    async fn holders(&self, ts_code: &str, range: &DateRange) -> Result<TableData>;

    /// 기간 내 10대 유통주주 조회.
    async fn float_holders(&self, ts_code: &str, range: &DateRange) -> Result<TableData>;

    /// 종류에 따라 주주 데이터를 조회합니다.
    async fn holders_of(
        &self,
        kind: HolderKind,
        ts_code: &str,
        range: &DateRange,
    ) -> Result<TableData> {
        match kind {
            HolderKind::Holder => self.holders(ts_code, range).await,
            HolderKind::FloatHolder => self.float_holders(ts_code, range).await,
        }
    }
}
