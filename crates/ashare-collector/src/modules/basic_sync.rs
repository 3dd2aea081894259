//! 종목 기본 정보 갱신 모듈.

use std::time::Instant;

use ashare_data::{StockBasic, StockDataSource, TableStore, WriteMode};

use crate::{CollectionStats, Result};

/// 상장 종목 전체를 조회하여 기본 정보 테이블을 통째로 교체합니다.
///
/// 조회, 변환, 저장 중 어느 단계의 실패도 그대로 반환됩니다.
pub async fn refresh_basic(
    source: &dyn StockDataSource,
    store: &dyn TableStore,
    table: &str,
) -> Result<CollectionStats> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();

    tracing::info!(provider = source.name(), table, "종목 기본 정보 수집 시작");

    let universe = source.basic_universe().await?;
    // ts_code가 없는 행이 있으면 여기서 실패
    let basics: Vec<StockBasic> = universe.decode()?;

    let written = store
        .write_table(table, &universe, WriteMode::Replace)
        .await?;

    stats.total = basics.len();
    stats.success = basics.len();
    stats.total_records = written;
    stats.elapsed = start.elapsed();

    tracing::info!(count = basics.len(), "종목 기본 정보 수집 완료");
    Ok(stats)
}
