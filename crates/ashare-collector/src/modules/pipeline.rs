//! 전체 수집 워크플로우.
//!
//! 기본 정보 갱신 → 10대 주주 → 10대 유통주주 순으로 한 번씩 실행합니다.
//! 앞 단계가 실패하면 뒤 단계는 실행되지 않습니다.

use ashare_data::{HolderKind, StockDataSource, TableStore};

use super::{collect_missing, refresh_basic};
use crate::{CollectionStats, CollectorConfig, Result};

/// 단계별 수집 통계
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub basic: CollectionStats,
    pub holder: CollectionStats,
    pub float_holder: CollectionStats,
}

impl PipelineReport {
    /// 단계별 요약 로그 출력
    pub fn log_summary(&self) {
        self.basic.log_summary("종목 기본 정보");
        self.holder.log_summary(HolderKind::Holder.label());
        self.float_holder.log_summary(HolderKind::FloatHolder.label());
    }
}

/// 전체 워크플로우 실행
pub async fn run_pipeline(
    source: &dyn StockDataSource,
    store: &dyn TableStore,
    config: &CollectorConfig,
) -> Result<PipelineReport> {
    let tables = &config.tables;

    tracing::info!("Step 1/3: 종목 기본 정보 갱신");
    let basic = refresh_basic(source, store, &tables.stock_basic).await?;

    tracing::info!("Step 2/3: 10대 주주 수집");
    let holder = collect_missing(
        source,
        store,
        HolderKind::Holder,
        &tables.stock_basic,
        tables.target(HolderKind::Holder),
        &config.window,
    )
    .await?;

    tracing::info!("Step 3/3: 10대 유통주주 수집");
    let float_holder = collect_missing(
        source,
        store,
        HolderKind::FloatHolder,
        &tables.stock_basic,
        tables.target(HolderKind::FloatHolder),
        &config.window,
    )
    .await?;

    Ok(PipelineReport {
        basic,
        holder,
        float_holder,
    })
}
