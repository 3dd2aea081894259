//! 주주 데이터 증분 수집 모듈.
//!
//! 대상 테이블에 한 행이라도 있는 종목은 다시 조회하지 않습니다.
//! 중단된 실행은 다시 실행하면 남은 종목부터 이어서 수집됩니다.

use std::collections::BTreeSet;
use std::time::Instant;

use ashare_core::DateRange;
use ashare_data::{HolderKind, StockDataSource, TableRead, TableStore, WriteMode};

use crate::{CollectionStats, Result};

/// 아직 수집되지 않은 종목의 주주 데이터를 수집합니다.
///
/// 1. `source_table`이 없거나 비어 있으면 아무것도 하지 않음.
///    그 외의 `source_table` 조회 에러는 빈 테이블로 취급하지 않고 그대로 반환
/// 2. `target_table` 조회 실패(없음 포함)는 빈 테이블로 간주
/// 3. 차집합 종목을 코드 순으로 하나씩 조회하여 `target_table`에 추가
///
/// 한 종목이라도 조회/저장에 실패하면 즉시 중단합니다.
/// 이미 저장된 종목은 그대로 남습니다.
pub async fn collect_missing(
    source: &dyn StockDataSource,
    store: &dyn TableStore,
    kind: HolderKind,
    source_table: &str,
    target_table: &str,
    range: &DateRange,
) -> Result<CollectionStats> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();

    tracing::info!(kind = kind.label(), range = %range, "주주 데이터 수집 시작");

    // 1. 수집 대상 종목
    let universe = match store.read_table(source_table).await? {
        TableRead::Found(data) if !data.is_empty() => data.ts_codes(),
        _ => {
            tracing::info!(table = source_table, "수집할 종목이 없습니다");
            stats.elapsed = start.elapsed();
            return Ok(stats);
        }
    };

    // 2. 이미 수집된 종목
    let collected = match store.read_table(target_table).await {
        Ok(TableRead::Found(data)) => data.ts_codes(),
        Ok(TableRead::NotFound) => {
            tracing::debug!(table = target_table, "대상 테이블 없음, 전체 수집");
            BTreeSet::new()
        }
        Err(e) => {
            tracing::debug!(table = target_table, error = %e, "대상 테이블 조회 실패, 빈 테이블로 간주");
            BTreeSet::new()
        }
    };

    // 3. 차집합 (BTreeSet이므로 코드 순)
    let missing: Vec<&String> = universe.difference(&collected).collect();
    stats.skipped = universe.len() - missing.len();

    if missing.is_empty() {
        tracing::info!(kind = kind.label(), "모든 종목이 이미 수집되었습니다");
        stats.elapsed = start.elapsed();
        return Ok(stats);
    }

    stats.total = missing.len();
    tracing::info!(
        count = missing.len(),
        skipped = stats.skipped,
        "{} 수집 대상 종목 확인",
        kind.label()
    );

    // 4. 종목별 수집
    for (idx, ts_code) in missing.iter().enumerate() {
        let data = source
            .holders_of(kind, ts_code, range)
            .await
            .inspect_err(|e| tracing::error!(ts_code = %ts_code, error = %e, "조회 실패, 수집 중단"))?;

        let written = store
            .write_table(target_table, &data, WriteMode::Append)
            .await
            .inspect_err(|e| tracing::error!(ts_code = %ts_code, error = %e, "저장 실패, 수집 중단"))?;

        if written == 0 {
            stats.empty += 1;
            tracing::info!(
                ts_code = %ts_code,
                progress = format!("{}/{}", idx + 1, missing.len()),
                "데이터 없음, 다음 실행에서 재시도"
            );
            continue;
        }

        stats.success += 1;
        stats.total_records += written;
        tracing::info!(
            ts_code = %ts_code,
            progress = format!("{}/{}", idx + 1, missing.len()),
            records = written,
            "{} 수집 성공",
            kind.label()
        );
    }

    stats.elapsed = start.elapsed();
    tracing::info!(kind = kind.label(), "주주 데이터 수집 완료");
    Ok(stats)
}
