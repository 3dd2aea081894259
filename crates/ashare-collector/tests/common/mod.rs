//! 테스트용 Provider/저장소 구현

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use ashare_core::DateRange;
use ashare_data::{
    DataError, HolderKind, StockDataSource, TableData, TableRead, TableStore, WriteMode,
};
use async_trait::async_trait;
use serde_json::json;

/// 종목 코드 목록으로 `stock_basic` 형태의 테이블 생성
pub fn universe(codes: &[&str]) -> TableData {
    TableData::new(
        vec!["ts_code".to_string(), "name".to_string(), "market".to_string()],
        codes
            .iter()
            .map(|c| vec![json!(c), json!(format!("종목-{}", c)), json!("主板")])
            .collect(),
    )
}

/// 종목당 두 행짜리 주주 테이블 생성
pub fn holder_rows(ts_code: &str, range: &DateRange) -> TableData {
    TableData::new(
        vec![
            "ts_code".to_string(),
            "ann_date".to_string(),
            "end_date".to_string(),
            "holder_name".to_string(),
            "hold_amount".to_string(),
            "hold_ratio".to_string(),
        ],
        vec![
            vec![
                json!(ts_code),
                json!(range.end()),
                json!(range.end()),
                json!("holder-1"),
                json!(1000.0),
                json!(10.5),
            ],
            vec![
                json!(ts_code),
                json!(range.end()),
                json!(range.end()),
                json!("holder-2"),
                json!(500.0),
                json!(5.25),
            ],
        ],
    )
}

/// 호출 기록을 남기는 가짜 Provider
#[derive(Default)]
pub struct FakeSource {
    pub universe: Mutex<TableData>,
    /// 이 종목 조회 시 실패
    pub fail_on: Mutex<Option<String>>,
    /// 기본 정보 조회 실패
    pub fail_basic: bool,
    /// 빈 결과를 돌려줄 종목
    pub empty_codes: HashSet<String>,
    /// (종류, 종목) 호출 기록
    pub calls: Mutex<Vec<(HolderKind, String)>>,
    pub basic_calls: Mutex<usize>,
}

impl FakeSource {
    pub fn with_universe(codes: &[&str]) -> Self {
        Self {
            universe: Mutex::new(universe(codes)),
            ..Default::default()
        }
    }

    pub fn set_universe(&self, codes: &[&str]) {
        *self.universe.lock().unwrap() = universe(codes);
    }

    pub fn fail_on(&self, ts_code: Option<&str>) {
        *self.fail_on.lock().unwrap() = ts_code.map(str::to_string);
    }

    /// 특정 종류의 조회 종목 목록 (호출 순서대로)
    pub fn fetched(&self, kind: HolderKind) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, c)| c.clone())
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn fetch(&self, kind: HolderKind, ts_code: &str, range: &DateRange) -> ashare_data::Result<TableData> {
        self.calls.lock().unwrap().push((kind, ts_code.to_string()));

        if self.fail_on.lock().unwrap().as_deref() == Some(ts_code) {
            return Err(DataError::Api {
                code: 40203,
                msg: format!("rate limited on {}", ts_code),
            });
        }

        if self.empty_codes.contains(ts_code) {
            return Ok(TableData::new(holder_rows(ts_code, range).fields, Vec::new()));
        }

        Ok(holder_rows(ts_code, range))
    }
}

#[async_trait]
impl StockDataSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn basic_universe(&self) -> ashare_data::Result<TableData> {
        *self.basic_calls.lock().unwrap() += 1;
        if self.fail_basic {
            return Err(DataError::Api {
                code: -2001,
                msg: "token invalid".to_string(),
            });
        }
        Ok(self.universe.lock().unwrap().clone())
    }

    async fn holders(&self, ts_code: &str, range: &DateRange) -> ashare_data::Result<TableData> {
        self.fetch(HolderKind::Holder, ts_code, range)
    }

    async fn float_holders(
        &self,
        ts_code: &str,
        range: &DateRange,
    ) -> ashare_data::Result<TableData> {
        self.fetch(HolderKind::FloatHolder, ts_code, range)
    }
}

/// 메모리 저장소 (조회 실패 주입 가능)
#[derive(Default)]
pub struct MemoryStore {
    pub tables: Mutex<HashMap<String, TableData>>,
    /// 조회 시 에러를 반환할 테이블
    pub fail_reads: HashSet<String>,
    /// (테이블, 방식) 쓰기 기록
    pub writes: Mutex<Vec<(String, WriteMode)>>,
}

impl MemoryStore {
    pub fn insert(&self, name: &str, data: TableData) {
        self.tables.lock().unwrap().insert(name.to_string(), data);
    }

    pub fn table(&self, name: &str) -> Option<TableData> {
        self.tables.lock().unwrap().get(name).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn read_table(&self, name: &str) -> ashare_data::Result<TableRead> {
        if self.fail_reads.contains(name) {
            return Err(DataError::InvalidData(format!("cannot read {}", name)));
        }
        Ok(match self.table(name) {
            Some(data) => TableRead::Found(data),
            None => TableRead::NotFound,
        })
    }

    async fn write_table(
        &self,
        name: &str,
        data: &TableData,
        mode: WriteMode,
    ) -> ashare_data::Result<u64> {
        self.writes.lock().unwrap().push((name.to_string(), mode));

        let mut tables = self.tables.lock().unwrap();
        match mode {
            WriteMode::Replace => {
                tables.insert(name.to_string(), data.clone());
            }
            WriteMode::Append => {
                if data.fields.is_empty() {
                    return Ok(0);
                }
                tables
                    .entry(name.to_string())
                    .or_insert_with(|| TableData::new(data.fields.clone(), Vec::new()))
                    .items
                    .extend(data.items.iter().cloned());
            }
        }
        Ok(data.len() as u64)
    }
}
