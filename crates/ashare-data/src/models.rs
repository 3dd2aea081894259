//! 수집 데이터 모델.
//!
//! Tushare 응답의 `data` 블록은 `fields` + `items` 형태의 열 지향 테이블입니다.
//! 저장소도 같은 형태로 읽고 쓰며, 필요할 때만 타입이 있는 레코드로 변환합니다.

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DataError, Result};

/// 테이블 이름.
pub mod tables {
    /// 종목 기본 정보
    pub const STOCK_BASIC: &str = "stock_basic";
    /// 10대 주주
    pub const TOP10_HOLDER: &str = "top10_holder";
    /// 10대 유통주주
    pub const TOP10_FLOATHOLDER: &str = "top10_floatholder";
}

/// 종목 코드 컬럼 이름
pub const TS_CODE: &str = "ts_code";

/// 열 지향 테이블 데이터 (API 응답 또는 테이블 조회 결과).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// 컬럼 이름
    pub fields: Vec<String>,
    /// 행 (각 행은 `fields`와 같은 순서의 값)
    pub items: Vec<Vec<Value>>,
}

impl TableData {
    pub fn new(fields: Vec<String>, items: Vec<Vec<Value>>) -> Self {
        Self { fields, items }
    }

    /// 행 수.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 컬럼 위치 조회.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// 한 컬럼의 값 목록. 컬럼이 없으면 `None`.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(
            self.items
                .iter()
                .map(|row| row.get(index).unwrap_or(&Value::Null))
                .collect(),
        )
    }

    /// 테이블에 존재하는 종목 코드 집합 (정렬됨, 중복 제거).
    ///
    /// `ts_code` 컬럼이 없거나 값이 문자열이 아니면 건너뜁니다.
    pub fn ts_codes(&self) -> BTreeSet<String> {
        self.column(TS_CODE)
            .map(|values| {
                values
                    .into_iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 모든 행의 길이가 컬럼 수와 같은지 확인합니다.
    pub fn validate(&self) -> Result<()> {
        match self
            .items
            .iter()
            .position(|row| row.len() != self.fields.len())
        {
            Some(row) => Err(DataError::InvalidData(format!(
                "row {} has {} values, expected {}",
                row,
                self.items[row].len(),
                self.fields.len()
            ))),
            None => Ok(()),
        }
    }

    /// 각 행을 타입이 있는 레코드로 변환합니다.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.validate()?;
        self.items
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .fields
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect();
                serde_json::from_value(Value::Object(object)).map_err(DataError::from)
            })
            .collect()
    }
}

/// 종목 기본 정보 (`stock_basic`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBasic {
    /// 거래소 접미사가 붙은 종목 코드 (예: 000001.SZ)
    pub ts_code: String,
    /// 6자리 종목 코드
    pub symbol: Option<String>,
    /// 종목명
    pub name: Option<String>,
    /// 지역
    pub area: Option<String>,
    /// 업종
    pub industry: Option<String>,
    /// 상장일 (YYYYMMDD)
    pub list_date: Option<String>,
    /// 시장 구분 (主板, 创业板 등)
    pub market: Option<String>,
    /// 후강통/선강통 대상 여부 (N, H, S)
    pub is_hs: Option<String>,
}

/// 10대 주주 레코드 (`top10_holder`).
///
/// 같은 종목 코드에 대해 보고 기간마다 여러 행이 존재합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderRecord {
    pub ts_code: String,
    /// 공시일
    pub ann_date: Option<String>,
    /// 보고 기간 종료일
    pub end_date: Option<String>,
    /// 주주명
    pub holder_name: Option<String>,
    /// 보유 주식 수
    pub hold_amount: Option<f64>,
    /// 보유 비율 (%)
    pub hold_ratio: Option<f64>,
}

/// 10대 유통주주 레코드 (`top10_floatholder`). 형태는 [`HolderRecord`]와 같습니다.
pub type FloatHolderRecord = HolderRecord;

/// 주주 데이터 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolderKind {
    /// 10대 주주
    Holder,
    /// 10대 유통주주
    FloatHolder,
}

impl HolderKind {
    /// Tushare API 이름.
    pub fn api_name(&self) -> &'static str {
        match self {
            HolderKind::Holder => "top10_holders",
            HolderKind::FloatHolder => "top10_floatholders",
        }
    }

    /// 기본 저장 테이블 이름.
    pub fn table_name(&self) -> &'static str {
        match self {
            HolderKind::Holder => tables::TOP10_HOLDER,
            HolderKind::FloatHolder => tables::TOP10_FLOATHOLDER,
        }
    }

    /// 로그용 표시 이름.
    pub fn label(&self) -> &'static str {
        match self {
            HolderKind::Holder => "top10 holder",
            HolderKind::FloatHolder => "top10 floatholder",
        }
    }
}
