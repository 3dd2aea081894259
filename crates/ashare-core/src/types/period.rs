//! 분기 및 수집 기간 정의.
//!
//! Tushare API는 날짜를 `YYYYMMDD` 문자열로 주고받으므로
//! 기간도 검증된 문자열 쌍으로 보관합니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// 고정 수집 구간 시작일 (과거 데이터 백필용)
pub const FIXED_WINDOW_START: &str = "20160101";
/// 고정 수집 구간 종료일
pub const FIXED_WINDOW_END: &str = "20181001";

/// 보고 분기.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// 1분기
    Q1,
    /// 2분기
    Q2,
    /// 3분기
    Q3,
    /// 4분기
    Q4,
}

impl Quarter {
    /// 분기에 해당하는 (시작 MMDD, 종료 MMDD) 쌍을 반환합니다.
    ///
    /// Q1의 종료일은 0331이 아니라 0330입니다.
    pub fn day_range(&self) -> (&'static str, &'static str) {
        match self {
            Quarter::Q1 => ("0101", "0330"),
            Quarter::Q2 => ("0401", "0630"),
            Quarter::Q3 => ("0701", "0930"),
            Quarter::Q4 => ("1001", "1231"),
        }
    }

    /// 분기 라벨 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quarter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            _ => Err(CoreError::InvalidQuarter(s.to_string())),
        }
    }
}

/// 수집 기간 (양 끝 포함, `YYYYMMDD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: String,
    end: String,
}

impl DateRange {
    /// 명시적인 시작/종료일로 기간을 생성합니다.
    ///
    /// 두 날짜 모두 실제 달력 날짜여야 하며 시작일 ≤ 종료일이어야 합니다.
    pub fn new(start: &str, end: &str) -> Result<Self> {
        let start_date = parse_yyyymmdd(start)?;
        let end_date = parse_yyyymmdd(end)?;

        if start_date > end_date {
            return Err(CoreError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    /// 연도와 분기로 기간을 생성합니다.
    ///
    /// # Example
    /// ```
    /// use ashare_core::{DateRange, Quarter};
    ///
    /// let range = DateRange::for_quarter("2020", Quarter::Q1).unwrap();
    /// assert_eq!(range.start(), "20200101");
    /// assert_eq!(range.end(), "20200330");
    /// ```
    pub fn for_quarter(year: &str, quarter: Quarter) -> Result<Self> {
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidYear(year.to_string()));
        }

        let (start_day, end_day) = quarter.day_range();
        Ok(Self {
            start: format!("{}{}", year, start_day),
            end: format!("{}{}", year, end_day),
        })
    }

    /// 연도와 분기 라벨 문자열로 기간을 생성합니다.
    pub fn parse_quarter(year: &str, quarter: &str) -> Result<Self> {
        let quarter: Quarter = quarter.parse()?;
        Self::for_quarter(year, quarter)
    }

    /// 과거 데이터 백필용 고정 구간 (`20160101`..`20181001`).
    pub fn fixed_window() -> Self {
        Self {
            start: FIXED_WINDOW_START.to_string(),
            end: FIXED_WINDOW_END.to_string(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.start, self.end)
    }
}

fn parse_yyyymmdd(s: &str) -> Result<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").map_err(|_| CoreError::InvalidDate(s.to_string()))
}
