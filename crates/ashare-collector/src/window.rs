//! 명령행 인자에서 수집 기간 결정.

use ashare_core::DateRange;

use crate::error::{CollectorError, Result};

/// 수집 기간 관련 명령행 인자.
///
/// 우선순위: 고정 구간 → 명시적 시작/종료일 → 연도 + 분기.
#[derive(Debug, Clone, Default)]
pub struct WindowArgs {
    /// 연도 (4자리)
    pub year: Option<String>,
    /// 분기 라벨 (Q1..Q4)
    pub quarter: Option<String>,
    /// 고정 구간 사용
    pub fixed_window: bool,
    /// 시작일 (YYYYMMDD)
    pub start_date: Option<String>,
    /// 종료일 (YYYYMMDD)
    pub end_date: Option<String>,
}

impl WindowArgs {
    /// 연도와 분기로 인자 생성.
    pub fn quarter(year: impl Into<String>, quarter: impl Into<String>) -> Self {
        Self {
            year: Some(year.into()),
            quarter: Some(quarter.into()),
            ..Default::default()
        }
    }

    /// 수집 기간 결정. 실패는 모두 설정 에러입니다.
    pub fn resolve(&self) -> Result<DateRange> {
        if self.fixed_window {
            return Ok(DateRange::fixed_window());
        }

        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => return Ok(DateRange::new(start, end)?),
            (None, None) => {}
            _ => {
                return Err(CollectorError::Config(
                    "--start-date와 --end-date는 함께 지정해야 합니다".to_string(),
                ))
            }
        }

        match (&self.year, &self.quarter) {
            (Some(year), Some(quarter)) => Ok(DateRange::parse_quarter(year, quarter)?),
            _ => Err(CollectorError::Config(
                "para error: YEAR와 QUARTER 인자가 필요합니다".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ashare_core::CoreError;

    #[test]
    fn test_resolve_quarter() {
        let range = WindowArgs::quarter("2020", "Q4").resolve().unwrap();
        assert_eq!(range.start(), "20201001");
        assert_eq!(range.end(), "20201231");
    }

    #[test]
    fn test_unknown_quarter_is_config_error() {
        let err = WindowArgs::quarter("2020", "Q5").resolve().unwrap_err();
        assert!(err.is_config());
        assert!(matches!(
            err,
            CollectorError::Core(CoreError::InvalidQuarter(ref q)) if q == "Q5"
        ));
    }

    #[test]
    fn test_missing_arguments() {
        let err = WindowArgs::default().resolve().unwrap_err();
        assert!(matches!(err, CollectorError::Config(_)));

        let only_year = WindowArgs {
            year: Some("2020".to_string()),
            ..Default::default()
        };
        assert!(only_year.resolve().unwrap_err().is_config());
    }

    #[test]
    fn test_fixed_window_takes_precedence() {
        let args = WindowArgs {
            fixed_window: true,
            ..WindowArgs::quarter("2020", "Q5")
        };
        assert_eq!(args.resolve().unwrap(), DateRange::fixed_window());
    }

    #[test]
    fn test_explicit_dates() {
        let args = WindowArgs {
            start_date: Some("20190101".to_string()),
            end_date: Some("20190630".to_string()),
            ..Default::default()
        };
        assert_eq!(args.resolve().unwrap().to_string(), "[20190101,20190630]");

        let half = WindowArgs {
            start_date: Some("20190101".to_string()),
            ..Default::default()
        };
        assert!(matches!(half.resolve(), Err(CollectorError::Config(_))));
    }
}
