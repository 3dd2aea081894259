//! 환경변수 기반 설정 모듈.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use ashare_core::DateRange;
use ashare_data::{tables, HolderKind};
use chrono::NaiveDate;

use crate::Result;

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Tushare API 설정
    pub tushare: TushareConfig,
    /// DB 파일 디렉터리
    pub data_dir: PathBuf,
    /// 테이블 이름
    pub tables: TableNames,
    /// 주주 데이터 수집 기간
    pub window: DateRange,
}

/// Tushare API 설정
#[derive(Clone)]
pub struct TushareConfig {
    /// API 토큰
    pub token: String,
    /// 엔드포인트
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

/// 저장 테이블 이름
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    /// 종목 기본 정보 (수집 대상 종목 목록)
    pub stock_basic: String,
    /// 10대 주주
    pub top10_holder: String,
    /// 10대 유통주주
    pub top10_floatholder: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            stock_basic: tables::STOCK_BASIC.to_string(),
            top10_holder: HolderKind::Holder.table_name().to_string(),
            top10_floatholder: HolderKind::FloatHolder.table_name().to_string(),
        }
    }
}

impl TableNames {
    /// 주주 데이터 종류별 저장 테이블.
    pub fn target(&self, kind: HolderKind) -> &str {
        match kind {
            HolderKind::Holder => &self.top10_holder,
            HolderKind::FloatHolder => &self.top10_floatholder,
        }
    }
}

impl fmt::Debug for TushareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TushareConfig")
            .field("token", &"***")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl TushareConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CollectorConfig {
    /// 토큰만 지정하고 나머지는 기본값으로 설정 생성.
    ///
    /// 기본 수집 기간은 고정 구간(`20160101`..`20181001`)입니다.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            tushare: TushareConfig {
                token: token.into(),
                base_url: ashare_data::provider::tushare::DEFAULT_BASE_URL.to_string(),
                timeout_secs: ashare_data::provider::tushare::DEFAULT_TIMEOUT.as_secs(),
            },
            data_dir: PathBuf::from("."),
            tables: TableNames::default(),
            window: DateRange::fixed_window(),
        }
    }

    /// 환경변수에서 설정 로드
    ///
    /// - `TUSHARE_TOKEN` (필수)
    /// - `TUSHARE_API_URL`, `TUSHARE_TIMEOUT_SECS`, `COLLECTOR_DATA_DIR`
    ///
    /// `.env` 파일은 `main`에서 미리 로드합니다.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("TUSHARE_TOKEN").map_err(|_| {
            crate::error::CollectorError::Config(
                "TUSHARE_TOKEN 환경변수가 설정되지 않았습니다".to_string(),
            )
        })?;

        let defaults = Self::new(token);

        Ok(Self {
            tushare: TushareConfig {
                base_url: std::env::var("TUSHARE_API_URL")
                    .unwrap_or(defaults.tushare.base_url.clone()),
                timeout_secs: env_var_parse("TUSHARE_TIMEOUT_SECS", defaults.tushare.timeout_secs),
                ..defaults.tushare
            },
            data_dir: std::env::var("COLLECTOR_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            ..defaults
        })
    }

    /// 수집 기간 지정
    pub fn with_window(mut self, window: DateRange) -> Self {
        self.window = window;
        self
    }

    /// 실행 날짜별 DB 파일 경로 (`stock_YYYYMMDD.sqlite3`).
    pub fn database_path(&self, date: NaiveDate) -> PathBuf {
        self.data_dir
            .join(format!("stock_{}.sqlite3", date.format("%Y%m%d")))
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
