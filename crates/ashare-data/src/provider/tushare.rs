//! Tushare Pro API 클라이언트.
//!
//! 모든 요청은 하나의 엔드포인트로 보내는 JSON POST입니다:
//!
//! ```json
//! {"api_name": "stock_basic", "token": "...", "params": {...}, "fields": "..."}
//! ```
//!
//! 응답은 `code`가 0일 때만 성공이며, `data`는 `fields` + `items` 테이블입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use ashare_data::TushareClient;
//!
//! let client = TushareClient::new(std::env::var("TUSHARE_TOKEN")?)?;
//! let universe = client.basic_universe().await?;
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use ashare_core::DateRange;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StockDataSource;
use crate::error::{DataError, Result};
use crate::models::{HolderKind, TableData};

/// Tushare Pro 기본 엔드포인트
pub const DEFAULT_BASE_URL: &str = "http://api.tushare.pro";

/// 기본 요청 타임아웃
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `stock_basic` 조회 컬럼
pub const STOCK_BASIC_FIELDS: &str = "ts_code,symbol,name,area,industry,list_date,market,is_hs";

/// Tushare Pro API 클라이언트.
#[derive(Clone)]
pub struct TushareClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

/// API 요청 본문.
#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    api_name: &'a str,
    token: &'a str,
    params: &'a BTreeMap<&'a str, &'a str>,
    fields: &'a str,
}

/// API 응답 래퍼.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    request_id: Option<String>,
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<ApiData>,
}

#[derive(Debug, Deserialize)]
struct ApiData {
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    items: Vec<Vec<Value>>,
    #[serde(default)]
    has_more: bool,
}

impl TushareClient {
    /// 새로운 클라이언트 생성 (기본 타임아웃 30초).
    ///
    /// # Arguments
    /// * `token` - Tushare Pro 토큰
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(token, DEFAULT_TIMEOUT)
    }

    /// 요청 타임아웃을 지정하여 클라이언트 생성.
    pub fn with_timeout(token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// 엔드포인트 변경 (프록시, 테스트 서버 등).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// API 요청 실행.
    ///
    /// # Arguments
    /// * `api_name` - Tushare API 이름 (예: `stock_basic`)
    /// * `params` - 쿼리 파라미터
    /// * `fields` - 조회 컬럼 (쉼표 구분, 빈 문자열이면 전체)
    pub async fn query(
        &self,
        api_name: &str,
        params: &BTreeMap<&str, &str>,
        fields: &str,
    ) -> Result<TableData> {
        let request = ApiRequest {
            api_name,
            token: &self.token,
            params,
            fields,
        };

        tracing::debug!(api_name, params = ?params, "Tushare API 요청");

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::Api {
                code: i64::from(status.as_u16()),
                msg: format!("HTTP {} - {}", status, body),
            });
        }

        let body: ApiResponse = response.json().await?;

        if body.code != 0 {
            return Err(DataError::Api {
                code: body.code,
                msg: body.msg.unwrap_or_default(),
            });
        }

        let data = match body.data {
            Some(data) => data,
            None => return Ok(TableData::default()),
        };

        if data.has_more {
            tracing::warn!(
                api_name,
                request_id = ?body.request_id,
                rows = data.items.len(),
                "응답이 잘렸습니다 (has_more)"
            );
        }

        let table = TableData::new(data.fields, data.items);
        table.validate()?;
        Ok(table)
    }

    async fn query_holders(
        &self,
        kind: HolderKind,
        ts_code: &str,
        range: &DateRange,
    ) -> Result<TableData> {
        let params: BTreeMap<&str, &str> = [
            ("ts_code", ts_code),
            ("start_date", range.start()),
            ("end_date", range.end()),
        ]
        .into_iter()
        .collect();

        self.query(kind.api_name(), &params, "").await
    }
}

#[async_trait]
impl StockDataSource for TushareClient {
    fn name(&self) -> &str {
        "tushare"
    }

    async fn basic_universe(&self) -> Result<TableData> {
        let params: BTreeMap<&str, &str> = [("exchange", ""), ("list_status", "L")]
            .into_iter()
            .collect();

        let table = self.query("stock_basic", &params, STOCK_BASIC_FIELDS).await?;
        tracing::info!(count = table.len(), "상장 종목 조회 완료");
        Ok(table)
    }

    async fn holders(&self, ts_code: &str, range: &DateRange) -> Result<TableData> {
        self.query_holders(HolderKind::Holder, ts_code, range).await
    }

    async fn float_holders(&self, ts_code: &str, range: &DateRange) -> Result<TableData> {
        self.query_holders(HolderKind::FloatHolder, ts_code, range)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope() {
        let params: BTreeMap<&str, &str> = [("ts_code", "600000.SH")].into_iter().collect();
        let request = ApiRequest {
            api_name: "top10_holders",
            token: "t",
            params: &params,
            fields: "",
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["api_name"], "top10_holders");
        assert_eq!(value["token"], "t");
        assert_eq!(value["params"]["ts_code"], "600000.SH");
        assert_eq!(value["fields"], "");
    }

    #[test]
    fn test_response_with_null_msg() {
        let body: ApiResponse = serde_json::from_str(
            r#"{"request_id":"r1","code":0,"msg":null,"data":{"fields":["ts_code"],"items":[["600000.SH"]],"has_more":false}}"#,
        )
        .unwrap();
        assert_eq!(body.code, 0);
        assert!(body.msg.is_none());
        assert_eq!(body.data.unwrap().items.len(), 1);
    }
}
