//! SQLite 테이블 저장소.
//!
//! 테이블은 첫 쓰기 시점에 `TableData`의 컬럼으로 생성됩니다.
//! 컬럼 타입은 각 컬럼의 첫 번째 non-null 값으로 결정합니다:
//!
//! | JSON 값 | SQLite 타입 |
//! |---------|-------------|
//! | 문자열 | TEXT |
//! | 정수 | INTEGER |
//! | 실수 | REAL |
//! | bool | INTEGER |
//! | 그 외 | TEXT (JSON 문자열) |
//! | 값 없음 (빈 테이블, 전부 null) | 타입 미지정 |
//!
//! 타입을 지정하지 않은 컬럼은 affinity가 없으므로 이후에 추가되는 값이
//! 저장 클래스 그대로 보존됩니다.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Row, Sqlite, TypeInfo, ValueRef};

use super::{TableRead, TableStore, WriteMode};
use crate::error::{DataError, Result};
use crate::models::TableData;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// SQLite 저장소.
///
/// 단일 작업 흐름에서만 사용하므로 연결은 하나만 유지합니다.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// 파일 DB를 엽니다 (없으면 생성).
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        tracing::debug!(path = %path.as_ref().display(), "SQLite DB 연결");
        Ok(Self { pool })
    }

    /// 메모리 DB (테스트용).
    ///
    /// 연결이 닫히면 데이터가 사라지므로 연결 수명을 제한하지 않습니다.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn table_exists(&self, name: &str) -> Result<bool> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl TableStore for SqliteStore {
    async fn read_table(&self, name: &str) -> Result<TableRead> {
        validate_identifier(name)?;

        if !self.table_exists(name).await? {
            return Ok(TableRead::NotFound);
        }

        let columns: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
                .bind(name)
                .fetch_all(&self.pool)
                .await?;
        let fields: Vec<String> = columns.into_iter().map(|(c,)| c).collect();

        let select = format!(
            "SELECT {} FROM {}",
            fields
                .iter()
                .map(|f| quote_identifier(f))
                .collect::<Vec<_>>()
                .join(", "),
            quote_identifier(name)
        );
        let rows = sqlx::query(&select).fetch_all(&self.pool).await?;

        let items = rows
            .iter()
            .map(|row| (0..fields.len()).map(|i| column_value(row, i)).collect())
            .collect::<Result<Vec<Vec<Value>>>>()?;

        tracing::debug!(table = name, rows = items.len(), "테이블 조회");
        Ok(TableRead::Found(TableData::new(fields, items)))
    }

    async fn write_table(&self, name: &str, data: &TableData, mode: WriteMode) -> Result<u64> {
        validate_identifier(name)?;
        for field in &data.fields {
            validate_identifier(field)?;
        }
        data.validate()?;

        let table = quote_identifier(name);
        let mut tx = self.pool.begin().await?;

        if mode == WriteMode::Replace {
            sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
                .execute(&mut *tx)
                .await?;
        }

        // 컬럼 정보가 없으면 만들 테이블도 없음
        if data.fields.is_empty() {
            tx.commit().await?;
            return Ok(0);
        }

        let column_defs = data
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| match column_type(data, i) {
                Some(ty) => format!("{} {}", quote_identifier(f), ty),
                None => quote_identifier(f),
            })
            .collect::<Vec<_>>()
            .join(", ");
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            table, column_defs
        ))
        .execute(&mut *tx)
        .await?;

        let insert = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            data.fields
                .iter()
                .map(|f| quote_identifier(f))
                .collect::<Vec<_>>()
                .join(", "),
            vec!["?"; data.fields.len()].join(", ")
        );

        let mut written = 0;
        for row in &data.items {
            let query = row
                .iter()
                .fold(sqlx::query(&insert), |query, value| bind_value(query, value));
            written += query.execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;

        tracing::debug!(table = name, mode = ?mode, rows = written, "테이블 쓰기");
        Ok(written)
    }
}

/// 테이블/컬럼 이름 검증 (`[A-Za-z_][A-Za-z0-9_]*`).
fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DataError::InvalidIdentifier(name.to_string()))
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name)
}

/// 첫 번째 non-null 값으로 컬럼 타입 결정. 값이 없으면 `None` (타입 미지정).
fn column_type(data: &TableData, index: usize) -> Option<&'static str> {
    data.items
        .iter()
        .filter_map(|row| row.get(index))
        .find(|v| !v.is_null())
        .map(|v| match v {
            Value::String(_) => "TEXT",
            Value::Number(n) if n.is_i64() || n.is_u64() => "INTEGER",
            Value::Number(_) => "REAL",
            Value::Bool(_) => "INTEGER",
            _ => "TEXT",
        })
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: &'q Value) -> SqliteQuery<'q> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::String(s) => query.bind(s.as_str()),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        other => query.bind(other.to_string()),
    }
}

/// 저장 클래스에 따라 값을 JSON으로 변환합니다.
fn column_value(row: &SqliteRow, index: usize) -> Result<Value> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let type_name = raw.type_info().name().to_string();
    let value = match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(index)?),
        "REAL" | "NUMERIC" => Value::from(row.try_get::<f64, _>(index)?),
        "BLOB" => Value::from(
            String::from_utf8_lossy(&row.try_get::<Vec<u8>, _>(index)?).into_owned(),
        ),
        _ => Value::from(row.try_get::<String, _>(index)?),
    };
    Ok(value)
}
