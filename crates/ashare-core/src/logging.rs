//! tracing을 사용한 로깅 인프라.
//!
//! 수집기는 두 개의 출력으로 로그를 남깁니다:
//! - **콘솔**: 기본 `info` 레벨, `RUST_LOG`로 재정의 가능
//! - **파일**: 기본 `debug` 레벨, 실행마다 새로 작성 (ANSI 색상 없음)

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// 콘솔 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식
    Pretty,
    /// 간결한 한 줄 형식
    #[default]
    Compact,
    /// 로그 집계용 JSON 형식
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 콘솔 레벨 필터 (예: "info", "ashare_collector=debug")
    pub console_level: String,
    /// 파일 레벨 필터
    pub file_level: String,
    /// 로그 파일 경로 (None이면 파일 출력 없음)
    pub file_path: Option<PathBuf>,
    /// 콘솔 출력 형식
    pub format: LogFormat,
    /// 파일 로그에 소스 파일명과 줄 번호 포함 여부
    pub with_file: bool,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: "info".to_string(),
            file_level: "debug".to_string(),
            file_path: Some(PathBuf::from("app.log")),
            format: LogFormat::Compact,
            with_file: true,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// 로그 파일 경로를 설정합니다.
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// 파일 출력을 끕니다.
    pub fn without_file(mut self) -> Self {
        self.file_path = None;
        self
    }

    /// 콘솔 출력 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 환경 변수에서 설정을 생성합니다.
    ///
    /// - `LOG_FORMAT`: pretty | compact | json
    /// - `LOG_FILE`: 로그 파일 경로 (기본 `app.log`)
    /// - `LOG_FILE_LEVEL`: 파일 레벨 필터 (기본 `debug`)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.format);
        let file_path = std::env::var("LOG_FILE")
            .map(PathBuf::from)
            .ok()
            .or(defaults.file_path);
        let file_level = std::env::var("LOG_FILE_LEVEL").unwrap_or(defaults.file_level);

        Self {
            file_level,
            file_path,
            format,
            ..defaults
        }
    }
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// 로그 파일은 잘린(truncate) 상태로 다시 생성됩니다.
/// 구독자는 프로세스가 끝날 때까지 유지됩니다.
pub fn init_logging(config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.console_level))?;

    let console_layer: BoxedLayer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(config.with_target)
            .with_filter(console_filter)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(config.with_target)
            .with_filter(console_filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_filter(console_filter)
            .boxed(),
    };

    let mut layers = vec![console_layer];

    if let Some(path) = &config.file_path {
        let file = File::create(path)?;
        let file_layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_file(config.with_file)
            .with_line_number(config.with_file)
            .with_target(config.with_target)
            .with_filter(EnvFilter::try_new(&config.file_level)?)
            .boxed();
        layers.push(file_layer);
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    tracing::debug!(
        format = ?config.format,
        console_level = %config.console_level,
        file_level = %config.file_level,
        file = ?config.file_path,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("COMPACT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("invalid".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.console_level, "info");
        assert_eq!(config.file_level, "debug");
        assert_eq!(config.file_path, Some(PathBuf::from("app.log")));

        let config = config.without_file().with_format(LogFormat::Json);
        assert!(config.file_path.is_none());
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_init_logging_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collector.log");

        let config = LogConfig::default().with_file_path(&path);
        init_logging(&config).unwrap();
        tracing::debug!("file sink check");

        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("file sink check"));

        // 전역 구독자는 한 번만 설치할 수 있음
        assert!(init_logging(&LogConfig::default().without_file()).is_err());
    }
}
