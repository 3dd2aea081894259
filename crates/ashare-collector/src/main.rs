//! A-share 참조 데이터 수집기 CLI.
//!
//! ```text
//! ashare-collector 2020 Q1
//! ashare-collector --fixed-window
//! ashare-collector --start-date 20190101 --end-date 20190630
//! ```

use ashare_collector::{modules, CollectorConfig, WindowArgs};
use ashare_core::{init_logging, LogConfig};
use ashare_data::{SqliteStore, TushareClient};
use clap::error::ErrorKind;
use clap::Parser;

/// 인자 오류 시 종료 코드
const EXIT_BAD_ARGS: i32 = -1;

#[derive(Parser)]
#[command(name = "ashare-collector")]
#[command(about = "A-share reference data collector (Tushare Pro → SQLite)", long_about = None)]
#[command(version)]
struct Cli {
    /// 수집 연도 (4자리, 예: 2020)
    year: Option<String>,

    /// 수집 분기 (Q1, Q2, Q3, Q4)
    quarter: Option<String>,

    /// 고정 구간(20160101 ~ 20181001) 수집
    #[arg(long, conflicts_with_all = ["year", "quarter", "start_date", "end_date"])]
    fixed_window: bool,

    /// 수집 시작일 (YYYYMMDD)
    #[arg(long, conflicts_with_all = ["year", "quarter"])]
    start_date: Option<String>,

    /// 수집 종료일 (YYYYMMDD)
    #[arg(long, conflicts_with_all = ["year", "quarter"])]
    end_date: Option<String>,
}

impl Cli {
    fn window_args(&self) -> WindowArgs {
        WindowArgs {
            year: self.year.clone(),
            quarter: self.quarter.clone(),
            fixed_window: self.fixed_window,
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // 로깅 초기화 (파일: debug, 콘솔: info)
    init_logging(&LogConfig::from_env())?;

    // 인자 오류는 로그에 남기고 -1로 종료
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            tracing::error!(kind = ?e.kind(), "para error");
            std::process::exit(EXIT_BAD_ARGS);
        }
    };

    let window = match cli.window_args().resolve() {
        Ok(window) => window,
        Err(e) => {
            tracing::error!(error = %e, "wrong period para");
            std::process::exit(EXIT_BAD_ARGS);
        }
    };

    // 설정 로드
    let config = CollectorConfig::from_env()?.with_window(window);
    tracing::debug!(config = ?config, "설정 로드 완료");

    // 날짜별 DB 파일
    let db_path = config.database_path(chrono::Local::now().date_naive());
    let store = SqliteStore::open(&db_path).await?;
    tracing::info!(db = %db_path.display(), "데이터베이스 연결 성공");

    let client = TushareClient::with_timeout(&config.tushare.token, config.tushare.timeout())?
        .with_base_url(&config.tushare.base_url);

    tracing::info!(range = %config.window, "=== 종목 정보 수집 시작 ===");

    let result = modules::run_pipeline(&client, &store, &config).await;
    store.close().await;
    let report = result?;

    report.log_summary();
    tracing::info!("=== 종목 정보 수집 완료 ===");

    Ok(())
}
