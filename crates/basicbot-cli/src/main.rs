//! Binance USDT-M 선물 주문 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 테스트넷 시장가 매수
//! basicbot --api-key KEY --api-secret SECRET --symbol BTCUSDT --side BUY --type MARKET --quantity 0.01
//!
//! # 지정가 매도 (자격증명은 BINANCE_API_KEY / BINANCE_API_SECRET에서)
//! basicbot --symbol BTCUSDT --side SELL --type LIMIT --quantity 0.01 --price 65000
//!
//! # 스톱 지정가 + 파일 로그
//! basicbot --symbol BTCUSDT --side SELL --type STOP_LIMIT --quantity 0.01 \
//!     --price 59000 --stop-price 59500 --log-file basicbot.log
//! ```

use basicbot_cli::{place_order, render_summary, ConnectionArgs, OrderArgs};
use basicbot_core::{init_logging, BotConfig, LogConfig, LogFormat};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "basicbot")]
#[command(about = "Basic Binance Futures Testnet Bot (USDT-M)", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    order: OrderArgs,

    /// 설정 파일 경로 (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 콘솔 로그 레벨 (기본: 설정값 또는 info)
    #[arg(long)]
    log_level: Option<String>,

    /// 콘솔 로그 형식 (pretty, json, compact)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// 로그 파일 경로 (DEBUG 레벨로 기록)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn log_config(&self, config: &BotConfig) -> LogConfig {
        let mut log_config = LogConfig::from_settings(&config.logging);
        if let Some(level) = &self.log_level {
            log_config.level = level.clone();
        }
        if let Some(format) = self.log_format {
            log_config.format = format;
        }
        if let Some(file) = &self.log_file {
            log_config = log_config.with_log_file(file);
        }
        log_config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env 파일 로드 (없어도 무시)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match BotConfig::load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // 파일 로깅 시 가드를 main 종료까지 유지
    let _guard = match init_logging(cli.log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match place_order(&cli.connection, &cli.order, &config).await {
        Ok(result) => {
            print!("{}", render_summary(&result));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Order failed: {}", e);
            error!("Order failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
