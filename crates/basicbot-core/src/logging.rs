//! tracing을 사용한 로깅 인프라.
//!
//! 콘솔 출력 형식:
//! - **pretty**: 개발용 사람이 읽기 쉬운 형식
//! - **json**: 로그 집계용 JSON 형식
//! - **compact**: 로그 크기를 줄이기 위한 간결한 형식
//!
//! 파일 경로를 지정하면 콘솔과 별도 레벨(기본 debug)로 파일에도 기록합니다.

use crate::config::LoggingConfig;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식 (개발용)
    #[default]
    Pretty,
    /// 로그 집계용 JSON 형식 (운영용)
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 콘솔 로그 레벨 필터 (예: "info", "basicbot_exchange=debug")
    pub level: String,
    /// 콘솔 출력 형식
    pub format: LogFormat,
    /// span 이벤트 포함 여부 (진입/종료)
    pub with_span_events: bool,
    /// 파일명과 줄 번호 포함 여부
    pub with_file: bool,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
    /// 로그 파일 경로
    pub file: Option<PathBuf>,
    /// 로그 파일 레벨 필터
    pub file_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            with_span_events: false,
            with_file: false,
            with_target: true,
            file: None,
            file_level: "debug".to_string(),
        }
    }
}

impl LogConfig {
    /// 새 로그 설정을 생성합니다.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// span 이벤트를 활성화합니다.
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.with_span_events = enabled;
        self
    }

    /// 로그 파일을 설정합니다.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// 설정 파일의 로깅 섹션에서 생성합니다. 알 수 없는 형식은 pretty로 대체합니다.
    pub fn from_settings(settings: &LoggingConfig) -> Self {
        Self {
            level: settings.level.clone(),
            format: settings.format.parse().unwrap_or_default(),
            file: settings.file.as_ref().map(PathBuf::from),
            ..Default::default()
        }
    }
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// 파일 로깅을 켠 경우 반환된 가드를 프로세스 종료 시까지 유지해야 버퍼가 모두 기록됩니다.
///
/// # 예제
///
/// ```no_run
/// use basicbot_core::logging::{init_logging, LogConfig, LogFormat};
///
/// let config = LogConfig::new("debug")
///     .with_format(LogFormat::Compact)
///     .with_log_file("basicbot.log");
/// let _guard = init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let span_events = if config.with_span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let console_layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_file(config.with_file)
            .with_line_number(config.with_file)
            .with_target(config.with_target)
            .with_span_events(span_events)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_file(config.with_file)
            .with_line_number(config.with_file)
            .with_target(config.with_target)
            .with_span_events(span_events)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_file(config.with_file)
            .with_line_number(config.with_file)
            .with_target(config.with_target)
            .with_span_events(span_events)
            .boxed(),
    };

    let (file_layer, guard) = match config.file.as_deref() {
        Some(path) => {
            let (directory, file_name) = split_log_path(path);
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_filter(EnvFilter::try_new(&config.file_level)?);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer.with_filter(env_filter))
        .with(file_layer)
        .try_init()?;

    tracing::debug!(
        format = ?config.format,
        level = %config.level,
        file = ?config.file,
        "Logging initialized"
    );

    Ok(guard)
}

/// 로그 파일 경로를 (디렉토리, 파일명)으로 분리합니다.
fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("basicbot.log"));
    (directory, file_name)
}

/// 주문 컨텍스트 필드가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! order_span {
    ($name:expr, $symbol:expr) => {
        tracing::info_span!($name, symbol = %$symbol)
    };
    ($name:expr, $symbol:expr, $order_type:expr) => {
        tracing::info_span!($name, symbol = %$symbol, order_type = %$order_type)
    };
    ($name:expr, $symbol:expr, $order_type:expr, $side:expr) => {
        tracing::info_span!(
            $name,
            symbol = %$symbol,
            order_type = %$order_type,
            side = %$side
        )
    };
}
