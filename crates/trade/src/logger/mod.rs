use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use eyre::WrapErr;
use tracing::info;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Tracing guards를 보관하는 구조체
/// 이 구조체가 drop되기 전까지 로깅이 계속 작동합니다
pub struct TracingGuards {
    log_file: PathBuf,
    _file: WorkerGuard,
    _console: WorkerGuard,
}

impl TracingGuards {
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

/// 실행마다 새 로그 파일 이름: `trading_bot_20251129_153012.log`
pub fn log_file_name(now: DateTime<Local>) -> String {
    format!("trading_bot_{}.log", now.format("%Y%m%d_%H%M%S"))
}

/// Tracing 초기화 (프로세스 시작 시 한 번)
/// 파일 로깅과 stderr 로깅을 모두 설정합니다
pub fn init_tracing(log_dir: &Path, verbose: bool) -> eyre::Result<TracingGuards> {
    fs::create_dir_all(log_dir)
        .wrap_err_with(|| format!("Failed to create log directory {}", log_dir.display()))?;

    // 1) 파일 appender
    let log_file = log_dir.join(log_file_name(Local::now()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .wrap_err_with(|| format!("Failed to open log file {}", log_file.display()))?;
    let (file_writer, file_guard) = non_blocking(file);

    // 2) stderr도 non-blocking (stdout은 주문 출력용)
    let (console_writer, console_guard) = non_blocking(std::io::stderr());

    // 3) 파일 레벨: --verbose면 DEBUG, 아니면 INFO. RUST_LOG가 있으면 우선
    let file_level = if verbose { "debug" } else { "info" };
    let file_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(file_level));
    let console_filter = EnvFilter::new("info");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(file_filter),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(console_writer)
                .with_filter(console_filter),
        )
        .try_init()
        .wrap_err("Failed to install tracing subscriber")?;

    info!("{}", "=".repeat(60));
    info!("Trading Bot Started");
    info!("Log file: {}", log_file.display());
    info!("{}", "=".repeat(60));

    Ok(TracingGuards {
        log_file,
        _file: file_guard,
        _console: console_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_file_name() {
        let now = Local.with_ymd_and_hms(2025, 11, 29, 15, 30, 12).unwrap();
        assert_eq!(log_file_name(now), "trading_bot_20251129_153012.log");
    }
}
