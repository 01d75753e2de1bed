//! tracing subscriber 初始化
//!
//! 输出目标由 `[logging].file` 决定：未配置时写 stdout（带颜色），
//! 配置后写文件，`enable_rotation` 打开时按天滚动并保留 `max_backups` 份。

use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig, StaticConfig};

type BoxedWriter = Box<dyn Write + Send + Sync>;

/// 进程内只能调用一次；返回的 guard 需要活到进程结束，否则缓冲中的日志会丢失
pub fn init_logging(config: &StaticConfig) -> WorkerGuard {
    let logging = &config.logging;
    let to_file = log_file(logging).is_some();

    let (writer, guard) = tracing_appender::non_blocking(open_writer(logging));
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|e| {
        eprintln!("[logging] bad level {:?} ({}), using info", logging.level, e);
        EnvFilter::new("info")
    });

    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(!to_file);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }

    guard
}

fn log_file(logging: &LoggingConfig) -> Option<&str> {
    logging.file.as_deref().map(str::trim).filter(|f| !f.is_empty())
}

/// 打不开目标文件时退回 stdout，不让日志配置错误阻止服务启动
fn open_writer(logging: &LoggingConfig) -> BoxedWriter {
    let Some(file) = log_file(logging) else {
        return Box::new(std::io::stdout());
    };

    let opened: std::io::Result<BoxedWriter> = if logging.enable_rotation {
        rolling_appender(file, logging.max_backups)
    } else {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .map(|f| Box::new(f) as BoxedWriter)
    };

    opened.unwrap_or_else(|e| {
        eprintln!("[logging] cannot write to {} ({}), using stdout", file, e);
        Box::new(std::io::stdout())
    })
}

fn rolling_appender(file: &str, max_backups: u32) -> std::io::Result<BoxedWriter> {
    let path = Path::new(file);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("venuetrack");

    Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(stem)
        .filename_suffix("log")
        .max_log_files(max_backups.max(1) as usize)
        .build(dir)
        .map(|appender| Box::new(appender) as BoxedWriter)
        .map_err(std::io::Error::other)
}
