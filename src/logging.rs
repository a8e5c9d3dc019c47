//! 로깅 설정 모듈
//!
//! env_logger 기반 로거를 설치합니다. 터미널에서는 진행률 바와 섞이지 않도록
//! indicatif `MultiProgress`를 통해 출력합니다.

use indicatif::MultiProgress;

/// 기본 로그 레벨
pub const DEFAULT_FILTER: &str = "info";

/// 로그 한 줄 포맷: `[LEVEL channel] message`
fn format_line(level: log::Level, target: &str, args: &std::fmt::Arguments<'_>, color: bool) -> String {
    let label = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    let channel = target.to_uppercase();
    if !color {
        return format!("[{label} {channel}] {args}");
    }
    let ansi = match level {
        log::Level::Error => "\x1b[31m",
        log::Level::Warn => "\x1b[33m",
        log::Level::Info => "\x1b[32m",
        log::Level::Debug => "\x1b[36m",
        log::Level::Trace => "\x1b[35m",
    };
    format!("[{ansi}{label}\x1b[0m {channel}] {args}")
}

/// 진행률 바를 잠시 숨기고 출력하는 로거
pub struct ProgressLogger {
    inner: env_logger::Logger,
    multi: MultiProgress,
}

impl ProgressLogger {
    pub fn new(inner: env_logger::Logger, multi: MultiProgress) -> Self {
        Self { inner, multi }
    }
}

impl log::Log for ProgressLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.matches(record) {
            let line = format_line(record.level(), record.target(), record.args(), true);
            self.multi.suspend(|| eprintln!("{line}"));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// 로거 초기화
///
/// `multi`가 있으면 진행률 바 연동 로거를, 없으면 색 없는 일반 로거를 설치합니다.
/// 이미 로거가 설치되어 있으면 아무것도 하지 않습니다.
pub fn init_logging(multi: Option<&MultiProgress>) {
    use std::io::Write;

    let env = env_logger::Env::default().default_filter_or(DEFAULT_FILTER);

    if let Some(multi) = multi {
        let logger = env_logger::Builder::from_env(env).build();
        let max_level = logger.filter();

        if log::set_boxed_logger(Box::new(ProgressLogger::new(logger, multi.clone()))).is_ok() {
            log::set_max_level(max_level);
        }
    } else {
        let _ = env_logger::Builder::from_env(env)
            .format(|buf, record| {
                let line = format_line(record.level(), record.target(), record.args(), false);
                writeln!(buf, "{line}")
            })
            .try_init();
    }
}
