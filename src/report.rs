//! 처리 이벤트 보고 모듈
//!
//! 파일 단위 작업은 전역 로거 대신 호출자가 넘겨준 `Reporter`에 이벤트를 보냅니다.

use std::path::Path;
use std::time::Duration;

use crate::error::ConvertError;

/// 파싱/처리 이벤트 로그 채널
pub const PARSER_TARGET: &str = "parser";

/// 소요 시간 로그 채널
pub const TIMER_TARGET: &str = "timer";

/// 파일 처리 중 발생하는 이벤트
#[derive(Debug)]
pub enum Event<'a> {
    /// 처리 시작
    Started { worker: &'a str, path: &'a Path },
    /// 깨진 XML을 복구하며 읽음
    Recovered {
        worker: &'a str,
        path: &'a Path,
        reason: &'a str,
    },
    /// 중복 Id 행을 버림
    DuplicateIds {
        worker: &'a str,
        path: &'a Path,
        dropped: usize,
    },
    /// 처리 완료
    Finished {
        worker: &'a str,
        path: &'a Path,
        rows: usize,
        elapsed: Duration,
    },
    /// 처리 실패
    Failed {
        worker: &'a str,
        path: &'a Path,
        error: &'a ConvertError,
    },
}

/// 이벤트 수신자
///
/// 여러 워커가 동시에 호출하므로 `Sync`여야 합니다.
pub trait Reporter: Sync {
    fn report(&self, event: &Event<'_>);
}

/// 아무것도 하지 않는 수신자
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _event: &Event<'_>) {}
}

/// `parser`/`timer` 로그 채널로 이벤트를 내보내는 수신자
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, event: &Event<'_>) {
        match event {
            Event::Started { worker, path } => {
                log::info!(target: PARSER_TARGET, "{}: {} 처리 시작", worker, path.display());
            }
            Event::Recovered {
                worker,
                path,
                reason,
            } => {
                log::warn!(
                    target: PARSER_TARGET,
                    "{}: {} 의 깨진 XML을 복구했습니다: {}",
                    worker,
                    path.display(),
                    reason
                );
            }
            Event::DuplicateIds {
                worker,
                path,
                dropped,
            } => {
                log::warn!(
                    target: PARSER_TARGET,
                    "{}: {} 에서 중복 Id 행 {}개를 버렸습니다",
                    worker,
                    path.display(),
                    dropped
                );
            }
            Event::Finished {
                worker,
                path,
                elapsed,
                ..
            } => {
                log::info!(
                    target: TIMER_TARGET,
                    "{}: {} 처리에 {:.2}초 걸렸습니다",
                    worker,
                    path.display(),
                    elapsed.as_secs_f64()
                );
            }
            Event::Failed {
                worker,
                path,
                error,
            } => {
                log::warn!(
                    target: PARSER_TARGET,
                    "{}: {} 처리 중 오류 발생: {}",
                    worker,
                    path.display(),
                    error.category()
                );
            }
        }
    }
}
