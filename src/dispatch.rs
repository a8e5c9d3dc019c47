//! 병렬 분배 모듈
//!
//! 파일 목록을 고정 크기 워커 풀에 나눠 처리하고 파일별 결과를 모읍니다.

use rayon::prelude::*;
use std::path::PathBuf;

use crate::error::{ConvertError, Result};
use crate::processor::{process_file, ConversionResult, ProcessOptions};
use crate::report::Reporter;

/// 파일들을 `workers`개의 워커로 처리
///
/// 모든 파일이 끝날 때까지 블록합니다. 한 파일의 실패가 다른 파일 처리를
/// 막지 않으며, 결과는 입력 순서대로 돌아옵니다 (완료 순서와는 무관).
///
/// # Arguments
/// * `files` - 처리할 XML 파일 목록
/// * `workers` - 워커 스레드 수 (1 이상)
/// * `options` - 처리 옵션
/// * `reporter` - 이벤트 수신자
pub fn dispatch(
    files: Vec<PathBuf>,
    workers: usize,
    options: &ProcessOptions,
    reporter: &dyn Reporter,
) -> Result<Vec<ConversionResult>> {
    if workers == 0 {
        return Err(ConvertError::InvalidWorkerCount);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("sedump-worker-{}", index))
        .build()
        .map_err(|e| ConvertError::ThreadPoolError {
            reason: e.to_string(),
        })?;

    let results: Vec<ConversionResult> = pool.install(|| {
        files
            .into_par_iter()
            .with_max_len(1)
            .map(|path| process_file(path, options, reporter))
            .collect()
    });

    Ok(results)
}
