//! 덤프 파일 처리 모듈
//!
//! 파일 하나를 파싱 → 정규화 → 저장하는 작업 단위를 담당합니다.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::normalize::normalize_table;
use crate::parser::parse_file;
use crate::report::{Event, Reporter};
use crate::schema::Entity;
use crate::storage::{file_stem, output_path_for, write_table, DEFAULT_OUTPUT_EXTENSION};

/// 파일 처리 결과
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// 처리한 입력 파일 경로
    pub path: PathBuf,
    /// 저장된 출력 파일 경로 (성공 시)
    pub output: Option<PathBuf>,
    /// 에러 분류 (실패 시)
    pub category: Option<&'static str>,
    /// 에러 메시지 (실패 시)
    pub error: Option<String>,
    /// 저장된 행 수
    pub rows: usize,
    /// 입력 파일 크기
    pub input_bytes: u64,
    /// 출력 파일 크기
    pub output_bytes: u64,
    /// 처리 시간
    pub elapsed: Duration,
}

impl ConversionResult {
    /// 성공 결과 생성
    pub fn success(path: PathBuf, summary: Conversion, elapsed: Duration) -> Self {
        Self {
            path,
            output: Some(summary.output),
            category: None,
            error: None,
            rows: summary.rows,
            input_bytes: summary.input_bytes,
            output_bytes: summary.output_bytes,
            elapsed,
        }
    }

    /// 실패 결과 생성
    pub fn failure(path: PathBuf, category: &'static str, error: String, elapsed: Duration) -> Self {
        Self {
            path,
            output: None,
            category: Some(category),
            error: Some(error),
            rows: 0,
            input_bytes: 0,
            output_bytes: 0,
            elapsed,
        }
    }

    /// 성공 여부
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// 한 파일 변환의 요약
#[derive(Debug, Clone)]
pub struct Conversion {
    pub entity: Entity,
    pub output: PathBuf,
    pub rows: usize,
    pub dropped_duplicates: usize,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

/// 처리 옵션
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// 대용량 파일 임계값 (이상이면 메모리 매핑 사용)
    pub mmap_threshold: u64,
    /// 출력 파일 확장자
    pub output_extension: String,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self {
            mmap_threshold: 10 * 1024 * 1024, // 10MB
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }

    /// 메모리 매핑 임계값 설정
    pub fn with_mmap_threshold(mut self, bytes: u64) -> Self {
        self.mmap_threshold = bytes;
        self
    }

    /// 출력 확장자 설정
    pub fn with_output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = extension.into();
        self
    }
}

/// 현재 rayon 워커 이름 (풀 밖이면 "main")
pub fn worker_name() -> String {
    match rayon::current_thread_index() {
        Some(index) => format!("worker-{}", index),
        None => "main".to_string(),
    }
}

/// 단일 덤프 파일 처리
///
/// 실패해도 패닉하지 않고, 에러를 보고한 뒤 실패 결과로 돌려줍니다.
///
/// # Arguments
/// * `path` - 처리할 XML 파일 경로
/// * `options` - 처리 옵션
/// * `reporter` - 이벤트 수신자
pub fn process_file(path: PathBuf, options: &ProcessOptions, reporter: &dyn Reporter) -> ConversionResult {
    let worker = worker_name();
    let started = Instant::now();

    match convert_file(&path, options, reporter) {
        Ok(summary) => ConversionResult::success(path, summary, started.elapsed()),
        Err(e) => {
            reporter.report(&Event::Failed {
                worker: &worker,
                path: &path,
                error: &e,
            });
            ConversionResult::failure(path, e.category(), e.to_string(), started.elapsed())
        }
    }
}

/// 단일 덤프 파일 변환
///
/// 에러는 그대로 돌려줍니다. 실패 이벤트 보고는 `process_file`이 맡습니다.
pub fn convert_file(path: &Path, options: &ProcessOptions, reporter: &dyn Reporter) -> Result<Conversion> {
    let worker = worker_name();
    reporter.report(&Event::Started {
        worker: &worker,
        path,
    });
    let started = Instant::now();

    let entity = Entity::lookup(&file_stem(path))?;
    let output = output_path_for(path, &options.output_extension);
    let input_bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    let document = parse_file(path, options.mmap_threshold)?;
    if let Some(ref reason) = document.recovered {
        reporter.report(&Event::Recovered {
            worker: &worker,
            path,
            reason,
        });
    }

    let mut table = document.table.with_entity(entity.name());
    let dropped_duplicates = normalize_table(&mut table, entity)?;
    if dropped_duplicates > 0 {
        reporter.report(&Event::DuplicateIds {
            worker: &worker,
            path,
            dropped: dropped_duplicates,
        });
    }

    let output_bytes = write_table(&table, &output)?;

    reporter.report(&Event::Finished {
        worker: &worker,
        path,
        rows: table.row_count(),
        elapsed: started.elapsed(),
    });

    Ok(Conversion {
        entity,
        output,
        rows: table.row_count(),
        dropped_duplicates,
        input_bytes,
        output_bytes,
    })
}
