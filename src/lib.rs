//! sedump - STACK EXCHANGE DUMP CONVERTER
//!
//! Stack Exchange 데이터 덤프 XML 파일들을 타입이 정규화된 테이블 파일로 변환하는 병렬 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🔍 **파일 탐색**: 폴더를 재귀적으로 훑어 8종의 엔티티 XML 파일 수집
//! - 🧩 **복구 파싱**: 깨진 XML도 읽을 수 있는 만큼 읽어 레코드 테이블 생성
//! - 🧹 **타입 정규화**: 엔티티별 스키마에 따라 정수, 날짜, 텍스트, 태그 집합으로 변환
//! - 💾 **바이너리 저장**: 타입을 그대로 보존하는 bincode 테이블 파일
//! - 🚀 **병렬 처리**: 지정한 수의 워커로 파일 단위 병렬 변환
//! - 📈 **파일별 결과**: 성공/실패를 파일마다 수집해 요약 출력
//!
//! # 예제
//!
//! ```bash
//! # ./dumps 아래의 덤프를 워커 4개로 변환
//! sedump ./dumps 4
//! ```

pub mod cli;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod parser;
pub mod processor;
pub mod report;
pub mod schema;
pub mod stats;
pub mod storage;
pub mod table;

// Re-exports for convenient access
pub use cli::Args;
pub use discovery::discover_entity_files;
pub use dispatch::dispatch;
pub use error::{ConvertError, Result};
pub use processor::{convert_file, process_file, ConversionResult, ProcessOptions};
pub use report::{Event, LogReporter, NoopReporter, Reporter};
pub use schema::{Entity, Normalization};
pub use stats::{format_bytes, Statistics};
pub use storage::{read_table, write_table};
pub use table::{ColumnData, Table};
