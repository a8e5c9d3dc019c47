//! 에러 타입 정의 모듈
//!
//! sedump에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// sedump에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 입력 폴더가 존재하지 않음
    #[error("입력 폴더를 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 입력이 폴더가 아님
    #[error("입력 경로가 폴더가 아닙니다: {path}")]
    NotADirectory { path: PathBuf },

    /// XML 파일 열기 실패
    #[error("파일을 열 수 없습니다 ({file}): {reason}")]
    FileOpenError { file: PathBuf, reason: String },

    /// 복구 불가능한 XML 파싱 실패
    #[error("XML 파싱 실패 ({file}): {reason}")]
    ParseError { file: PathBuf, reason: String },

    /// 루트 요소가 없는 문서
    #[error("루트 요소가 없습니다: {file}")]
    NoRootElement { file: PathBuf },

    /// 스키마에 없는 엔티티
    #[error("알 수 없는 엔티티입니다: {name}")]
    UnknownEntity { name: String },

    /// 인덱스로 쓸 컬럼이 없음
    #[error("인덱스 컬럼이 없습니다: {column}")]
    MissingIndexColumn { column: String },

    /// 인덱스 컬럼이 정수형이 아님
    #[error("인덱스 컬럼이 정수형이 아닙니다: {column}")]
    IndexNotInteger { column: String },

    /// 정수 변환 실패
    #[error("정수로 변환할 수 없습니다 ({column}): {value:?}")]
    InvalidInteger { column: String, value: String },

    /// 불리언 변환 실패
    #[error("불리언으로 변환할 수 없습니다 ({column}): {value:?}")]
    InvalidBoolean { column: String, value: String },

    /// 이미 타입이 지정된 컬럼을 다시 정규화하려 함
    #[error("이미 정규화된 컬럼입니다: {column}")]
    ColumnAlreadyTyped { column: String },

    /// 테이블 직렬화 실패
    #[error("테이블 직렬화 실패 ({file}): {reason}")]
    SerializeError { file: PathBuf, reason: String },

    /// 테이블 역직렬화 실패
    #[error("테이블 역직렬화 실패 ({file}): {reason}")]
    DeserializeError { file: PathBuf, reason: String },

    /// 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({file}): {reason}")]
    WriteError { file: PathBuf, reason: String },

    /// 워커 수가 0
    #[error("워커 수는 1 이상이어야 합니다")]
    InvalidWorkerCount,

    /// 스레드 풀 초기화 실패
    #[error("스레드 풀 초기화 실패: {reason}")]
    ThreadPoolError { reason: String },
}

impl ConvertError {
    /// 로그에 남길 에러 분류 이름
    pub fn category(&self) -> &'static str {
        match self {
            ConvertError::InputNotFound { .. } => "InputNotFound",
            ConvertError::NotADirectory { .. } => "NotADirectory",
            ConvertError::FileOpenError { .. } => "FileOpenError",
            ConvertError::ParseError { .. } => "ParseError",
            ConvertError::NoRootElement { .. } => "NoRootElement",
            ConvertError::UnknownEntity { .. } => "UnknownEntity",
            ConvertError::MissingIndexColumn { .. } => "MissingIndexColumn",
            ConvertError::IndexNotInteger { .. } => "IndexNotInteger",
            ConvertError::InvalidInteger { .. } => "InvalidInteger",
            ConvertError::InvalidBoolean { .. } => "InvalidBoolean",
            ConvertError::ColumnAlreadyTyped { .. } => "ColumnAlreadyTyped",
            ConvertError::SerializeError { .. } => "SerializeError",
            ConvertError::DeserializeError { .. } => "DeserializeError",
            ConvertError::WriteError { .. } => "WriteError",
            ConvertError::InvalidWorkerCount => "InvalidWorkerCount",
            ConvertError::ThreadPoolError { .. } => "ThreadPoolError",
        }
    }
}

/// sedump 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ConvertError>;
