//! 테이블 저장 모듈
//!
//! 정규화된 테이블을 bincode로 직렬화해 디스크에 쓰고 다시 읽습니다.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::table::Table;

/// 기본 출력 확장자
pub const DEFAULT_OUTPUT_EXTENSION: &str = "bin";

/// 입력 파일 경로에서 출력 파일 경로 만들기
///
/// 같은 폴더에, 첫 번째 '.' 앞까지의 파일 이름을 소문자로 바꾸고 확장자를 붙입니다.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use sedump::storage::output_path_for;
///
/// let out = output_path_for(Path::new("dump/PostHistory.xml"), "bin");
/// assert_eq!(out, Path::new("dump/posthistory.bin"));
/// ```
pub fn output_path_for(input: &Path, extension: &str) -> PathBuf {
    let stem = file_stem(input).to_lowercase();
    let file_name = format!("{}.{}", stem, extension);
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// 첫 번째 '.' 앞까지의 파일 이름 (대소문자 유지)
pub fn file_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.split('.').next().unwrap_or_default().to_string()
}

/// 테이블을 파일로 저장
///
/// # Returns
/// 쓴 바이트 수
pub fn write_table(table: &Table, path: &Path) -> Result<u64> {
    let file = File::create(path).map_err(|e| ConvertError::WriteError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut writer = BufWriter::new(file);

    bincode::serialize_into(&mut writer, table).map_err(|e| ConvertError::SerializeError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut file = writer.into_inner().map_err(|e| ConvertError::WriteError {
        file: path.to_path_buf(),
        reason: e.error().to_string(),
    })?;
    file.flush().map_err(|e| ConvertError::WriteError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(file.metadata().map(|m| m.len()).unwrap_or(0))
}

/// 저장된 테이블 읽기
pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| ConvertError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    bincode::deserialize_from(BufReader::new(file)).map_err(|e| ConvertError::DeserializeError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })
}
