//! 덤프 파일 탐색 모듈
//!
//! 폴더를 재귀적으로 훑어 인식하는 엔티티 파일(badges.xml 등)만 모읍니다.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::schema::Entity;

/// 인식하는 엔티티 파일 이름인지 확인 (대소문자 무시)
pub fn is_entity_file(file_name: &str) -> bool {
    Entity::from_file_name(file_name).is_some()
}

/// 엔티티 XML 파일 수집
///
/// 심볼릭 링크는 따라가고, 접근할 수 없는 항목이나 링크 순환은 건너뜁니다.
/// 순서는 폴더 탐색 순서입니다.
///
/// # Arguments
/// * `root` - 탐색할 루트 폴더
///
/// # Returns
/// 찾은 파일 경로 목록 (없으면 빈 목록)
pub fn discover_entity_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(is_entity_file)
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect()
}
