//! XML 파싱 모듈
//!
//! 덤프 XML의 루트 직계 자식 요소들을 속성 레코드로 읽어 테이블을 만듭니다.
//! 깨진 문서는 가능한 만큼 읽고 복구합니다.

use memmap2::Mmap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::table::Table;

/// 파싱 결과
#[derive(Debug)]
pub struct ParsedDocument {
    /// 레코드 테이블
    pub table: Table,
    /// 문서를 복구하며 읽었다면 그 이유
    pub recovered: Option<String>,
}

/// XML 파일을 테이블로 파싱
///
/// # Arguments
/// * `path` - 읽을 XML 파일
/// * `mmap_threshold` - 이 크기 이상이면 메모리 매핑으로 읽음
pub fn parse_file(path: &Path, mmap_threshold: u64) -> Result<ParsedDocument> {
    let file = File::open(path).map_err(|e| ConvertError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);

    if file_size >= mmap_threshold && file_size > 0 {
        // 대용량 파일: 메모리 매핑 사용
        let mmap = unsafe {
            Mmap::map(&file).map_err(|e| ConvertError::FileOpenError {
                file: path.to_path_buf(),
                reason: format!("메모리 매핑 실패: {}", e),
            })?
        };
        parse_reader(&mmap[..], path)
    } else {
        parse_reader(BufReader::new(file), path)
    }
}

/// 임의의 버퍼 리더에서 XML을 파싱
///
/// `path`는 에러 메시지에만 쓰입니다.
pub fn parse_reader<R: BufRead>(source: R, path: &Path) -> Result<ParsedDocument> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().check_end_names = false;

    let mut records: Vec<Vec<(String, String)>> = Vec::new();
    let mut recovered = None;
    let mut root_seen = false;
    let mut root_name: Vec<u8> = Vec::new();
    let mut depth: usize = 0;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if depth == 0 {
                    root_name = e.name().as_ref().to_vec();
                } else if depth == 1 {
                    records.push(read_attributes(&e));
                }
                root_seen = true;
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                if depth == 1 {
                    records.push(read_attributes(&e));
                }
                if depth == 0 {
                    // <posts/> 같은 빈 루트
                    root_seen = true;
                    break;
                }
            }
            Ok(Event::End(e)) => {
                if depth == 1 && e.name().as_ref() != root_name.as_slice() {
                    // 루트가 아닌 닫는 태그는 건너뜀
                    if recovered.is_none() {
                        recovered = Some(format!(
                            "{} 위치의 짝 없는 닫는 태그 </{}>를 건너뛰었습니다",
                            reader.buffer_position(),
                            String::from_utf8_lossy(e.name().as_ref())
                        ));
                    }
                } else {
                    depth = depth.saturating_sub(1);
                    if depth == 0 && root_seen {
                        break;
                    }
                }
            }
            Ok(Event::Eof) => {
                if depth > 0 {
                    recovered = Some("루트 요소가 닫히지 않은 채 문서가 끝났습니다".to_string());
                }
                break;
            }
            Err(e) if root_seen => {
                recovered = Some(format!(
                    "{} 위치에서 파싱 중단: {}",
                    reader.buffer_position(),
                    e
                ));
                break;
            }
            Err(e) => {
                return Err(ConvertError::ParseError {
                    file: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    if !root_seen {
        return Err(ConvertError::NoRootElement {
            file: path.to_path_buf(),
        });
    }

    Ok(ParsedDocument {
        table: Table::from_records(records),
        recovered,
    })
}

/// 요소의 속성을 (이름, 값) 목록으로 읽음
///
/// 형식이 잘못된 속성은 건너뛰고, 알 수 없는 엔티티가 있는 값은 원문을 그대로 씁니다.
fn read_attributes(element: &BytesStart<'_>) -> Vec<(String, String)> {
    element
        .attributes()
        .with_checks(false)
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = match attr.unescape_value() {
                Ok(v) => v.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            (key, value)
        })
        .collect()
}
