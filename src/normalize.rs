//! 타입 정규화 모듈
//!
//! 스키마에 따라 원본 문자열 컬럼을 정수, 날짜, 텍스트, 태그 집합 등으로 변환합니다.

use chrono::{NaiveDate, NaiveDateTime};
use scraper::Html;
use std::collections::BTreeSet;

use crate::error::{ConvertError, Result};
use crate::schema::{Entity, Normalization, INDEX_COLUMN, MISSING_INT};
use crate::table::{ColumnData, Table};

/// 날짜/시간 파싱 형식
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl Normalization {
    /// 원본 값 배열을 이 전략의 타입으로 변환
    ///
    /// # Arguments
    /// * `column` - 에러 메시지에 쓸 컬럼 이름
    /// * `values` - 파싱된 원본 값 (`None`은 결측)
    pub fn normalize(self, column: &str, values: Vec<Option<String>>) -> Result<ColumnData> {
        let data = match self {
            Normalization::Integer => ColumnData::Integer(
                values
                    .iter()
                    .map(|v| parse_integer(column, v.as_deref()))
                    .collect::<Result<_>>()?,
            ),
            Normalization::Boolean => ColumnData::Boolean(
                values
                    .iter()
                    .map(|v| parse_boolean(column, v.as_deref()))
                    .collect::<Result<_>>()?,
            ),
            Normalization::Date => {
                ColumnData::Date(values.iter().map(|v| parse_date(v.as_deref())).collect())
            }
            Normalization::Trimmed => ColumnData::Text(
                values
                    .into_iter()
                    .map(|v| v.map(|s| s.trim().to_string()).unwrap_or_default())
                    .collect(),
            ),
            Normalization::Html => {
                ColumnData::Text(values.iter().map(|v| strip_html(v.as_deref())).collect())
            }
            Normalization::TagSet => {
                ColumnData::TagSet(values.iter().map(|v| extract_tags(v.as_deref())).collect())
            }
        };
        Ok(data)
    }
}

/// 엔티티 스키마에 따라 테이블을 정규화하고 `Id`로 인덱스를 설정
///
/// 스키마에 없는 컬럼은 원본 문자열 그대로 둡니다.
///
/// # Returns
/// 인덱스 설정 중 버린 중복 행 수
pub fn normalize_table(table: &mut Table, entity: Entity) -> Result<usize> {
    for group in entity.schema() {
        for &column in group.columns {
            table.ensure_column(column);
            if let Some(values) = table.take_raw(column)? {
                let data = group.strategy.normalize(column, values)?;
                table.replace_column(column, data);
            }
        }
    }

    table.set_index(INDEX_COLUMN)
}

/// 정수 파싱 (결측 또는 빈 값은 `MISSING_INT`)
pub fn parse_integer(column: &str, value: Option<&str>) -> Result<i64> {
    match value.map(str::trim) {
        None | Some("") => Ok(MISSING_INT),
        Some(text) => text.parse().map_err(|_| ConvertError::InvalidInteger {
            column: column.to_string(),
            value: text.to_string(),
        }),
    }
}

/// 불리언 파싱 (결측은 false)
pub fn parse_boolean(column: &str, value: Option<&str>) -> Result<bool> {
    let Some(text) = value.map(str::trim) else {
        return Ok(false);
    };
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Ok(false)
    } else {
        Err(ConvertError::InvalidBoolean {
            column: column.to_string(),
            value: text.to_string(),
        })
    }
}

/// 날짜/시간 파싱 (잘못된 값이나 결측은 None)
///
/// # Examples
/// ```
/// use sedump::normalize::parse_date;
///
/// assert!(parse_date(Some("2008-07-31T21:42:52.667")).is_some());
/// assert!(parse_date(Some("yesterday")).is_none());
/// ```
pub fn parse_date(value: Option<&str>) -> Option<NaiveDateTime> {
    let text = value?.trim();
    let text = text.strip_suffix('Z').unwrap_or(text);

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// HTML 태그를 제거한 일반 텍스트
///
/// 줄바꿈은 지우고 앞뒤 공백은 잘라냅니다. 결측값과 "nan"은 빈 문자열이 됩니다.
///
/// # Examples
/// ```
/// use sedump::normalize::strip_html;
///
/// assert_eq!(strip_html(Some("<p>Hello <b>world</b></p>\n")), "Hello world");
/// assert_eq!(strip_html(Some("NaN")), "");
/// ```
pub fn strip_html(value: Option<&str>) -> String {
    let Some(html) = value else {
        return String::new();
    };
    if html.trim().eq_ignore_ascii_case("nan") {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.replace('\n', "").trim().to_string()
}

/// `<tag1><tag2>` 형식에서 태그 집합 추출
///
/// 형식에 맞지 않으면 빈 집합입니다.
///
/// # Examples
/// ```
/// use sedump::normalize::extract_tags;
///
/// let tags = extract_tags(Some("<python><django>"));
/// assert!(tags.contains("python") && tags.contains("django"));
/// assert!(extract_tags(Some("python")).is_empty());
/// ```
pub fn extract_tags(value: Option<&str>) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    let Some(mut rest) = value else {
        return tags;
    };

    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            break;
        };
        let tag: String = after_open[..close].chars().filter(|c| *c != '<').collect();
        tags.insert(tag);
        rest = &after_open[close + 1..];
    }

    tags
}
