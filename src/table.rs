//! 테이블 모듈
//!
//! XML 레코드를 담는 컬럼 지향 테이블과 인덱스 재설정을 담당합니다.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{ConvertError, Result};

/// 컬럼 값 배열
///
/// 파싱 직후에는 모두 `Raw`이며, 정규화를 거치면 스키마에 맞는 타입으로 바뀝니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    /// 파싱된 원본 문자열 (속성이 없던 행은 `None`)
    Raw(Vec<Option<String>>),
    Integer(Vec<i64>),
    Boolean(Vec<bool>),
    /// `None`은 "날짜 아님"
    Date(Vec<Option<NaiveDateTime>>),
    Text(Vec<String>),
    TagSet(Vec<BTreeSet<String>>),
}

impl ColumnData {
    /// 행 수
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Raw(v) => v.len(),
            ColumnData::Integer(v) => v.len(),
            ColumnData::Boolean(v) => v.len(),
            ColumnData::Date(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::TagSet(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `keep[i]`가 true인 행만 남김
    fn retain_rows(&mut self, keep: &[bool]) {
        match self {
            ColumnData::Raw(v) => retain_by_mask(v, keep),
            ColumnData::Integer(v) => retain_by_mask(v, keep),
            ColumnData::Boolean(v) => retain_by_mask(v, keep),
            ColumnData::Date(v) => retain_by_mask(v, keep),
            ColumnData::Text(v) => retain_by_mask(v, keep),
            ColumnData::TagSet(v) => retain_by_mask(v, keep),
        }
    }
}

fn retain_by_mask<T>(values: &mut Vec<T>, keep: &[bool]) {
    let mut row = 0;
    values.retain(|_| {
        let kept = keep.get(row).copied().unwrap_or(true);
        row += 1;
        kept
    });
}

/// 이름이 붙은 컬럼
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// 레코드 테이블
///
/// 행은 XML 요소 하나, 컬럼은 등장한 속성 이름의 합집합입니다.
/// 컬럼 순서는 처음 등장한 순서를 따릅니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    entity: Option<String>,
    index_name: Option<String>,
    index: Option<Vec<i64>>,
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// 속성 목록 레코드들로 테이블 생성
    ///
    /// 레코드에 없는 속성은 해당 행에서 `None`이 됩니다.
    /// 한 레코드 안에서 같은 속성이 반복되면 마지막 값이 남습니다.
    pub fn from_records(records: Vec<Vec<(String, String)>>) -> Self {
        let rows = records.len();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut columns: Vec<Column> = Vec::new();

        for (row, record) in records.into_iter().enumerate() {
            for (key, value) in record {
                let position = match positions.get(&key) {
                    Some(&p) => p,
                    None => {
                        positions.insert(key.clone(), columns.len());
                        columns.push(Column {
                            name: key,
                            data: ColumnData::Raw(vec![None; rows]),
                        });
                        columns.len() - 1
                    }
                };
                if let ColumnData::Raw(values) = &mut columns[position].data {
                    values[row] = Some(value);
                }
            }
        }

        Self {
            entity: None,
            index_name: None,
            index: None,
            columns,
            rows,
        }
    }

    /// 엔티티 이름 지정
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// 행 수
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// 컬럼 목록
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// 컬럼 이름 목록
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// 이름으로 컬럼 데이터 조회
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.data)
    }

    /// 인덱스 컬럼 이름과 값 (인덱스 설정 전이면 None)
    pub fn index(&self) -> Option<(&str, &[i64])> {
        match (&self.index_name, &self.index) {
            (Some(name), Some(values)) => Some((name.as_str(), values.as_slice())),
            _ => None,
        }
    }

    /// 컬럼이 없으면 모든 행이 결측인 원본 컬럼으로 추가
    pub fn ensure_column(&mut self, name: &str) {
        if self.column(name).is_none() {
            self.columns.push(Column {
                name: name.to_string(),
                data: ColumnData::Raw(vec![None; self.rows]),
            });
        }
    }

    /// 원본 컬럼 값을 꺼냄 (자리에는 빈 원본 컬럼이 남음)
    pub(crate) fn take_raw(&mut self, name: &str) -> Result<Option<Vec<Option<String>>>> {
        let Some(column) = self.columns.iter_mut().find(|c| c.name == name) else {
            return Ok(None);
        };
        match std::mem::replace(&mut column.data, ColumnData::Raw(Vec::new())) {
            ColumnData::Raw(values) => Ok(Some(values)),
            typed => {
                column.data = typed;
                Err(ConvertError::ColumnAlreadyTyped {
                    column: name.to_string(),
                })
            }
        }
    }

    /// 컬럼 데이터 교체
    pub(crate) fn replace_column(&mut self, name: &str, data: ColumnData) {
        debug_assert_eq!(data.len(), self.rows);
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => column.data = data,
            None => self.columns.push(Column {
                name: name.to_string(),
                data,
            }),
        }
    }

    /// 정수 컬럼을 인덱스로 설정
    ///
    /// 컬럼은 테이블에서 빠지고 인덱스가 됩니다. 같은 값이 여러 번 나오면
    /// 처음 나온 행만 남기고 나머지 행은 버립니다.
    ///
    /// # Returns
    /// 버린 중복 행 수
    pub fn set_index(&mut self, name: &str) -> Result<usize> {
        let position = self
            .columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| ConvertError::MissingIndexColumn {
                column: name.to_string(),
            })?;

        let mut index = match &self.columns[position].data {
            ColumnData::Integer(values) => values.clone(),
            _ => {
                return Err(ConvertError::IndexNotInteger {
                    column: name.to_string(),
                })
            }
        };
        self.columns.remove(position);

        let mut seen = HashSet::with_capacity(index.len());
        let keep: Vec<bool> = index.iter().map(|id| seen.insert(*id)).collect();
        let dropped = keep.iter().filter(|k| !**k).count();

        if dropped > 0 {
            retain_by_mask(&mut index, &keep);
            for column in &mut self.columns {
                column.data.retain_rows(&keep);
            }
            self.rows -= dropped;
        }

        self.index_name = Some(name.to_string());
        self.index = Some(index);
        Ok(dropped)
    }
}
