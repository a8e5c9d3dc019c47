//! 엔티티 스키마 모듈
//!
//! 덤프 파일 종류(엔티티)별로 어떤 컬럼을 어떤 타입으로 정규화할지 정의합니다.

use std::fmt;

use crate::error::{ConvertError, Result};

/// 정수 컬럼의 결측값 대신 쓰는 값
pub const MISSING_INT: i64 = -i64::MAX;

/// 정규화 후 테이블 인덱스로 쓰는 컬럼
pub const INDEX_COLUMN: &str = "Id";

/// 컬럼 정규화 전략
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalization {
    /// 정수 (결측값은 `MISSING_INT`)
    Integer,
    /// 날짜/시간 (잘못된 값은 "날짜 아님")
    Date,
    /// 앞뒤 공백을 제거한 문자열
    Trimmed,
    /// HTML 태그를 제거한 일반 텍스트
    Html,
    /// `<a><b>` 형식의 태그 집합
    TagSet,
    /// 불리언
    Boolean,
}

/// 같은 전략으로 정규화되는 컬럼 묶음
#[derive(Debug, Clone, Copy)]
pub struct ColumnGroup {
    pub strategy: Normalization,
    pub columns: &'static [&'static str],
}

const fn group(strategy: Normalization, columns: &'static [&'static str]) -> ColumnGroup {
    ColumnGroup { strategy, columns }
}

use Normalization::*;

const USERS: &[ColumnGroup] = &[
    group(
        Integer,
        &["AccountId", "Age", "DownVotes", "Id", "Reputation", "UpVotes", "Views"],
    ),
    group(Date, &["LastAccessDate", "CreationDate"]),
    group(Trimmed, &["DisplayName", "Location", "ProfileImageUrl", "WebsiteUrl"]),
    group(Html, &["AboutMe"]),
];

const COMMENTS: &[ColumnGroup] = &[
    group(Integer, &["Id", "PostId", "Score", "UserId"]),
    group(Date, &["CreationDate"]),
    group(Trimmed, &["UserDisplayName"]),
    group(Html, &["Text"]),
];

const BADGES: &[ColumnGroup] = &[
    group(Integer, &["Class", "Id", "UserId"]),
    group(Date, &["Date"]),
    group(Trimmed, &["Name"]),
    group(Boolean, &["TagBased"]),
];

const POST_HISTORY: &[ColumnGroup] = &[
    group(Integer, &["Id", "PostHistoryTypeId", "PostId", "UserId"]),
    group(Date, &["CreationDate"]),
    group(Trimmed, &["Comment", "RevisionGUID", "Text", "UserDisplayName"]),
];

const POST_LINKS: &[ColumnGroup] = &[
    group(Integer, &["Id", "LinkTypeId", "PostId", "RelatedPostId"]),
    group(Date, &["CreationDate"]),
];

const POSTS: &[ColumnGroup] = &[
    group(
        Integer,
        &[
            "AcceptedAnswerId",
            "AnswerCount",
            "CommentCount",
            "FavoriteCount",
            "Id",
            "LastEditorUserId",
            "OwnerUserId",
            "ParentId",
            "PostTypeId",
            "Score",
            "ViewCount",
        ],
    ),
    group(
        Date,
        &[
            "ClosedDate",
            "CommunityOwnedDate",
            "CreationDate",
            "LastActivityDate",
            "LastEditDate",
        ],
    ),
    group(Trimmed, &["Title", "LastEditorDisplayName"]),
    group(Html, &["Body", "OwnerDisplayName"]),
    group(TagSet, &["Tags"]),
];

const TAGS: &[ColumnGroup] = &[
    group(Integer, &["Count", "ExcerptPostId", "Id", "WikiPostId"]),
    group(Trimmed, &["TagName"]),
];

const VOTES: &[ColumnGroup] = &[
    group(Integer, &["BountyAmount", "Id", "PostId", "UserId", "VoteTypeId"]),
    group(Date, &["CreationDate"]),
];

/// 인식하는 덤프 엔티티
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Badges,
    Comments,
    PostHistory,
    PostLinks,
    Posts,
    Tags,
    Users,
    Votes,
}

impl Entity {
    /// 모든 엔티티
    pub const ALL: [Entity; 8] = [
        Entity::Badges,
        Entity::Comments,
        Entity::PostHistory,
        Entity::PostLinks,
        Entity::Posts,
        Entity::Tags,
        Entity::Users,
        Entity::Votes,
    ];

    /// 스키마에서 쓰는 엔티티 이름 (예: "PostHistory")
    pub fn name(self) -> &'static str {
        match self {
            Entity::Badges => "Badges",
            Entity::Comments => "Comments",
            Entity::PostHistory => "PostHistory",
            Entity::PostLinks => "PostLinks",
            Entity::Posts => "Posts",
            Entity::Tags => "Tags",
            Entity::Users => "Users",
            Entity::Votes => "Votes",
        }
    }

    /// 덤프 안의 소문자 파일 이름 (예: "posthistory.xml")
    pub fn file_name(self) -> &'static str {
        match self {
            Entity::Badges => "badges.xml",
            Entity::Comments => "comments.xml",
            Entity::PostHistory => "posthistory.xml",
            Entity::PostLinks => "postlinks.xml",
            Entity::Posts => "posts.xml",
            Entity::Tags => "tags.xml",
            Entity::Users => "users.xml",
            Entity::Votes => "votes.xml",
        }
    }

    /// 파일 이름으로 엔티티 찾기 (대소문자 무시)
    pub fn from_file_name(file_name: &str) -> Option<Entity> {
        Entity::ALL
            .into_iter()
            .find(|e| e.file_name().eq_ignore_ascii_case(file_name))
    }

    /// 엔티티 이름으로 스키마 조회 (대소문자 무시)
    ///
    /// # Examples
    /// ```
    /// use sedump::schema::Entity;
    ///
    /// assert_eq!(Entity::lookup("users").unwrap(), Entity::Users);
    /// assert!(Entity::lookup("widgets").is_err());
    /// ```
    pub fn lookup(name: &str) -> Result<Entity> {
        Entity::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConvertError::UnknownEntity {
                name: name.to_string(),
            })
    }

    /// 컬럼 그룹 목록 (선언 순서대로 적용)
    pub fn schema(self) -> &'static [ColumnGroup] {
        match self {
            Entity::Badges => BADGES,
            Entity::Comments => COMMENTS,
            Entity::PostHistory => POST_HISTORY,
            Entity::PostLinks => POST_LINKS,
            Entity::Posts => POSTS,
            Entity::Tags => TAGS,
            Entity::Users => USERS,
            Entity::Votes => VOTES,
        }
    }

    /// 컬럼에 지정된 정규화 전략 (없으면 원본 문자열 유지)
    pub fn strategy_for(self, column: &str) -> Option<Normalization> {
        self.schema()
            .iter()
            .find(|g| g.columns.contains(&column))
            .map(|g| g.strategy)
    }

    /// 스키마에 선언된 모든 컬럼
    pub fn declared_columns(self) -> impl Iterator<Item = &'static str> {
        self.schema().iter().flat_map(|g| g.columns.iter().copied())
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
