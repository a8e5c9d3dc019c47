//! 통합 테스트 모듈
//!
//! sedump의 전체 기능을 테스트합니다.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 테스트용 파일 생성 헬퍼
fn create_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

const USERS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<users>
  <row Id="-1" Reputation="1" CreationDate="2008-07-31T00:00:00.000" DisplayName="Community" LastAccessDate="2008-08-26T00:16:53.810" WebsiteUrl="http://meta.stackexchange.com/" Location="on the server farm" AboutMe="&lt;p&gt;Hi, I'm not really a person.&lt;/p&gt;&#xA;" Views="649" UpVotes="1" DownVotes="1" AccountId="-1" />
  <row Id="2" Reputation="101" CreationDate="2008-07-31T14:22:31.287" DisplayName=" Geoff Dalgas " LastAccessDate="not-a-date" Views="25" UpVotes="3" DownVotes="0" AccountId="2" />
</users>"#;

const BADGES_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<badges>
  <row Id="1" UserId="2" Name="Autobiographer" Date="2008-09-15T08:55:03.923" Class="3" TagBased="False" />
  <row Id="2" UserId="3" Name="python" Date="2008-09-15T08:55:03.957" Class="2" TagBased="True" />
</badges>"#;

const POSTS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<posts>
  <row Id="4" PostTypeId="1" AcceptedAnswerId="7" CreationDate="2008-07-31T21:42:52.667" Score="630" ViewCount="42817" Body="&lt;p&gt;I want to use a &lt;b&gt;track-bar&lt;/b&gt;&lt;/p&gt;&#xA;" OwnerUserId="8" LastActivityDate="2019-07-19T01:39:54.173" Title="Convert Decimal to Double? " Tags="&lt;c#&gt;&lt;floating-point&gt;" AnswerCount="13" CommentCount="1" ContentLicense="CC BY-SA 4.0" />
  <row Id="7" PostTypeId="2" ParentId="4" CreationDate="2008-07-31T22:17:57.883" Score="417" Body="&lt;p&gt;An explicit cast to double&lt;/p&gt;" OwnerDisplayName="nan" />
</posts>"#;

/// 하나의 사이트 덤프 폴더 생성
fn setup_dump_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "Users.xml", USERS_XML);
    create_file(temp_dir.path(), "Badges.xml", BADGES_XML);
    create_file(temp_dir.path(), "readme.txt", "not a dump file");
    temp_dir
}

/// 여러 엔티티가 있는 덤프 폴더 생성
fn setup_full_dump_directory() -> TempDir {
    let temp_dir = setup_dump_directory();
    let site = temp_dir.path().join("meta");
    fs::create_dir(&site).unwrap();
    create_file(&site, "Posts.xml", POSTS_XML);
    create_file(
        &site,
        "Tags.xml",
        r#"<tags><row Id="1" TagName="rust" Count="3" ExcerptPostId="4" WikiPostId="7" /></tags>"#,
    );
    create_file(
        &site,
        "Votes.xml",
        r#"<votes><row Id="1" PostId="4" VoteTypeId="2" CreationDate="2008-07-31T00:00:00.000" /><row Id="2" PostId="7" VoteTypeId="8" BountyAmount="50" /></votes>"#,
    );
    temp_dir
}

mod discovery_tests {
    use super::*;
    use sedump::discover_entity_files;

    #[test]
    fn test_discovers_only_entity_files() {
        let temp_dir = setup_dump_directory();
        let mut files = discover_entity_files(temp_dir.path());
        files.sort();

        assert_eq!(
            files,
            vec![
                temp_dir.path().join("Badges.xml"),
                temp_dir.path().join("Users.xml")
            ]
        );
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        assert!(discover_entity_files(temp_dir.path()).is_empty());
    }
}

mod schema_tests {
    use sedump::schema::{Entity, Normalization};
    use sedump::{normalize::normalize_table, Table};

    #[test]
    fn test_minimal_record_columns_each_in_one_group() {
        for entity in Entity::ALL {
            let record: Vec<(String, String)> = entity
                .declared_columns()
                .map(|c| (c.to_string(), String::new()))
                .collect();
            let table = Table::from_records(vec![record]);

            for column in table.column_names() {
                let groups = entity
                    .schema()
                    .iter()
                    .filter(|g| g.columns.contains(&column))
                    .count();
                assert_eq!(groups, 1, "{entity}.{column}");
            }
        }
    }

    #[test]
    fn test_every_entity_normalizes_an_id_only_record() {
        for entity in Entity::ALL {
            let mut table = Table::from_records(vec![vec![("Id".to_string(), "1".to_string())]]);
            normalize_table(&mut table, entity).unwrap();
            assert_eq!(table.index(), Some(("Id", &[1i64][..])), "{entity}");
            for column in entity.declared_columns().filter(|c| *c != "Id") {
                assert!(table.column(column).is_some(), "{entity}.{column}");
            }
        }
    }

    #[test]
    fn test_posts_tags_are_sets() {
        assert_eq!(Entity::Posts.strategy_for("Tags"), Some(Normalization::TagSet));
    }
}

mod processor_tests {
    use super::*;
    use sedump::schema::MISSING_INT;
    use sedump::{convert_file, process_file, read_table, ColumnData, NoopReporter, ProcessOptions};
    use std::collections::BTreeSet;

    #[test]
    fn test_users_conversion_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_file(temp_dir.path(), "Users.xml", USERS_XML);

        let summary = convert_file(&path, &ProcessOptions::new(), &NoopReporter).unwrap();
        let table = read_table(&summary.output).unwrap();

        assert_eq!(table.entity(), Some("Users"));
        assert_eq!(table.index(), Some(("Id", &[-1i64, 2][..])));
        assert_eq!(
            table.column("AboutMe"),
            Some(&ColumnData::Text(vec![
                "Hi, I'm not really a person.".to_string(),
                String::new()
            ]))
        );
        assert_eq!(
            table.column("DisplayName"),
            Some(&ColumnData::Text(vec![
                "Community".to_string(),
                "Geoff Dalgas".to_string()
            ]))
        );
        assert_eq!(
            table.column("Age"),
            Some(&ColumnData::Integer(vec![MISSING_INT, MISSING_INT]))
        );
        match table.column("LastAccessDate") {
            Some(ColumnData::Date(dates)) => {
                assert!(dates[0].is_some());
                assert!(dates[1].is_none());
            }
            other => panic!("unexpected column: {other:?}"),
        }
    }

    #[test]
    fn test_posts_conversion_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_file(temp_dir.path(), "Posts.xml", POSTS_XML);

        let summary = convert_file(&path, &ProcessOptions::new(), &NoopReporter).unwrap();
        let table = read_table(&summary.output).unwrap();

        let tags: BTreeSet<String> = ["c#", "floating-point"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            table.column("Tags"),
            Some(&ColumnData::TagSet(vec![tags, BTreeSet::new()]))
        );
        assert_eq!(
            table.column("Body"),
            Some(&ColumnData::Text(vec![
                "I want to use a track-bar".to_string(),
                "An explicit cast to double".to_string()
            ]))
        );
        assert_eq!(
            table.column("OwnerDisplayName"),
            Some(&ColumnData::Text(vec![String::new(), String::new()]))
        );
        assert_eq!(
            table.column("Title"),
            Some(&ColumnData::Text(vec![
                "Convert Decimal to Double?".to_string(),
                String::new()
            ]))
        );
        assert_eq!(
            table.column("ContentLicense"),
            Some(&ColumnData::Raw(vec![Some("CC BY-SA 4.0".to_string()), None]))
        );
        assert_eq!(
            table.column("ParentId"),
            Some(&ColumnData::Integer(vec![MISSING_INT, 4]))
        );
    }

    #[test]
    fn test_badges_booleans() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_file(temp_dir.path(), "Badges.xml", BADGES_XML);

        let summary = convert_file(&path, &ProcessOptions::new(), &NoopReporter).unwrap();
        let table = read_table(&summary.output).unwrap();

        assert_eq!(
            table.column("TagBased"),
            Some(&ColumnData::Boolean(vec![false, true]))
        );
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_file(temp_dir.path(), "Posts.xml", POSTS_XML);

        let first = convert_file(&path, &ProcessOptions::new(), &NoopReporter).unwrap();
        let first_bytes = fs::read(&first.output).unwrap();
        let second = convert_file(&path, &ProcessOptions::new(), &NoopReporter).unwrap();
        let second_bytes = fs::read(&second.output).unwrap();

        assert_eq!(first.output, second.output);
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn test_duplicate_ids_keep_first_row() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_file(
            temp_dir.path(),
            "Tags.xml",
            r#"<tags><row Id="1" TagName="first" /><row Id="1" TagName="second" /></tags>"#,
        );

        let summary = convert_file(&path, &ProcessOptions::new(), &NoopReporter).unwrap();
        let table = read_table(&summary.output).unwrap();

        assert_eq!(summary.dropped_duplicates, 1);
        assert_eq!(
            table.column("TagName"),
            Some(&ColumnData::Text(vec!["first".to_string()]))
        );
    }

    #[test]
    fn test_invalid_integer_fails_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_file(
            temp_dir.path(),
            "Votes.xml",
            r#"<votes><row Id="1" PostId="four" /></votes>"#,
        );

        let result = process_file(path.clone(), &ProcessOptions::new(), &NoopReporter);

        assert!(!result.is_success());
        assert_eq!(result.category, Some("InvalidInteger"));
        assert!(!temp_dir.path().join("votes.bin").exists());
    }

    #[test]
    fn test_unparseable_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_file(temp_dir.path(), "Comments.xml", "this is not xml");

        let result = process_file(path, &ProcessOptions::new(), &NoopReporter);

        assert_eq!(result.category, Some("NoRootElement"));
    }
}

mod dispatch_tests {
    use super::*;
    use sedump::{discover_entity_files, dispatch, NoopReporter, ProcessOptions};
    use walkdir::WalkDir;

    fn output_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir_files(dir)
            .into_iter()
            .filter(|p| p.extension().map(|e| e == "bin").unwrap_or(false))
            .collect();
        files.sort();
        files
    }

    fn walkdir_files(dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect()
    }

    #[test]
    fn test_end_to_end_single_worker() {
        let temp_dir = setup_dump_directory();
        let files = discover_entity_files(temp_dir.path());
        assert_eq!(files.len(), 2);

        let results = dispatch(files, 1, &ProcessOptions::new(), &NoopReporter).unwrap();

        assert!(results.iter().all(|r| r.is_success()));
        assert_eq!(
            output_files(temp_dir.path()),
            vec![
                temp_dir.path().join("badges.bin"),
                temp_dir.path().join("users.bin")
            ]
        );
        assert!(!temp_dir.path().join("readme.bin").exists());
    }

    #[test]
    fn test_worker_count_invariance() {
        let one = setup_full_dump_directory();
        let four = setup_full_dump_directory();

        let one_results = dispatch(
            discover_entity_files(one.path()),
            1,
            &ProcessOptions::new(),
            &NoopReporter,
        )
        .unwrap();
        let four_results = dispatch(
            discover_entity_files(four.path()),
            4,
            &ProcessOptions::new(),
            &NoopReporter,
        )
        .unwrap();

        assert!(one_results.iter().all(|r| r.is_success()));
        assert!(four_results.iter().all(|r| r.is_success()));

        let one_outputs = output_files(one.path());
        let four_outputs = output_files(four.path());
        assert_eq!(one_outputs.len(), 5);
        assert_eq!(one_outputs.len(), four_outputs.len());

        for (a, b) in one_outputs.iter().zip(&four_outputs) {
            assert_eq!(
                a.strip_prefix(one.path()).unwrap(),
                b.strip_prefix(four.path()).unwrap()
            );
            assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap(), "{:?}", a);
        }
    }

    #[test]
    fn test_failure_does_not_stop_other_files() {
        let temp_dir = setup_dump_directory();
        create_file(temp_dir.path(), "Votes.xml", "garbage without markup");

        let mut files = discover_entity_files(temp_dir.path());
        files.sort();
        let results = dispatch(files, 2, &ProcessOptions::new(), &NoopReporter).unwrap();

        let failed: Vec<_> = results.iter().filter(|r| !r.is_success()).collect();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].path.ends_with("Votes.xml"));
        assert!(temp_dir.path().join("users.bin").exists());
        assert!(temp_dir.path().join("badges.bin").exists());
    }
}

mod storage_tests {
    use super::*;
    use sedump::storage::output_path_for;
    use sedump::{convert_file, read_table, write_table, NoopReporter, ProcessOptions};

    #[test]
    fn test_round_trip_full_posts_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_file(temp_dir.path(), "Posts.xml", POSTS_XML);

        let summary = convert_file(&path, &ProcessOptions::new(), &NoopReporter).unwrap();
        let table = read_table(&summary.output).unwrap();

        let copy = temp_dir.path().join("copy.bin");
        write_table(&table, &copy).unwrap();
        assert_eq!(read_table(&copy).unwrap(), table);
    }

    #[test]
    fn test_custom_output_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_file(temp_dir.path(), "Badges.xml", BADGES_XML);

        let options = ProcessOptions::new().with_output_extension("tbl");
        let summary = convert_file(&path, &options, &NoopReporter).unwrap();

        assert_eq!(summary.output, output_path_for(&path, "tbl"));
        assert_eq!(summary.output, temp_dir.path().join("badges.tbl"));
    }
}

mod error_tests {
    use sedump::ConvertError;
    use std::path::PathBuf;

    #[test]
    fn test_error_display() {
        let error = ConvertError::InputNotFound {
            path: PathBuf::from("/nonexistent"),
        };
        assert!(error.to_string().contains("입력 폴더를 찾을 수 없습니다"));
    }

    #[test]
    fn test_parse_error_display() {
        let error = ConvertError::ParseError {
            file: PathBuf::from("Posts.xml"),
            reason: "unexpected EOF".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("XML 파싱 실패"));
        assert!(msg.contains("Posts.xml"));
        assert_eq!(error.category(), "ParseError");
    }
}
