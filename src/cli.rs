//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// sedump CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "sedump",
    author = "YourName <your@email.com>",
    version,
    about = "STACK EXCHANGE DUMP CONVERTER - 덤프 XML 파일들을 타입이 지정된 테이블 파일로 변환",
    long_about = r#"
STACK EXCHANGE DUMP CONVERTER
=============================

지정된 폴더를 재귀적으로 탐색하여 덤프 XML 파일
(Badges, Comments, PostHistory, PostLinks, Posts, Tags, Users, Votes)을
찾고, 각 파일을 타입이 정규화된 테이블 파일로 변환합니다.
출력 파일은 입력 파일 옆에 소문자 이름으로 저장됩니다 (예: Users.xml → users.bin).

로그 레벨은 RUST_LOG 환경 변수로 조정합니다 (예: RUST_LOG=timer=info,parser=warn).

예제:
  sedump ./dumps/stackoverflow 4
  RUST_LOG=warn sedump ./dumps 1
"#
)]
pub struct Args {
    /// 덤프 XML 파일들이 있는 루트 폴더 경로
    pub root: PathBuf,

    /// 병렬 처리 워커 수 (1 이상)
    pub workers: NonZeroUsize,
}
