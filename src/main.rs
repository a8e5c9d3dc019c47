//! sedump - STACK EXCHANGE DUMP CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;

use sedump::{
    cli::Args,
    discovery::discover_entity_files,
    dispatch::dispatch,
    logging::init_logging,
    processor::{ConversionResult, ProcessOptions},
    report::{Event, LogReporter, Reporter, TIMER_TARGET},
    stats::Statistics,
};

/// 로그를 남기면서 진행률 바를 올리는 수신자
struct ProgressReporter<'a> {
    inner: LogReporter,
    pb: &'a ProgressBar,
}

impl Reporter for ProgressReporter<'_> {
    fn report(&self, event: &Event<'_>) {
        self.inner.report(event);
        if matches!(event, Event::Finished { .. } | Event::Failed { .. }) {
            self.pb.inc(1);
        }
    }
}

fn main() -> Result<()> {
    let started = Instant::now();
    let args = Args::parse();

    // 로거 설정 (터미널이면 진행률 바와 연동)
    let multi = MultiProgress::new();
    let interactive = std::io::stderr().is_terminal();
    init_logging(interactive.then_some(&multi));

    // 입력 폴더 확인
    validate_input(&args)?;

    // 헤더 출력
    print_header(&args);

    // 덤프 파일 수집
    let xml_files = discover_entity_files(&args.root);

    if xml_files.is_empty() {
        println!("{}", "⚠️ 처리할 덤프 XML 파일이 없습니다.".yellow());
        return Ok(());
    }

    println!(
        "  {} 발견된 파일 수: {}",
        "📋".bright_white(),
        xml_files.len().to_string().bright_green()
    );

    // 통계 초기화
    let stats = Statistics::new(xml_files.len());

    // 병렬 처리
    println!("\n{}", "⚡ 병렬 변환 중...".bright_cyan());

    let pb = multi.add(create_progress_bar(xml_files.len()));
    let reporter = ProgressReporter {
        inner: LogReporter,
        pb: &pb,
    };

    let results = dispatch(
        xml_files,
        args.workers.get(),
        &ProcessOptions::new(),
        &reporter,
    )
    .context("워커 풀 실행 실패")?;

    pb.finish_with_message("완료!");

    for result in &results {
        stats.record(result);
    }

    // 결과 출력
    print_outputs(&results);
    print_failures(&results);

    // 통계 출력
    stats.print_summary();

    log::info!(
        target: TIMER_TARGET,
        "프로그램 전체 실행에 {:.2}초 걸렸습니다",
        started.elapsed().as_secs_f64()
    );

    let failed = stats.get_error_count();
    if failed > 0 {
        anyhow::bail!("{} 개 중 {} 개 파일 변환 실패", stats.total_files, failed);
    }

    println!("\n{} 변환 완료!\n", "✅".bright_green());

    Ok(())
}

/// 입력 경로 유효성 검사
fn validate_input(args: &Args) -> Result<()> {
    if !args.root.exists() {
        anyhow::bail!("입력 폴더가 존재하지 않습니다: {:?}", args.root);
    }

    if !args.root.is_dir() {
        anyhow::bail!("입력 경로가 폴더가 아닙니다: {:?}", args.root);
    }

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🚀 STACK EXCHANGE DUMP CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 폴더: {:?}", "📂".bright_cyan(), args.root);
    println!("  {} 워커 수: {}", "⚙️".bright_yellow(), args.workers);
    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░");
    pb.set_style(style);
    pb
}

/// 저장된 출력 파일 목록
fn print_outputs(results: &[ConversionResult]) {
    let saved: Vec<(&PathBuf, usize)> = results
        .iter()
        .filter_map(|r| r.output.as_ref().map(|output| (output, r.rows)))
        .collect();
    if saved.is_empty() {
        return;
    }

    println!("\n{}", "💾 저장된 파일:".bright_cyan());
    for (output, rows) in saved {
        println!("  {} {:?} ({} 행)", "✓".green(), output, rows);
    }
}

/// 실패 파일 목록
fn print_failures(results: &[ConversionResult]) {
    let failures: Vec<&ConversionResult> = results.iter().filter(|r| !r.is_success()).collect();
    if failures.is_empty() {
        return;
    }

    println!("\n{}", "❌ 오류 발생 파일:".bright_red());
    for result in failures {
        println!(
            "  {} {:?} [{}]",
            "•".red(),
            result.path,
            result.category.unwrap_or("Unknown")
        );
        if let Some(ref error) = result.error {
            println!("    {}", error.dimmed());
        }
    }
}
