//! hangul-coach - 한글 타자 연습 (터미널)

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};

use hangul_coach::analysis::{ranked_categories, recommend_drill};
use hangul_coach::config::{data_dir, load_config, CoachConfig};
use hangul_coach::content::{target_text, ContentProvider, PackLibrary, TestType};
use hangul_coach::core::keymap::next_key_hint;
use hangul_coach::session::{
    aggregate_errors, day_number, now_ms, problem_words, summarize, JsonFileStore,
    PracticeSession, PracticeState, Progress, SessionOutcome, SessionStore,
};

const DEFAULT_PACK: &str = "conversational";

#[derive(Debug, Parser)]
#[command(name = "hangul-coach")]
#[command(about = "한글 타자 연습", long_about = None)]
struct Cli {
    /// 생략하면 practice
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// 한 문장 받아쓰기
    Practice {
        /// 콘텐츠 팩 ID (기본: conversational)
        pack: Option<String>,
    },
    /// 최근 기록과 자주 틀리는 단어
    History,
    /// 콘텐츠 팩 목록
    Packs,
    /// 약점 유형과 추천 연습
    Drill,
}

fn main() {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config();

    let command = cli.command.unwrap_or(Command::Practice { pack: None });
    let result = match command {
        Command::Practice { pack } => practice(&config, pack.as_deref()),
        Command::History => history(&config),
        Command::Packs => packs(),
        Command::Drill => drill(&config),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("오류: {}", e);
        std::process::exit(1);
    }
}

fn store() -> JsonFileStore {
    JsonFileStore::new(data_dir().join("sessions.json"))
}

/// 한 문장 받아쓰기
fn practice(config: &CoachConfig, pack_id: Option<&str>) -> Result<(), Box<dyn Error>> {
    let library = PackLibrary::builtin();
    let pack_id = pack_id.unwrap_or(DEFAULT_PACK);
    let pack = library.get_pack(pack_id)?;
    let target = target_text(pack, TestType::Sentence, config.word_count_target)?;

    println!("[{}] {}", pack.title_ko, target);
    if config.keyboard_guide {
        if let Some(hint) = next_key_hint(&target, "") {
            let keys: String = hint.keys.iter().collect();
            let shift = if hint.needs_shift { " + Shift" } else { "" };
            println!("첫 글자 '{}': {}{}", hint.next_char, keys, shift);
        }
    }

    let mut session =
        PracticeSession::from_config(TestType::Sentence, target.as_str(), config, now_ms());
    while session.state() == PracticeState::Countdown {
        let now = now_ms();
        let remaining = session.countdown_remaining_secs(now);
        if remaining > 0 {
            print!("{}... ", remaining);
            io::stdout().flush()?;
            thread::sleep(Duration::from_millis(1000));
        }
        session.tick(now_ms());
    }
    println!("시작!");

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let typed = line.trim_end_matches(['\r', '\n']);

    let now = now_ms();
    let outcome = match session.input(typed, now)? {
        Some(outcome) => outcome,
        None => session.finish(now)?,
    };
    print_outcome(&outcome);

    let record = outcome.to_record(TestType::Sentence, Some(pack_id), now);
    let id = store().append(record)?;
    log::debug!("세션 #{} 저장", id);

    let progress_path = data_dir().join("progress.json");
    let mut progress = Progress::load(&progress_path);
    progress.streak.record(day_number(now));
    if progress.personal_bests.update(
        TestType::Sentence,
        outcome.score.wpm,
        outcome.score.accuracy,
        now,
    ) {
        println!("개인 최고 기록 갱신!");
    }
    progress.save(&progress_path)?;
    println!("연속 연습: {}일", progress.streak.count);

    Ok(())
}

fn print_outcome(outcome: &SessionOutcome) {
    let score = &outcome.score;
    let errors = &outcome.errors;
    println!();
    println!(
        "WPM {} | CPM {} | 정확도 {:.1}% | CER {:.3} | WER {:.3}",
        score.wpm,
        score.cpm,
        score.accuracy * 100.0,
        score.cer,
        score.wer
    );
    println!(
        "맞은 글자 {}/{} | 최대 연속 {}",
        score.correct_chars, score.total_chars, outcome.max_streak
    );
    println!(
        "띄어쓰기 {} | 자모 {} | 받침 {} | 모음 {} | 전체 {}",
        errors.spacing, errors.jamo, errors.batchim, errors.vowel, errors.total
    );
}

fn history(config: &CoachConfig) -> Result<(), Box<dyn Error>> {
    let records = store().query(config.history_limit)?;
    let Some(summary) = summarize(&records) else {
        println!("아직 연습 기록이 없습니다.");
        return Ok(());
    };

    println!(
        "최근 {}회: 평균 정확도 {:.1}% | 평균 WPM {:.1} | 최고 WPM {} | 오류 {}",
        summary.total_sessions,
        summary.avg_accuracy * 100.0,
        summary.avg_wpm,
        summary.best_wpm,
        summary.total_errors
    );
    for record in &records {
        println!(
            "#{} [{}] WPM {} 정확도 {:.1}% {}",
            record.id.unwrap_or(0),
            record.mode.label(),
            record.results.wpm,
            record.results.accuracy * 100.0,
            record.sentences.join(" / ")
        );
    }

    let words = problem_words(&records, 5);
    if !words.is_empty() {
        let list: Vec<String> = words
            .iter()
            .map(|(word, count)| format!("{}({})", word, count))
            .collect();
        println!("자주 틀리는 단어: {}", list.join(", "));
    }
    Ok(())
}

fn packs() -> Result<(), Box<dyn Error>> {
    let library = PackLibrary::builtin();
    for pack in library.list_packs() {
        println!(
            "{:<16} {} ({}, {:?}, {}단어)",
            pack.id,
            pack.title_ko,
            pack.title,
            pack.difficulty,
            pack.word_count()
        );
    }
    Ok(())
}

fn drill(config: &CoachConfig) -> Result<(), Box<dyn Error>> {
    let records = store().query(config.drill_history_window)?;
    let totals = aggregate_errors(&records);

    let Some(category) = recommend_drill(&totals) else {
        println!("추천할 약점이 없습니다. 계속 연습해 보세요!");
        return Ok(());
    };

    for (category, count) in ranked_categories(&totals) {
        println!("{}: {}", category.label(), count);
    }
    println!();
    println!("{}", category.description());
    println!("추천 팩: hangul-coach practice {}", category.recommended_pack());
    Ok(())
}
