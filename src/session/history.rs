//! 연습 기록 통계
//!
//! 요약, 개인 최고 기록, 연속 연습일, 자주 틀리는 단어를 계산합니다.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::ErrorAnalysis;
use crate::content::TestType;
use crate::diff::align::{align_seq, AlignmentOp};

use super::record::SessionRecord;
use super::store::{write_json_atomic, StoreError};

/// 기록 요약
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total_sessions: usize,
    pub avg_accuracy: f64,
    pub avg_wpm: f64,
    pub best_wpm: u32,
    pub best_accuracy: f64,
    pub total_errors: u32,
}

/// 기록 요약 (기록이 없으면 None)
pub fn summarize(records: &[SessionRecord]) -> Option<HistorySummary> {
    if records.is_empty() {
        return None;
    }

    let count = records.len() as f64;
    let summary = HistorySummary {
        total_sessions: records.len(),
        avg_accuracy: records.iter().map(|r| r.results.accuracy).sum::<f64>() / count,
        avg_wpm: records.iter().map(|r| r.results.wpm as f64).sum::<f64>() / count,
        best_wpm: records.iter().map(|r| r.results.wpm).max().unwrap_or(0),
        best_accuracy: records
            .iter()
            .map(|r| r.results.accuracy)
            .fold(0.0, f64::max),
        total_errors: records.iter().map(|r| r.errors.total).sum(),
    };
    Some(summary)
}

/// 전체 기록의 오류 카운터 합
pub fn aggregate_errors(records: &[SessionRecord]) -> ErrorAnalysis {
    records
        .iter()
        .fold(ErrorAnalysis::default(), |acc, r| acc + r.errors)
}

/// 연습 방식별 최고 기록
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalBest {
    pub wpm: u32,
    pub accuracy: f64,
    /// 기록 시각 (UNIX epoch ms)
    pub date: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonalBests {
    bests: HashMap<TestType, PersonalBest>,
}

impl PersonalBests {
    pub fn get(&self, test_type: TestType) -> Option<&PersonalBest> {
        self.bests.get(&test_type)
    }

    /// 최고 기록 갱신
    ///
    /// WPM이나 정확도 중 하나라도 오르면 true. 저장값은 항목별 최댓값입니다.
    pub fn update(&mut self, test_type: TestType, wpm: u32, accuracy: f64, date: u64) -> bool {
        match self.bests.get_mut(&test_type) {
            None => {
                self.bests.insert(test_type, PersonalBest { wpm, accuracy, date });
                true
            }
            Some(best) => {
                let improved = wpm > best.wpm || accuracy > best.accuracy;
                if improved {
                    best.wpm = best.wpm.max(wpm);
                    best.accuracy = best.accuracy.max(accuracy);
                    best.date = date;
                }
                improved
            }
        }
    }
}

/// 연속 연습일 (날짜는 UTC 날짜 번호)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub count: u32,
    pub last_day: Option<u64>,
}

impl Streak {
    /// 연습한 날 기록
    pub fn record(&mut self, day: u64) {
        self.count = match self.last_day {
            Some(last) if last == day => return,
            Some(last) if last + 1 == day => self.count + 1,
            _ => 1,
        };
        self.last_day = Some(day);
    }
}

/// 누적 진행 상황 (progress.json)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default)]
    pub personal_bests: PersonalBests,
    #[serde(default)]
    pub streak: Streak,
}

impl Progress {
    /// 파일 로드 (없거나 손상되면 기본값)
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("진행 상황 읽기 실패 ({}): {}", path.display(), e);
                }
                return Self::default();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("진행 상황 파싱 실패, 기본값 사용: {}", e);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json_atomic(path, self)
    }
}

/// 자주 틀리는 단어
///
/// 기록마다 목표 문장과 입력을 단어 단위로 정렬해, 바뀌거나 빠진
/// 목표 단어를 하나씩 셉니다. 많은 순, 같으면 단어 순.
pub fn problem_words(records: &[SessionRecord], limit: usize) -> Vec<(String, u32)> {
    let mut counts: HashMap<&str, u32> = HashMap::new();

    for record in records {
        for (sentence, typed) in record.sentences.iter().zip(&record.typed) {
            let expected: Vec<&str> = sentence.split_whitespace().collect();
            let actual: Vec<&str> = typed.split_whitespace().collect();

            for op in align_seq(&expected, &actual) {
                if let AlignmentOp::Substitute(_, word) | AlignmentOp::Delete(word) = op {
                    *counts.entry(word).or_insert(0) += 1;
                }
            }
        }
    }

    let mut ranked: Vec<(String, u32)> = counts
        .into_iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify;
    use crate::diff::align::align;
    use crate::scoring::score;
    use crate::session::record::PracticeMode;

    fn record(target: &str, typed: &str, elapsed_ms: f64) -> SessionRecord {
        let ops = align(target, typed);
        SessionRecord {
            id: None,
            mode: PracticeMode::Dictation,
            test_type: Some(TestType::Sentence),
            pack_id: None,
            sentences: vec![target.to_string()],
            typed: vec![typed.to_string()],
            results: score(target, typed, elapsed_ms, Some(&ops)),
            errors: classify(&ops),
            created_at: 0,
        }
    }

    #[test]
    fn test_summarize() {
        assert_eq!(summarize(&[]), None);

        let records = vec![
            record("가나다라마", "가나다라마", 60_000.0),
            record("안녕", "안뇽", 60_000.0),
        ];
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.total_sessions, 2);
        assert!((summary.avg_accuracy - 0.75).abs() < 1e-9);
        assert_eq!(summary.best_wpm, 1);
        assert!((summary.best_accuracy - 1.0).abs() < 1e-9);
        assert_eq!(summary.total_errors, 1);
    }

    #[test]
    fn test_aggregate_errors() {
        let records = vec![record("안녕", "안뇽", 1000.0), record("가 나", "가나", 1000.0)];
        let total = aggregate_errors(&records);
        assert_eq!(total.jamo, 1);
        assert_eq!(total.spacing, 1);
        // 띄어쓰기는 total에 포함되지 않음
        assert_eq!(total.total, 1);
    }

    #[test]
    fn test_personal_bests() {
        let mut bests = PersonalBests::default();
        assert!(bests.update(TestType::Timed, 40, 0.9, 1));
        assert!(!bests.update(TestType::Timed, 30, 0.8, 2));
        // 정확도만 올라도 갱신, WPM은 최댓값 유지
        assert!(bests.update(TestType::Timed, 35, 0.95, 3));

        let best = bests.get(TestType::Timed).unwrap();
        assert_eq!(best.wpm, 40);
        assert!((best.accuracy - 0.95).abs() < 1e-9);
        assert_eq!(best.date, 3);
        assert!(bests.get(TestType::Sentence).is_none());
    }

    #[test]
    fn test_streak() {
        let mut streak = Streak::default();
        streak.record(10);
        assert_eq!(streak.count, 1);
        streak.record(10);
        assert_eq!(streak.count, 1);
        streak.record(11);
        streak.record(12);
        assert_eq!(streak.count, 3);
        streak.record(20);
        assert_eq!(streak.count, 1);
        assert_eq!(streak.last_day, Some(20));
    }

    #[test]
    fn test_progress_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        assert_eq!(Progress::load(&path), Progress::default());

        let mut progress = Progress::default();
        progress.personal_bests.update(TestType::WordCount, 55, 0.97, 100);
        progress.streak.record(5);
        progress.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("word-count"));
        assert_eq!(Progress::load(&path), progress);

        fs::write(&path, "{ broken").unwrap();
        assert_eq!(Progress::load(&path), Progress::default());
    }

    #[test]
    fn test_problem_words() {
        let records = vec![
            record("나는 학교에 간다", "나는 학교애 간다", 1000.0),
            record("학교에 가자", "학교애 가자", 1000.0),
            record("밥을 먹자", "밥을", 1000.0),
        ];

        let words = problem_words(&records, 10);
        assert_eq!(
            words,
            vec![("학교에".to_string(), 2), ("먹자".to_string(), 1)]
        );
        assert_eq!(problem_words(&records, 1).len(), 1);
    }

    #[test]
    fn test_problem_words_without_typed() {
        let mut old = record("가나", "다라", 1000.0);
        old.typed.clear();
        assert!(problem_words(&[old], 5).is_empty());
    }
}
