//! 타자 속도/정확도 계산
//!
//! - CER: 문자 편집 거리 / 목표 길이
//! - WER: 단어 편집 거리 / 목표 단어 수
//! - WPM: (입력 문자 수 / 5) / 분, CPM: 입력 문자 수 / 분

use serde::{Deserialize, Serialize};

use crate::diff::align::{edit_distance, AlignmentOp};

/// 한 단어로 취급하는 문자 수 (WPM 계산용)
const CHARS_PER_WORD: f64 = 5.0;

/// 세션 결과 지표
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub wpm: u32,
    pub cpm: u32,
    /// 문자 오류율 (매우 긴 입력에서는 1을 넘을 수 있음)
    pub cer: f64,
    /// 단어 오류율
    pub wer: f64,
    /// 1 - CER, 0 미만은 0
    pub accuracy: f64,
    pub total_chars: usize,
    pub correct_chars: usize,
    pub error_count: usize,
}

impl ScoreResult {
    /// 맞춘 글자 비율 (퍼센트, 반올림)
    pub fn correct_percent(&self) -> u32 {
        if self.total_chars == 0 {
            return 0;
        }
        (self.correct_chars as f64 / self.total_chars as f64 * 100.0).round() as u32
    }
}

/// 경과 시간(ms)을 분으로 변환, 유효하지 않으면 None
fn elapsed_minutes(elapsed_ms: f64) -> Option<f64> {
    if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        Some(elapsed_ms / 1000.0 / 60.0)
    } else {
        None
    }
}

/// 입력 문자 수와 경과 시간으로 (WPM, CPM) 계산
/// 경과 시간이 0 이하이면 (0, 0)
pub fn typing_speed(typed_chars: usize, elapsed_ms: f64) -> (u32, u32) {
    match elapsed_minutes(elapsed_ms) {
        Some(minutes) => {
            let chars = typed_chars as f64;
            let wpm = (chars / CHARS_PER_WORD) / minutes;
            let cpm = chars / minutes;
            (wpm.round() as u32, cpm.round() as u32)
        }
        None => (0, 0),
    }
}

/// 단어 오류율
///
/// 목표 단어가 없으면 입력 단어가 있을 때 1, 없을 때 0
pub fn word_error_rate(expected: &str, actual: &str) -> f64 {
    let expected_words: Vec<&str> = expected.split_whitespace().collect();
    let actual_words: Vec<&str> = actual.split_whitespace().collect();

    if expected_words.is_empty() {
        return if actual_words.is_empty() { 0.0 } else { 1.0 };
    }

    edit_distance(&expected_words, &actual_words) as f64 / expected_words.len() as f64
}

/// 세션 점수 계산
///
/// 정렬 결과가 주어지면 재사용하고, 없으면 거리만 따로 계산합니다.
pub fn score(
    expected: &str,
    actual: &str,
    elapsed_ms: f64,
    alignment: Option<&[AlignmentOp]>,
) -> ScoreResult {
    let total_chars = expected.chars().count();
    let typed_chars = actual.chars().count();

    let (distance, correct_chars) = match alignment {
        Some(ops) => {
            let correct = ops.iter().filter(|op| op.is_equal()).count();
            (ops.len() - correct, correct)
        }
        None => {
            let e: Vec<char> = expected.chars().collect();
            let a: Vec<char> = actual.chars().collect();
            let distance = edit_distance(&e, &a);
            (distance, total_chars.saturating_sub(distance))
        }
    };

    let cer = if total_chars > 0 {
        distance as f64 / total_chars as f64
    } else {
        0.0
    };
    let accuracy = (1.0 - cer).max(0.0);
    let (wpm, cpm) = typing_speed(typed_chars, elapsed_ms);
    let wer = word_error_rate(expected, actual);

    log::debug!(
        "점수 계산: 거리 {}, CER {:.3}, WER {:.3}, WPM {}",
        distance,
        cer,
        wer,
        wpm
    );

    ScoreResult {
        wpm,
        cpm,
        cer,
        wer,
        accuracy,
        total_chars,
        correct_chars,
        error_count: distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::align;

    #[test]
    fn test_perfect_one_minute() {
        let result = score("가나다", "가나다", 60_000.0, None);
        assert_eq!(result.wpm, 1); // round(0.6)
        assert_eq!(result.cpm, 3);
        assert!((result.accuracy - 1.0).abs() < f64::EPSILON);
        assert_eq!(result.error_count, 0);
        assert_eq!(result.correct_chars, 3);
        assert_eq!(result.total_chars, 3);
        assert_eq!(result.wer, 0.0);
    }

    #[test]
    fn test_zero_elapsed() {
        let result = score("가나다", "가나", 0.0, None);
        assert_eq!(result.wpm, 0);
        assert_eq!(result.cpm, 0);
        let negative = score("가나다", "가나", -5.0, None);
        assert_eq!(negative.cpm, 0);
        let nan = score("가나다", "가나", f64::NAN, None);
        assert_eq!(nan.wpm, 0);
    }

    #[test]
    fn test_precomputed_alignment_matches_inline() {
        let pairs = [("안녕하세요", "안냥하세오"), ("가나 다라", "가나다라마"), ("", "")];
        for (expected, actual) in pairs {
            let ops = align(expected, actual);
            let with = score(expected, actual, 30_000.0, Some(&ops));
            let without = score(expected, actual, 30_000.0, None);
            assert_eq!(with.error_count, without.error_count);
            assert_eq!(with.cer, without.cer);
        }
    }

    #[test]
    fn test_correct_chars_by_path() {
        // 정렬이 있으면 일치 연산 수, 없으면 목표 길이 - 거리
        let (expected, actual) = ("가나 다라", "가나다라마");
        let ops = align(expected, actual);
        assert_eq!(score(expected, actual, 1000.0, Some(&ops)).correct_chars, 4);
        assert_eq!(score(expected, actual, 1000.0, None).correct_chars, 3);
    }

    #[test]
    fn test_cer_and_accuracy() {
        let result = score("안녕", "안뇽", 60_000.0, None);
        assert_eq!(result.error_count, 1);
        assert!((result.cer - 0.5).abs() < 1e-9);
        assert!((result.accuracy - 0.5).abs() < 1e-9);
        assert_eq!(result.correct_percent(), 50);
    }

    #[test]
    fn test_cer_can_exceed_one() {
        let result = score("가", "나다라마", 60_000.0, None);
        assert_eq!(result.error_count, 4);
        assert!((result.cer - 4.0).abs() < 1e-9);
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.correct_chars, 0);
    }

    #[test]
    fn test_empty_expected() {
        let result = score("", "안녕", 1000.0, None);
        assert_eq!(result.cer, 0.0);
        assert_eq!(result.wer, 1.0);
        assert_eq!(result.total_chars, 0);
        assert_eq!(result.correct_percent(), 0);

        let both_empty = score("", "   ", 1000.0, None);
        assert_eq!(both_empty.wer, 0.0);
    }

    #[test]
    fn test_word_error_rate() {
        assert_eq!(word_error_rate("나는 학교에 간다", "나는 학교애 간다"), 1.0 / 3.0);
        assert_eq!(word_error_rate("  나는   간다 ", "나는 간다"), 0.0);
        assert_eq!(word_error_rate("나는 간다", ""), 1.0);
        assert_eq!(word_error_rate("가", "가 나 다"), 2.0);
    }

    #[test]
    fn test_typing_speed() {
        assert_eq!(typing_speed(300, 60_000.0), (60, 300));
        assert_eq!(typing_speed(150, 30_000.0), (60, 300));
        assert_eq!(typing_speed(10, 0.0), (0, 0));
    }
}
