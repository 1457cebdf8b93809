//! 세션 기록

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::analysis::ErrorAnalysis;
use crate::content::TestType;
use crate::scoring::ScoreResult;

/// 하루의 밀리초
const MS_PER_DAY: u64 = 86_400_000;

/// 연습 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeMode {
    /// 받아쓰기 (한 문장)
    Dictation,
    /// 속도 연습
    Speed,
    /// 약점 드릴
    Drill,
}

impl PracticeMode {
    /// 연습 방식에 해당하는 기록 종류
    pub fn for_test_type(test_type: TestType) -> Self {
        match test_type {
            TestType::Sentence => PracticeMode::Dictation,
            TestType::Timed | TestType::WordCount => PracticeMode::Speed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PracticeMode::Dictation => "받아쓰기",
            PracticeMode::Speed => "타이핑",
            PracticeMode::Drill => "드릴",
        }
    }
}

/// 저장되는 세션 기록 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// 저장소가 부여 (저장 전에는 None)
    #[serde(default)]
    pub id: Option<u64>,
    pub mode: PracticeMode,
    #[serde(default)]
    pub test_type: Option<TestType>,
    #[serde(default)]
    pub pack_id: Option<String>,
    /// 연습한 목표 문장
    pub sentences: Vec<String>,
    /// 문장별 입력 (이전 기록에는 없을 수 있음)
    #[serde(default)]
    pub typed: Vec<String>,
    pub results: ScoreResult,
    pub errors: ErrorAnalysis,
    /// 생성 시각 (UNIX epoch ms)
    pub created_at: u64,
}

/// 현재 시각 (UNIX epoch ms)
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// UTC 기준 날짜 번호 (epoch 이후 일 수)
pub fn day_number(timestamp_ms: u64) -> u64 {
    timestamp_ms / MS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_for_test_type() {
        assert_eq!(PracticeMode::for_test_type(TestType::Sentence), PracticeMode::Dictation);
        assert_eq!(PracticeMode::for_test_type(TestType::Timed), PracticeMode::Speed);
        assert_eq!(PracticeMode::for_test_type(TestType::WordCount), PracticeMode::Speed);
        assert_eq!(PracticeMode::Drill.label(), "드릴");
    }

    #[test]
    fn test_day_number() {
        assert_eq!(day_number(0), 0);
        assert_eq!(day_number(MS_PER_DAY - 1), 0);
        assert_eq!(day_number(MS_PER_DAY), 1);
        assert!(now_ms() > 0);
    }

    #[test]
    fn test_backward_compat_missing_fields() {
        // typed, id, testType, packId 없는 이전 형식
        let json = r#"{
            "mode": "dictation",
            "sentences": ["안녕"],
            "results": {
                "wpm": 10, "cpm": 50, "cer": 0.0, "wer": 0.0, "accuracy": 1.0,
                "totalChars": 2, "correctChars": 2, "errorCount": 0
            },
            "errors": { "spacing": 0, "jamo": 0, "batchim": 0, "vowel": 0, "total": 0 },
            "createdAt": 1000
        }"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, None);
        assert!(record.typed.is_empty());
        assert_eq!(record.results.correct_chars, 2);
    }
}
