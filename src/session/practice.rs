//! 연습 세션 상태 머신
//!
//! 상태: Countdown → Running ⇄ Paused → Finished
//!
//! 내부 타이머는 없습니다. 모든 전이는 호출자가 넘겨주는 시각(ms)으로
//! 계산하므로 UI 이벤트 루프 어디서든 그대로 호출할 수 있습니다.

use crate::analysis::{classify, ErrorAnalysis};
use crate::config::CoachConfig;
use crate::content::TestType;
use crate::diff::align::{align, AlignmentOp};
use crate::scoring::{score, typing_speed, ScoreResult};

use super::record::{PracticeMode, SessionRecord};

/// Timed 모드 기본 제한 시간 (초)
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 60;

/// 세션 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeState {
    Countdown,
    Running,
    Paused,
    Finished,
}

/// 잘못된 상태에서의 호출
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeError {
    /// 진행 중이 아님
    NotRunning,
    /// 일시정지 상태가 아님
    NotPaused,
    /// 카운트다운 상태가 아님
    NotInCountdown,
    /// 아직 카운트다운 중
    CountdownPending,
    /// 이미 종료됨
    AlreadyFinished,
}

impl std::fmt::Display for PracticeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            PracticeError::NotRunning => "연습이 진행 중이 아닙니다",
            PracticeError::NotPaused => "일시정지 상태가 아닙니다",
            PracticeError::NotInCountdown => "카운트다운 상태가 아닙니다",
            PracticeError::CountdownPending => "아직 카운트다운 중입니다",
            PracticeError::AlreadyFinished => "이미 끝난 연습입니다",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for PracticeError {}

/// 종료된 세션의 결과
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub target: String,
    pub typed: String,
    pub elapsed_ms: u64,
    pub alignment: Vec<AlignmentOp>,
    pub score: ScoreResult,
    pub errors: ErrorAnalysis,
    pub max_streak: u32,
}

impl SessionOutcome {
    /// 목표/입력으로 결과 계산 (정렬은 한 번만 수행)
    pub fn evaluate(target: &str, typed: &str, elapsed_ms: u64) -> Self {
        let alignment = align(target, typed);
        let score = score(target, typed, elapsed_ms as f64, Some(&alignment));
        let errors = classify(&alignment);
        log::debug!("세션 결과: {:?} / {:?}", score, errors);

        Self {
            target: target.to_string(),
            typed: typed.to_string(),
            elapsed_ms,
            alignment,
            score,
            errors,
            max_streak: 0,
        }
    }

    /// 저장용 기록 생성
    pub fn to_record(
        &self,
        test_type: TestType,
        pack_id: Option<&str>,
        created_at: u64,
    ) -> SessionRecord {
        SessionRecord {
            id: None,
            mode: PracticeMode::for_test_type(test_type),
            test_type: Some(test_type),
            pack_id: pack_id.map(str::to_string),
            sentences: vec![self.target.clone()],
            typed: vec![self.typed.clone()],
            results: self.score,
            errors: self.errors,
            created_at,
        }
    }
}

/// 연습 세션 하나
#[derive(Debug, Clone)]
pub struct PracticeSession {
    test_type: TestType,
    target: String,
    typed: String,
    state: PracticeState,
    created_at: u64,
    countdown_ms: u64,
    time_limit_ms: Option<u64>,
    started_at: Option<u64>,
    paused_at: Option<u64>,
    paused_total: u64,
    finished_elapsed: Option<u64>,
    streak: u32,
    max_streak: u32,
}

impl PracticeSession {
    /// 새 세션 (카운트다운이 0이면 바로 Running)
    ///
    /// Timed 모드는 기본 제한 시간 60초로 시작합니다.
    pub fn new(
        test_type: TestType,
        target: impl Into<String>,
        countdown_secs: u64,
        now_ms: u64,
    ) -> Self {
        let countdown_ms = countdown_secs * 1000;
        let time_limit_ms =
            (test_type == TestType::Timed).then_some(DEFAULT_TIME_LIMIT_SECS * 1000);
        let mut session = Self {
            test_type,
            target: target.into(),
            typed: String::new(),
            state: PracticeState::Countdown,
            created_at: now_ms,
            countdown_ms,
            time_limit_ms,
            started_at: None,
            paused_at: None,
            paused_total: 0,
            finished_elapsed: None,
            streak: 0,
            max_streak: 0,
        };
        if countdown_ms == 0 {
            session.begin(now_ms);
        }
        session
    }

    /// 사용자 설정의 카운트다운과 제한 시간으로 새 세션
    pub fn from_config(
        test_type: TestType,
        target: impl Into<String>,
        config: &CoachConfig,
        now_ms: u64,
    ) -> Self {
        Self::new(test_type, target, config.countdown_secs, now_ms)
            .with_time_limit(config.timed_duration_secs)
    }

    /// 제한 시간 설정 (Timed 모드에서만 의미 있음, 0이면 기본값)
    pub fn with_time_limit(mut self, secs: u64) -> Self {
        let secs = if secs == 0 { DEFAULT_TIME_LIMIT_SECS } else { secs };
        self.time_limit_ms = Some(secs * 1000);
        self
    }

    pub fn state(&self) -> PracticeState {
        self.state
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn test_type(&self) -> TestType {
        self.test_type
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    fn begin(&mut self, at_ms: u64) {
        self.state = PracticeState::Running;
        self.started_at = Some(at_ms);
    }

    /// 카운트다운 남은 초 (올림)
    pub fn countdown_remaining_secs(&self, now_ms: u64) -> u64 {
        if self.state != PracticeState::Countdown {
            return 0;
        }
        let end = self.created_at + self.countdown_ms;
        end.saturating_sub(now_ms).div_ceil(1000)
    }

    /// 시간 경과 반영
    ///
    /// 카운트다운이 끝나면 Running으로, 제한 시간이 지나면 종료 후 결과 반환
    pub fn tick(&mut self, now_ms: u64) -> Option<SessionOutcome> {
        match self.state {
            PracticeState::Countdown => {
                let end = self.created_at + self.countdown_ms;
                if now_ms >= end {
                    self.begin(end);
                }
                None
            }
            PracticeState::Running if self.time_is_up(now_ms) => self.finish(now_ms).ok(),
            _ => None,
        }
    }

    /// 카운트다운 건너뛰기
    pub fn start(&mut self, now_ms: u64) -> Result<(), PracticeError> {
        match self.state {
            PracticeState::Countdown => {
                self.begin(now_ms);
                Ok(())
            }
            PracticeState::Finished => Err(PracticeError::AlreadyFinished),
            _ => Err(PracticeError::NotInCountdown),
        }
    }

    pub fn pause(&mut self, now_ms: u64) -> Result<(), PracticeError> {
        match self.state {
            PracticeState::Running => {
                self.state = PracticeState::Paused;
                self.paused_at = Some(now_ms);
                Ok(())
            }
            PracticeState::Finished => Err(PracticeError::AlreadyFinished),
            _ => Err(PracticeError::NotRunning),
        }
    }

    pub fn resume(&mut self, now_ms: u64) -> Result<(), PracticeError> {
        match (self.state, self.paused_at) {
            (PracticeState::Paused, Some(paused_at)) => {
                self.paused_total += now_ms.saturating_sub(paused_at);
                self.paused_at = None;
                self.state = PracticeState::Running;
                Ok(())
            }
            (PracticeState::Finished, _) => Err(PracticeError::AlreadyFinished),
            _ => Err(PracticeError::NotPaused),
        }
    }

    /// 일시정지 시간을 뺀 경과 시간
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if let Some(elapsed) = self.finished_elapsed {
            return elapsed;
        }
        let Some(started) = self.started_at else {
            return 0;
        };
        let until = match self.state {
            PracticeState::Paused => self.paused_at.unwrap_or(now_ms),
            _ => now_ms,
        };
        until
            .saturating_sub(started)
            .saturating_sub(self.paused_total)
    }

    /// 제한 시간 남은 ms (제한이 없으면 None)
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        if self.test_type != TestType::Timed {
            return None;
        }
        self.time_limit_ms
            .map(|limit| limit.saturating_sub(self.elapsed_ms(now_ms)))
    }

    fn time_is_up(&self, now_ms: u64) -> bool {
        self.remaining_ms(now_ms) == Some(0)
    }

    /// 진행 중 WPM
    pub fn live_wpm(&self, now_ms: u64) -> u32 {
        typing_speed(self.typed.chars().count(), self.elapsed_ms(now_ms) as f64).0
    }

    /// 입력 버퍼 갱신
    ///
    /// 자동 종료 조건을 만족하면 종료하고 결과를 돌려줍니다.
    /// - Sentence / WordCount: 입력 길이가 목표 길이 이상
    /// - Timed: 제한 시간 경과
    pub fn input(
        &mut self,
        text: &str,
        now_ms: u64,
    ) -> Result<Option<SessionOutcome>, PracticeError> {
        match self.state {
            PracticeState::Running => {}
            PracticeState::Countdown => return Err(PracticeError::CountdownPending),
            PracticeState::Paused => return Err(PracticeError::NotRunning),
            PracticeState::Finished => return Err(PracticeError::AlreadyFinished),
        }

        if self.time_is_up(now_ms) {
            return self.finish(now_ms).map(Some);
        }

        self.typed = text.to_string();
        self.update_streak();

        let typed_len = self.typed.chars().count();
        let target_len = self.target.chars().count();
        let reached_end = matches!(self.test_type, TestType::Sentence | TestType::WordCount)
            && typed_len >= target_len;

        if reached_end {
            return self.finish(now_ms).map(Some);
        }
        Ok(None)
    }

    /// 마지막 글자가 맞으면 연속 카운트 증가, 틀리면 초기화
    fn update_streak(&mut self) {
        let Some(last) = self.typed.chars().last() else {
            return;
        };
        let index = self.typed.chars().count() - 1;
        if self.target.chars().nth(index) == Some(last) {
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
    }

    /// 세션 종료 및 결과 계산
    pub fn finish(&mut self, now_ms: u64) -> Result<SessionOutcome, PracticeError> {
        match self.state {
            PracticeState::Countdown => return Err(PracticeError::CountdownPending),
            PracticeState::Finished => return Err(PracticeError::AlreadyFinished),
            PracticeState::Running | PracticeState::Paused => {}
        }

        let mut elapsed = self.elapsed_ms(now_ms);
        if let Some(limit) = self.time_limit_ms.filter(|_| self.test_type == TestType::Timed) {
            elapsed = elapsed.min(limit);
        }
        self.finished_elapsed = Some(elapsed);
        self.state = PracticeState::Finished;

        let mut outcome = SessionOutcome::evaluate(&self.target, &self.typed, elapsed);
        outcome.max_streak = self.max_streak;
        Ok(outcome)
    }
}
