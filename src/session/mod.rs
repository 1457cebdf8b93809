//! 연습 세션 진행과 기록

pub mod history;
pub mod practice;
pub mod record;
pub mod store;

pub use history::{
    aggregate_errors, problem_words, summarize, HistorySummary, PersonalBest, PersonalBests,
    Progress, Streak,
};
pub use practice::{PracticeError, PracticeSession, PracticeState, SessionOutcome};
pub use record::{day_number, now_ms, PracticeMode, SessionRecord};
pub use store::{JsonFileStore, MemoryStore, SessionStore, StoreError};
