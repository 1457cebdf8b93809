//! 입력 오류 분석
//!
//! 정렬 결과를 띄어쓰기/자모/받침/모음 오류로 분류하고,
//! 누적 결과로 연습 유형을 추천합니다.

mod classifier;
mod confusion;
pub mod drills;

pub use classifier::{classify, ErrorAnalysis};
pub use confusion::{is_batchim_confusion, is_vowel_confusion};
pub use drills::{ranked_categories, recommend_drill, ErrorCategory};
