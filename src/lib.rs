pub mod analysis;
pub mod config;
pub mod content;
pub mod core;
pub mod diff;
pub mod scoring;
pub mod session;

pub use analysis::{classify, recommend_drill, ErrorAnalysis, ErrorCategory};
pub use crate::core::{decompose, is_syllable, DecomposedSyllable};
pub use diff::{align, AlignmentOp};
pub use scoring::{score, ScoreResult};
