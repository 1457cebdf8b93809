//! 한글 음절 처리 핵심 모듈

pub mod keymap;
pub mod unicode;

pub use unicode::{compose, decompose, is_syllable, is_syllable_str, DecomposedSyllable};
