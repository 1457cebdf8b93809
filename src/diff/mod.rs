//! 목표 텍스트와 입력 텍스트의 정렬

pub mod align;

pub use align::{align, align_seq, distance, edit_distance, AlignmentOp};
