//! 정렬 결과를 오류 유형별로 분류
//!
//! - 공백 삽입/삭제 → spacing
//! - 그 외 삽입/삭제 → total
//! - 치환 → total 1 증가 후, 양쪽이 한글이면 자모 자리별로 독립 판정
//!   (중성: vowel 또는 jamo, 종성: batchim 또는 jamo, 초성: jamo)
//!
//! 치환 하나가 여러 카운터를 올릴 수 있으므로
//! total은 네 카운터의 합과 같지 않을 수 있습니다.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use super::confusion::{is_batchim_confusion, is_vowel_confusion};
use crate::core::unicode::decompose;
use crate::diff::align::AlignmentOp;

/// 오류 유형별 카운터
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorAnalysis {
    pub spacing: u32,
    pub jamo: u32,
    pub batchim: u32,
    pub vowel: u32,
    pub total: u32,
}

impl Add for ErrorAnalysis {
    type Output = ErrorAnalysis;

    fn add(self, rhs: ErrorAnalysis) -> ErrorAnalysis {
        ErrorAnalysis {
            spacing: self.spacing + rhs.spacing,
            jamo: self.jamo + rhs.jamo,
            batchim: self.batchim + rhs.batchim,
            vowel: self.vowel + rhs.vowel,
            total: self.total + rhs.total,
        }
    }
}

impl AddAssign for ErrorAnalysis {
    fn add_assign(&mut self, rhs: ErrorAnalysis) {
        *self = *self + rhs;
    }
}

impl ErrorAnalysis {
    /// 오류가 하나도 없는지
    pub fn is_clean(&self) -> bool {
        *self == ErrorAnalysis::default()
    }
}

/// 치환 하나의 자모 단위 판정
fn classify_substitution(actual: char, expected: char) -> ErrorAnalysis {
    let mut result = ErrorAnalysis {
        total: 1,
        ..ErrorAnalysis::default()
    };

    // 한글이 아닌 문자가 끼면 total만 센다
    let (Some(exp), Some(act)) = (decompose(expected), decompose(actual)) else {
        return result;
    };

    if exp.jungseong != act.jungseong {
        if is_vowel_confusion(exp.jungseong, act.jungseong) {
            result.vowel += 1;
        } else {
            result.jamo += 1;
        }
    }

    if exp.jongseong != act.jongseong {
        if is_batchim_confusion(exp.jongseong, act.jongseong) {
            result.batchim += 1;
        } else {
            result.jamo += 1;
        }
    }

    if exp.choseong != act.choseong {
        result.jamo += 1;
    }

    result
}

/// 정렬 연산 하나의 분류
fn classify_op(op: &AlignmentOp) -> ErrorAnalysis {
    match *op {
        AlignmentOp::Equal(_) => ErrorAnalysis::default(),
        AlignmentOp::Insert(c) | AlignmentOp::Delete(c) => {
            if c == ' ' {
                ErrorAnalysis {
                    spacing: 1,
                    ..ErrorAnalysis::default()
                }
            } else {
                ErrorAnalysis {
                    total: 1,
                    ..ErrorAnalysis::default()
                }
            }
        }
        AlignmentOp::Substitute(actual, expected) => classify_substitution(actual, expected),
    }
}

/// 정렬 결과 전체를 분류
pub fn classify(alignment: &[AlignmentOp]) -> ErrorAnalysis {
    alignment
        .iter()
        .fold(ErrorAnalysis::default(), |acc, op| acc + classify_op(op))
}
