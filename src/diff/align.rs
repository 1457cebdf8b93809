//! 편집 거리 기반 정렬 (Levenshtein)
//!
//! 목표 텍스트와 입력 텍스트를 문자(유니코드 스칼라 값) 단위로 정렬합니다.
//! 삽입/삭제/치환 비용은 모두 1, 일치는 0입니다.
//!
//! 역추적 우선순위: 일치 > 삽입 > 삭제 > 치환.
//! 최소 비용 경로가 여러 개일 때 항상 같은 경로를 고르기 위한 규약입니다.

use serde::{Deserialize, Serialize};

/// 정렬 연산 하나
///
/// 기본 원소 타입은 `char`이며, 단어 단위 정렬에는 `&str`을 씁니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AlignmentOp<T = char> {
    /// 양쪽이 일치
    Equal(T),
    /// 입력에만 있음
    Insert(T),
    /// 목표에만 있음
    Delete(T),
    /// 치환 (입력값, 목표값)
    Substitute(T, T),
}

impl<T> AlignmentOp<T> {
    /// 목표(expected) 쪽 원소
    pub fn expected(&self) -> Option<&T> {
        match self {
            AlignmentOp::Equal(v) | AlignmentOp::Delete(v) => Some(v),
            AlignmentOp::Substitute(_, expected) => Some(expected),
            AlignmentOp::Insert(_) => None,
        }
    }

    /// 입력(actual) 쪽 원소
    pub fn actual(&self) -> Option<&T> {
        match self {
            AlignmentOp::Equal(v) | AlignmentOp::Insert(v) => Some(v),
            AlignmentOp::Substitute(actual, _) => Some(actual),
            AlignmentOp::Delete(_) => None,
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, AlignmentOp::Equal(_))
    }
}

/// DP 테이블 계산: table[i][j] = expected[..i]와 actual[..j]의 편집 거리
fn distance_table<T: PartialEq>(expected: &[T], actual: &[T]) -> Vec<Vec<usize>> {
    let m = expected.len();
    let n = actual.len();
    let mut table = vec![vec![0usize; n + 1]; m + 1];

    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        table[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            table[i][j] = if expected[i - 1] == actual[j - 1] {
                table[i - 1][j - 1]
            } else {
                1 + table[i - 1][j].min(table[i][j - 1]).min(table[i - 1][j - 1])
            };
        }
    }

    table
}

/// 임의 원소 시퀀스 정렬
pub fn align_seq<T: PartialEq + Clone>(expected: &[T], actual: &[T]) -> Vec<AlignmentOp<T>> {
    let table = distance_table(expected, actual);
    let mut ops = Vec::with_capacity(expected.len().max(actual.len()));

    let (mut i, mut j) = (expected.len(), actual.len());
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && expected[i - 1] == actual[j - 1] {
            ops.push(AlignmentOp::Equal(expected[i - 1].clone()));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i][j] == table[i][j - 1] + 1) {
            ops.push(AlignmentOp::Insert(actual[j - 1].clone()));
            j -= 1;
        } else if i > 0 && (j == 0 || table[i][j] == table[i - 1][j] + 1) {
            ops.push(AlignmentOp::Delete(expected[i - 1].clone()));
            i -= 1;
        } else {
            ops.push(AlignmentOp::Substitute(
                actual[j - 1].clone(),
                expected[i - 1].clone(),
            ));
            i -= 1;
            j -= 1;
        }
    }

    ops.reverse();
    ops
}

/// 문자 단위 정렬
pub fn align(expected: &str, actual: &str) -> Vec<AlignmentOp> {
    let expected: Vec<char> = expected.chars().collect();
    let actual: Vec<char> = actual.chars().collect();
    align_seq(&expected, &actual)
}

/// 거리만 계산 (두 행만 유지, 연산 복원 없음)
pub fn edit_distance<T: PartialEq>(expected: &[T], actual: &[T]) -> usize {
    let mut prev: Vec<usize> = (0..=actual.len()).collect();
    let mut curr = vec![0usize; actual.len() + 1];

    for (i, e) in expected.iter().enumerate() {
        curr[0] = i + 1;
        for (j, a) in actual.iter().enumerate() {
            curr[j + 1] = if e == a {
                prev[j]
            } else {
                1 + prev[j + 1].min(curr[j]).min(prev[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[actual.len()]
}

/// 정렬 결과의 편집 거리 (일치가 아닌 연산 수)
pub fn distance<T>(ops: &[AlignmentOp<T>]) -> usize {
    ops.iter().filter(|op| !op.is_equal()).count()
}

/// 목표 쪽 복원
pub fn expected_text(ops: &[AlignmentOp]) -> String {
    ops.iter().filter_map(|op| op.expected()).collect()
}

/// 입력 쪽 복원
pub fn actual_text(ops: &[AlignmentOp]) -> String {
    ops.iter().filter_map(|op| op.actual()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use AlignmentOp::*;

    #[test]
    fn test_identical() {
        assert_eq!(align("가나", "가나"), vec![Equal('가'), Equal('나')]);
        assert!(align("", "").is_empty());
    }

    #[test]
    fn test_single_substitution() {
        let ops = align("안녕", "안뇽");
        assert_eq!(ops, vec![Equal('안'), Substitute('뇽', '녕')]);
        assert_eq!(distance(&ops), 1);
    }

    #[test]
    fn test_missing_space() {
        let ops = align("안녕 하세요", "안녕하세요");
        let non_equal: Vec<_> = ops.iter().filter(|op| !op.is_equal()).collect();
        assert_eq!(non_equal, vec![&Delete(' ')]);
        assert_eq!(ops[2], Delete(' '));
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(align("", "ab"), vec![Insert('a'), Insert('b')]);
        assert_eq!(align("ab", ""), vec![Delete('a'), Delete('b')]);
    }

    #[test]
    fn test_tie_break_prefers_insert_then_delete() {
        // 끝에서부터 역추적하므로 삽입이 뒤쪽에 놓임
        assert_eq!(align("ab", "ba"), vec![Delete('a'), Equal('b'), Insert('a')]);
        // 길이가 같고 모두 다르면 치환
        assert_eq!(align("a", "b"), vec![Substitute('b', 'a')]);
        assert_eq!(align("ab", "cd"), vec![Substitute('c', 'a'), Substitute('d', 'b')]);
    }

    #[test]
    fn test_extra_input() {
        assert_eq!(align("가", "가나"), vec![Equal('가'), Insert('나')]);
        assert_eq!(align("가나", "나"), vec![Delete('가'), Equal('나')]);
    }

    #[test]
    fn test_projection_reconstructs_both_sides() {
        let pairs = [
            ("안녕하세요", "안냥하세오"),
            ("", "입력만"),
            ("목표만", ""),
            ("kitten", "sitting"),
            ("띄어 쓰기 연습", "띄어쓰기  연습!"),
            ("🙂a가", "a🙂나"),
        ];
        for (expected, actual) in pairs {
            let ops = align(expected, actual);
            assert_eq!(expected_text(&ops), expected);
            assert_eq!(actual_text(&ops), actual);
        }
    }

    #[test]
    fn test_distance_matches_edit_distance() {
        let pairs = [("kitten", "sitting"), ("안녕", "안뇽"), ("", "abc"), ("flaw", "lawn")];
        for (expected, actual) in pairs {
            let e: Vec<char> = expected.chars().collect();
            let a: Vec<char> = actual.chars().collect();
            assert_eq!(distance(&align(expected, actual)), edit_distance(&e, &a));
        }
        let e: Vec<char> = "kitten".chars().collect();
        let a: Vec<char> = "sitting".chars().collect();
        assert_eq!(edit_distance(&e, &a), 3);
    }

    #[test]
    fn test_word_level_alignment() {
        let expected = ["나는", "학교에", "간다"];
        let actual = ["나는", "학교애", "간다"];
        let ops = align_seq(&expected, &actual);
        assert_eq!(ops[1], Substitute("학교애", "학교에"));
        assert_eq!(distance(&ops), 1);
    }

    #[test]
    fn test_serialize_op() {
        let json = serde_json::to_string(&Substitute('뇽', '녕')).unwrap();
        assert_eq!(json, r#"{"type":"substitute","value":["뇽","녕"]}"#);
        let parsed: AlignmentOp = serde_json::from_str(r#"{"type":"delete","value":" "}"#).unwrap();
        assert_eq!(parsed, Delete(' '));
    }
}
