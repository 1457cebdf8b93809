//! 유니코드 한글 음절 분해/조합 유틸리티
//!
//! 완성형 한글 음절(U+AC00 ~ U+D7A3)은 블록 산술만으로
//! 초성/중성/종성 인덱스로 분해할 수 있습니다.

use serde::{Deserialize, Serialize};

/// 한글 음절 시작 코드포인트 (가)
const HANGUL_SYLLABLE_BASE: u32 = 0xAC00;
/// 한글 음절 마지막 코드포인트 (힣)
const HANGUL_SYLLABLE_LAST: u32 = 0xD7A3;

/// 초성 개수
const CHOSEONG_COUNT: u32 = 19;
/// 중성 개수
const JUNGSEONG_COUNT: u32 = 21;
/// 종성 개수 (종성 없음 포함)
const JONGSEONG_COUNT: u32 = 28;
/// 초성 하나가 차지하는 코드포인트 폭 (21 * 28 = 588)
const CHOSEONG_PERIOD: u32 = JUNGSEONG_COUNT * JONGSEONG_COUNT;

/// 초성 테이블 (호환용 자모)
pub const CHOSEONG: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// 중성 테이블 (호환용 자모)
pub const JUNGSEONG: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ',
    'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// 종성 테이블, 인덱스 0은 종성 없음
#[rustfmt::skip]
pub const JONGSEONG: [Option<char>; 28] = [
    None,
    Some('ㄱ'), Some('ㄲ'), Some('ㄳ'), Some('ㄴ'), Some('ㄵ'), Some('ㄶ'), Some('ㄷ'),
    Some('ㄹ'), Some('ㄺ'), Some('ㄻ'), Some('ㄼ'), Some('ㄽ'), Some('ㄾ'), Some('ㄿ'),
    Some('ㅀ'), Some('ㅁ'), Some('ㅂ'), Some('ㅄ'), Some('ㅅ'), Some('ㅆ'), Some('ㅇ'),
    Some('ㅈ'), Some('ㅊ'), Some('ㅋ'), Some('ㅌ'), Some('ㅍ'), Some('ㅎ'),
];

/// 분해된 한글 음절 (초성, 중성, 종성)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecomposedSyllable {
    pub choseong: char,
    pub jungseong: char,
    /// 종성이 없으면 None
    pub jongseong: Option<char>,
}

impl DecomposedSyllable {
    /// 자모를 순서대로 나열 (종성 없으면 2개)
    pub fn jamos(&self) -> Vec<char> {
        let mut out = vec![self.choseong, self.jungseong];
        if let Some(jong) = self.jongseong {
            out.push(jong);
        }
        out
    }

    /// 받침이 있는지 확인
    pub fn has_jongseong(&self) -> bool {
        self.jongseong.is_some()
    }
}

/// 문자가 완성형 한글 음절인지 확인
pub fn is_syllable(c: char) -> bool {
    (HANGUL_SYLLABLE_BASE..=HANGUL_SYLLABLE_LAST).contains(&(c as u32))
}

/// 문자열이 정확히 완성형 한글 음절 하나인지 확인
///
/// 빈 문자열, 여러 스칼라 값으로 이루어진 문자열은 false
pub fn is_syllable_str(s: &str) -> bool {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => is_syllable(c),
        _ => false,
    }
}

/// 초성/중성/종성 인덱스로 완성된 한글 유니코드 생성
/// - choseong: 초성 인덱스 (0~18)
/// - jungseong: 중성 인덱스 (0~20)
/// - jongseong: 종성 인덱스 (0~27, 0 = 종성 없음)
pub fn compose_syllable(choseong: u32, jungseong: u32, jongseong: u32) -> Option<char> {
    if choseong >= CHOSEONG_COUNT || jungseong >= JUNGSEONG_COUNT || jongseong >= JONGSEONG_COUNT {
        return None;
    }
    let code = HANGUL_SYLLABLE_BASE
        + choseong * CHOSEONG_PERIOD
        + jungseong * JONGSEONG_COUNT
        + jongseong;
    char::from_u32(code)
}

/// 완성형 한글을 초성/중성/종성 인덱스로 분해
/// 반환: (초성 인덱스, 중성 인덱스, 종성 인덱스)
pub fn decompose_syllable(c: char) -> Option<(u32, u32, u32)> {
    if !is_syllable(c) {
        return None;
    }
    let offset = c as u32 - HANGUL_SYLLABLE_BASE;
    let choseong = offset / CHOSEONG_PERIOD;
    let jungseong = (offset % CHOSEONG_PERIOD) / JONGSEONG_COUNT;
    let jongseong = offset % JONGSEONG_COUNT;
    Some((choseong, jungseong, jongseong))
}

/// 완성형 한글을 자모 문자로 분해
pub fn decompose(c: char) -> Option<DecomposedSyllable> {
    let (cho, jung, jong) = decompose_syllable(c)?;
    Some(DecomposedSyllable {
        choseong: CHOSEONG[cho as usize],
        jungseong: JUNGSEONG[jung as usize],
        jongseong: JONGSEONG[jong as usize],
    })
}

/// 문자열 형태의 입력 분해 (정확히 한 음절일 때만)
pub fn decompose_str(s: &str) -> Option<DecomposedSyllable> {
    if !is_syllable_str(s) {
        return None;
    }
    s.chars().next().and_then(decompose)
}

/// 자모 문자로부터 음절 조합 (`decompose`의 역연산)
pub fn compose(syllable: &DecomposedSyllable) -> Option<char> {
    let cho = CHOSEONG.iter().position(|&c| c == syllable.choseong)?;
    let jung = JUNGSEONG.iter().position(|&c| c == syllable.jungseong)?;
    let jong = JONGSEONG.iter().position(|&c| c == syllable.jongseong)?;
    compose_syllable(cho as u32, jung as u32, jong as u32)
}

/// 텍스트를 자모 단위로 펼침, 한글이 아닌 문자는 그대로 유지
pub fn jamos(text: &str) -> Vec<char> {
    let mut result = Vec::with_capacity(text.len());
    for c in text.chars() {
        match decompose(c) {
            Some(syllable) => result.extend(syllable.jamos()),
            None => result.push(c),
        }
    }
    result
}
