//! 두벌식 자판 키 안내
//!
//! 자모를 두벌식 키 입력으로 바꾸고, 다음에 눌러야 할 키를 계산합니다.

use std::collections::BTreeSet;

use super::unicode::decompose;

/// 키 하나의 입력 (Shift 여부 포함)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    /// 소문자 영문 키
    pub key: char,
    pub shift: bool,
}

impl KeyStroke {
    const fn plain(key: char) -> Self {
        Self { key, shift: false }
    }

    const fn shifted(key: char) -> Self {
        Self { key, shift: true }
    }

    /// 실제 입력되는 영문 문자 (Shift면 대문자)
    pub fn as_char(&self) -> char {
        if self.shift {
            self.key.to_ascii_uppercase()
        } else {
            self.key
        }
    }
}

/// 손가락 배치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    LeftPinky,
    LeftRing,
    LeftMiddle,
    LeftIndex,
    RightIndex,
    RightMiddle,
    RightRing,
    RightPinky,
}

/// 키 → 담당 손가락
pub fn finger_for_key(key: char) -> Option<Finger> {
    match key.to_ascii_lowercase() {
        'q' | 'a' | 'z' => Some(Finger::LeftPinky),
        'w' | 's' | 'x' => Some(Finger::LeftRing),
        'e' | 'd' | 'c' => Some(Finger::LeftMiddle),
        'r' | 't' | 'f' | 'g' | 'v' | 'b' => Some(Finger::LeftIndex),
        'y' | 'u' | 'h' | 'j' | 'n' | 'm' => Some(Finger::RightIndex),
        'i' | 'k' => Some(Finger::RightMiddle),
        'o' | 'l' => Some(Finger::RightRing),
        'p' => Some(Finger::RightPinky),
        _ => None,
    }
}

/// 단일 자모 → 키 (쌍자음, ㅒ/ㅖ는 Shift)
fn single_jamo_key(jamo: char) -> Option<KeyStroke> {
    let stroke = match jamo {
        // 자음
        'ㄱ' => KeyStroke::plain('r'),
        'ㄲ' => KeyStroke::shifted('r'),
        'ㄴ' => KeyStroke::plain('s'),
        'ㄷ' => KeyStroke::plain('e'),
        'ㄸ' => KeyStroke::shifted('e'),
        'ㄹ' => KeyStroke::plain('f'),
        'ㅁ' => KeyStroke::plain('a'),
        'ㅂ' => KeyStroke::plain('q'),
        'ㅃ' => KeyStroke::shifted('q'),
        'ㅅ' => KeyStroke::plain('t'),
        'ㅆ' => KeyStroke::shifted('t'),
        'ㅇ' => KeyStroke::plain('d'),
        'ㅈ' => KeyStroke::plain('w'),
        'ㅉ' => KeyStroke::shifted('w'),
        'ㅊ' => KeyStroke::plain('c'),
        'ㅋ' => KeyStroke::plain('z'),
        'ㅌ' => KeyStroke::plain('x'),
        'ㅍ' => KeyStroke::plain('v'),
        'ㅎ' => KeyStroke::plain('g'),
        // 모음
        'ㅏ' => KeyStroke::plain('k'),
        'ㅐ' => KeyStroke::plain('o'),
        'ㅑ' => KeyStroke::plain('i'),
        'ㅒ' => KeyStroke::shifted('o'),
        'ㅓ' => KeyStroke::plain('j'),
        'ㅔ' => KeyStroke::plain('p'),
        'ㅕ' => KeyStroke::plain('u'),
        'ㅖ' => KeyStroke::shifted('p'),
        'ㅗ' => KeyStroke::plain('h'),
        'ㅛ' => KeyStroke::plain('y'),
        'ㅜ' => KeyStroke::plain('n'),
        'ㅠ' => KeyStroke::plain('b'),
        'ㅡ' => KeyStroke::plain('m'),
        'ㅣ' => KeyStroke::plain('l'),
        _ => return None,
    };
    Some(stroke)
}

/// 복합 모음/겹받침을 구성 자모로 분리
fn split_compound(jamo: char) -> Option<[char; 2]> {
    match jamo {
        'ㅘ' => Some(['ㅗ', 'ㅏ']),
        'ㅙ' => Some(['ㅗ', 'ㅐ']),
        'ㅚ' => Some(['ㅗ', 'ㅣ']),
        'ㅝ' => Some(['ㅜ', 'ㅓ']),
        'ㅞ' => Some(['ㅜ', 'ㅔ']),
        'ㅟ' => Some(['ㅜ', 'ㅣ']),
        'ㅢ' => Some(['ㅡ', 'ㅣ']),
        'ㄳ' => Some(['ㄱ', 'ㅅ']),
        'ㄵ' => Some(['ㄴ', 'ㅈ']),
        'ㄶ' => Some(['ㄴ', 'ㅎ']),
        'ㄺ' => Some(['ㄹ', 'ㄱ']),
        'ㄻ' => Some(['ㄹ', 'ㅁ']),
        'ㄼ' => Some(['ㄹ', 'ㅂ']),
        'ㄽ' => Some(['ㄹ', 'ㅅ']),
        'ㄾ' => Some(['ㄹ', 'ㅌ']),
        'ㄿ' => Some(['ㄹ', 'ㅍ']),
        'ㅀ' => Some(['ㄹ', 'ㅎ']),
        'ㅄ' => Some(['ㅂ', 'ㅅ']),
        _ => None,
    }
}

/// 자모 하나를 입력하는 키 시퀀스
/// 매핑할 수 없는 문자는 빈 Vec
pub fn jamo_keys(jamo: char) -> Vec<KeyStroke> {
    if let Some(parts) = split_compound(jamo) {
        return parts.iter().filter_map(|&p| single_jamo_key(p)).collect();
    }
    single_jamo_key(jamo).into_iter().collect()
}

/// 다음 글자를 입력하는 데 필요한 자모 목록
/// - 공백: [' ']
/// - 한글: 초성, 중성, (종성)
/// - 그 외: 문자 그대로
pub fn syllable_jamos(c: char) -> Vec<char> {
    if c == ' ' {
        return vec![' '];
    }
    match decompose(c) {
        Some(syllable) => syllable.jamos(),
        None => vec![c],
    }
}

/// 한글 문자열을 두벌식 영문 키 시퀀스로 변환
///
/// # Examples
/// ```
/// use hangul_coach::core::keymap::korean_to_keys;
/// assert_eq!(korean_to_keys("안녕"), "dkssud");
/// assert_eq!(korean_to_keys("한글"), "gksrmf");
/// ```
pub fn korean_to_keys(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);

    for c in input.chars() {
        match decompose(c) {
            Some(syllable) => {
                for jamo in syllable.jamos() {
                    result.extend(jamo_keys(jamo).iter().map(KeyStroke::as_char));
                }
            }
            // 한글이 아닌 문자는 그대로 유지
            None => result.push(c),
        }
    }

    result
}

/// 다음 입력 안내
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// 다음에 입력할 글자
    pub next_char: char,
    /// 그 글자의 자모
    pub jamos: Vec<char>,
    /// 강조할 키 (공백은 ' ')
    pub keys: BTreeSet<char>,
    /// 첫 입력에 Shift가 필요한지
    pub needs_shift: bool,
}

/// 목표 문장과 지금까지 입력한 텍스트로 다음 키 안내 생성
/// 입력이 목표 길이 이상이면 None
pub fn next_key_hint(target: &str, typed: &str) -> Option<KeyHint> {
    let position = typed.chars().count();
    let next_char = target.chars().nth(position)?;
    let jamos = syllable_jamos(next_char);

    let mut keys = BTreeSet::new();
    for &jamo in &jamos {
        if jamo == ' ' {
            keys.insert(' ');
            continue;
        }
        keys.extend(jamo_keys(jamo).iter().map(|k| k.key));
    }

    let needs_shift = jamos
        .first()
        .and_then(|&j| jamo_keys(j).first().copied())
        .map(|k| k.shift)
        .unwrap_or(false);

    Some(KeyHint {
        next_char,
        jamos,
        keys,
        needs_shift,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_syllables() {
        assert_eq!(korean_to_keys("가"), "rk");
        assert_eq!(korean_to_keys("각"), "rkr");
        assert_eq!(korean_to_keys("가나다"), "rkskek");
    }

    #[test]
    fn test_complex_vowels() {
        assert_eq!(korean_to_keys("완"), "dhks"); // ㅘ = ㅗ + ㅏ
        assert_eq!(korean_to_keys("웬"), "dnps"); // ㅞ = ㅜ + ㅔ
        assert_eq!(korean_to_keys("의"), "dml"); // ㅢ = ㅡ + ㅣ
    }

    #[test]
    fn test_complex_jongseong() {
        assert_eq!(korean_to_keys("읽"), "dlfr"); // ㄺ = ㄹ + ㄱ
        assert_eq!(korean_to_keys("없"), "djqt"); // ㅄ = ㅂ + ㅅ
    }

    #[test]
    fn test_shifted_keys() {
        assert_eq!(korean_to_keys("까"), "Rk");
        assert_eq!(korean_to_keys("쌌"), "TkT");
        assert_eq!(korean_to_keys("얘"), "dO");
        assert_eq!(jamo_keys('ㅖ'), vec![KeyStroke::shifted('p')]);
    }

    #[test]
    fn test_mixed_text() {
        assert_eq!(korean_to_keys("가1나"), "rk1sk");
        assert_eq!(korean_to_keys("안녕!"), "dkssud!");
        assert_eq!(korean_to_keys(""), "");
    }

    #[test]
    fn test_unknown_jamo() {
        assert!(jamo_keys('a').is_empty());
        assert!(jamo_keys(' ').is_empty());
    }

    #[test]
    fn test_syllable_jamos() {
        assert_eq!(syllable_jamos(' '), vec![' ']);
        assert_eq!(syllable_jamos('한'), vec!['ㅎ', 'ㅏ', 'ㄴ']);
        assert_eq!(syllable_jamos('?'), vec!['?']);
    }

    #[test]
    fn test_next_key_hint() {
        let hint = next_key_hint("안녕", "안").unwrap();
        assert_eq!(hint.next_char, '녕');
        assert_eq!(hint.jamos, vec!['ㄴ', 'ㅕ', 'ㅇ']);
        assert_eq!(hint.keys.iter().collect::<String>(), "dsu");
        assert!(!hint.needs_shift);

        let shifted = next_key_hint("까", "").unwrap();
        assert!(shifted.needs_shift);

        let space = next_key_hint("가 나", "가").unwrap();
        assert!(space.keys.contains(&' '));

        assert!(next_key_hint("안녕", "안녕").is_none());
    }

    #[test]
    fn test_finger_for_key() {
        assert_eq!(finger_for_key('q'), Some(Finger::LeftPinky));
        assert_eq!(finger_for_key('R'), Some(Finger::LeftIndex));
        assert_eq!(finger_for_key('k'), Some(Finger::RightMiddle));
        assert_eq!(finger_for_key('p'), Some(Finger::RightPinky));
        assert_eq!(finger_for_key('1'), None);
    }
}
