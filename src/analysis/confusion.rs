//! 혼동하기 쉬운 자모 테이블

use std::collections::HashMap;

lazy_static::lazy_static! {
    /// 모음 혼동 쌍 (대칭)
    static ref VOWEL_CONFUSIONS: HashMap<char, &'static [char]> = {
        let mut map: HashMap<char, &'static [char]> = HashMap::new();
        map.insert('ㅐ', &['ㅔ']);
        map.insert('ㅔ', &['ㅐ']);
        map.insert('ㅒ', &['ㅖ']);
        map.insert('ㅖ', &['ㅒ']);
        map.insert('ㅓ', &['ㅗ']);
        map.insert('ㅗ', &['ㅓ']);
        map.insert('ㅡ', &['ㅜ']);
        map.insert('ㅜ', &['ㅡ']);
        map
    };

    /// 받침 혼동 (목표 받침 → 헷갈리기 쉬운 입력 받침), 비대칭
    static ref BATCHIM_CONFUSIONS: HashMap<char, &'static [char]> = {
        let mut map: HashMap<char, &'static [char]> = HashMap::new();
        map.insert('ㄱ', &['ㅋ', 'ㄲ']);
        map.insert('ㄷ', &['ㅌ', 'ㅅ', 'ㅆ', 'ㅈ', 'ㅊ', 'ㅎ']);
        map.insert('ㅂ', &['ㅍ']);
        map.insert('ㅅ', &['ㅆ']);
        map.insert('ㅆ', &['ㅅ']);
        map.insert('ㅈ', &['ㅊ']);
        map
    };
}

/// 목표 모음과 입력 모음이 알려진 혼동 쌍인지 확인
pub fn is_vowel_confusion(expected: char, actual: char) -> bool {
    VOWEL_CONFUSIONS
        .get(&expected)
        .map(|list| list.contains(&actual))
        .unwrap_or(false)
}

/// 목표 받침 기준으로 입력 받침이 혼동 목록에 있는지 확인
/// 받침이 없는 쪽이 있으면 항상 false
pub fn is_batchim_confusion(expected: Option<char>, actual: Option<char>) -> bool {
    match (expected, actual) {
        (Some(e), Some(a)) => BATCHIM_CONFUSIONS
            .get(&e)
            .map(|list| list.contains(&a))
            .unwrap_or(false),
        _ => false,
    }
}
