//! 연습 콘텐츠 (단어/문장 팩)
//!
//! 콘텐츠는 읽기 전용 입력입니다. 내장 팩 몇 개를 제공하고,
//! JSON으로 된 팩 목록도 읽을 수 있습니다.

use serde::{Deserialize, Serialize};

/// 팩 하나에서 한 번에 뽑는 최대 단어 수 (단어 수 지정 모드 제외)
const MAX_WORDS_PER_TEST: usize = 100;
/// 문장 팩에서 한 번에 이어 붙이는 최대 문장 수
const MAX_SENTENCES_PER_TEST: usize = 10;

/// 콘텐츠 에러
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// 없는 팩 ID
    UnknownPack(String),
    /// 항목이 없는 팩
    EmptyPack(String),
    /// JSON 파싱 실패
    ParseError(String),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::UnknownPack(id) => write!(f, "알 수 없는 콘텐츠 팩: {}", id),
            ContentError::EmptyPack(id) => write!(f, "항목이 없는 콘텐츠 팩: {}", id),
            ContentError::ParseError(s) => write!(f, "콘텐츠 파싱 오류: {}", s),
        }
    }
}

impl std::error::Error for ContentError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// 팩 항목의 단위
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackMode {
    Words,
    Sentences,
}

/// 연습 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestType {
    /// 제한 시간
    Timed,
    /// 단어 수 지정
    WordCount,
    /// 한 문장
    Sentence,
}

/// 콘텐츠 팩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPack {
    pub id: String,
    pub title: String,
    pub title_ko: String,
    pub difficulty: Difficulty,
    pub mode: PackMode,
    pub items: Vec<String>,
}

impl ContentPack {
    /// 전체 단어 수
    pub fn word_count(&self) -> usize {
        self.items.iter().map(|item| item.split_whitespace().count()).sum()
    }

    /// JSON 배열에서 팩 목록 읽기
    pub fn list_from_json(json: &str) -> Result<Vec<ContentPack>, ContentError> {
        serde_json::from_str(json).map_err(|e| ContentError::ParseError(e.to_string()))
    }
}

/// 콘텐츠 팩 제공자
pub trait ContentProvider {
    fn list_packs(&self) -> Vec<&ContentPack>;

    fn get_pack(&self, id: &str) -> Result<&ContentPack, ContentError>;
}

/// 메모리에 든 팩 목록
#[derive(Debug, Clone)]
pub struct PackLibrary {
    packs: Vec<ContentPack>,
}

impl PackLibrary {
    pub fn new(packs: Vec<ContentPack>) -> Self {
        Self { packs }
    }

    /// 내장 팩
    pub fn builtin() -> Self {
        Self::new(builtin_packs())
    }
}

impl Default for PackLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ContentProvider for PackLibrary {
    fn list_packs(&self) -> Vec<&ContentPack> {
        self.packs.iter().collect()
    }

    fn get_pack(&self, id: &str) -> Result<&ContentPack, ContentError> {
        self.packs
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ContentError::UnknownPack(id.to_string()))
    }
}

fn pack(
    id: &str,
    title: &str,
    title_ko: &str,
    difficulty: Difficulty,
    mode: PackMode,
    items: &[&str],
) -> ContentPack {
    ContentPack {
        id: id.to_string(),
        title: title.to_string(),
        title_ko: title_ko.to_string(),
        difficulty,
        mode,
        items: items.iter().map(|s| s.to_string()).collect(),
    }
}

fn builtin_packs() -> Vec<ContentPack> {
    vec![
        pack(
            "common-words",
            "Common Words",
            "자주 쓰는 단어",
            Difficulty::Beginner,
            PackMode::Words,
            &[
                "사람", "시간", "우리", "생각", "사랑", "학교", "친구", "나라", "세상", "마음",
                "문제", "이야기", "오늘", "내일", "가족", "음식", "회사", "공부", "노래", "하늘",
            ],
        ),
        pack(
            "conversational",
            "Daily Conversation",
            "일상 대화",
            Difficulty::Beginner,
            PackMode::Sentences,
            &[
                "안녕하세요 오랜만이에요",
                "처음 뵙겠습니다",
                "만나서 반갑습니다",
                "여기 메뉴판 좀 주세요",
                "계산서 좀 주세요",
                "포장해 주세요",
            ],
        ),
        pack(
            "proverbs",
            "Korean Proverbs",
            "속담 모음",
            Difficulty::Advanced,
            PackMode::Sentences,
            &[
                "가는 말이 고와야 오는 말이 곱다",
                "낮말은 새가 듣고 밤말은 쥐가 듣는다",
                "백지장도 맞들면 낫다",
                "발 없는 말이 천 리 간다",
                "티끌 모아 태산",
            ],
        ),
        pack(
            "anthem",
            "National Anthem",
            "애국가",
            Difficulty::Intermediate,
            PackMode::Sentences,
            &[
                "동해 물과 백두산이 마르고 닳도록",
                "하느님이 보우하사 우리나라 만세",
                "무궁화 삼천리 화려 강산",
                "대한 사람 대한으로 길이 보전하세",
            ],
        ),
    ]
}

/// 연습할 목표 텍스트 생성
///
/// 섞기는 호출자가 담당하며, 이 함수는 팩의 순서를 그대로 사용합니다.
/// - 단어 팩: 단어 수 지정이면 목표 단어 수만큼 반복해 채우고,
///   그 외에는 팩 크기와 100 중 작은 값만큼 사용
/// - 문장 팩: 한 문장 모드는 첫 문장, 단어 수 지정은 목표 단어 수에
///   도달할 때까지, 그 외에는 최대 10문장
pub fn target_text(
    pack: &ContentPack,
    test_type: TestType,
    word_count_target: usize,
) -> Result<String, ContentError> {
    if pack.items.is_empty() {
        return Err(ContentError::EmptyPack(pack.id.clone()));
    }

    let text = match pack.mode {
        PackMode::Words => {
            let count = match test_type {
                TestType::WordCount => word_count_target.max(1),
                _ => MAX_WORDS_PER_TEST.min(pack.items.len()),
            };
            pack.items
                .iter()
                .cycle()
                .take(count)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        }
        PackMode::Sentences => match test_type {
            TestType::Sentence => pack.items[0].clone(),
            _ => {
                let mut sentences: Vec<&str> = Vec::new();
                let mut words = 0;
                for sentence in &pack.items {
                    sentences.push(sentence);
                    words += sentence.split_whitespace().count();
                    if test_type == TestType::WordCount && words >= word_count_target {
                        break;
                    }
                    if test_type != TestType::WordCount
                        && sentences.len() >= MAX_SENTENCES_PER_TEST
                    {
                        break;
                    }
                }
                sentences.join(" ")
            }
        },
    };

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_library() {
        let library = PackLibrary::builtin();
        assert_eq!(library.list_packs().len(), 4);
        assert_eq!(library.get_pack("proverbs").unwrap().mode, PackMode::Sentences);
        assert_eq!(
            library.get_pack("nope"),
            Err(ContentError::UnknownPack("nope".to_string()))
        );
    }

    #[test]
    fn test_word_pack_repeats_to_target() {
        let p = pack("w", "W", "단어", Difficulty::Beginner, PackMode::Words, &["가", "나"]);
        assert_eq!(target_text(&p, TestType::WordCount, 5).unwrap(), "가 나 가 나 가");
        assert_eq!(target_text(&p, TestType::Timed, 50).unwrap(), "가 나");
    }

    #[test]
    fn test_sentence_pack() {
        let p = pack(
            "s",
            "S",
            "문장",
            Difficulty::Beginner,
            PackMode::Sentences,
            &["하나 둘", "셋 넷 다섯", "여섯"],
        );
        assert_eq!(target_text(&p, TestType::Sentence, 0).unwrap(), "하나 둘");
        assert_eq!(target_text(&p, TestType::WordCount, 3).unwrap(), "하나 둘 셋 넷 다섯");
        assert_eq!(target_text(&p, TestType::Timed, 0).unwrap(), "하나 둘 셋 넷 다섯 여섯");
        assert_eq!(p.word_count(), 6);
    }

    #[test]
    fn test_sentence_limit() {
        let items: Vec<String> = (0..15).map(|i| format!("문장{}", i)).collect();
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let p = pack("s", "S", "문장", Difficulty::Beginner, PackMode::Sentences, &refs);
        let text = target_text(&p, TestType::Timed, 0).unwrap();
        assert_eq!(text.split_whitespace().count(), 10);
    }

    #[test]
    fn test_empty_pack() {
        let p = pack("e", "E", "빈", Difficulty::Beginner, PackMode::Words, &[]);
        assert_eq!(
            target_text(&p, TestType::Timed, 10),
            Err(ContentError::EmptyPack("e".to_string()))
        );
    }

    #[test]
    fn test_list_from_json() {
        let json = r#"[{
            "id": "tech",
            "title": "Tech",
            "titleKo": "기술 용어",
            "difficulty": "intermediate",
            "mode": "words",
            "items": ["컴퓨터", "프로그램"]
        }]"#;
        let packs = ContentPack::list_from_json(json).unwrap();
        assert_eq!(packs[0].title_ko, "기술 용어");
        assert_eq!(packs[0].difficulty, Difficulty::Intermediate);
        assert!(matches!(
            ContentPack::list_from_json("{}"),
            Err(ContentError::ParseError(_))
        ));
    }
}
