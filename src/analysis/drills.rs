//! 누적 오류 유형에 따른 연습 추천

use super::classifier::ErrorAnalysis;

/// 오류 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Spacing,
    Vowel,
    Batchim,
    Jamo,
}

impl ErrorCategory {
    /// 동점일 때의 정렬 순서
    pub const ALL: [ErrorCategory; 4] = [
        ErrorCategory::Spacing,
        ErrorCategory::Vowel,
        ErrorCategory::Batchim,
        ErrorCategory::Jamo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Spacing => "띄어쓰기",
            ErrorCategory::Vowel => "모음 혼동",
            ErrorCategory::Batchim => "받침 오류",
            ErrorCategory::Jamo => "자모 오류",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Spacing => "띄어쓰기 오류가 많습니다. 문장 연습을 추천합니다.",
            ErrorCategory::Vowel => "ㅐ/ㅔ, ㅓ/ㅗ 등 모음 구별 연습이 필요합니다.",
            ErrorCategory::Batchim => "받침 입력 정확도를 높이기 위한 연습을 추천합니다.",
            ErrorCategory::Jamo => "초성/중성/종성 구별 연습이 필요합니다.",
        }
    }

    /// 추천 콘텐츠 팩 ID
    pub fn recommended_pack(&self) -> &'static str {
        match self {
            ErrorCategory::Spacing => "conversational",
            ErrorCategory::Vowel => "common-words",
            ErrorCategory::Batchim => "proverbs",
            ErrorCategory::Jamo => "common-words",
        }
    }

    /// 분석 결과에서 이 유형의 카운터
    pub fn count_in(&self, analysis: &ErrorAnalysis) -> u32 {
        match self {
            ErrorCategory::Spacing => analysis.spacing,
            ErrorCategory::Vowel => analysis.vowel,
            ErrorCategory::Batchim => analysis.batchim,
            ErrorCategory::Jamo => analysis.jamo,
        }
    }
}

/// 0보다 큰 유형을 많은 순으로 정렬
pub fn ranked_categories(analysis: &ErrorAnalysis) -> Vec<(ErrorCategory, u32)> {
    let mut ranked: Vec<(ErrorCategory, u32)> = ErrorCategory::ALL
        .iter()
        .map(|&category| (category, category.count_in(analysis)))
        .filter(|&(_, count)| count > 0)
        .collect();
    // 안정 정렬이므로 동점은 ALL 순서 유지
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// 가장 많이 틀린 유형 (오류가 없으면 None)
pub fn recommend_drill(analysis: &ErrorAnalysis) -> Option<ErrorCategory> {
    ranked_categories(analysis).first().map(|&(category, _)| category)
}
