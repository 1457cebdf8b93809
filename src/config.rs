//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// 데이터 디렉토리 지정 환경 변수
pub const HOME_ENV: &str = "HANGUL_COACH_HOME";

const MIN_FONT_SIZE: u32 = 14;
const MAX_FONT_SIZE: u32 = 24;

/// 사용자 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CoachConfig {
    /// 연습 시작 전 카운트다운 (초, 0이면 바로 시작)
    #[serde(default = "default_countdown_secs")]
    pub countdown_secs: u64,
    /// 시간 제한 모드의 제한 시간 (초)
    #[serde(default = "default_timed_duration_secs")]
    pub timed_duration_secs: u64,
    /// 단어 수 지정 모드의 목표 단어 수
    #[serde(default = "default_word_count_target")]
    pub word_count_target: usize,
    // font_size, sound_enabled, tts_rate는 화면/음성 쪽 설정입니다.
    // 이 크레이트에서는 읽지 않고, 설정 파일을 저장할 때 값이 보존되도록만 유지합니다.
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    /// 다음 키 안내 표시
    #[serde(default = "default_keyboard_guide")]
    pub keyboard_guide: bool,
    #[serde(default)]
    pub sound_enabled: bool,
    /// 받아쓰기 음성 속도
    #[serde(default = "default_tts_rate")]
    pub tts_rate: f64,
    /// 기록 화면에 보여줄 최근 기록 수
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// 드릴 추천에 사용할 최근 기록 수
    #[serde(default = "default_drill_history_window")]
    pub drill_history_window: usize,
}

fn default_countdown_secs() -> u64 {
    3
}

fn default_timed_duration_secs() -> u64 {
    60
}

fn default_word_count_target() -> usize {
    50
}

fn default_font_size() -> u32 {
    18
}

fn default_keyboard_guide() -> bool {
    true
}

fn default_tts_rate() -> f64 {
    1.0
}

fn default_history_limit() -> usize {
    10
}

fn default_drill_history_window() -> usize {
    50
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            countdown_secs: default_countdown_secs(),
            timed_duration_secs: default_timed_duration_secs(),
            word_count_target: default_word_count_target(),
            font_size: default_font_size(),
            keyboard_guide: default_keyboard_guide(),
            sound_enabled: false,
            tts_rate: default_tts_rate(),
            history_limit: default_history_limit(),
            drill_history_window: default_drill_history_window(),
        }
    }
}

impl CoachConfig {
    /// 글자 크기 설정 (14..=24로 제한)
    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }
}

/// 데이터 디렉토리: $HANGUL_COACH_HOME 또는 ~/.config/hangul-coach
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| {
            // HOME 미설정이거나 유효하지 않으면 /var/tmp 폴백
            PathBuf::from("/var/tmp")
        });
    home.join(".config").join("hangul-coach")
}

/// 설정 파일 경로
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config() -> CoachConfig {
    let path = config_path();
    match fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패, 기본값 사용: {}", e);
            CoachConfig::default()
        }),
        Err(_) => CoachConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(config: &CoachConfig) -> Result<(), String> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("설정 디렉토리 생성 실패: {}", e))?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|e| format!("직렬화 실패: {}", e))?;
    fs::write(&path, json).map_err(|e| format!("설정 파일 저장 실패: {}", e))?;
    log::info!("설정 저장: {}", path.display());
    Ok(())
}
