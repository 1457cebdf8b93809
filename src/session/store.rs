//! 세션 기록 저장소
//!
//! `append`는 새 ID를 돌려주고, `query`는 최근 기록부터 돌려줍니다.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use super::record::SessionRecord;

/// 저장소 에러
#[derive(Debug)]
pub enum StoreError {
    /// 파일 읽기/쓰기 실패
    Io(std::io::Error),
    /// JSON 파싱/직렬화 실패
    Parse(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "파일 입출력 오류: {}", e),
            StoreError::Parse(s) => write!(f, "기록 파싱 오류: {}", s),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e.to_string())
    }
}

/// 세션 기록 저장소
pub trait SessionStore {
    /// 기록 추가, 부여된 ID 반환
    fn append(&mut self, record: SessionRecord) -> Result<u64, StoreError>;

    /// 최근 기록부터 최대 `limit`개
    fn query(&self, limit: usize) -> Result<Vec<SessionRecord>, StoreError>;
}

/// 최근 순 정렬 (생성 시각, 같으면 ID 역순)
fn most_recent_first(mut records: Vec<SessionRecord>, limit: usize) -> Vec<SessionRecord> {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    records.truncate(limit);
    records
}

fn next_id(records: &[SessionRecord]) -> u64 {
    records.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1
}

/// 메모리 저장소
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Vec<SessionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn append(&mut self, mut record: SessionRecord) -> Result<u64, StoreError> {
        let id = next_id(&self.records);
        record.id = Some(id);
        self.records.push(record);
        Ok(id)
    }

    fn query(&self, limit: usize) -> Result<Vec<SessionRecord>, StoreError> {
        Ok(most_recent_first(self.records.clone(), limit))
    }
}

/// JSON 파일 저장소 (전체 기록을 JSON 배열 하나로 저장)
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 전체 기록 읽기 (파일이 없으면 빈 기록)
    fn load_all(&self) -> Result<Vec<SessionRecord>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionStore for JsonFileStore {
    fn append(&mut self, mut record: SessionRecord) -> Result<u64, StoreError> {
        let mut records = self.load_all()?;
        let id = next_id(&records);
        record.id = Some(id);
        records.push(record);
        write_json_atomic(&self.path, &records)?;
        log::info!("세션 기록 저장: #{} ({})", id, self.path.display());
        Ok(id)
    }

    fn query(&self, limit: usize) -> Result<Vec<SessionRecord>, StoreError> {
        Ok(most_recent_first(self.load_all()?, limit))
    }
}

/// 같은 디렉토리의 임시 파일에 쓴 뒤 교체
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp_file = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}
