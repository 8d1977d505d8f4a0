use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::info;
use serde::Deserialize;

use crate::models::RawQuestion;

use super::error::LoadError;
use super::source::{ProviderResponse, QuestionRequest, QuestionSource};

/// Either the provider envelope or a bare list of records.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionFile {
    Envelope(ProviderResponse),
    Records(Vec<RawQuestion>),
}

/// Reads raw records from a local JSON file.
pub fn load_raw_questions<P: AsRef<Path>>(path: P) -> Result<Vec<RawQuestion>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match serde_json::from_str(&json_content)? {
        QuestionFile::Envelope(envelope) => envelope.into_results(),
        QuestionFile::Records(records) => Ok(records),
    }
}

/// Offline question source backed by a JSON file in provider format.
///
/// Category and difficulty are not filtered; the file is assumed to hold the
/// questions the player wants.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    async fn fetch(&self, request: &QuestionRequest) -> Result<Vec<RawQuestion>, LoadError> {
        let mut records = load_raw_questions(&self.path)?;
        records.truncate(request.amount);
        info!(
            "Loaded {} questions from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
