use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One work as produced by the text-processing pipeline.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CorpusInputWork {
    pub id: String,
    pub work_name: String,
    pub author: String,
    pub author_code: String,
    /// Row text, in reading order.
    pub rows: Vec<String>,
    /// Hierarchical section id of each row, e.g. `["1", "2", "3"]`.
    pub row_ids: Vec<Vec<String>>,
}

impl CorpusInputWork {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Build input: which works to index, in order, and where their analyses live.
///
/// Paths are relative to the manifest's directory.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct InputManifest {
    pub works: Vec<String>,
    pub analyses: String,
}

impl InputManifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn work_paths(&self, base: &Path) -> Vec<PathBuf> {
        self.works.iter().map(|work| base.join(work)).collect()
    }

    pub fn analyses_path(&self, base: &Path) -> PathBuf {
        base.join(&self.analyses)
    }
}
