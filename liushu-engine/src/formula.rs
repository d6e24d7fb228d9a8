//! Formulas: named input schemes compiled from source dictionaries.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dict::{DictError, Dictionary};

/// An input scheme and the source dictionaries that define it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    /// Identifier, also the name of the formula's source directory
    pub id: String,
    /// Human readable name
    #[serde(default)]
    pub name: Option<String>,
    /// Source dictionary files, relative to the formula's source directory.
    /// Earlier files take precedence on merge.
    pub dictionaries: Vec<String>,
}

impl Formula {
    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Path of the compiled dictionary inside `target_dir`.
    pub fn target_path(&self, target_dir: impl AsRef<Path>) -> PathBuf {
        target_dir.as_ref().join(format!("{}.bin", self.id))
    }

    /// Load and merge every source dictionary found under `source_dir/<id>/`.
    pub fn build(&self, source_dir: impl AsRef<Path>) -> Result<Dictionary, DictError> {
        let self_dir = source_dir.as_ref().join(&self.id);
        let mut dicts = Vec::with_capacity(self.dictionaries.len());
        for dict_path in &self.dictionaries {
            let path = self_dir.join(dict_path);
            debug!("formula {}: loading {:?}", self.id, path);
            dicts.push(Dictionary::load_auto(&path)?);
        }
        Dictionary::merge(dicts)?.ok_or_else(|| {
            DictError::Format(format!("formula {} lists no dictionaries", self.id))
        })
    }

    /// Build the formula and write the compiled dictionary into `target_dir`.
    ///
    /// Returns the path of the written file.
    pub fn compile(
        &self,
        source_dir: impl AsRef<Path>,
        target_dir: impl AsRef<Path>,
    ) -> Result<PathBuf, DictError> {
        let dict = self.build(source_dir)?;
        std::fs::create_dir_all(target_dir.as_ref())?;
        let out = self.target_path(target_dir);
        dict.save(&out)?;
        debug!(
            "formula {} compiled: {} codes, {} words -> {:?}",
            self.id,
            dict.len(),
            dict.word_count(),
            out
        );
        Ok(out)
    }
}
