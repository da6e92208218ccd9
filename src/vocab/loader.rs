//! Loading vocabulary packs from disk.
//!
//! A pack is a JSON file holding a list of word entries. Every `*.json` file
//! in the vocabulary directory is read in file-name order, the entries are
//! concatenated and then sorted stably by CEFR level, so words keep their
//! pack order within a level.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::VocabError;
use crate::vocab::entry::{CefrLevel, WordEntry, WordId};

/// Outcome of scanning a vocabulary directory.
#[derive(Debug, Default)]
pub struct PackReport {
    /// Packs that loaded, with their entry counts.
    pub loaded: Vec<(PathBuf, usize)>,
    /// Packs that could not be read or parsed.
    pub failed: Vec<VocabError>,
}

/// The full, level-sorted word list.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<WordEntry>,
}

impl Vocabulary {
    /// Build a vocabulary from entries, sorting them by level.
    #[must_use]
    pub fn from_entries(mut entries: Vec<WordEntry>) -> Self {
        entries.sort_by_key(|e| e.level);
        Self { entries }
    }

    /// Load every pack in `dir`, skipping unreadable ones with a warning.
    ///
    /// A missing directory yields an empty vocabulary.
    #[must_use]
    pub fn load_dir(dir: &Path) -> Self {
        let (vocab, report) = Self::scan_dir(dir);
        for err in &report.failed {
            tracing::warn!(error = %err, "skipping vocabulary pack");
        }
        tracing::info!(
            packs = report.loaded.len(),
            words = vocab.len(),
            dir = %dir.display(),
            "vocabulary loaded"
        );
        vocab
    }

    /// Load every pack in `dir` and report per-file results.
    #[must_use]
    pub fn scan_dir(dir: &Path) -> (Self, PackReport) {
        let mut report = PackReport::default();
        let mut entries = Vec::new();

        let paths = match pack_paths(dir) {
            Ok(paths) => paths,
            Err(source) => {
                report.failed.push(VocabError::Io {
                    path: dir.to_path_buf(),
                    source,
                });
                return (Self::default(), report);
            }
        };

        for path in paths {
            match read_pack(&path) {
                Ok(pack) => {
                    report.loaded.push((path, pack.len()));
                    entries.extend(pack);
                }
                Err(e) => report.failed.push(e),
            }
        }

        (Self::from_entries(entries), report)
    }

    /// Entries in level order.
    #[must_use]
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no words are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the first entry at or above `level`, or `len()` if none.
    #[must_use]
    pub fn first_index_at(&self, level: CefrLevel) -> usize {
        self.entries.partition_point(|e| e.level < level)
    }

    /// Ids that appear more than once, in first-seen order.
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<WordId> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut dups = Vec::new();
        for entry in &self.entries {
            if !seen.insert(&entry.id) && reported.insert(&entry.id) {
                dups.push(entry.id.clone());
            }
        }
        dups
    }

    /// Entry count per level (levels without entries are omitted).
    #[must_use]
    pub fn count_by_level(&self) -> BTreeMap<CefrLevel, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.level).or_insert(0) += 1;
        }
        counts
    }
}

/// `*.json` files in `dir`, sorted by file name.
fn pack_paths(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    Ok(paths)
}

fn read_pack(path: &Path) -> Result<Vec<WordEntry>, VocabError> {
    let text = fs::read_to_string(path).map_err(|source| VocabError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| VocabError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
