//! Filesystem-backed baseline store.
//!
//! Owns path resolution and raw file I/O for the three logical areas of
//! the store: `baselines/` (approved images), `comparisons/` (fresh
//! captures and their diff artifacts), and the single JSON metadata index.
//! The store is a plain value built once by the composition root and
//! passed by reference; it holds no hidden global state.
//!
//! The metadata index is the one piece of shared mutable state in the
//! system. Updates are read-modify-write and the store implements no
//! locking: single-writer discipline is the caller's contract. Comparison
//! traffic is safe to parallelize since each configuration owns disjoint
//! file paths.

use crate::matrix::BaselineConfig;
use crate::result::{CotejarError, CotejarResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the metadata index file inside the store root
pub const METADATA_FILE: &str = "baseline-metadata.json";

/// Persisted record describing one approved baseline.
///
/// Exists if and only if the corresponding baseline image exists on disk;
/// [`crate::BaselineManager::validate_baselines`] exists precisely because
/// that invariant can silently break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineMetadata {
    /// Timestamp of baseline creation or last update
    pub created_at: DateTime<Utc>,
    /// The configuration this baseline was captured under
    pub config: BaselineConfig,
    /// Content fingerprint of the baseline image at creation time
    pub hash: String,
    /// Producing build/release identifier
    pub version: String,
}

/// Metadata index: configuration name to its baseline record
pub type MetadataIndex = BTreeMap<String, BaselineMetadata>;

/// Filesystem layout and I/O for baseline and comparison images
#[derive(Debug, Clone)]
pub struct BaselineStore {
    root: PathBuf,
    baselines_dir: PathBuf,
    comparisons_dir: PathBuf,
}

impl BaselineStore {
    /// Open (and if needed create) a store rooted at `root`.
    ///
    /// Directory creation is idempotent and recursive; an existing store
    /// is reused as-is. Failure to create any of the directories is fatal
    /// ([`CotejarError::DirectoryUnwritable`]) since the store cannot
    /// offer silent no-op persistence.
    pub fn new(root: impl Into<PathBuf>) -> CotejarResult<Self> {
        let root = root.into();
        let baselines_dir = root.join("baselines");
        let comparisons_dir = root.join("comparisons");

        for dir in [&root, &baselines_dir, &comparisons_dir] {
            fs::create_dir_all(dir).map_err(|e| CotejarError::DirectoryUnwritable {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Ok(Self {
            root,
            baselines_dir,
            comparisons_dir,
        })
    }

    /// Store root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding approved baseline images
    #[must_use]
    pub fn baselines_dir(&self) -> &Path {
        &self.baselines_dir
    }

    /// Directory holding fresh captures and diff artifacts
    #[must_use]
    pub fn comparisons_dir(&self) -> &Path {
        &self.comparisons_dir
    }

    /// Path of the approved baseline image for `config`.
    ///
    /// Pure path construction: same config, same path, no I/O.
    #[must_use]
    pub fn baseline_path(&self, config: &BaselineConfig) -> PathBuf {
        self.baselines_dir.join(format!("baseline-{}.png", config.name))
    }

    /// Path a fresh capture for `config` is stored at
    #[must_use]
    pub fn comparison_path(&self, config: &BaselineConfig) -> PathBuf {
        self.comparisons_dir.join(format!("current-{}.png", config.name))
    }

    /// Path of the diff artifact for `config`
    #[must_use]
    pub fn difference_path(&self, config: &BaselineConfig) -> PathBuf {
        self.comparisons_dir.join(format!("diff-{}.png", config.name))
    }

    /// Path of the metadata index file
    #[must_use]
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    /// Whether an approved baseline image exists on disk for `config`
    #[must_use]
    pub fn has_baseline(&self, config: &BaselineConfig) -> bool {
        self.baseline_path(config).exists()
    }

    /// Read and parse the metadata index.
    ///
    /// A missing file is an empty index, not an error: the first run of a
    /// suite has no baselines yet. A present-but-unparsable file is logged
    /// and also treated as empty, favoring forward progress: the baseline
    /// images on disk stay usable while the index is rebuilt.
    #[must_use]
    pub fn load_metadata(&self) -> MetadataIndex {
        let path = self.metadata_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return MetadataIndex::new(),
        };
        match serde_json::from_str(&content) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "metadata index unparsable, treating store as empty"
                );
                MetadataIndex::new()
            }
        }
    }

    /// Overwrite the metadata index.
    ///
    /// Writes to a sibling temp file and renames it over the index, so a
    /// crash mid-write never leaves a truncated index behind.
    pub fn save_metadata(&self, index: &MetadataIndex) -> CotejarResult<()> {
        let path = self.metadata_path();
        let tmp = self.root.join(format!("{METADATA_FILE}.tmp"));
        let json = serde_json::to_string_pretty(index)?;

        fs::write(&tmp, json).map_err(|e| CotejarError::DirectoryUnwritable {
            path: tmp.display().to_string(),
            message: e.to_string(),
        })?;
        fs::rename(&tmp, &path).map_err(|e| CotejarError::DirectoryUnwritable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
