//! Baseline lifecycle management.
//!
//! The orchestrating component of the suite: creates and updates approved
//! baselines, compares fresh captures against them, audits store
//! integrity, and cleans transient comparison artifacts between runs.

use crate::fingerprint::{size_similarity, FileStat, ImageHasher, SystemFileStat};
use crate::matrix::BaselineConfig;
use crate::result::{CotejarError, CotejarResult};
use crate::store::{BaselineMetadata, BaselineStore};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of comparing a fresh capture against its baseline.
///
/// Transient: produced fresh on every comparison and owned by the calling
/// test. Only the comparison/diff image files it points at outlive the
/// call, and those are removed by [`BaselineManager::cleanup_comparisons`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    /// Whether capture and baseline are judged identical
    pub matches: bool,
    /// Location of the approved baseline image
    pub baseline_path: PathBuf,
    /// Location the capture was stored at for review
    pub comparison_path: PathBuf,
    /// Diff artifact, present only when `matches` is false
    pub difference_path: Option<PathBuf>,
    /// Coarse 0.0-1.0 byte-size similarity, present only when `matches`
    /// is false. Not a perceptual metric: two different images of equal
    /// byte size score 1.0.
    pub similarity: Option<f64>,
    /// True when either side was fingerprinted by the size/mtime fallback
    /// rather than a content digest; such verdicts are lower confidence.
    pub low_confidence: bool,
}

/// Classification buckets from a store integrity sweep.
///
/// Diagnostic only: the sweep never errors and never mutates state, so a
/// caller can decide policy (fail CI on `invalid`, warn on `missing`).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct BaselineValidation {
    /// Baseline file present and hash matches the stored record
    pub valid: Vec<String>,
    /// Baseline file present but modified outside the managed update path
    pub invalid: Vec<String>,
    /// Metadata record exists but the baseline file is gone
    pub missing: Vec<String>,
}

impl BaselineValidation {
    /// Whether every recorded baseline is intact on disk
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty() && self.missing.is_empty()
    }

    /// Number of metadata records inspected
    #[must_use]
    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len() + self.missing.len()
    }
}

/// Creates, compares, audits, and cleans baselines for a store.
///
/// Built once at the composition root with a [`BaselineStore`] and a
/// fingerprinting engine. Baseline mutation must stay single-writer (the
/// metadata index is read-modify-write without locking); comparisons are
/// safe to run in parallel across configurations.
pub struct BaselineManager {
    store: BaselineStore,
    hasher: ImageHasher,
    stat: SystemFileStat,
}

impl std::fmt::Debug for BaselineManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaselineManager")
            .field("store", &self.store)
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl BaselineManager {
    /// Create a manager with the best available fingerprinter
    #[must_use]
    pub fn new(store: BaselineStore) -> Self {
        Self::with_hasher(store, ImageHasher::detect())
    }

    /// Create a manager with an injected fingerprinting engine
    #[must_use]
    pub fn with_hasher(store: BaselineStore, hasher: ImageHasher) -> Self {
        Self {
            store,
            hasher,
            stat: SystemFileStat,
        }
    }

    /// The underlying store
    #[must_use]
    pub fn store(&self) -> &BaselineStore {
        &self.store
    }

    /// Create or overwrite the approved baseline for `config`.
    ///
    /// Copies the source image into the baseline location, recomputes its
    /// fingerprint, and overwrites the metadata record with a fresh
    /// timestamp and the current release version. This is the only
    /// mutation path for baselines; there is no partial update.
    pub fn update_baseline(
        &self,
        config: &BaselineConfig,
        source: &Path,
    ) -> CotejarResult<BaselineMetadata> {
        let baseline_path = self.store.baseline_path(config);
        fs::copy(source, &baseline_path)?;

        let fingerprint = self.hasher.fingerprint(&baseline_path)?;
        let metadata = BaselineMetadata {
            created_at: Utc::now(),
            config: config.clone(),
            hash: fingerprint.value,
            version: env!("CARGO_PKG_VERSION").to_string(),
        };

        let mut index = self.store.load_metadata();
        index.insert(config.name.clone(), metadata.clone());
        self.store.save_metadata(&index)?;

        tracing::debug!(name = %config.name, hash = %metadata.hash, "baseline updated");
        Ok(metadata)
    }

    /// Compare a captured image against the approved baseline for `config`.
    ///
    /// A missing baseline is a hard error naming the configuration, never
    /// an implicit "create new baseline", since that would mask accidental
    /// baseline deletion. The capture is copied into the comparisons
    /// directory either way so a reviewer can inspect it after the run
    /// without re-capturing.
    pub fn compare_with_baseline(
        &self,
        config: &BaselineConfig,
        captured: &Path,
    ) -> CotejarResult<ComparisonResult> {
        let baseline_path = self.store.baseline_path(config);
        if !baseline_path.exists() {
            return Err(CotejarError::MissingBaseline {
                name: config.name.clone(),
            });
        }

        let comparison_path = self.store.comparison_path(config);
        if captured != comparison_path {
            fs::copy(captured, &comparison_path)?;
        }

        let baseline_fp = self.hasher.fingerprint(&baseline_path)?;
        let comparison_fp = self.hasher.fingerprint(&comparison_path)?;
        let matches = baseline_fp.value == comparison_fp.value;
        let low_confidence =
            baseline_fp.kind.is_low_confidence() || comparison_fp.kind.is_low_confidence();

        let (difference_path, similarity) = if matches {
            (None, None)
        } else {
            let baseline_size = self.stat.stat(&baseline_path)?.size;
            let comparison_size = self.stat.stat(&comparison_path)?.size;
            let difference_path = self.store.difference_path(config);
            fs::copy(&comparison_path, &difference_path)?;
            (
                Some(difference_path),
                Some(size_similarity(baseline_size, comparison_size)),
            )
        };

        tracing::debug!(name = %config.name, matches, low_confidence, "baseline comparison");
        Ok(ComparisonResult {
            matches,
            baseline_path,
            comparison_path,
            difference_path,
            similarity,
            low_confidence,
        })
    }

    /// Audit every recorded baseline against the images on disk.
    ///
    /// Never errors and never mutates: a baseline whose file is gone is
    /// `missing`; one whose current fingerprint no longer matches the
    /// stored hash (hand-edited outside the update path) is `invalid`. A
    /// fingerprint failure during the sweep classifies the entry `invalid`
    /// with a warning rather than aborting the diagnostic.
    #[must_use]
    pub fn validate_baselines(&self) -> BaselineValidation {
        let mut report = BaselineValidation::default();
        for (name, metadata) in self.store.load_metadata() {
            let baseline_path = self.store.baseline_path(&metadata.config);
            if !baseline_path.exists() {
                report.missing.push(name);
                continue;
            }
            match self.hasher.fingerprint(&baseline_path) {
                Ok(fingerprint) if fingerprint.value == metadata.hash => report.valid.push(name),
                Ok(_) => report.invalid.push(name),
                Err(e) => {
                    tracing::warn!(%name, error = %e, "baseline unreadable during validation");
                    report.invalid.push(name);
                }
            }
        }
        report
    }

    /// Delete every transient file under the comparisons directory.
    ///
    /// Runs between suites so stale artifacts are never mistaken for
    /// current results. Must not touch the baselines directory under any
    /// circumstance. Returns the number of files removed.
    pub fn cleanup_comparisons(&self) -> CotejarResult<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(self.store.comparisons_dir())? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        tracing::debug!(removed, "comparison artifacts cleaned");
        Ok(removed)
    }

    /// All recorded baselines in stable (name) order
    #[must_use]
    pub fn list_baselines(&self) -> Vec<BaselineMetadata> {
        self.store.load_metadata().into_values().collect()
    }

    /// Build the parameterized URL the browser driver navigates to for
    /// `config`: dashboard path plus `aspect_ratio` and `mode` query
    /// parameters.
    #[must_use]
    pub fn generate_test_url(&self, base: &str, config: &BaselineConfig) -> String {
        format!(
            "{}/{}/?aspect_ratio={}&mode={}",
            base.trim_end_matches('/'),
            config.dashboard,
            config.aspect_ratio,
            config.mode,
        )
    }

    /// Drive the browser collaborator through one capture for `config`:
    /// viewport, navigation, readiness, then a screenshot written to the
    /// comparison path. Returns the captured file's location, ready to be
    /// handed to [`Self::compare_with_baseline`].
    #[cfg(feature = "browser")]
    pub async fn capture_comparison<D: crate::driver::DashboardDriver + ?Sized>(
        &self,
        driver: &mut D,
        base_url: &str,
        config: &BaselineConfig,
    ) -> CotejarResult<PathBuf> {
        let url = self.generate_test_url(base_url, config);
        driver
            .set_viewport(config.viewport.width, config.viewport.height)
            .await?;
        driver.navigate(&url).await?;
        driver.wait_for_ready().await?;

        let comparison_path = self.store.comparison_path(config);
        driver.capture_screenshot(&comparison_path).await?;
        Ok(comparison_path)
    }
}
