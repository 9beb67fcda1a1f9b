//! Content fingerprinting for captured images.
//!
//! Equality between a baseline and a fresh capture is decided by comparing
//! content fingerprints, not pixels. The primary fingerprinter digests file
//! bytes with SHA-256; when it cannot run, a pseudo-hash built from file
//! size and modification time stands in. The fallback is explicitly weaker
//! (two different images of identical size and close mtimes collide) and
//! every fingerprint carries its kind so callers can treat fallback results
//! as lower confidence.

use crate::result::{CotejarError, CotejarResult};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Size and modification time of a file, as reported by the host filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDetails {
    /// File size in bytes
    pub size: u64,
    /// Modification time in milliseconds since the Unix epoch
    pub mtime_millis: u64,
}

/// Capability for reading file size and modification time.
///
/// Used uniformly by the pseudo-hash fallback and the similarity metric,
/// so the platform dependency lives in one place.
pub trait FileStat: Send + Sync {
    /// Stat a file
    fn stat(&self, path: &Path) -> CotejarResult<FileDetails>;
}

/// [`FileStat`] backed by the host platform's filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFileStat;

impl FileStat for SystemFileStat {
    fn stat(&self, path: &Path) -> CotejarResult<FileDetails> {
        let metadata = std::fs::metadata(path)?;
        let mtime_millis = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |d| d.as_millis() as u64);
        Ok(FileDetails {
            size: metadata.len(),
            mtime_millis,
        })
    }
}

/// How a fingerprint was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintKind {
    /// True content digest over file bytes
    Sha256,
    /// Size/mtime pseudo-hash fallback
    FileStat,
}

impl FingerprintKind {
    /// Whether results of this kind must be treated as lower confidence
    #[must_use]
    pub const fn is_low_confidence(self) -> bool {
        matches!(self, Self::FileStat)
    }
}

/// A content fingerprint for an image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// Hex digest or pseudo-hash string
    pub value: String,
    /// Producing mechanism
    pub kind: FingerprintKind,
}

/// Capability that turns an image file into a [`Fingerprint`]
pub trait ContentFingerprinter: Send + Sync {
    /// Fingerprint the file at `path`
    fn fingerprint(&self, path: &Path) -> CotejarResult<Fingerprint>;

    /// Kind of fingerprint this implementation produces
    fn kind(&self) -> FingerprintKind;
}

/// Cryptographic fingerprinter: SHA-256 over the file bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Fingerprinter;

impl ContentFingerprinter for Sha256Fingerprinter {
    fn fingerprint(&self, path: &Path) -> CotejarResult<Fingerprint> {
        let bytes = std::fs::read(path).map_err(|e| CotejarError::HashingUnavailable {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let result = hasher.finalize();
        Ok(Fingerprint {
            value: format!("{result:x}"),
            kind: FingerprintKind::Sha256,
        })
    }

    fn kind(&self) -> FingerprintKind {
        FingerprintKind::Sha256
    }
}

/// Metadata fingerprinter: pseudo-hash from file size and mtime.
///
/// Deterministic for a fixed (size, mtime) pair, but not a content hash.
pub struct StatFingerprinter {
    stat: Box<dyn FileStat>,
}

impl std::fmt::Debug for StatFingerprinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatFingerprinter").finish_non_exhaustive()
    }
}

impl Default for StatFingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatFingerprinter {
    /// Create a stat fingerprinter backed by the host filesystem
    #[must_use]
    pub fn new() -> Self {
        Self {
            stat: Box::new(SystemFileStat),
        }
    }

    /// Create with an injected [`FileStat`] capability
    #[must_use]
    pub fn with_stat(stat: Box<dyn FileStat>) -> Self {
        Self { stat }
    }
}

impl ContentFingerprinter for StatFingerprinter {
    fn fingerprint(&self, path: &Path) -> CotejarResult<Fingerprint> {
        let details = self.stat.stat(path)?;
        Ok(Fingerprint {
            value: format!("stat-{}-{}", details.size, details.mtime_millis),
            kind: FingerprintKind::FileStat,
        })
    }

    fn kind(&self) -> FingerprintKind {
        FingerprintKind::FileStat
    }
}

/// Fingerprinting engine with primary/fallback selection.
///
/// Tries the primary (content-digest) fingerprinter first; if it reports
/// [`CotejarError::HashingUnavailable`], falls back to the size/mtime
/// pseudo-hash with a warning. The returned [`Fingerprint::kind`] tells
/// callers which path was taken.
pub struct ImageHasher {
    primary: Option<Box<dyn ContentFingerprinter>>,
    fallback: StatFingerprinter,
}

impl std::fmt::Debug for ImageHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageHasher")
            .field("has_primary", &self.primary.is_some())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Default for ImageHasher {
    fn default() -> Self {
        Self::detect()
    }
}

impl ImageHasher {
    /// Select the best available fingerprinter.
    ///
    /// The SHA-256 digest runs in-process and is always available; the
    /// stat fallback still backs it for unreadable files.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            primary: Some(Box::new(Sha256Fingerprinter)),
            fallback: StatFingerprinter::new(),
        }
    }

    /// Engine with the content-digest mechanism disabled.
    ///
    /// Every fingerprint comes from the size/mtime fallback. Used to
    /// exercise the lower-confidence path in isolation.
    #[must_use]
    pub fn fallback_only() -> Self {
        Self {
            primary: None,
            fallback: StatFingerprinter::new(),
        }
    }

    /// Engine with an injected primary fingerprinter
    #[must_use]
    pub fn with_primary(primary: Box<dyn ContentFingerprinter>) -> Self {
        Self {
            primary: Some(primary),
            fallback: StatFingerprinter::new(),
        }
    }

    /// Fingerprint an image file
    pub fn fingerprint(&self, path: &Path) -> CotejarResult<Fingerprint> {
        if let Some(ref primary) = self.primary {
            match primary.fingerprint(path) {
                Ok(fingerprint) => return Ok(fingerprint),
                Err(CotejarError::HashingUnavailable { message }) => {
                    tracing::warn!(
                        path = %path.display(),
                        %message,
                        "content hash unavailable, using size/mtime pseudo-hash"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        self.fallback.fingerprint(path)
    }
}

/// Coarse similarity of two files from byte sizes alone.
///
/// `1 - |a - b| / max(a, b)`, clamped to >= 0. Two files of equal size
/// (including two empty files) score 1.0 even when their content differs:
/// a known blind spot of the size metric, kept deliberately since this is
/// a drift-ranking heuristic, not a perceptual comparison.
#[must_use]
pub fn size_similarity(a: u64, b: u64) -> f64 {
    let max = a.max(b);
    if max == 0 {
        return 1.0;
    }
    let diff = a.abs_diff(b) as f64;
    (1.0 - diff / max as f64).max(0.0)
}
