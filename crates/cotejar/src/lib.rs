//! Cotejar: Visual-Regression Baseline Management for Dashboard Rendering
//!
//! Cotejar (Spanish: "to collate/cross-check") manages approved baseline
//! screenshots for a matrix of dashboard rendering configurations and
//! detects unintended visual drift across runs.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     COTEJAR Architecture                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐             │
//! │   │ Config     │    │ Baseline   │    │ Browser    │             │
//! │   │ Matrix     │───►│ Lifecycle  │───►│ Driver     │             │
//! │   │ (pure)     │    │ Manager    │    │ (external) │             │
//! │   └────────────┘    └─────┬──────┘    └─────┬──────┘             │
//! │                          │            screenshot                 │
//! │                    ┌─────▼──────┐    ┌──────▼─────┐              │
//! │                    │ Baseline   │◄───│ Fingerprint│              │
//! │                    │ Store      │    │ Engine     │              │
//! │                    └────────────┘    └────────────┘              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store keeps approved images under `baselines/`, fresh captures and
//! diff artifacts under `comparisons/`, and a single JSON metadata index.
//! Equality is decided by content fingerprints (SHA-256 with a documented
//! size/mtime fallback), not pixels.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod baseline;
mod fingerprint;
mod matrix;
mod result;
mod store;

/// Dimension and export-mode layout validation
pub mod layout;

/// Browser-driver collaborator interface and mock
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
pub mod driver;

pub use baseline::{BaselineManager, BaselineValidation, ComparisonResult};
pub use fingerprint::{
    size_similarity, ContentFingerprinter, FileDetails, FileStat, Fingerprint, FingerprintKind,
    ImageHasher, Sha256Fingerprinter, StatFingerprinter, SystemFileStat,
};
pub use matrix::{
    standard_baselines, AspectRatio, BaselineConfig, ThemeMode, Viewport, STANDARD_DASHBOARDS,
};
pub use result::{CotejarError, CotejarResult};
pub use store::{BaselineMetadata, BaselineStore, MetadataIndex, METADATA_FILE};

#[cfg(feature = "browser")]
pub use driver::DashboardDriver;
pub use driver::MockDriver;
pub use layout::{
    BoundingBox, LayoutError, RenderMode, DIMENSION_TOLERANCE_PX, EXPORT_MIN_HEIGHT_FRACTION,
    EXPORT_MIN_WIDTH_FRACTION,
};
