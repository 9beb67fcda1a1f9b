//! Rendering configuration matrix.
//!
//! Defines the canonical set of dashboard rendering configurations the
//! visual-regression suite validates: aspect ratio, color theme, and
//! viewport per target dashboard. Pure data, no I/O.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dashboards covered by the standard configuration matrix.
pub const STANDARD_DASHBOARDS: &[&str] = &["portfolio-history-portrait"];

/// Supported aspect ratios for dashboard export rendering.
///
/// Each ratio maps to a fixed pixel-dimension pair, so a viewport built
/// from a ratio is consistent with it by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 16:9 landscape (1920x1080)
    #[serde(rename = "16:9")]
    Wide16x9,
    /// 4:3 landscape (1600x1200)
    #[serde(rename = "4:3")]
    Standard4x3,
    /// 3:4 portrait (1200x1600)
    #[serde(rename = "3:4")]
    Portrait3x4,
}

impl AspectRatio {
    /// Ratio used when a request carries no (or a malformed) aspect ratio
    pub const DEFAULT: Self = Self::Wide16x9;

    /// All supported ratios in matrix order
    pub const ALL: [Self; 3] = [Self::Wide16x9, Self::Standard4x3, Self::Portrait3x4];

    /// Pixel dimensions (width, height) this ratio renders at
    #[must_use]
    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Wide16x9 => (1920, 1080),
            Self::Standard4x3 => (1600, 1200),
            Self::Portrait3x4 => (1200, 1600),
        }
    }

    /// Canonical `width:height` label, e.g. `16:9`
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wide16x9 => "16:9",
            Self::Standard4x3 => "4:3",
            Self::Portrait3x4 => "3:4",
        }
    }

    /// Filename-safe form of the label, `:` replaced with `x`
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Wide16x9 => "16x9",
            Self::Standard4x3 => "4x3",
            Self::Portrait3x4 => "3x4",
        }
    }

    /// Parse a request parameter leniently.
    ///
    /// Malformed input of any shape resolves to [`Self::DEFAULT`] rather
    /// than an error, so garbage query strings degrade to the standard
    /// landscape render instead of failing the page.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "16:9" => Self::Wide16x9,
            "4:3" => Self::Standard4x3,
            "3:4" => Self::Portrait3x4,
            other => {
                tracing::debug!(input = other, "unknown aspect ratio, falling back to 16:9");
                Self::DEFAULT
            }
        }
    }

    /// Viewport matching this ratio's pixel dimensions
    #[must_use]
    pub const fn viewport(self) -> Viewport {
        let (width, height) = self.dimensions();
        Viewport { width, height }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Color theme under which a dashboard is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light color scheme
    Light,
    /// Dark color scheme
    Dark,
}

impl ThemeMode {
    /// Both theme modes in matrix order
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    /// Lowercase wire form, as used in URLs and config names
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browser viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width/height ratio
    #[must_use]
    pub fn ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// One point in the visual-regression test matrix.
///
/// Immutable for the lifetime of a test run; the `name` is unique across
/// the whole baseline store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineConfig {
    /// Unique identifier, `{dashboard}-{ratio slug}-{mode}`
    pub name: String,
    /// Requested aspect ratio
    pub aspect_ratio: AspectRatio,
    /// Color theme
    pub mode: ThemeMode,
    /// Viewport dimensions, consistent with `aspect_ratio`
    pub viewport: Viewport,
    /// Target dashboard identifier
    pub dashboard: String,
}

impl BaselineConfig {
    /// Build the configuration for one matrix point.
    ///
    /// The viewport is derived from the aspect ratio and the name follows
    /// the `{dashboard}-{ratio slug}-{mode}` convention, which is what
    /// guarantees pairwise-unique names across the matrix.
    #[must_use]
    pub fn standard(dashboard: &str, aspect_ratio: AspectRatio, mode: ThemeMode) -> Self {
        Self {
            name: format!("{dashboard}-{}-{mode}", aspect_ratio.slug()),
            aspect_ratio,
            mode,
            viewport: aspect_ratio.viewport(),
            dashboard: dashboard.to_string(),
        }
    }

    /// Whether the viewport's ratio matches the declared aspect ratio
    /// within rounding.
    #[must_use]
    pub fn viewport_consistent(&self) -> bool {
        let (width, height) = self.aspect_ratio.dimensions();
        let declared = f64::from(width) / f64::from(height);
        (self.viewport.ratio() - declared).abs() < 0.01
    }
}

/// The canonical configuration matrix for the suite.
///
/// Deterministic and restartable: the same call always yields the same
/// configurations in the same order, with pairwise-distinct names. Tests
/// that iterate the matrix rely on this stability.
#[must_use]
pub fn standard_baselines() -> Vec<BaselineConfig> {
    let mut configs = Vec::with_capacity(STANDARD_DASHBOARDS.len() * 6);
    for dashboard in STANDARD_DASHBOARDS {
        for ratio in AspectRatio::ALL {
            for mode in ThemeMode::ALL {
                configs.push(BaselineConfig::standard(dashboard, ratio, mode));
            }
        }
    }
    configs
}
