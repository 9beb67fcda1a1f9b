//! Dimension and export-mode layout validation.
//!
//! Behavioral checks applied to the rendered dashboard surface after
//! navigation and the page's ready signal: measured size against the
//! configured target, CSS custom-property propagation, and viewport
//! coverage in export mode (interactive controls hidden) versus display
//! mode.

use crate::matrix::{BaselineConfig, Viewport};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Slack allowed between configured and measured pixel dimensions.
///
/// Accommodates sub-pixel and scrollbar rendering variance across
/// environments; measured sizes are never expected to be exact.
pub const DIMENSION_TOLERANCE_PX: f64 = 50.0;

/// Minimum fraction of viewport width an export-mode layout must cover
pub const EXPORT_MIN_WIDTH_FRACTION: f64 = 0.90;

/// Minimum fraction of viewport height an export-mode layout must cover.
///
/// Looser than the width bound: even with controls hidden some vertical
/// chrome remains.
pub const EXPORT_MIN_HEIGHT_FRACTION: f64 = 0.80;

/// Measured bounding box of a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box area in square pixels
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Rendering state of the dashboard surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Normal interactive state, controls shown
    Display,
    /// Output-generation state, controls hidden to maximize content area
    Export,
}

impl RenderMode {
    /// Whether interactive controls are expected to be visible
    #[must_use]
    pub const fn controls_expected(self) -> bool {
        matches!(self, Self::Display)
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display => f.write_str("display"),
            Self::Export => f.write_str("export"),
        }
    }
}

/// Layout validation failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Measured dimension fell below the target minus tolerance
    #[error(
        "rendered {axis} {measured:.1}px does not exceed target {target}px minus {tolerance}px tolerance"
    )]
    DimensionShortfall {
        /// Which axis failed
        axis: &'static str,
        /// Measured pixels
        measured: f64,
        /// Configured target pixels
        target: u32,
        /// Allowed slack
        tolerance: f64,
    },

    /// CSS custom property does not reflect the configured dimension
    #[error("custom property {property} is '{actual}', expected '{expected}'")]
    CustomPropertyMismatch {
        /// Property name
        property: String,
        /// Expected exact value
        expected: String,
        /// Observed value
        actual: String,
    },

    /// Export layout covers too little of the viewport
    #[error("export layout covers {fraction:.3} of viewport {axis}, minimum {minimum:.2}")]
    InsufficientCoverage {
        /// Which axis failed
        axis: &'static str,
        /// Covered fraction
        fraction: f64,
        /// Required minimum
        minimum: f64,
    },

    /// Export layout does not out-fill the display layout
    #[error("export layout fills {export:.3} of the viewport, display fills {display:.3}")]
    ExportNotLarger {
        /// Export-mode viewport share
        export: f64,
        /// Display-mode viewport share
        display: f64,
    },

    /// Interactive controls visible while exporting
    #[error("interactive controls visible in export mode")]
    ControlsVisibleInExport,

    /// Interactive controls missing in normal display
    #[error("interactive controls hidden in display mode")]
    ControlsHiddenInDisplay,
}

/// Check the measured container size against the configured target.
///
/// Both axes must exceed the target minus [`DIMENSION_TOLERANCE_PX`]; this
/// is a rendering check and deliberately not exact.
pub fn check_rendered_dimensions(
    config: &BaselineConfig,
    measured: &BoundingBox,
) -> Result<(), LayoutError> {
    let (target_width, target_height) = config.aspect_ratio.dimensions();
    if measured.width <= f64::from(target_width) - DIMENSION_TOLERANCE_PX {
        return Err(LayoutError::DimensionShortfall {
            axis: "width",
            measured: measured.width,
            target: target_width,
            tolerance: DIMENSION_TOLERANCE_PX,
        });
    }
    if measured.height <= f64::from(target_height) - DIMENSION_TOLERANCE_PX {
        return Err(LayoutError::DimensionShortfall {
            axis: "height",
            measured: measured.height,
            target: target_height,
            tolerance: DIMENSION_TOLERANCE_PX,
        });
    }
    Ok(())
}

/// The exact custom-property values a surface must declare for `config`:
/// `(--dashboard-width, --dashboard-height)` in whole pixels.
#[must_use]
pub fn expected_custom_properties(config: &BaselineConfig) -> (String, String) {
    let (width, height) = config.aspect_ratio.dimensions();
    (format!("{width}px"), format!("{height}px"))
}

/// Check that the declared CSS custom properties reflect the configured
/// dimensions exactly.
///
/// Zero tolerance: this is a configuration-propagation check, distinct
/// from the rendering-tolerance check in [`check_rendered_dimensions`].
pub fn check_custom_properties(
    config: &BaselineConfig,
    width_value: &str,
    height_value: &str,
) -> Result<(), LayoutError> {
    let (expected_width, expected_height) = expected_custom_properties(config);
    if width_value.trim() != expected_width {
        return Err(LayoutError::CustomPropertyMismatch {
            property: "--dashboard-width".to_string(),
            expected: expected_width,
            actual: width_value.to_string(),
        });
    }
    if height_value.trim() != expected_height {
        return Err(LayoutError::CustomPropertyMismatch {
            property: "--dashboard-height".to_string(),
            expected: expected_height,
            actual: height_value.to_string(),
        });
    }
    Ok(())
}

/// Fraction of the viewport area a bounding box covers, clamped to 1.0
#[must_use]
pub fn viewport_share(viewport: Viewport, measured: &BoundingBox) -> f64 {
    let viewport_area = f64::from(viewport.width) * f64::from(viewport.height);
    if viewport_area <= 0.0 {
        return 0.0;
    }
    (measured.area() / viewport_area).min(1.0)
}

/// Check export-mode viewport coverage: at least
/// [`EXPORT_MIN_WIDTH_FRACTION`] of viewport width and
/// [`EXPORT_MIN_HEIGHT_FRACTION`] of viewport height.
pub fn check_export_coverage(
    viewport: Viewport,
    measured: &BoundingBox,
) -> Result<(), LayoutError> {
    let width_fraction = measured.width / f64::from(viewport.width);
    if width_fraction < EXPORT_MIN_WIDTH_FRACTION {
        return Err(LayoutError::InsufficientCoverage {
            axis: "width",
            fraction: width_fraction,
            minimum: EXPORT_MIN_WIDTH_FRACTION,
        });
    }
    let height_fraction = measured.height / f64::from(viewport.height);
    if height_fraction < EXPORT_MIN_HEIGHT_FRACTION {
        return Err(LayoutError::InsufficientCoverage {
            axis: "height",
            fraction: height_fraction,
            minimum: EXPORT_MIN_HEIGHT_FRACTION,
        });
    }
    Ok(())
}

/// Check that the export-mode layout fills a strictly larger share of the
/// viewport than the display-mode layout, which loses vertical space to
/// its controls.
pub fn check_export_exceeds_display(
    viewport: Viewport,
    export: &BoundingBox,
    display: &BoundingBox,
) -> Result<(), LayoutError> {
    let export_share = viewport_share(viewport, export);
    let display_share = viewport_share(viewport, display);
    if export_share <= display_share {
        return Err(LayoutError::ExportNotLarger {
            export: export_share,
            display: display_share,
        });
    }
    Ok(())
}

/// Check control visibility against the expectation for `mode`
pub fn check_controls(mode: RenderMode, controls_visible: bool) -> Result<(), LayoutError> {
    match (mode, controls_visible) {
        (RenderMode::Export, true) => Err(LayoutError::ControlsVisibleInExport),
        (RenderMode::Display, false) => Err(LayoutError::ControlsHiddenInDisplay),
        _ => Ok(()),
    }
}
