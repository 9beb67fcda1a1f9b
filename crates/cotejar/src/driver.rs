//! DashboardDriver - abstract browser automation collaborator.
//!
//! The comparison core does not own browser automation: it issues calls
//! against this trait and asserts on what comes back. Swapping the
//! implementation (CDP session, remote grid, mock) never touches the
//! baseline logic, and the core never manages browser process lifecycle.

use crate::layout::BoundingBox;
#[cfg(feature = "browser")]
use crate::result::{CotejarError, CotejarResult};
use std::collections::HashMap;
#[cfg(feature = "browser")]
use std::path::Path;

#[cfg(feature = "browser")]
use async_trait::async_trait;

/// Abstract driver trait for the rendered dashboard surface.
///
/// Implementations must expose navigation, a readiness signal, screenshot
/// capture to a caller-chosen path, computed-style reads, bounding-box
/// queries, and viewport control: the full capability set the lifecycle
/// manager and layout validators consume.
#[cfg(feature = "browser")]
#[async_trait]
pub trait DashboardDriver: Send + Sync {
    /// Navigate to URL
    async fn navigate(&mut self, url: &str) -> CotejarResult<()>;

    /// Wait for the rendered surface's ready signal
    async fn wait_for_ready(&self) -> CotejarResult<()>;

    /// Capture a screenshot of the current page to `path`
    async fn capture_screenshot(&self, path: &Path) -> CotejarResult<()>;

    /// Read a computed style property of the element at `selector`.
    ///
    /// An undeclared property reads as the empty string, matching browser
    /// `getComputedStyle` semantics.
    async fn read_computed_style(&self, selector: &str, property: &str) -> CotejarResult<String>;

    /// Bounding box of the element at `selector`, `None` when not rendered
    async fn bounding_box(&self, selector: &str) -> CotejarResult<Option<BoundingBox>>;

    /// Set the viewport size
    async fn set_viewport(&mut self, width: u32, height: u32) -> CotejarResult<()>;
}

/// Mock driver for unit testing
#[derive(Debug)]
pub struct MockDriver {
    /// Current URL
    pub current_url: String,
    /// Whether the ready signal fires
    pub ready: bool,
    /// Last viewport set, if any
    pub viewport: Option<(u32, u32)>,
    /// Bytes written by `capture_screenshot`
    pub screenshot_data: Vec<u8>,
    /// Computed styles keyed by (selector, property)
    pub styles: HashMap<(String, String), String>,
    /// Bounding boxes keyed by selector
    pub boxes: HashMap<String, BoundingBox>,
    /// Call history for verification
    pub call_history: Vec<String>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self {
            current_url: String::new(),
            ready: true,
            viewport: None,
            screenshot_data: Vec::new(),
            styles: HashMap::new(),
            boxes: HashMap::new(),
            call_history: Vec::new(),
        }
    }
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bytes screenshots are written with
    pub fn set_screenshot(&mut self, data: Vec<u8>) {
        self.screenshot_data = data;
    }

    /// Record a computed style for a (selector, property) pair
    pub fn set_style(
        &mut self,
        selector: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.styles
            .insert((selector.into(), property.into()), value.into());
    }

    /// Record a bounding box for a selector
    pub fn set_bounding_box(&mut self, selector: impl Into<String>, bbox: BoundingBox) {
        self.boxes.insert(selector.into(), bbox);
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.call_history
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }
}

#[cfg(feature = "browser")]
#[async_trait]
impl DashboardDriver for MockDriver {
    async fn navigate(&mut self, url: &str) -> CotejarResult<()> {
        self.call_history.push(format!("navigate:{url}"));
        self.current_url = url.to_string();
        Ok(())
    }

    async fn wait_for_ready(&self) -> CotejarResult<()> {
        if self.ready {
            Ok(())
        } else {
            Err(CotejarError::NavigationError {
                url: self.current_url.clone(),
                message: "ready signal never fired".to_string(),
            })
        }
    }

    async fn capture_screenshot(&self, path: &Path) -> CotejarResult<()> {
        if self.screenshot_data.is_empty() {
            return Err(CotejarError::ScreenshotError {
                message: "no mock screenshot set".to_string(),
            });
        }
        std::fs::write(path, &self.screenshot_data)?;
        Ok(())
    }

    async fn read_computed_style(&self, selector: &str, property: &str) -> CotejarResult<String> {
        Ok(self
            .styles
            .get(&(selector.to_string(), property.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn bounding_box(&self, selector: &str) -> CotejarResult<Option<BoundingBox>> {
        Ok(self.boxes.get(selector).copied())
    }

    async fn set_viewport(&mut self, width: u32, height: u32) -> CotejarResult<()> {
        self.call_history.push(format!("set_viewport:{width}x{height}"));
        self.viewport = Some((width, height));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_driver_creation() {
        let driver = MockDriver::new();
        assert!(driver.current_url.is_empty());
        assert!(driver.ready);
        assert!(driver.history().is_empty());
    }

    #[test]
    fn test_mock_driver_was_called() {
        let driver = MockDriver::new();
        assert!(!driver.was_called("navigate"));
    }

    #[test]
    fn test_mock_driver_style_setup() {
        let mut driver = MockDriver::new();
        driver.set_style("#dashboard", "--dashboard-width", "1920px");
        assert_eq!(
            driver
                .styles
                .get(&("#dashboard".to_string(), "--dashboard-width".to_string())),
            Some(&"1920px".to_string())
        );
    }

    #[cfg(feature = "browser")]
    mod async_driver_tests {
        use super::*;
        use crate::baseline::BaselineManager;
        use crate::matrix::{AspectRatio, BaselineConfig, ThemeMode};
        use crate::store::BaselineStore;

        fn config() -> BaselineConfig {
            BaselineConfig::standard(
                "portfolio-history-portrait",
                AspectRatio::Wide16x9,
                ThemeMode::Light,
            )
        }

        #[tokio::test]
        async fn test_mock_driver_navigate_records_history() {
            let mut driver = MockDriver::new();
            driver.navigate("http://localhost:4321/x").await.unwrap();
            assert_eq!(driver.current_url, "http://localhost:4321/x");
            assert!(driver.was_called("navigate"));
        }

        #[tokio::test]
        async fn test_mock_driver_missing_style_reads_empty() {
            let driver = MockDriver::new();
            let value = driver
                .read_computed_style("#dashboard", "--dashboard-width")
                .await
                .unwrap();
            assert!(value.is_empty());
        }

        #[tokio::test]
        async fn test_mock_driver_screenshot_requires_data() {
            let driver = MockDriver::new();
            let dir = tempfile::tempdir().unwrap();
            let err = driver
                .capture_screenshot(&dir.path().join("shot.png"))
                .await
                .unwrap_err();
            assert!(matches!(err, CotejarError::ScreenshotError { .. }));
        }

        #[tokio::test]
        async fn test_mock_driver_unready_surface_errors() {
            let mut driver = MockDriver::new();
            driver.ready = false;
            assert!(driver.wait_for_ready().await.is_err());
        }

        #[tokio::test]
        async fn test_capture_flow_through_manager() {
            let dir = tempfile::tempdir().unwrap();
            let store = BaselineStore::new(dir.path().join("visual")).unwrap();
            let manager = BaselineManager::new(store);
            let c = config();

            let mut driver = MockDriver::new();
            driver.set_screenshot(b"rendered dashboard".to_vec());

            let captured = manager
                .capture_comparison(&mut driver, "http://localhost:4321", &c)
                .await
                .unwrap();

            assert_eq!(captured, manager.store().comparison_path(&c));
            assert!(captured.exists());
            assert_eq!(driver.viewport, Some((1920, 1080)));
            assert!(driver.was_called("set_viewport"));
            assert!(driver
                .was_called("navigate:http://localhost:4321/portfolio-history-portrait/"));

            // The captured file feeds straight into the comparison path
            manager.update_baseline(&c, &captured).unwrap();
            let result = manager.compare_with_baseline(&c, &captured).unwrap();
            assert!(result.matches);
        }
    }
}
