//! Output rendering for cotejador

use console::style;
use cotejar::{
    BaselineConfig, BaselineManager, BaselineMetadata, BaselineValidation, ComparisonResult,
};

/// Render a comparison outcome
#[must_use]
pub fn render_comparison(result: &ComparisonResult) -> String {
    if result.matches {
        let mut out = format!(
            "{} capture matches baseline\n  baseline: {}",
            style("✓").green(),
            result.baseline_path.display()
        );
        if result.low_confidence {
            out.push_str("\n  note: pseudo-hash comparison (lower confidence)");
        }
        return out;
    }

    let mut out = format!(
        "{} visual drift detected\n  baseline:   {}\n  comparison: {}",
        style("✗").red(),
        result.baseline_path.display(),
        result.comparison_path.display()
    );
    if let Some(similarity) = result.similarity {
        out.push_str(&format!("\n  similarity: {similarity:.3}"));
    }
    if let Some(ref diff) = result.difference_path {
        out.push_str(&format!("\n  diff:       {}", diff.display()));
    }
    if result.low_confidence {
        out.push_str("\n  note: pseudo-hash comparison (lower confidence)");
    }
    out
}

/// Render an integrity audit as text
#[must_use]
pub fn render_validation_text(report: &BaselineValidation) -> String {
    let mut out = format!(
        "Baselines audited: {} ({} valid, {} invalid, {} missing)",
        report.total(),
        report.valid.len(),
        report.invalid.len(),
        report.missing.len(),
    );
    for name in &report.invalid {
        out.push_str(&format!("\n  {} invalid: {name}", style("✗").red()));
    }
    for name in &report.missing {
        out.push_str(&format!("\n  {} missing: {name}", style("⚠").yellow()));
    }
    out
}

/// Render an integrity audit as JSON
pub fn render_validation_json(report: &BaselineValidation) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Render the configuration matrix as text, one line per configuration
#[must_use]
pub fn render_matrix_text(
    manager: &BaselineManager,
    base_url: &str,
    configs: &[BaselineConfig],
) -> String {
    let mut out = format!("Standard matrix ({} configurations):", configs.len());
    for config in configs {
        out.push_str(&format!(
            "\n  {:<42} {:>4} {:>5} {}x{}  {}",
            config.name,
            config.aspect_ratio.label(),
            config.mode,
            config.viewport.width,
            config.viewport.height,
            manager.generate_test_url(base_url, config),
        ));
    }
    out
}

/// Render the configuration matrix as JSON
pub fn render_matrix_json(
    manager: &BaselineManager,
    base_url: &str,
    configs: &[BaselineConfig],
) -> serde_json::Result<String> {
    let rows: Vec<serde_json::Value> = configs
        .iter()
        .map(|config| -> serde_json::Result<serde_json::Value> {
            let mut value = serde_json::to_value(config)?;
            value["url"] = serde_json::Value::String(manager.generate_test_url(base_url, config));
            Ok(value)
        })
        .collect::<serde_json::Result<_>>()?;
    serde_json::to_string_pretty(&rows)
}

/// Render recorded baselines as text
#[must_use]
pub fn render_list_text(entries: &[BaselineMetadata]) -> String {
    if entries.is_empty() {
        return "No baselines recorded".to_string();
    }
    let mut out = format!("{} baseline(s):", entries.len());
    for entry in entries {
        let hash_prefix: String = entry.hash.chars().take(12).collect();
        out.push_str(&format!(
            "\n  {:<42} {hash_prefix}  {}  v{}",
            entry.config.name,
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.version,
        ));
    }
    out
}

/// Render recorded baselines as JSON
pub fn render_list_json(entries: &[BaselineMetadata]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use cotejar::{standard_baselines, BaselineStore};
    use std::path::PathBuf;

    fn manager() -> (tempfile::TempDir, BaselineManager) {
        let dir = tempfile::tempdir().unwrap();
        let store = BaselineStore::new(dir.path().join("visual")).unwrap();
        (dir, BaselineManager::new(store))
    }

    #[test]
    fn test_render_matching_comparison() {
        let result = ComparisonResult {
            matches: true,
            baseline_path: PathBuf::from("baselines/baseline-x.png"),
            comparison_path: PathBuf::from("comparisons/current-x.png"),
            difference_path: None,
            similarity: None,
            low_confidence: false,
        };
        let text = render_comparison(&result);
        assert!(text.contains("matches baseline"));
        assert!(!text.contains("lower confidence"));
    }

    #[test]
    fn test_render_drifted_comparison() {
        let result = ComparisonResult {
            matches: false,
            baseline_path: PathBuf::from("baselines/baseline-x.png"),
            comparison_path: PathBuf::from("comparisons/current-x.png"),
            difference_path: Some(PathBuf::from("comparisons/diff-x.png")),
            similarity: Some(0.42),
            low_confidence: true,
        };
        let text = render_comparison(&result);
        assert!(text.contains("visual drift"));
        assert!(text.contains("0.420"));
        assert!(text.contains("diff-x.png"));
        assert!(text.contains("lower confidence"));
    }

    #[test]
    fn test_render_validation_buckets() {
        let report = BaselineValidation {
            valid: vec!["a".to_string()],
            invalid: vec!["b".to_string()],
            missing: vec!["c".to_string()],
        };
        let text = render_validation_text(&report);
        assert!(text.contains("3 (1 valid, 1 invalid, 1 missing)"));
        assert!(text.contains("invalid: b"));
        assert!(text.contains("missing: c"));

        let json: serde_json::Value =
            serde_json::from_str(&render_validation_json(&report).unwrap()).unwrap();
        assert_eq!(json["invalid"][0], "b");
    }

    #[test]
    fn test_render_matrix_includes_urls() {
        let (_dir, manager) = manager();
        let configs = standard_baselines();
        let text = render_matrix_text(&manager, "http://localhost:4321", &configs);
        assert!(text.contains("portfolio-history-portrait-16x9-light"));
        assert!(text.contains("aspect_ratio=3:4"));

        let json: serde_json::Value =
            serde_json::from_str(&render_matrix_json(&manager, "http://localhost:4321", &configs).unwrap())
                .unwrap();
        assert_eq!(json.as_array().unwrap().len(), configs.len());
        assert!(json[0]["url"].as_str().unwrap().contains("aspect_ratio="));
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_list_text(&[]), "No baselines recorded");
    }
}
