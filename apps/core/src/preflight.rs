//! Preflight Check System
//!
//! Verifies directories and classifier artifacts before the bot serves any
//! event. A failed critical check means the process must not start.

use crate::brain::ClassifierArtifacts;
use crate::config::BotConfig;
use crate::fs_manager::PortablePathManager;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }
}

/// Complete preflight check report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub ready_to_start: bool,
    pub summary: String,
}

impl PreflightReport {
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// Performs all preflight checks and returns a report
pub fn run_preflight_checks(config: &BotConfig) -> PreflightReport {
    info!("╔════════════════════════════════════════════════╗");
    info!("║             RUNNING PREFLIGHT CHECKS           ║");
    info!("╚════════════════════════════════════════════════╝");

    let mut checks = Vec::new();

    checks.push(check_directories(config));

    let vectorizer_check = check_artifact_file("vectorizer_file", &config.vectorizer_path());
    let model_check = check_artifact_file("model_file", &config.model_path());
    let files_exist = vectorizer_check.passed && model_check.passed;
    checks.push(vectorizer_check);
    checks.push(model_check);

    if files_exist {
        checks.push(check_artifacts_load(config));
    } else {
        checks.push(CheckResult::fail(
            "artifacts_load",
            "Skipped - missing vectorizer or model",
            None,
        ));
    }

    let all_passed = checks.iter().all(|c| c.passed);
    let critical_passed = checks
        .iter()
        .filter(|c| is_critical_check(&c.name))
        .all(|c| c.passed);

    let summary = if all_passed {
        "All checks passed. System ready.".to_string()
    } else if critical_passed {
        "Some non-critical checks failed. System can start with warnings.".to_string()
    } else {
        "Critical checks failed. System cannot start.".to_string()
    };

    for check in &checks {
        if check.passed {
            info!("  ✅ {}: {}", check.name, check.message);
        } else {
            warn!("  ❌ {}: {}", check.name, check.message);
            if let Some(details) = &check.details {
                warn!("      Details: {}", details);
            }
        }
    }

    info!("Summary: {}", summary);

    PreflightReport {
        all_passed,
        checks,
        ready_to_start: critical_passed,
        summary,
    }
}

fn is_critical_check(name: &str) -> bool {
    matches!(name, "vectorizer_file" | "model_file" | "artifacts_load")
}

// --- Individual Checks ---

/// The data directory is otherwise created lazily on first write, so a
/// failure here only warns.
fn check_directories(config: &BotConfig) -> CheckResult {
    let dirs = [("data", &config.data_dir), ("models", &config.models_dir)];

    let mut missing = Vec::new();
    let mut created = Vec::new();

    for (name, path) in dirs {
        match PortablePathManager::ensure_dir(path) {
            Ok(true) => created.push(name),
            Ok(false) => {}
            Err(e) => missing.push(format!("{}: {}", name, e)),
        }
    }

    if !missing.is_empty() {
        CheckResult::fail("directories", "Failed to create directories", Some(missing.join(", ")))
    } else if created.is_empty() {
        CheckResult::pass("directories", "All directories exist")
    } else {
        CheckResult::pass(
            "directories",
            &format!("Created missing directories: {}", created.join(", ")),
        )
    }
}

fn check_artifact_file(name: &str, path: &Path) -> CheckResult {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => {
            CheckResult::pass(name, &format!("Found {} ({} bytes)", path.display(), meta.len()))
        }
        Ok(_) => CheckResult::fail(name, "Artifact is empty or not a file", Some(path.display().to_string())),
        Err(e) => CheckResult::fail(name, "Artifact not found", Some(format!("{}: {}", path.display(), e))),
    }
}

fn check_artifacts_load(config: &BotConfig) -> CheckResult {
    match ClassifierArtifacts::load(&config.vectorizer_path(), &config.model_path()) {
        Ok(artifacts) => CheckResult::pass(
            "artifacts_load",
            &format!("Classifier ready ({} features)", artifacts.feature_count()),
        ),
        Err(e) => CheckResult::fail("artifacts_load", "Failed to load classifier", Some(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{ChannelNet, Vectorizer};
    use tempfile::tempdir;

    fn config_in(root: &Path) -> BotConfig {
        BotConfig {
            data_dir: root.join("data"),
            models_dir: root.join("models"),
            ..BotConfig::default()
        }
    }

    #[test]
    fn test_missing_artifacts_block_startup() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        let report = run_preflight_checks(&config);

        assert!(!report.ready_to_start);
        assert!(report.check("directories").unwrap().passed);
        assert!(!report.check("model_file").unwrap().passed);
        assert!(!report.check("artifacts_load").unwrap().passed);
        assert!(config.data_dir.is_dir());
    }

    #[test]
    fn test_valid_artifacts_pass() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let vectorizer = Vectorizer::from_tokens(["channel"]).unwrap();
        let model = ChannelNet::new(vec![vec![1.0]], vec![0.0], vec![1.0], 0.0).unwrap();
        ClassifierArtifacts::new(vectorizer, model)
            .unwrap()
            .save(&config.vectorizer_path(), &config.model_path())
            .unwrap();

        let report = run_preflight_checks(&config);
        assert!(report.all_passed, "{:?}", report.checks);
        assert!(report.ready_to_start);
    }

    #[test]
    fn test_corrupt_artifact_blocks_startup() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::create_dir_all(&config.models_dir).unwrap();
        std::fs::write(config.vectorizer_path(), b"garbage").unwrap();
        std::fs::write(config.model_path(), b"garbage").unwrap();

        let report = run_preflight_checks(&config);
        assert!(report.check("model_file").unwrap().passed);
        assert!(!report.check("artifacts_load").unwrap().passed);
        assert!(!report.ready_to_start);
    }
}
