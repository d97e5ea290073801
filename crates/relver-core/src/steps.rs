//! Extension-point model for the release pipeline.
//!
//! A pipeline is an ordered list of named extension points. Each carries a
//! record of recognized options (preset name, output file, asset list,
//! commit message template). With one exception these steps are purely
//! declarative: they configure work the external release orchestrator
//! performs. Only [`StepId::VerifyRelease`] is executed by relver itself
//! (see [`crate::manifest`]).
//!
//! Option templates use `{version}` for the release version; interpolation
//! is the orchestrator's job, relver just stores the template.

use serde::{Deserialize, Serialize};

/// Identifier of a pipeline extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    /// Analyze commits to classify the release (external).
    CommitAnalyzer,
    /// Generate release notes from commits (external).
    ReleaseNotes,
    /// Maintain the changelog file (external).
    Changelog,
    /// Synchronize the manifest version field (executed by relver).
    VerifyRelease,
    /// Commit and tag release artifacts (external).
    Git,
    /// Publish the release to the hosting platform (external).
    Publish,
}

impl StepId {
    /// Whether relver itself executes this step.
    pub const fn is_executable(self) -> bool {
        matches!(self, Self::VerifyRelease)
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CommitAnalyzer => "commit-analyzer",
            Self::ReleaseNotes => "release-notes",
            Self::Changelog => "changelog",
            Self::VerifyRelease => "verify-release",
            Self::Git => "git",
            Self::Publish => "publish",
        };
        write!(f, "{name}")
    }
}

/// One configured extension point.
///
/// All options are optional; a step with no options falls back to whatever
/// the orchestrator's defaults are. Unrecognized options are rejected at
/// config load rather than silently carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Which extension point this entry configures.
    pub id: StepId,
    /// Commit-convention preset (e.g., `conventionalcommits`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Output file for steps that write one (e.g., the changelog).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Files the step stages or attaches (e.g., git commit assets).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<String>>,
    /// Commit message template, `{version}` interpolated by the orchestrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Step {
    /// Create a step with no options set.
    pub const fn new(id: StepId) -> Self {
        Self {
            id,
            preset: None,
            file: None,
            assets: None,
            message: None,
        }
    }
}

/// The default pipeline: a conventional-commit release flow with the
/// manifest verified before anything is committed or published.
pub fn default_pipeline() -> Vec<Step> {
    vec![
        Step {
            preset: Some("conventionalcommits".into()),
            ..Step::new(StepId::CommitAnalyzer)
        },
        Step {
            preset: Some("conventionalcommits".into()),
            ..Step::new(StepId::ReleaseNotes)
        },
        Step {
            file: Some("CHANGELOG.md".into()),
            ..Step::new(StepId::Changelog)
        },
        Step::new(StepId::VerifyRelease),
        Step {
            assets: Some(vec!["Cargo.toml".into(), "CHANGELOG.md".into()]),
            message: Some("chore(release): {version} [skip ci]".into()),
            ..Step::new(StepId::Git)
        },
        Step::new(StepId::Publish),
    ]
}

/// Find the first entry for an extension point in an ordered pipeline.
pub fn find_step(steps: &[Step], id: StepId) -> Option<&Step> {
    steps.iter().find(|step| step.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pipeline_order() {
        let ids: Vec<StepId> = default_pipeline().iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![
                StepId::CommitAnalyzer,
                StepId::ReleaseNotes,
                StepId::Changelog,
                StepId::VerifyRelease,
                StepId::Git,
                StepId::Publish,
            ]
        );
    }

    #[test]
    fn only_verify_release_is_executable() {
        for step in default_pipeline() {
            assert_eq!(step.id.is_executable(), step.id == StepId::VerifyRelease);
        }
    }

    #[test]
    fn default_git_step_options() {
        let pipeline = default_pipeline();
        let git = find_step(&pipeline, StepId::Git).unwrap();
        assert_eq!(
            git.assets.as_deref(),
            Some(&["Cargo.toml".to_string(), "CHANGELOG.md".to_string()][..])
        );
        assert_eq!(
            git.message.as_deref(),
            Some("chore(release): {version} [skip ci]")
        );
    }

    #[test]
    fn find_step_misses_absent_id() {
        let pipeline = vec![Step::new(StepId::VerifyRelease)];
        assert!(find_step(&pipeline, StepId::Git).is_none());
    }

    #[test]
    fn step_id_kebab_case_serde() {
        let json = serde_json::to_string(&StepId::VerifyRelease).unwrap();
        assert_eq!(json, "\"verify-release\"");
        let back: StepId = serde_json::from_str("\"commit-analyzer\"").unwrap();
        assert_eq!(back, StepId::CommitAnalyzer);
    }

    #[test]
    fn step_rejects_unknown_options() {
        let result: Result<Step, _> =
            serde_json::from_str(r#"{"id": "git", "frobnicate": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn step_display_matches_config_names() {
        assert_eq!(StepId::VerifyRelease.to_string(), "verify-release");
        assert_eq!(StepId::ReleaseNotes.to_string(), "release-notes");
        assert_eq!(StepId::Publish.to_string(), "publish");
    }
}
