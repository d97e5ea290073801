//! The release decision and the verify context.
//!
//! Both types cross the boundary between relver and the external release
//! orchestrator as JSON. The orchestrator decides *whether* a release
//! happens and *what* version it carries; relver only reads that decision.
//!
//! A missing `next_release` field is the orchestrator's way of saying
//! "no release this run" and is a recognized no-op, not an error.

use semver::Version;
use serde::{Deserialize, Serialize};

/// The orchestrator's determination of the next release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDecision {
    /// The semantic version chosen for the release (e.g., `2.0.0`).
    pub version: Version,
    /// The git tag the orchestrator will create (e.g., `v2.0.0`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// The release channel, when the orchestrator distinguishes any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl ReleaseDecision {
    /// Create a decision carrying only a version.
    pub const fn new(version: Version) -> Self {
        Self {
            version,
            tag: None,
            channel: None,
        }
    }

    /// Parse a decision from a version string, stripping an optional `v` prefix.
    pub fn parse(s: &str) -> Result<Self, semver::Error> {
        let s = s.strip_prefix('v').unwrap_or(s);
        Ok(Self::new(Version::parse(s)?))
    }
}

impl std::fmt::Display for ReleaseDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.version)
    }
}

/// The context object handed to the `verify-release` extension point.
///
/// The orchestrator serializes this as JSON and passes it via a file or
/// stdin. Unknown fields are ignored so newer orchestrators can add data
/// without breaking older relver binaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyContext {
    /// The release decision, absent when no release should occur.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_release: Option<ReleaseDecision>,
    /// The branch the orchestrator is releasing from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl VerifyContext {
    /// Deserialize a verify context from the orchestrator's JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_v_prefix() {
        let decision = ReleaseDecision::parse("v1.2.3").unwrap();
        assert_eq!(decision.version, Version::new(1, 2, 3));
    }

    #[test]
    fn parse_without_v_prefix() {
        let decision = ReleaseDecision::parse("1.2.3").unwrap();
        assert_eq!(decision.version, Version::new(1, 2, 3));
    }

    #[test]
    fn parse_invalid() {
        assert!(ReleaseDecision::parse("not-a-version").is_err());
    }

    #[test]
    fn context_with_decision() {
        let ctx = VerifyContext::from_json(r#"{"next_release": {"version": "2.0.0"}}"#).unwrap();
        let decision = ctx.next_release.unwrap();
        assert_eq!(decision.version, Version::new(2, 0, 0));
        assert!(decision.tag.is_none());
    }

    #[test]
    fn context_without_decision() {
        let ctx = VerifyContext::from_json("{}").unwrap();
        assert!(ctx.next_release.is_none());
    }

    #[test]
    fn context_with_null_decision() {
        let ctx = VerifyContext::from_json(r#"{"next_release": null}"#).unwrap();
        assert!(ctx.next_release.is_none());
    }

    #[test]
    fn context_ignores_unknown_fields() {
        let ctx = VerifyContext::from_json(
            r#"{"next_release": {"version": "1.0.0", "notes": "..."}, "commits": []}"#,
        )
        .unwrap();
        assert_eq!(ctx.next_release.unwrap().version, Version::new(1, 0, 0));
    }

    #[test]
    fn context_json_round_trip() {
        let ctx = VerifyContext {
            next_release: Some(ReleaseDecision {
                version: Version::new(1, 2, 3),
                tag: Some("v1.2.3".into()),
                channel: None,
            }),
            branch: Some("main".into()),
        };
        let json = serde_json::to_string(&ctx).unwrap();
        let back = VerifyContext::from_json(&json).unwrap();
        assert_eq!(back.next_release, ctx.next_release);
        assert_eq!(back.branch.as_deref(), Some("main"));
    }

    #[test]
    fn decision_displays_bare_version() {
        let decision = ReleaseDecision::parse("v1.2.3").unwrap();
        assert_eq!(decision.to_string(), "1.2.3");
    }
}
