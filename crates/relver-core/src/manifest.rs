//! Manifest version synchronization — the `verify-release` step.
//!
//! The manifest is a text file containing a quoted version assignment of
//! the exact shape `version = "X.Y.Z"`. Everything around that assignment
//! is opaque: the rewriter replaces the quoted payload of the **first**
//! match and passes every other byte through verbatim.
//!
//! # Two layers
//!
//! 1. **Pure** ([`rewrite_version`]) — content in, content out. No I/O,
//!    so the substitution semantics are testable without a filesystem.
//! 2. **I/O wrapper** ([`sync_version`]) — one read-modify-write cycle
//!    against the manifest path, skipped entirely when the orchestrator
//!    made no release decision.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use semver::Version;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::release::ReleaseDecision;

/// The literal prefix of a quoted version assignment.
const VERSION_FIELD: &str = "version = \"";

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors from manifest synchronization.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path to the manifest.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path to the manifest.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest contains no `version = "..."` assignment (strict mode).
    #[error("no version field found in {0}")]
    NoVersionField(Utf8PathBuf),
}

/// Result alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

// ──────────────────────────────────────────────
// Pure rewrite
// ──────────────────────────────────────────────

/// Result of a pure content rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// The first version assignment was replaced.
    Replaced {
        /// The rewritten file content.
        content: String,
        /// The version string the assignment previously carried.
        previous: String,
    },
    /// No version assignment matched; the content is unchanged.
    NoMatch,
}

/// Replace the payload of the first `version = "..."` assignment.
///
/// At most one substitution occurs. Content without a complete match
/// (including a match whose closing quote is missing) comes back as
/// [`Rewrite::NoMatch`].
pub fn rewrite_version(content: &str, version: &Version) -> Rewrite {
    let Some((start, len)) = locate_version(content) else {
        return Rewrite::NoMatch;
    };

    let previous = content[start..start + len].to_string();
    let mut rewritten = String::with_capacity(content.len() + 16);
    rewritten.push_str(&content[..start]);
    rewritten.push_str(&version.to_string());
    rewritten.push_str(&content[start + len..]);

    Rewrite::Replaced {
        content: rewritten,
        previous,
    }
}

/// Return the payload of the first version assignment, if any.
///
/// Used by diagnostics to report what the manifest currently declares.
pub fn current_version(content: &str) -> Option<&str> {
    locate_version(content).map(|(start, len)| &content[start..start + len])
}

/// Locate the quoted payload of the first version assignment as
/// `(byte offset, byte length)`.
fn locate_version(content: &str) -> Option<(usize, usize)> {
    let field = content.find(VERSION_FIELD)?;
    let start = field + VERSION_FIELD.len();
    let len = content[start..].find('"')?;
    Some((start, len))
}

// ──────────────────────────────────────────────
// File synchronization
// ──────────────────────────────────────────────

/// Outcome of a manifest synchronization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SyncOutcome {
    /// No release decision — nothing was read or written.
    Skipped,
    /// The version field was rewritten and the file saved.
    Updated {
        /// The version string before the rewrite.
        previous: String,
        /// The version string after the rewrite.
        version: String,
    },
    /// No version field matched; the file was left unchanged.
    NoVersionField,
}

/// Synchronize the manifest's version field with a release decision.
///
/// Performs at most one read-modify-write cycle: the file is not touched
/// at all when `decision` is `None`. A manifest without a version field
/// is logged as a warning and reported as [`SyncOutcome::NoVersionField`],
/// unless `strict` is set, in which case it is an error.
///
/// # Errors
///
/// [`ManifestError::Read`] / [`ManifestError::Write`] when the file cannot
/// be accessed — these must propagate so the orchestrator's run fails
/// rather than reporting a release whose manifest was never updated.
#[instrument(skip(decision), fields(%path))]
pub fn sync_version(
    path: &Utf8Path,
    decision: Option<&ReleaseDecision>,
    strict: bool,
) -> ManifestResult<SyncOutcome> {
    let Some(decision) = decision else {
        debug!("no release decision, skipping manifest sync");
        return Ok(SyncOutcome::Skipped);
    };

    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match rewrite_version(&content, &decision.version) {
        Rewrite::Replaced {
            content: rewritten,
            previous,
        } => {
            fs::write(path, rewritten).map_err(|source| ManifestError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!(%previous, version = %decision.version, "manifest version updated");
            Ok(SyncOutcome::Updated {
                previous,
                version: decision.version.to_string(),
            })
        }
        Rewrite::NoMatch if strict => Err(ManifestError::NoVersionField(path.to_path_buf())),
        Rewrite::NoMatch => {
            warn!("manifest has no version field, leaving file unchanged");
            Ok(SyncOutcome::NoVersionField)
        }
    }
}
