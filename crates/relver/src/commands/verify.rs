//! Verify command — thin CLI layer over `relver_core::manifest`.
//!
//! This is the `verify-release` extension point. The external orchestrator
//! invokes it after deciding whether a release happens, passing its context
//! as JSON (`--context FILE`, `-` for stdin). `--version` bypasses the
//! context document for direct invocation.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument, warn};

use relver_core::config::Config;
use relver_core::manifest::{self, SyncOutcome};
use relver_core::release::{ReleaseDecision, VerifyContext};

/// Arguments for the `verify` subcommand.
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// Read the orchestrator's verify context from FILE ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Supply the next release version directly (e.g., "2.0.0" or "v2.0.0")
    #[arg(long, value_name = "VERSION", conflicts_with = "context")]
    pub version: Option<String>,

    /// Manifest to synchronize (overrides configuration)
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<camino::Utf8PathBuf>,

    /// Treat a manifest without a version field as an error
    #[arg(long)]
    pub strict: bool,
}

/// Execute the verify command.
#[instrument(name = "cmd_verify", skip_all, fields(json_output))]
pub fn cmd_verify(
    args: VerifyArgs,
    global_json: bool,
    config: &Config,
    cwd: &camino::Utf8Path,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing verify command");

    let context = load_context(&args).context("failed to load verify context")?;

    // The orchestrator owns branch eligibility; an unexpected branch in the
    // context is worth a warning but never a hard stop here.
    if let Some(ref branch) = context.branch {
        let branches = config.branches();
        if !branches.iter().any(|b| b == branch) {
            warn!(%branch, eligible = ?branches, "context branch is not in the eligible list");
        }
    }

    let manifest_path = args.manifest.unwrap_or_else(|| config.manifest_path());
    let manifest_path = if manifest_path.is_relative() {
        cwd.join(manifest_path)
    } else {
        manifest_path
    };
    let strict = args.strict || config.strict();

    let outcome = manifest::sync_version(
        &manifest_path,
        context.next_release.as_ref(),
        strict,
    )
    .context("manifest synchronization failed")?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        SyncOutcome::Skipped => {
            println!("{}", "No release decision — nothing to do.".yellow());
        }
        SyncOutcome::Updated { previous, version } => {
            println!(
                "  {} {} {} → {}",
                "✓".green(),
                manifest_path.cyan(),
                previous.dimmed(),
                version.green().bold()
            );
        }
        SyncOutcome::NoVersionField => {
            println!(
                "  {} {} has no version field; left unchanged",
                "○".yellow(),
                manifest_path.cyan()
            );
        }
    }

    Ok(())
}

/// Build the verify context from CLI arguments.
///
/// Precedence: `--version` > `--context` > empty context (no decision),
/// matching the no-op the orchestrator expects when it withholds a release.
fn load_context(args: &VerifyArgs) -> anyhow::Result<VerifyContext> {
    if let Some(ref version) = args.version {
        let decision =
            ReleaseDecision::parse(version).with_context(|| format!("invalid version {version}"))?;
        return Ok(VerifyContext {
            next_release: Some(decision),
            branch: None,
        });
    }

    let Some(ref path) = args.context else {
        return Ok(VerifyContext::default());
    };

    let json = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read verify context from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read verify context from {}", path.display()))?
    };

    VerifyContext::from_json(&json).context("invalid verify context JSON")
}
