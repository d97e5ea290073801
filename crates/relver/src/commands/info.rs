//! Info command — show package, config, and pipeline information.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use relver_core::config::{self, Config};
use relver_core::steps::Step;

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ReleaseInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    branches: Vec<String>,
    manifest: String,
    strict: bool,
    steps: Vec<Step>,
}

impl ReleaseInfo {
    fn from_config(config: &Config, cwd: &camino::Utf8Path) -> Self {
        Self {
            config_file: config::find_project_config(cwd).map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            branches: config.branches(),
            manifest: config.manifest_path().to_string(),
            strict: config.strict(),
            steps: config.steps(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    release: ReleaseInfo,
}

/// Print package and pipeline information.
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `cwd` - Current working directory for config discovery
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    cwd: &camino::Utf8Path,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        release: ReleaseInfo::from_config(config, cwd),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        full_info.package.name.bold(),
        full_info.package.version.green()
    );
    if !full_info.package.description.is_empty() {
        println!("{}", full_info.package.description);
    }
    if !full_info.package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), full_info.package.license);
    }
    if !full_info.package.repository.is_empty() {
        println!(
            "{}: {}",
            "Repository".dimmed(),
            full_info.package.repository.cyan()
        );
    }

    // Configuration section
    println!();
    println!("{}", "Configuration".bold().underline());
    if let Some(ref path) = full_info.release.config_file {
        println!("{}: {}", "Config file".dimmed(), path.cyan());
    } else {
        println!("{}: {}", "Config file".dimmed(), "none loaded".yellow());
    }
    println!("{}: {}", "Log level".dimmed(), full_info.release.log_level);
    println!(
        "{}: {}",
        "Branches".dimmed(),
        full_info.release.branches.join(", ")
    );
    println!(
        "{}: {}",
        "Manifest".dimmed(),
        full_info.release.manifest.cyan()
    );
    println!("{}: {}", "Strict".dimmed(), full_info.release.strict);

    // Pipeline section
    println!();
    println!("{}", "Pipeline".bold().underline());
    for step in &full_info.release.steps {
        let marker = if step.id.is_executable() {
            "●".green().to_string()
        } else {
            "○".dimmed().to_string()
        };
        let mut options = Vec::new();
        if let Some(ref preset) = step.preset {
            options.push(format!("preset={preset}"));
        }
        if let Some(ref file) = step.file {
            options.push(format!("file={file}"));
        }
        if let Some(ref assets) = step.assets {
            options.push(format!("assets={}", assets.join(",")));
        }
        if let Some(ref message) = step.message {
            options.push(format!("message={message:?}"));
        }
        if options.is_empty() {
            println!("  {marker} {}", step.id);
        } else {
            println!("  {marker} {} {}", step.id, options.join(" ").dimmed());
        }
    }

    Ok(())
}
