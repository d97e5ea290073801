//! Doctor command — diagnose configuration, manifest, and environment.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use relver_core::config::{self, Config};
use relver_core::manifest;

/// Arguments for the `doctor` subcommand.
#[derive(Args, Debug, Default)]
pub struct DoctorArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct DoctorReport {
    directories: DirectoryPaths,
    config: ConfigStatus,
    manifest: ManifestStatus,
    environment: EnvironmentInfo,
}

#[derive(Serialize)]
struct DirectoryPaths {
    config: Option<String>,
    cache: Option<String>,
    data_local: Option<String>,
}

#[derive(Serialize)]
struct ConfigStatus {
    /// Path to loaded config file, if any
    file: Option<String>,
    /// Whether a config file was found
    found: bool,
}

#[derive(Serialize)]
struct ManifestStatus {
    /// Configured manifest path
    path: String,
    /// Whether the file exists and is readable
    readable: bool,
    /// The version the manifest currently declares, if a field matched
    version: Option<String>,
}

#[derive(Serialize)]
struct EnvironmentInfo {
    /// Current working directory
    cwd: Option<String>,
    /// Relevant environment variables
    env_vars: Vec<EnvVar>,
}

#[derive(Serialize)]
struct EnvVar {
    name: &'static str,
    value: Option<String>,
    description: &'static str,
}

impl DoctorReport {
    fn gather(config: &Config, cwd: &camino::Utf8Path) -> Self {
        let config_file = config::find_project_config(cwd);

        let manifest_path = config.manifest_path();
        let manifest_path = if manifest_path.is_relative() {
            cwd.join(manifest_path)
        } else {
            manifest_path
        };
        let content = std::fs::read_to_string(&manifest_path).ok();
        let manifest_status = ManifestStatus {
            path: manifest_path.to_string(),
            readable: content.is_some(),
            version: content
                .as_deref()
                .and_then(manifest::current_version)
                .map(str::to_string),
        };

        Self {
            directories: DirectoryPaths {
                config: config::user_config_dir().map(|p| p.to_string()),
                cache: config::user_cache_dir().map(|p| p.to_string()),
                data_local: config::user_data_local_dir().map(|p| p.to_string()),
            },
            config: ConfigStatus {
                found: config_file.is_some(),
                file: config_file.map(|p| p.to_string()),
            },
            manifest: manifest_status,
            environment: EnvironmentInfo {
                cwd: Some(cwd.to_string()),
                env_vars: vec![
                    EnvVar {
                        name: "XDG_CONFIG_HOME",
                        value: std::env::var("XDG_CONFIG_HOME").ok(),
                        description: "Override config directory",
                    },
                    EnvVar {
                        name: "RUST_LOG",
                        value: std::env::var("RUST_LOG").ok(),
                        description: "Log filter directive",
                    },
                    EnvVar {
                        name: "RELVER_LOG_PATH",
                        value: std::env::var("RELVER_LOG_PATH").ok(),
                        description: "Explicit log file path",
                    },
                    EnvVar {
                        name: "RELVER_LOG_DIR",
                        value: std::env::var("RELVER_LOG_DIR").ok(),
                        description: "Log directory",
                    },
                ],
            },
        }
    }
}

/// Run diagnostics and report configuration status.
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `cwd` - Current working directory
#[instrument(name = "cmd_doctor", skip_all, fields(json_output))]
pub fn cmd_doctor(
    _args: DoctorArgs,
    global_json: bool,
    config: &Config,
    cwd: &camino::Utf8Path,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing doctor command");

    let report = DoctorReport::gather(config, cwd);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // Config status
    println!("{}", "Configuration".bold().underline());
    if report.config.found {
        println!(
            "  {} Config file: {}",
            "✓".green(),
            report.config.file.as_deref().unwrap_or("").cyan()
        );
    } else {
        println!("  {} No config file found (defaults apply)", "○".yellow());
    }
    println!();

    // Manifest status
    println!("{}", "Manifest".bold().underline());
    if report.manifest.readable {
        println!("  {} {}", "✓".green(), report.manifest.path.cyan());
        match report.manifest.version {
            Some(ref version) => {
                println!("  {} Version field: {}", "✓".green(), version.cyan());
            }
            None => {
                println!(
                    "  {} No version field — verify would leave the file unchanged",
                    "✗".red()
                );
            }
        }
    } else {
        println!(
            "  {} {} is missing or unreadable",
            "✗".red(),
            report.manifest.path.cyan()
        );
    }
    println!();

    // Directories
    println!("{}", "Directories".bold().underline());
    print_dir("  Config", &report.directories.config);
    print_dir("  Cache", &report.directories.cache);
    print_dir("  Data (local)", &report.directories.data_local);
    println!();

    // Environment
    println!("{}", "Environment".bold().underline());
    println!("  {}: {}", "Working directory".dimmed(), cwd.cyan());

    let set_vars: Vec<_> = report
        .environment
        .env_vars
        .iter()
        .filter(|v| v.value.is_some())
        .collect();

    if set_vars.is_empty() {
        println!("  {} No XDG/logging overrides set", "○".dimmed());
    } else {
        for var in set_vars {
            println!(
                "  {}: {}",
                var.name.dimmed(),
                var.value.as_deref().unwrap_or("").cyan()
            );
        }
    }

    Ok(())
}

fn print_dir(label: &str, path: &Option<String>) {
    print!("{}: ", label.dimmed());
    match path {
        Some(p) => println!("{}", p.cyan()),
        None => println!("{}", "(unavailable)".yellow()),
    }
}
