//! CLI module for sitelist
//!
//! The job takes no arguments besides -h/--help and -V/--version.
//! All settings come from environment variables.

use clap::Parser;

/// sitelist - Build a checked LunaTV site list from the upstream catalog
#[derive(Parser, Debug)]
#[command(name = "sitelist")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SITELIST_SOURCE_URL            Catalog URL (default: LunaTV-config.json on GitHub)
    SITELIST_OUTPUT                Site list path (default: output.json)
    SITELIST_README                Status README path (default: README.md)
    SITELIST_ARCHIVE_DIR           Directory for timestamped copies (default: none)
    SITELIST_PROBE_TIMEOUT_MS      Per-endpoint probe timeout (default: 5000)
    SITELIST_PROBE_CONCURRENCY     Max in-flight probes, 0 = unlimited (default: 64)
    SITELIST_PROBE_DEADLINE_SECS   Deadline for the whole probe stage (default: none)
    SITELIST_REPOSITORY            owner/repo for README links (fallback: GITHUB_REPOSITORY)
    SITELIST_LOG_LEVEL             Log filter (fallback: RUST_LOG, default: info)
    SITELIST_LOG_DIR               Also write daily log files here (default: none)
"#)]
pub struct Cli;
