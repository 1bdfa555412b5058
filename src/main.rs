use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{info, warn};

mod config;

use config::{Cli, Command, Config};
use nfsopts::{NfsVersion, fstab, options};

fn show_version(mntops: &str) -> Result<()> {
    let version = options::version_of(mntops)?;

    println!("Version: {} ({})", version.label(), version.widget_text());
    println!(
        "Mount option value: {}",
        version.mntops_value().unwrap_or("(none)")
    );
    println!("Requires NFSv4 support: {}", version.requires_v4());
    println!("Legacy encoding: {}", options::is_legacy(mntops));
    Ok(())
}

fn set_version(mntops: &str, version: NfsVersion) -> Result<()> {
    if options::is_legacy(mntops) {
        info!("Dropping legacy minorversion option from '{}'", mntops);
    }
    println!("{}", options::with_version(mntops, version)?);
    Ok(())
}

/// Print the NFS entries of an fstab file as a table
fn list(path: &Path) -> Result<()> {
    let entries = fstab::read_nfs_entries(path)?;

    println!("NFS entries in {}:", path.display());
    for entry in &entries {
        let (server, share) = entry.server_and_path();
        let version = entry
            .version_label()
            .unwrap_or_else(|e| format!("Invalid ({e})"));
        println!(
            "  {:<20} {:<24} {:<24} {:<22} {}",
            server, share, entry.file, version, entry.mntops
        );
    }
    if entries.is_empty() {
        println!("  (none)");
    }
    println!();
    println!("NFSv4 support needed: {}", fstab::requires_nfs4(&entries));
    Ok(())
}

/// Report every NFS entry with invalid options; fails if there is any
fn check(path: &Path) -> Result<()> {
    let entries = fstab::read_nfs_entries(path)?;

    let mut invalid = 0;
    for entry in &entries {
        match options::validate(&entry.mntops) {
            Ok(()) if entry.is_legacy() => {
                warn!("{}: legacy NFS version settings", entry.file);
            }
            Ok(()) => {}
            Err(e) => {
                println!("{}: {}", entry.file, e);
                invalid += 1;
            }
        }
    }

    if invalid > 0 {
        anyhow::bail!(
            "{} of {} NFS entries have invalid mount options",
            invalid,
            entries.len()
        );
    }

    println!("All {} NFS entries are valid", entries.len());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before tracing init)
    let config = Config::load(cli.config)?;

    // Initialize tracing with configured log level
    // Priority: config file -> RUST_LOG env -> "info"
    let log_level_str = config.logging.effective_level();
    let log_level = match log_level_str.parse() {
        Ok(level) => level,
        Err(_) => {
            eprintln!(
                "Warning: Invalid log level '{}', falling back to 'info'",
                log_level_str
            );
            tracing::Level::INFO
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Validate { options: mntops } => {
            options::validate(&mntops)?;
            Ok(())
        }
        Command::Version { options: mntops } => show_version(&mntops),
        Command::SetVersion {
            options: mntops,
            version,
        } => set_version(&mntops, version),
        Command::List { fstab } => list(&config.fstab_path(fstab)),
        Command::Check { fstab } => check(&config.fstab_path(fstab)),
    }
}
