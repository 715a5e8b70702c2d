#![deny(unsafe_code)]

mod color;
mod config;
mod constants;
mod startup;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level as TraceLevel;
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::config::backup::BackupManager;
use crate::config::validate::validate;
use crate::startup::startup_hook;

#[derive(Parser)]
#[command(name = "tatami-config")]
#[command(version)]
#[command(about = "Configuration descriptor for the tatami window manager", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Load the descriptor and report structural problems
    Check,
    /// Print the expanded descriptor as JSON for the host to consume
    Dump,
    /// Fire the startup hook (spawns the autostart script once)
    Startup,
    /// Manage config directory backups
    Backup {
        #[command(subcommand)]
        action: BackupCommand,
    },
}

#[derive(Subcommand)]
enum BackupCommand {
    /// Create a manual backup archive
    Create,
    /// List existing backup archives
    List,
    /// Restore a backup archive over the config directory
    Restore {
        /// Archive filename as shown by `backup list`
        filename: String,
    },
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(TraceLevel::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Check) {
        Command::Check => check(),
        Command::Dump => dump(),
        Command::Startup => fire_startup(),
        Command::Backup { action } => run_backup(action),
    }
}

fn check() -> Result<()> {
    let config = Config::load()?;
    let findings = validate(&config);

    if findings.is_empty() {
        println!(
            "ok: {} keys ({} effective), {} groups, {} layouts, {} screens",
            config.keys.len(),
            config.effective_keys().len(),
            config.groups.len(),
            config.layouts.len(),
            config.screens.len(),
        );
        return Ok(());
    }

    for finding in &findings {
        eprintln!("problem: {}", finding);
    }
    anyhow::bail!("{} problem(s) found", findings.len())
}

fn dump() -> Result<()> {
    let config = Config::load()?;
    let json = serde_json::to_string_pretty(&config.host_payload())?;
    println!("{}", json);
    Ok(())
}

fn fire_startup() -> Result<()> {
    if !startup_hook().fire() {
        tracing::info!("Startup hook already fired in this process, skipping");
    }
    Ok(())
}

fn run_backup(action: BackupCommand) -> Result<()> {
    let config_dir = BackupManager::default_config_dir();

    match action {
        BackupCommand::Create => {
            let path = BackupManager::create(&config_dir, true)?;
            println!("created {}", path.display());
        }
        BackupCommand::List => {
            let entries = BackupManager::list(&config_dir)?;
            if entries.is_empty() {
                println!("no backups");
            }
            for entry in entries {
                let kind = if entry.is_manual { "manual" } else { "auto" };
                println!("{}  ({})", entry.filename, kind);
            }
        }
        BackupCommand::Restore { filename } => {
            let archive = BackupManager::resolve_archive(&config_dir, &filename)?;
            // Keep a safety copy of the current state before overwriting it
            BackupManager::create(&config_dir, false)?;
            BackupManager::restore(&config_dir, &archive)?;
            println!("restored {}", filename);
        }
    }

    Ok(())
}
