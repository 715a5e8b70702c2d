//! Configuration backup manager
//!
//! Snapshots of the config directory stored as .tar.gz archives in a
//! `backups` subdirectory. Automatic backups are pruned to a fixed count;
//! manual ones are kept until deleted by hand.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result, bail};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tracing::info;

use crate::config::descriptor::Config;
use crate::constants::config::backup;

/// A backup archive on disk
#[derive(Debug, Clone)]
pub struct BackupEntry {
    pub filename: String,
    pub path: PathBuf,
    pub timestamp: SystemTime,
    pub is_manual: bool,
}

pub struct BackupManager;

impl BackupManager {
    /// The config directory backups are taken of
    pub fn default_config_dir() -> PathBuf {
        let mut path = Config::path();
        path.pop();
        path
    }

    fn backup_dir(config_dir: &Path) -> PathBuf {
        config_dir.join(backup::SUBDIR)
    }

    /// Resolve a user-supplied archive filename inside the backup directory
    ///
    /// The filename must be a bare name as printed by `list`; anything that
    /// could escape the backup directory is rejected before joining.
    pub fn resolve_archive(config_dir: &Path, filename: &str) -> Result<PathBuf> {
        if filename.is_empty()
            || filename == ".."
            || filename.contains('/')
            || filename.contains('\\')
        {
            bail!("Invalid backup filename {:?}", filename);
        }
        Ok(Self::backup_dir(config_dir).join(filename))
    }

    /// Archive the config directory (minus the backups subdir) as tar.gz
    pub fn create(config_dir: &Path, is_manual: bool) -> Result<PathBuf> {
        let backup_dir = Self::backup_dir(config_dir);
        if !backup_dir.exists() {
            fs::create_dir_all(&backup_dir).context("Failed to create backup directory")?;
        }

        // Filename: [auto|manual]_backup_YYYYMMDD_HHMMSS.tar.gz
        let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
        let prefix = if is_manual { "manual" } else { "auto" };
        let filename = format!("{}_backup_{}.tar.gz", prefix, datetime.format("%Y%m%d_%H%M%S"));
        let archive_path = backup_dir.join(&filename);

        let file = fs::File::create(&archive_path)
            .with_context(|| format!("Failed to create archive {:?}", archive_path))?;
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for entry in fs::read_dir(config_dir)
            .with_context(|| format!("Failed to read config directory {:?}", config_dir))?
        {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name();

            if name == backup::SUBDIR {
                continue;
            }

            if path.is_dir() {
                builder
                    .append_dir_all(&name, &path)
                    .with_context(|| format!("Failed to archive directory {:?}", path))?;
            } else {
                builder
                    .append_path_with_name(&path, &name)
                    .with_context(|| format!("Failed to archive file {:?}", path))?;
            }
        }

        builder
            .into_inner()
            .and_then(|encoder| encoder.finish())
            .context("Failed to finalize archive")?;

        info!(path = %archive_path.display(), manual = is_manual, "Created config backup");

        if !is_manual {
            Self::prune(config_dir)?;
        }

        Ok(archive_path)
    }

    /// List backup archives, newest first
    pub fn list(config_dir: &Path) -> Result<Vec<BackupEntry>> {
        let backup_dir = Self::backup_dir(config_dir);
        let mut entries = Vec::new();

        if !backup_dir.exists() {
            return Ok(entries);
        }

        for entry in fs::read_dir(&backup_dir)
            .with_context(|| format!("Failed to read backup directory {:?}", backup_dir))?
        {
            let entry = entry?;
            let path = entry.path();
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if !filename.ends_with(".tar.gz") {
                continue;
            }

            let timestamp = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);

            entries.push(BackupEntry {
                filename: filename.to_string(),
                path: path.clone(),
                timestamp,
                is_manual: filename.starts_with("manual_"),
            });
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// Unpack an archive over the config directory
    pub fn restore(config_dir: &Path, archive_path: &Path) -> Result<()> {
        let file = fs::File::open(archive_path)
            .with_context(|| format!("Failed to open archive {:?}", archive_path))?;
        let decoder = GzDecoder::new(file);
        let mut archive = tar::Archive::new(decoder);

        archive
            .unpack(config_dir)
            .with_context(|| format!("Failed to unpack archive into {:?}", config_dir))?;

        info!(path = %archive_path.display(), "Restored config backup");
        Ok(())
    }

    /// Delete the oldest automatic backups beyond the retention count
    fn prune(config_dir: &Path) -> Result<()> {
        let mut auto: Vec<BackupEntry> = Self::list(config_dir)?
            .into_iter()
            .filter(|e| !e.is_manual)
            .collect();

        while auto.len() > backup::MAX_AUTO {
            // list() sorts newest first
            if let Some(oldest) = auto.pop() {
                fs::remove_file(&oldest.path)
                    .with_context(|| format!("Failed to remove old backup {:?}", oldest.path))?;
                info!(filename = %oldest.filename, "Pruned old backup");
            }
        }

        Ok(())
    }
}
