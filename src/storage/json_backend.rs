use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::{
    core::utils::{self, ensure_dir},
    domain::{BudgetBook, CURRENT_SCHEMA_VERSION},
    errors::{BudgetError, Result},
};

use super::StateStore;

const BACKUP_EXTENSION: &str = "json";
const BACKUP_PREFIX: &str = "budget";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Stores the whole budget as a single pretty-printed JSON document.
/// Every save first copies the previous file into `backups/`, then
/// writes through a temp file and renames it into place.
#[derive(Clone)]
pub struct JsonStore {
    root: PathBuf,
    state_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = utils::resolve_base(root);
        ensure_dir(&root)?;
        let backups_dir = utils::backups_dir_in(&root);
        ensure_dir(&backups_dir)?;
        let state_file = utils::state_file_in(&root);
        Ok(Self {
            root,
            state_file,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn state_path(&self) -> &Path {
        &self.state_file
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let file_name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            entries.push(file_name);
        }
        entries.sort_by(|a, b| parse_backup_timestamp(b).cmp(&parse_backup_timestamp(a)));
        Ok(entries)
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.state_file.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!("{}_{}.{}", BACKUP_PREFIX, timestamp, BACKUP_EXTENSION);
        fs::copy(&self.state_file, self.backups_dir.join(backup_name))?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        if backups.len() <= self.retention {
            return Ok(());
        }
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backups_dir.join(entry));
        }
        Ok(())
    }
}

impl StateStore for JsonStore {
    fn load(&self) -> Result<BudgetBook> {
        if !self.state_file.exists() {
            return Ok(BudgetBook::new());
        }
        let data = fs::read_to_string(&self.state_file)?;
        let book: BudgetBook = match serde_json::from_str(&data) {
            Ok(book) => book,
            Err(err) => {
                // The unreadable file is still backed up by the next save.
                warn!(
                    "budget file `{}` could not be parsed, starting with an empty book: {}",
                    self.state_file.display(),
                    err
                );
                return Ok(BudgetBook::new());
            }
        };
        if book.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(BudgetError::StorageError(format!(
                "budget file `{}` is from a newer schema version",
                self.state_file.display()
            )));
        }
        Ok(book)
    }

    fn save(&self, book: &BudgetBook) -> Result<()> {
        self.backup_existing_file()?;
        let json = serde_json::to_string_pretty(book)?;
        let tmp = tmp_path(&self.state_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.state_file)?;
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        self.backup_existing_file()?;
        match fs::remove_file(&self.state_file) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(BudgetError::from(err)),
        }
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name
        .strip_prefix(BACKUP_PREFIX)?
        .strip_prefix('_')?
        .strip_suffix(".json")?;
    NaiveDateTime::parse_from_str(stem, BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
