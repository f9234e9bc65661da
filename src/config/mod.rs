use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    categories::PlannedDefaults,
    core::utils::{self, ensure_dir},
    errors::Result,
};

const TMP_SUFFIX: &str = "tmp";

/// User-tunable settings kept next to the budget document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub currency_symbol: String,
    /// Planned amounts to seed new months with, keyed by category name.
    #[serde(default)]
    pub default_planned: HashMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_retention: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            default_planned: HashMap::new(),
            backup_retention: None,
        }
    }
}

impl Settings {
    pub fn planned_defaults(&self) -> PlannedDefaults {
        PlannedDefaults::new(&self.default_planned)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(utils::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: utils::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Settings> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let settings = manager.load().expect("load settings");
        assert_eq!(settings.currency_symbol, "$");
        assert!(settings.default_planned.is_empty());
        assert!(settings.backup_retention.is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.default_planned.insert("groceries".into(), 450.0);
        settings.backup_retention = Some(8);
        manager.save(&settings).expect("save settings");
        let loaded = manager.load().expect("load settings");
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_planned.get("groceries"), Some(&450.0));
        assert_eq!(loaded.backup_retention, Some(8));
    }

    #[test]
    fn planned_defaults_respect_overrides() {
        let mut settings = Settings::default();
        settings.default_planned.insert("Groceries".into(), 750.0);
        let defaults = settings.planned_defaults();
        assert_eq!(defaults.for_category("groceries"), 750.0);
        assert_eq!(defaults.for_category("Housing"), 1500.0);
    }
}
