use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    domain::transaction::{CategoryPolicy, TransactionKind, ValidationRules},
    errors::ConfigError,
};

const TMP_SUFFIX: &str = "tmp";
const DEFAULT_MONTHLY_BUDGET: i64 = 50_000;
const DEFAULT_EXPORT_FILE_NAME: &str = "filtered_transactions.csv";

/// Settings the presentation shell supplies to the ledger core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub data_file: PathBuf,
    pub kinds: Vec<TransactionKind>,
    pub categories: CategoryPolicy,
    pub monthly_budget: Decimal,
    pub export_file_name: String,
}

impl LedgerConfig {
    /// Defaults rooted at `base` instead of the application directory.
    pub fn in_dir(base: &Path) -> Self {
        Self {
            data_file: PathResolver::data_file_in(base),
            ..Self::default()
        }
    }

    pub fn rules(&self) -> ValidationRules {
        ValidationRules::new(self.kinds.clone(), self.categories.clone())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monthly_budget <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveBudget(self.monthly_budget));
        }
        if self.kinds.is_empty() {
            return Err(ConfigError::EmptyKindSet);
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_file: PathResolver::data_file_in(&PathResolver::base_dir()),
            kinds: TransactionKind::standard(),
            categories: CategoryPolicy::FreeText,
            monthly_budget: Decimal::from(DEFAULT_MONTHLY_BUDGET),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.into(),
        }
    }
}

/// Loads and saves [`LedgerConfig`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored configuration, or defaults rooted next to the config file when
    /// none exists. Loaded settings are validated before being returned.
    pub fn load(&self) -> Result<LedgerConfig, ConfigError> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)?
        } else {
            match self.path.parent() {
                Some(base) => LedgerConfig::in_dir(base),
                None => LedgerConfig::default(),
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &LedgerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let result = write_atomic(&tmp, &json)
            .and_then(|_| fs::rename(&tmp, &self.path).map_err(ConfigError::from));
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
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

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults_beside_config() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.data_file, temp.path().join("transactions.csv"));
        assert_eq!(config.monthly_budget, dec!(50000));
        assert_eq!(config.kinds, TransactionKind::standard());
        assert_eq!(config.export_file_name, "filtered_transactions.csv");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = LedgerConfig::in_dir(temp.path());
        config.kinds = TransactionKind::extended();
        config.categories = CategoryPolicy::Closed {
            names: vec!["Groceries".into(), "Salary".into()],
        };
        config.monthly_budget = dec!(1200);
        manager.save(&config).unwrap();

        assert_eq!(manager.load().unwrap(), config);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn failed_save_keeps_previous_file_and_removes_temp() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = LedgerConfig::in_dir(temp.path());
        manager.save(&config).unwrap();
        let before = fs::read_to_string(manager.path()).unwrap();

        // A non-empty directory at the config path makes the rename fail.
        fs::remove_file(manager.path()).unwrap();
        fs::create_dir(manager.path()).unwrap();
        fs::write(manager.path().join("keep"), &before).unwrap();

        let mut changed = config.clone();
        changed.monthly_budget = dec!(75000);
        assert!(manager.save(&changed).is_err());
        assert!(!tmp_path(manager.path()).exists());
        assert_eq!(
            fs::read_to_string(manager.path().join("keep")).unwrap(),
            before
        );
    }

    #[test]
    fn partial_file_falls_back_to_defaults_per_field() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "kinds": ["Income", "Expense", "Savings"] }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.kinds.len(), 3);
        assert_eq!(config.monthly_budget, dec!(50000));
    }

    #[test]
    fn rejects_non_positive_budget_and_empty_kinds() {
        let mut config = LedgerConfig::default();
        config.monthly_budget = Decimal::ZERO;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveBudget(_))
        ));

        let mut config = LedgerConfig::default();
        config.kinds.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyKindSet)));
    }

    #[test]
    fn stored_invalid_budget_fails_to_load() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "monthly_budget": -5 }"#).unwrap();
        assert!(matches!(
            manager.load(),
            Err(ConfigError::NonPositiveBudget(_))
        ));
    }
}
