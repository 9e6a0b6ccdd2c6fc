use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".accounts_core";
const HOME_ENV: &str = "ACCOUNTS_CORE_HOME";
const CONFIG_FILE: &str = "config.json";
const DATA_FILE: &str = "transactions.csv";

/// Resolves the on-disk locations used by the ledger core.
pub struct PathResolver;

impl PathResolver {
    /// Application directory: `ACCOUNTS_CORE_HOME` when set, otherwise `~/.accounts_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    /// Picks the supplied base directory or falls back to [`PathResolver::base_dir`].
    pub fn resolve_base(base: Option<PathBuf>) -> PathBuf {
        base.unwrap_or_else(Self::base_dir)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    pub fn data_file_in(base: &Path) -> PathBuf {
        base.join(DATA_FILE)
    }
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}
