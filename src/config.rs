use confique::Config as _;
use std::{path::PathBuf, sync::OnceLock};

/// Process-wide settings, read from the environment once.
#[derive(confique::Config)]
pub struct Config {
    /// Report format for the CLI: `stylish` or `json`.
    #[config(env = "SQLHINT_FORMAT", default = "stylish")]
    pub format: String,
    /// Apply fixes and report the fixed text.
    #[config(env = "SQLHINT_FIX", default = false)]
    pub fix: bool,
    #[config(env = "SQLHINT_MAX_AUTOFIX_LOOP", default = 3)]
    pub max_autofix_loop: usize,
    /// JSON file holding a `{ "rules": { ... } }` lint configuration.
    #[config(env = "SQLHINT_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
    /// Number of documents whose diagnostics are kept for quick-fix lookups.
    #[config(env = "SQLHINT_LINT_CACHE_CAPACITY", default = 256)]
    pub lint_cache_capacity: u64,
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::builder()
            .env()
            .load()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}
