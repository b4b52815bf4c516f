use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".troskovnik";
const DATA_DIR: &str = "data";
const DATA_FILE: &str = "troskovnik.md";
const CONFIG_FILE: &str = "config.json";

/// Returns the application-specific data directory, defaulting to `~/.troskovnik`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("TROSKOVNIK_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the budget document inside an app root.
pub fn data_dir_in(root: &std::path::Path) -> PathBuf {
    root.join(DATA_DIR)
}

/// Canonical path of the budget document inside an app root.
pub fn data_file_in(root: &std::path::Path) -> PathBuf {
    data_dir_in(root).join(DATA_FILE)
}

/// Path of the optional server configuration file inside an app root.
pub fn config_file_in(root: &std::path::Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::from_default_env().add_directive("troskovnik=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}
