//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default evaluation endpoint
pub const DEFAULT_EVALUATOR_URL: &str = "http://127.0.0.1:8081/api/calculate";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "calc-tui.log";

/// Directory under $HOME holding the config file
pub const CONFIG_DIR_NAME: &str = ".calc-tui";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Env var overriding the evaluator URL
pub const ENV_EVALUATOR_URL: &str = "CALC_TUI_EVALUATOR_URL";

/// Env var overriding the request timeout
pub const ENV_TIMEOUT_SECS: &str = "CALC_TUI_TIMEOUT_SECS";

/// Number of columns in the button grid
pub const GRID_COLUMNS: usize = 4;

/// Maximum evaluations kept in history
pub const MAX_HISTORY: usize = 50;

/// Application name
pub const APP_NAME: &str = "Calc TUI";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
