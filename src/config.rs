use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Chiron";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port for the local API server (override with CHIRON_PORT).
pub const DEFAULT_PORT: u16 = 4117;

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/Chiron/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Chiron")
}

/// Get the SQLite database path
pub fn db_path() -> PathBuf {
    app_data_dir().join("chiron.db")
}

/// Get the models directory (bundled ONNX screening classifiers)
pub fn models_dir() -> PathBuf {
    app_data_dir().join("models")
}

/// Resolve the API port from CHIRON_PORT, falling back to the default.
pub fn api_port() -> u16 {
    std::env::var("CHIRON_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
