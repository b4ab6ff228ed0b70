//! Environment configuration for the notes service.

use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "NOTES_SERVICE_PORT";
    pub const NOTES_FILE: &str = "NOTES_FILE";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 9105;
    pub const NOTES_FILE: &str = "notes.json";
}

/// Get the listen port
pub fn port() -> u16 {
    env::var(env_vars::PORT)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(defaults::PORT)
}

/// Get the notes store file path (relative paths resolve against the
/// working directory)
pub fn notes_file() -> PathBuf {
    env::var(env_vars::NOTES_FILE)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(defaults::NOTES_FILE))
}
