//! Project-wide constants.

use std::path::PathBuf;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Path of the planning endpoint, relative to the web shell's base URL.
pub const WEB_ENDPOINT_PATH: &str = "/api/plan_trip";

/// Base URL the web shell talks to when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Fixed absolute endpoint used by the mobile shell.
pub const DEFAULT_MOBILE_ENDPOINT: &str = "https://your-backend.example.com/plan_trip";

/// Text shown while a request is in flight.
pub const LOADING_TEXT: &str = "Planning...";

/// Default settings database path: `~/.trip-planner/settings.db`.
pub fn default_db_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".trip-planner").join("settings.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_are_non_empty() {
        assert!(!AUTHOR.is_empty());
        assert!(!HOMEPAGE.is_empty());
        assert!(!REPO.is_empty());
        assert!(!LOADING_TEXT.is_empty());
    }

    #[test]
    fn consts_from_cargo_toml() {
        assert!(AUTHOR.contains("Assaf Sapir"));
        assert!(HOMEPAGE.contains("sapir.io"));
        assert!(REPO.contains("trip-planner"));
    }

    #[test]
    fn endpoints_are_well_formed() {
        assert!(WEB_ENDPOINT_PATH.starts_with('/'));
        assert!(DEFAULT_BASE_URL.starts_with("http://"));
        assert!(DEFAULT_MOBILE_ENDPOINT.starts_with("https://"));
        assert!(DEFAULT_MOBILE_ENDPOINT.ends_with("/plan_trip"));
    }

    #[test]
    fn default_db_path_lives_in_dot_dir() {
        if let Some(path) = default_db_path() {
            assert!(path.ends_with(".trip-planner/settings.db"));
        }
    }
}
