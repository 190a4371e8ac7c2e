use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Medibook";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen port when `MEDIBOOK_PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Get the application data directory
/// ~/Medibook/ on all platforms (user-visible, kept out of dot-dirs)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Medibook")
}

/// Path of the SQLite database file
pub fn database_path() -> PathBuf {
    app_data_dir().join("medibook.db")
}

/// Listen address, port overridable via `MEDIBOOK_PORT`.
pub fn bind_addr() -> SocketAddr {
    let port = std::env::var("MEDIBOOK_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    SocketAddr::from(([0, 0, 0, 0], port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Medibook"));
    }

    #[test]
    fn database_path_under_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("medibook.db"));
    }

    #[test]
    fn app_name_is_medibook() {
        assert_eq!(APP_NAME, "Medibook");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }
}
