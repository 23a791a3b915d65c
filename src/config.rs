use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Notelens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address for the viewer API when NOTELENS_BIND is unset.
pub const DEFAULT_BIND: &str = "127.0.0.1:4173";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/Notelens/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Notelens")
}

/// Get the records directory holding the patient corpus
pub fn records_dir() -> PathBuf {
    app_data_dir().join("records")
}

/// Path of the patient corpus file
pub fn corpus_path() -> PathBuf {
    records_dir().join("patients.json")
}

/// Directory of the built frontend assets served alongside the API
pub fn static_dir() -> PathBuf {
    app_data_dir().join("static")
}

/// Tunables for a viewer session.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Rendered height (px) above which a note collapses behind a toggle.
    pub collapse_threshold_px: u32,
    /// How long an applied highlight stays visible before auto-clearing.
    pub highlight_dwell: Duration,
    /// Fraction of a section that must be visible to become the active one.
    pub section_visibility: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            collapse_threshold_px: 500,
            highlight_dwell: Duration::from_secs(3),
            section_visibility: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Notelens"));
    }

    #[test]
    fn corpus_path_under_records() {
        let corpus = corpus_path();
        assert!(corpus.starts_with(records_dir()));
        assert!(corpus.ends_with("patients.json"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn viewer_defaults_match_product_tuning() {
        let config = ViewerConfig::default();
        assert_eq!(config.collapse_threshold_px, 500);
        assert_eq!(config.highlight_dwell, Duration::from_secs(3));
        assert_eq!(config.section_visibility, 0.5);
    }
}
