/// Optional, read-only user settings
///
/// The file lives in the user's config directory:
/// - Linux: ~/.config/pdf-docx-converter/settings.json
/// - macOS: ~/Library/Application Support/pdf-docx-converter/settings.json
/// - Windows: %APPDATA%\pdf-docx-converter\settings.json
///
/// The app never writes it. A missing or broken file means defaults.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Explicit `pdf2docx` executable, skips the PATH lookup
    pub pdf2docx_path: Option<PathBuf>,
    /// Explicit `docx2pdf` executable
    pub docx2pdf_path: Option<PathBuf>,
    /// Explicit LibreOffice `soffice` executable
    pub soffice_path: Option<PathBuf>,
    /// Try LibreOffice before the dedicated converters
    pub prefer_office: bool,
}

impl Settings {
    /// Load settings from the default location
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file, falling back to defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Where the settings file is expected
    fn path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("pdf-docx-converter");
        path.push("settings.json");
        Some(path)
    }
}
