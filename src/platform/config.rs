// xltemplates - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// Resolved platform paths for xltemplates configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/xltemplates/ or %APPDATA%\xltemplates\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

/// Default template root: `Excel_templates` next to the running executable.
///
/// Falls back to the current directory when the executable path is unknown.
pub fn default_templates_dir() -> PathBuf {
    let app_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    app_dir.join(constants::TEMPLATES_DIR_NAME)
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[server]` section.
    pub server: ServerSection,
    /// `[templates]` section.
    pub templates: TemplatesSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[server]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Bind address, e.g. "127.0.0.1" or "0.0.0.0".
    pub address: Option<String>,
    /// TCP port. Read wide so out-of-range values can be reported.
    pub port: Option<i64>,
}

/// `[templates]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct TemplatesSection {
    /// Template root directory.
    pub root_dir: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address for the UI server.
    pub address: String,
    /// Port for the UI server.
    pub port: u16,
    /// Template root override (`None` = next to the executable).
    pub templates_dir: Option<PathBuf>,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: constants::DEFAULT_SERVER_ADDRESS.to_string(),
            port: constants::DEFAULT_PORT,
            templates_dir: None,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with one warning;
/// the server still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path,
                source,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: config_path,
                source,
            };
            warnings.push(format!(
                "{err}. Using defaults. See config.example.toml for the expected format."
            ));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let mut config = AppConfig::default();

    // -- Server: address --
    if let Some(address) = raw.server.address {
        if address.parse::<IpAddr>().is_ok() {
            config.address = address;
        } else {
            warnings.push(out_of_range(
                "[server] address",
                &address,
                "an IPv4 or IPv6 address",
            ));
        }
    }

    // -- Server: port --
    if let Some(port) = raw.server.port {
        match u16::try_from(port) {
            Ok(p) if p != 0 => config.port = p,
            _ => warnings.push(out_of_range("[server] port", &port.to_string(), "1-65535")),
        }
    }

    // -- Templates: root_dir --
    if let Some(dir) = raw.templates.root_dir {
        if !dir.is_empty() {
            config.templates_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(out_of_range(
                "[logging] level",
                &level,
                "error, warn, info, debug, trace",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

fn out_of_range(field: &str, value: &str, expected: &str) -> String {
    let err = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    };
    format!("{err}. Using default.")
}
