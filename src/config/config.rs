use crate::state::ViewMode;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// CSV file path or http(s) URL loaded when none is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_source: Option<String>,

    /// Show the bundled sample roster when the source cannot be read
    pub fallback_to_sample: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Records per page in the grid and table views
    pub page_size: usize,

    /// View shown on startup
    pub default_view: ViewMode,

    /// Colored terminal output
    pub use_colors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Save a snapshot after every successful load
    pub persist_on_load: bool,

    /// Directory for saved snapshots (default: the app data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,

    /// Directory export files are written to (default: current directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            default_source: None,
            fallback_to_sample: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            default_view: ViewMode::Grid,
            use_colors: true,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            persist_on_load: true,
            store_dir: None,
            export_dir: None,
        }
    }
}

impl Config {
    /// Load config from the default location, defaults if absent
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.display.page_size = config.display.page_size.max(1);
        Ok(config)
    }

    /// Write config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("roster-view").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Roster View Configuration File
# Location: ~/.config/roster-view/config.toml (Linux)
#           ~/Library/Application Support/roster-view/config.toml (macOS)
#           %APPDATA%\roster-view\config.toml (Windows)

[source]
# CSV file path or http(s) URL loaded when no source is given
# default_source = "https://example.org/roster.csv"

# Show the bundled sample roster when the source cannot be read
fallback_to_sample = true

[display]
# Records per page in the grid and table views
page_size = 12

# View shown on startup: grid, table, teams, projects, data-sources, services
default_view = "grid"

# Colored terminal output
use_colors = true

[behavior]
# Save a snapshot after every successful load (restore it with --restore)
persist_on_load = true

# Directory for saved snapshots (leave commented to use the default)
# store_dir = "/path/to/state"

# Directory export files are written to (leave commented for the current directory)
# export_dir = "/path/to/exports"
"#
        .to_string()
    }
}
