use crate::data::list_view::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show row numbers in the table
    pub show_row_numbers: bool,

    /// Show the rotating rate banner at the top
    pub show_banner: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Rows per page when a list opens; must be one of 5, 10, 20, 50
    pub default_page_size: usize,

    /// Fold case when sorting text columns
    pub case_insensitive_sort: bool,

    /// Ticks between automatic banner rotations (one tick ~ 200ms)
    pub banner_interval_ticks: u64,

    /// Role assumed when --role is not given: "admin" or "trader"
    pub default_role: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_row_numbers: true,
            show_banner: true,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            case_insensitive_sort: true,
            banner_interval_ticks: 25,
            default_role: "admin".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Create default config if it doesn't exist
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;

        Ok(config.normalized())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("boletin-cli").join("config.toml"))
    }

    /// Replace out-of-range values with defaults so a hand-edited file
    /// cannot put the pager in a state its own operations would reject.
    pub fn normalized(mut self) -> Self {
        if !PAGE_SIZES.contains(&self.behavior.default_page_size) {
            warn!(
                "Configured default_page_size {} not in {:?}, using {}",
                self.behavior.default_page_size, PAGE_SIZES, DEFAULT_PAGE_SIZE
            );
            self.behavior.default_page_size = DEFAULT_PAGE_SIZE;
        }
        if self.behavior.banner_interval_ticks == 0 {
            warn!("banner_interval_ticks must be at least 1, using 1");
            self.behavior.banner_interval_ticks = 1;
        }
        self
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# TC Boletin CLI Configuration File
# Location: ~/.config/boletin-cli/config.toml (Linux/macOS)
#           %APPDATA%\boletin-cli\config.toml (Windows)

[display]
# Show row numbers in list tables
show_row_numbers = true

# Show the rotating featured-rates banner at the top of the screen
show_banner = true

[behavior]
# Rows per page when a list opens
# Must be one of: 5, 10, 20, 50
default_page_size = 10

# Fold case when sorting text columns
# Set to false for bytewise ordering (uppercase before lowercase)
case_insensitive_sort = true

# Ticks between automatic banner rotations (one tick is about 200ms)
banner_interval_ticks = 25

# Role assumed when --role is not given: "admin" or "trader"
default_role = "admin"
"#
        .to_string()
    }
}
