use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;
use std::path::Path;

/// Main browser configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BrowserConfig {
    /// Navigation controller settings
    #[serde(default)]
    pub router: RouterConfig,
    /// Progress bar settings
    #[serde(default)]
    pub progress: ProgressConfig,
    /// Image URL settings
    #[serde(default)]
    pub images: ImageConfig,
}

/// Configuration for the navigation controller
#[derive(Debug, Deserialize, Clone)]
pub struct RouterConfig {
    /// Maximum number of guard redirects followed in a single navigation
    #[serde(default = "default_max_redirect_depth")]
    pub max_redirect_depth: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_redirect_depth: default_max_redirect_depth(),
        }
    }
}

/// Configuration for the navigation progress bar
#[derive(Debug, Deserialize, Clone)]
pub struct ProgressConfig {
    /// Fraction shown as soon as a navigation starts (0.0-1.0)
    #[serde(default = "default_minimum")]
    pub minimum: f64,
    /// Width in columns of the rendered text bar
    #[serde(default = "default_width")]
    pub width: usize,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            minimum: default_minimum(),
            width: default_width(),
        }
    }
}

/// Configuration for recipe image URLs
#[derive(Debug, Deserialize, Clone)]
pub struct ImageConfig {
    /// Query parameter carrying the cache-busting token
    #[serde(default = "default_cache_param")]
    pub cache_param: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            cache_param: default_cache_param(),
        }
    }
}

// Default value functions
fn default_max_redirect_depth() -> usize {
    10
}

fn default_minimum() -> f64 {
    0.08
}

fn default_width() -> usize {
    30
}

fn default_cache_param() -> String {
    "v".to_string()
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BROWSER__ prefix
    /// 2. recipe-browser.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BROWSER__ROUTER__MAX_REDIRECT_DEPTH
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from `recipe-browser.toml` (optional) and environment variables
pub fn load_config() -> Result<BrowserConfig, ConfigError> {
    build_config(File::with_name("recipe-browser").required(false))
}

/// Load configuration from a specific file, still letting environment variables override it
pub fn load_config_from(path: &Path) -> Result<BrowserConfig, ConfigError> {
    build_config(File::from(path).required(true))
}

fn build_config<S>(file: S) -> Result<BrowserConfig, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: RECIPE_BROWSER__PROGRESS__MINIMUM
        .add_source(
            Environment::with_prefix("RECIPE_BROWSER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
