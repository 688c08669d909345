use birdscout_api::{
    birdsna::BIRDSNA_BASE, ebird::EBIRD_API_BASE, locationiq::LOCATIONIQ_API_BASE,
    BirdsnaEndpoints, EbirdEndpoints, LocationIqEndpoints,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
///
/// This gets loaded from the config file, then CLI flags and env vars are
/// layered on top by the binary. Priority: CLI > Env > File > Defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load config from the default location, or defaults if there is none
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from an explicit path; the file must exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Get the config file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("birdscout");

        Ok(config_dir.join("config.toml"))
    }

    /// Build the remote endpoints; both API keys are required
    pub fn endpoints(&self) -> crate::Result<Endpoints> {
        let ebird_key = self.api.ebird_key.clone().ok_or_else(|| {
            crate::Error::ConfigError(
                "No eBird API key. Set EBIRD_API_KEY, pass --ebird-key or add api.ebird_key to the config".into(),
            )
        })?;

        let locationiq_key = self.api.locationiq_key.clone().ok_or_else(|| {
            crate::Error::ConfigError(
                "No LocationIQ API key. Set LOCATIONIQ_API_KEY, pass --locationiq-key or add api.locationiq_key to the config".into(),
            )
        })?;

        Ok(Endpoints {
            ebird: EbirdEndpoints::with_base_url(ebird_key, self.api.ebird_url.clone()),
            locationiq: LocationIqEndpoints::with_base_url(
                locationiq_key,
                self.api.locationiq_url.clone(),
            ),
            birdsna: BirdsnaEndpoints::with_base_url(self.api.birdsna_url.clone()),
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }
}

/// Every remote service a session talks to
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub ebird: EbirdEndpoints,
    pub locationiq: LocationIqEndpoints,
    pub birdsna: BirdsnaEndpoints,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// eBird 2.0 key, get one at https://ebird.org/api/keygen
    pub ebird_key: Option<String>,

    /// LocationIQ key for reverse geocoding
    pub locationiq_key: Option<String>,

    #[serde(default = "default_ebird_url")]
    pub ebird_url: String,

    #[serde(default = "default_locationiq_url")]
    pub locationiq_url: String,

    #[serde(default = "default_birdsna_url")]
    pub birdsna_url: String,

    /// Unset means requests never time out
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_ebird_url() -> String {
    EBIRD_API_BASE.to_string()
}

fn default_locationiq_url() -> String {
    LOCATIONIQ_API_BASE.to_string()
}

fn default_birdsna_url() -> String {
    BIRDSNA_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            ebird_key: None,
            locationiq_key: None,
            ebird_url: default_ebird_url(),
            locationiq_url: default_locationiq_url(),
            birdsna_url: default_birdsna_url(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// URL → response body cache, kept across runs
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,

    /// SQLite file, rebuilt on every run
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// JSON map of lowercase state name to two-letter code
    #[serde(default = "default_state_list")]
    pub state_list: PathBuf,
}

fn default_cache_file() -> PathBuf {
    PathBuf::from("bird_cache.json")
}

fn default_database() -> PathBuf {
    PathBuf::from("bird.sqlite")
}

fn default_state_list() -> PathBuf {
    PathBuf::from("statelist.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_file: default_cache_file(),
            database: default_database(),
            state_list: default_state_list(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the chart documents are written
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// Open charts and the bird picture in the default browser
    #[serde(default = "default_open_in_browser")]
    pub open_in_browser: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_open_in_browser() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            open_in_browser: default_open_in_browser(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.cache_file, PathBuf::from("bird_cache.json"));
        assert_eq!(config.storage.database, PathBuf::from("bird.sqlite"));
        assert_eq!(config.api.ebird_url, "https://api.ebird.org/v2");
        assert!(config.output.open_in_browser);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("cache_file"));
        assert!(toml.contains("open_in_browser"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nebird_key = \"abc\"\ntimeout_secs = 30\n\n[output]\nopen_in_browser = false\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.ebird_key.as_deref(), Some("abc"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert!(!config.output.open_in_browser);
        assert_eq!(config.storage.state_list, PathBuf::from("statelist.json"));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nebird_key =").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(crate::Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_endpoints_require_keys() {
        let mut config = Config::default();
        assert!(matches!(config.endpoints(), Err(crate::Error::ConfigError(_))));

        config.api.ebird_key = Some("e".into());
        assert!(config.endpoints().is_err());

        config.api.locationiq_key = Some("l".into());
        let endpoints = config.endpoints().unwrap();
        assert_eq!(
            endpoints.ebird.region_list_url("CA"),
            "https://api.ebird.org/v2/ref/region/list/subnational2/US-CA?key=e"
        );
    }
}
