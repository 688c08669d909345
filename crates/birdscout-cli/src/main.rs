use birdscout_api::HttpClient;
use birdscout_cache::RequestCache;
use birdscout_core::{Config, StateTable};
use birdscout_store::ObservationStore;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod prompt;
mod session;

use prompt::Prompter;
use session::Session;

#[derive(Parser)]
#[command(name = "birdscout")]
#[command(version, about = "Browse recent bird sightings by US state and county", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// eBird API key
    #[arg(long, env = "EBIRD_API_KEY", hide_env_values = true)]
    ebird_key: Option<String>,

    /// LocationIQ API key
    #[arg(long, env = "LOCATIONIQ_API_KEY", hide_env_values = true)]
    locationiq_key: Option<String>,

    /// Request cache file
    #[arg(long)]
    cache_file: Option<PathBuf>,

    /// SQLite database, rebuilt on every run
    #[arg(long)]
    database: Option<PathBuf>,

    /// JSON map of state names to codes
    #[arg(long)]
    states: Option<PathBuf>,

    /// Where chart documents are written
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Write charts but don't open a browser
    #[arg(long)]
    no_open: bool,
}

impl Cli {
    fn load_config(&self) -> birdscout_core::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply(&mut config);
        Ok(config)
    }

    /// Flags (and their env fallbacks) win over the file
    fn apply(&self, config: &mut Config) {
        if let Some(key) = &self.ebird_key {
            config.api.ebird_key = Some(key.clone());
        }
        if let Some(key) = &self.locationiq_key {
            config.api.locationiq_key = Some(key.clone());
        }
        if let Some(path) = &self.cache_file {
            config.storage.cache_file = path.clone();
        }
        if let Some(path) = &self.database {
            config.storage.database = path.clone();
        }
        if let Some(path) = &self.states {
            config.storage.state_list = path.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        if self.no_open {
            config.output.open_in_browser = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout belongs to the prompts
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "birdscout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    let endpoints = config.endpoints()?;

    let store = ObservationStore::open(&config.storage.database)?;
    store.reset_schema()?;
    let cache = RequestCache::load(config.storage.cache_file.clone());
    let states = StateTable::load(&config.storage.state_list)?;
    tracing::debug!("{} states, {} cached responses", states.len(), cache.len());

    let mut session = Session {
        store,
        cache,
        fetcher: HttpClient::new(config.request_timeout())?,
        endpoints,
        states,
        output: config.output,
    };

    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
    session.run(&mut prompter).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "birdscout",
            "--ebird-key",
            "flag-key",
            "--database",
            "/tmp/birds.sqlite",
            "--no-open",
        ]);

        let mut config = Config::default();
        config.api.ebird_key = Some("file-key".to_string());
        cli.apply(&mut config);

        assert_eq!(config.api.ebird_key.as_deref(), Some("flag-key"));
        assert_eq!(config.storage.database, PathBuf::from("/tmp/birds.sqlite"));
        assert_eq!(config.storage.cache_file, PathBuf::from("bird_cache.json"));
        assert!(!config.output.open_in_browser);
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\ndirectory = \"charts\"\n").unwrap();

        let cli = Cli::parse_from(["birdscout", "--config", path.to_str().unwrap()]);
        let config = cli.load_config().unwrap();

        assert_eq!(config.output.directory, PathBuf::from("charts"));
        assert!(config.output.open_in_browser);
    }
}
