use serde::{Deserialize, Serialize};

use crate::store::memory::DEFAULT_MAX_GENERATIONS;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub pedigree: PedigreeConfig,
}

/// Where the development backend listens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the client finds the REST collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PedigreeConfig {
    /// Depth served when a pedigree request carries no `maxGenerations`
    pub default_max_generations: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for PedigreeConfig {
    fn default() -> Self {
        Self {
            default_max_generations: DEFAULT_MAX_GENERATIONS,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file and
    /// `HORSES_*` environment variables, in increasing precedence
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        config = config.add_source(config::File::with_name("config").required(false));

        // e.g. HORSES_SERVER__PORT=9090, HORSES_PEDIGREE__DEFAULT_MAX_GENERATIONS=3
        config = config.add_source(
            config::Environment::with_prefix("HORSES")
                .separator("__")
                .prefix_separator("_"),
        );

        let app_config: AppConfig = config.build()?.try_deserialize()?;
        Ok(app_config)
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
