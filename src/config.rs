use serde::{Deserialize, Serialize};

use crate::session::Credentials;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub seed: SeedConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub admin_email: String,
    pub admin_password: String,
    pub admin_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub load_on_start: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter for env_logger; `RUST_LOG` still wins
    pub level: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let credentials = Credentials::default();
        Self {
            admin_email: credentials.email,
            admin_password: credentials.password,
            admin_name: credentials.display_name,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            load_on_start: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file and
    /// `SQUAD_*` environment variables, in that order
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        config = config.add_source(config::File::with_name("config").required(false));

        // e.g. SQUAD_SESSION__ADMIN_EMAIL, SQUAD_SEED__LOAD_ON_START
        config = config.add_source(
            config::Environment::with_prefix("SQUAD")
                .separator("__")
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }
}

impl SessionConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.admin_email.clone(),
            password: self.admin_password.clone(),
            display_name: self.admin_name.clone(),
        }
    }
}
