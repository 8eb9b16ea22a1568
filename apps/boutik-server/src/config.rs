use std::net::SocketAddr;
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Server configuration, merged from defaults, a YAML file and
/// `BOUTIK_`-prefixed environment variables (highest precedence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_addr: "127.0.0.1:8087".parse().expect("valid default address"),
            },
            database: DatabaseConfig {
                url: "sqlite://boutik.db?mode=rwc".to_owned(),
                max_connections: 10,
            },
        }
    }
}

impl AppConfig {
    /// `BOUTIK_DATABASE__URL=...` style environment overrides win over the
    /// file, which wins over the defaults.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = config_file {
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed("BOUTIK_").split("__"))
            .extract()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_a_file() {
        figment::Jail::expect_with(|_| {
            let config = AppConfig::load(None).unwrap();
            assert_eq!(config.database.max_connections, 10);
            Ok(())
        });
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "boutik.yaml",
                r#"
server:
  bind_addr: "0.0.0.0:9000"
database:
  url: "sqlite::memory:"
  max_connections: 3
"#,
            )?;
            let config = AppConfig::load(Some(Path::new("boutik.yaml"))).unwrap();
            assert_eq!(config.server.bind_addr.port(), 9000);
            assert_eq!(config.database.url, "sqlite::memory:");
            assert_eq!(config.database.max_connections, 3);
            Ok(())
        });
    }

    #[test]
    fn environment_wins_over_file() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BOUTIK_DATABASE__MAX_CONNECTIONS", "7");
            let config = AppConfig::load(None).unwrap();
            assert_eq!(config.database.max_connections, 7);
            Ok(())
        });
    }
}
