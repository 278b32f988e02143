//! Command-line argument parsing with clap.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{ServerConfig, DEFAULT_BIND_ADDR, DEFAULT_DATA_FILE};

/// Logvault - structured log ingest and query service.
#[derive(Parser, Debug, Clone)]
#[command(name = "logvault")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address to listen on.
    #[arg(short, long, env = "LOGVAULT_BIND", default_value = DEFAULT_BIND_ADDR)]
    pub bind: SocketAddr,

    /// JSON file holding the log collection.
    #[arg(short = 'f', long, env = "LOGVAULT_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Keep records in memory instead of the data file.
    #[arg(long)]
    pub ephemeral: bool,

    /// Allowed CORS origin. Repeat or comma-separate; none allows any origin.
    #[arg(long = "cors-origin", env = "LOGVAULT_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Log output format.
    #[arg(long, value_enum, env = "LOGVAULT_LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl Cli {
    /// Converts the parsed arguments into a server configuration.
    #[must_use]
    pub fn into_config(self) -> ServerConfig {
        let config = ServerConfig::new(self.bind)
            .with_cors_origins(self.cors_origins)
            .with_log_json(self.log_format == LogFormat::Json);

        if self.ephemeral {
            config.with_memory_storage()
        } else {
            config.with_data_file(self.data_file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["logvault"]).unwrap();
        let config = cli.into_config();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3001");
        assert_eq!(config.storage, StorageBackend::File(PathBuf::from("data/logs.json")));
        assert!(config.cors_origins.is_empty());
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "logvault",
            "--bind",
            "127.0.0.1:8080",
            "-f",
            "/tmp/logs.json",
            "--log-format",
            "json",
        ])
        .unwrap();
        let config = cli.into_config();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.storage, StorageBackend::File(PathBuf::from("/tmp/logs.json")));
        assert!(config.log_json);
    }

    #[test]
    fn test_ephemeral_uses_memory() {
        let cli = Cli::try_parse_from(["logvault", "--ephemeral"]).unwrap();
        assert_eq!(cli.into_config().storage, StorageBackend::Memory);
    }

    #[test]
    fn test_cors_origins_repeat_and_split() {
        let cli = Cli::try_parse_from([
            "logvault",
            "--cors-origin",
            "http://a.test,http://b.test",
            "--cors-origin",
            "http://c.test",
        ])
        .unwrap();

        assert_eq!(cli.cors_origins, vec!["http://a.test", "http://b.test", "http://c.test"]);
    }

    #[test]
    fn test_rejects_bad_bind_address() {
        assert!(Cli::try_parse_from(["logvault", "--bind", "not-an-address"]).is_err());
    }
}
