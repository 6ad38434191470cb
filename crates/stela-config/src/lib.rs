//! # Stela Configuration
//!
//! YAML-based configuration for the stela authoritative responder.
//!
//! ## Design Philosophy
//!
//! The configuration system is designed to be:
//! - **Intuitive**: a missing file section means its defaults, and a config
//!   with no `records` key serves the built-in demonstration zone
//! - **Type-safe**: record types and log formats are parsed into enums,
//!   addresses into `SocketAddr`
//! - **Flexible**: YAML, JSON, and TOML are all accepted, chosen by file
//!   extension

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use stela_proto::RecordType;
use thiserror::Error;

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("File not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main configuration for the stela responder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listener addresses and socket tuning.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Records to serve. Replaces the built-in set when present.
    pub records: Vec<RecordEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            records: default_records(),
        }
    }
}

impl Config {
    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?, // Default to YAML
        };

        Ok(config)
    }

    /// Loads configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.server.listen.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.listen".to_string(),
                message: "at least one listen address is required".to_string(),
            });
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.level".to_string(),
                    message: format!("unknown log level '{other}'"),
                });
            }
        }

        for (index, record) in self.records.iter().enumerate() {
            if record.name.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("records[{index}].name"),
                    message: "record name cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Addresses to listen on.
    pub listen: Vec<SocketAddr>,

    /// Enable `SO_REUSEPORT` on the listening sockets.
    pub reuse_port: bool,

    /// Kernel receive buffer size (bytes).
    pub recv_buffer_size: Option<usize>,

    /// Kernel send buffer size (bytes).
    pub send_buffer_size: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: vec![SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 5353)],
            reuse_port: false,
            recv_buffer_size: None,
            send_buffer_size: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Log format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// One record to serve.
///
/// `type` accepts the usual mnemonics; anything unrecognized is carried
/// through as an unknown type rather than rejected, matching how the
/// responder treats unknown QTYPEs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    /// Owner name.
    pub name: String,

    /// Record type mnemonic.
    #[serde(rename = "type")]
    pub rtype: RecordType,

    /// Record value, in the textual form the type expects.
    pub value: String,
}

/// The built-in record set, served when the configuration lists none.
pub fn default_records() -> Vec<RecordEntry> {
    fn seed(name: &str, rtype: RecordType, value: &str) -> RecordEntry {
        RecordEntry {
            name: name.to_string(),
            rtype,
            value: value.to_string(),
        }
    }

    vec![
        seed("example.com", RecordType::A, "192.0.2.1"),
        seed("example.com", RecordType::Mx, "10 mail.example.com"),
        seed("example.com", RecordType::Txt, "This is a test record"),
        seed("example.com", RecordType::Ns, "ns1.example.com"),
        seed("example.com", RecordType::Ns, "ns2.example.com"),
        seed(
            "example.com",
            RecordType::Soa,
            "ns1.example.com admin.example.com 2023091401 3600 900 1209600 300",
        ),
        seed("mail.example.com", RecordType::A, "192.0.2.2"),
        seed("ns1.example.com", RecordType::A, "192.0.2.3"),
        seed("ns2.example.com", RecordType::A, "192.0.2.4"),
        seed("www.example.com", RecordType::Cname, "example.com"),
        seed("www.example.com", RecordType::A, "192.0.2.1"),
        seed("test.example.com", RecordType::A, "192.0.2.5"),
        seed("1.2.0.192.in-addr.arpa", RecordType::Ptr, "example.com"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.listen[0].port(), 5353);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_default_records() {
        let records = default_records();
        assert_eq!(records.len(), 13);
        assert_eq!(records[0].name, "example.com");
        assert_eq!(records[0].rtype, RecordType::A);
        assert_eq!(records[0].value, "192.0.2.1");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = Config::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = Config::from_yaml(&yaml).unwrap();

        assert_eq!(parsed.records, config.records);
        assert_eq!(parsed.server.listen, config.server.listen);
    }

    #[test]
    fn test_from_yaml_overrides() {
        let yaml = r"
server:
  listen:
    - 127.0.0.1:9953
  reuse_port: true
logging:
  level: debug
  format: json
records:
  - name: zone.test
    type: A
    value: 203.0.113.7
";
        let config = Config::from_yaml(yaml).unwrap();

        assert_eq!(config.server.listen, vec!["127.0.0.1:9953".parse().unwrap()]);
        assert!(config.server.reuse_port);
        assert_eq!(config.logging.format, LogFormat::Json);

        // An explicit records key replaces the built-in set
        assert_eq!(config.records.len(), 1);
        assert_eq!(config.records[0].rtype, RecordType::A);
    }

    #[test]
    fn test_missing_records_key_keeps_defaults() {
        let config = Config::from_yaml("logging:\n  level: warn\n").unwrap();
        assert_eq!(config.records.len(), 13);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_unknown_record_type_accepted() {
        let yaml = "
records:
  - name: zone.test
    type: SPF
    value: 'v=spf1 -all'
";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(
            config.records[0].rtype,
            RecordType::Unknown("SPF".into())
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_listen() {
        let mut config = Config::default();
        config.server.listen.clear();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.listen"
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_record_name() {
        let mut config = Config::default();
        config.records.push(RecordEntry {
            name: String::new(),
            rtype: RecordType::A,
            value: "192.0.2.9".to_string(),
        });

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_not_found() {
        assert!(matches!(
            Config::from_file("/nonexistent/stela.yaml"),
            Err(ConfigError::NotFound(_))
        ));
    }
}
