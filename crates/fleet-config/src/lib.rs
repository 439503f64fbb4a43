//! Layered configuration for the fleet console.
//!
//! Values come from built-in defaults, an optional configuration file, the
//! `FLEET_*` environment, and command-line flags, in increasing precedence.
//! Every field is optional so that each layer only overrides what it names;
//! the accessors below apply the defaults.

mod defaults;
mod listen;
mod logging;

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    ALLOWED_BLOCK_SIZES, DEFAULT_BLOCK_SIZE, DEFAULT_LISTEN_PORT, DEFAULT_LOG_FILTER,
    default_address_family, default_log_filter, default_log_format,
};
pub use listen::{AddressFamily, AddressFamilyParseError};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration for the console binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "FLEET")]
pub struct Config {
    /// Explicit bind address; overrides `address_family` when set.
    pub listen_host: Option<String>,
    /// Local UDP port.
    pub listen_port: Option<u16>,
    /// Wildcard family used when no host is given.
    pub address_family: Option<AddressFamily>,
    /// Block size handed to the protocol engine.
    pub block_size: Option<u16>,
    /// `tracing` filter expression.
    pub log_filter: Option<String>,
    /// Diagnostic output format.
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Local UDP port.
    #[must_use]
    pub fn listen_port(&self) -> u16 {
        self.listen_port.unwrap_or(DEFAULT_LISTEN_PORT)
    }

    /// Wildcard family used when no host is given.
    #[must_use]
    pub fn address_family(&self) -> AddressFamily {
        self.address_family.unwrap_or_else(default_address_family)
    }

    /// Block size handed to the protocol engine.
    #[must_use]
    pub fn block_size(&self) -> u16 {
        self.block_size.unwrap_or(DEFAULT_BLOCK_SIZE)
    }

    /// `tracing` filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Diagnostic output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }

    /// Checks values the loader cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedBlockSize`] when the block size is
    /// not a supported power of two, or [`ConfigError::InvalidHost`] when the
    /// listen host is not an IP address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.block_size();
        if !ALLOWED_BLOCK_SIZES.contains(&size) {
            return Err(ConfigError::UnsupportedBlockSize { size });
        }
        self.listen_address().map(|_| ())
    }

    /// Address the console binds its datagram socket to.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] when `listen_host` is not an IP
    /// address literal.
    pub fn listen_address(&self) -> Result<SocketAddr, ConfigError> {
        let ip = match self.listen_host.as_deref() {
            Some(host) => host
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost {
                    host: host.to_owned(),
                })?,
            None => self.address_family().unspecified(),
        };
        Ok(SocketAddr::new(ip, self.listen_port()))
    }
}

/// Errors raised when a loaded configuration is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The block size is not one of [`ALLOWED_BLOCK_SIZES`].
    #[error("unsupported block size {size}; expected one of 16, 32, 64, 128, 256, 512, 1024")]
    UnsupportedBlockSize {
        /// Rejected value.
        size: u16,
    },
    /// The listen host is not an IP address literal.
    #[error("listen host '{host}' is not an IP address")]
    InvalidHost {
        /// Rejected value.
        host: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_apply_to_empty_config() {
        let config = Config::default();
        assert_eq!(config.listen_port(), 5683);
        assert_eq!(config.address_family(), AddressFamily::Ipv6);
        assert_eq!(config.block_size(), 1024);
        assert_eq!(config.log_filter(), "info");
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert_eq!(
            config.listen_address(),
            Ok("[::]:5683".parse().expect("valid address"))
        );
    }

    #[rstest]
    #[case(16)]
    #[case(512)]
    #[case(1024)]
    fn supported_block_sizes_validate(#[case] size: u16) {
        let config = Config {
            block_size: Some(size),
            ..Config::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[rstest]
    #[case(0)]
    #[case(100)]
    #[case(2048)]
    fn unsupported_block_sizes_are_rejected(#[case] size: u16) {
        let config = Config {
            block_size: Some(size),
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedBlockSize { size })
        );
    }

    #[test]
    fn ipv4_family_binds_ipv4_wildcard() {
        let config = Config {
            address_family: Some(AddressFamily::Ipv4),
            listen_port: Some(5700),
            ..Config::default()
        };
        assert_eq!(
            config.listen_address(),
            Ok("0.0.0.0:5700".parse().expect("valid address"))
        );
    }

    #[rstest]
    #[case("127.0.0.1", "127.0.0.1:5683")]
    #[case("::1", "[::1]:5683")]
    #[case("[::1]", "[::1]:5683")]
    fn explicit_host_overrides_family(#[case] host: &str, #[case] expected: &str) {
        let config = Config {
            listen_host: Some(host.to_owned()),
            address_family: Some(AddressFamily::Ipv4),
            ..Config::default()
        };
        assert_eq!(
            config.listen_address(),
            Ok(expected.parse().expect("valid address"))
        );
    }

    #[test]
    fn hostnames_are_rejected() {
        let config = Config {
            listen_host: Some("localhost".to_owned()),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidHost { .. })
        ));
    }

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("COMPACT", LogFormat::Compact)]
    fn log_format_parses_case_insensitively(#[case] text: &str, #[case] expected: LogFormat) {
        assert_eq!(text.parse::<LogFormat>(), Ok(expected));
    }
}
