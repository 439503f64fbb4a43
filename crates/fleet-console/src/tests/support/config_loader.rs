//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};

use fleet_config::{AddressFamily, Config};

use crate::bootstrap::ConfigLoader;

/// Loader binding an ephemeral IPv4 loopback port.
pub struct LoopbackConfigLoader;

impl ConfigLoader for LoopbackConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            listen_host: Some("127.0.0.1".to_owned()),
            listen_port: Some(0),
            address_family: Some(AddressFamily::Ipv4),
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing an unknown CLI flag.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("fleet-console"),
            OsString::from("--no-such-flag"),
        ];
        Config::load_from_iter(args)
    }
}
