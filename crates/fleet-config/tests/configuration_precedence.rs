use std::ffi::OsString;
use std::fs;

use fleet_config::{AddressFamily, Config, LogFormat};
use ortho_config::OrthoConfig;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Harness {
    temp_dir: TempDir,
    args: Vec<OsString>,
}

impl Harness {
    fn new() -> Self {
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            args: vec![OsString::from("fleet-console")],
        }
    }

    fn write_config(&mut self, toml: &str) {
        let path = self.temp_dir.path().join("fleet.toml");
        if let Err(error) = fs::write(&path, toml) {
            panic!("failed to write configuration: {error}");
        }
        self.args.push(OsString::from("--config-path"));
        self.args.push(path.into_os_string());
    }

    fn push_args(&mut self, args: &[&str]) {
        self.args.extend(args.iter().map(OsString::from));
    }

    fn load(&self) -> Config {
        match Config::load_from_iter(self.args.clone()) {
            Ok(config) => config,
            Err(error) => panic!("configuration failed to load: {error}"),
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[rstest]
fn command_line_flags_are_applied(mut harness: Harness) {
    harness.push_args(&[
        "--listen-port",
        "5690",
        "--address-family",
        "ipv4",
        "--log-format",
        "json",
    ]);
    let config = harness.load();

    assert_eq!(config.listen_port(), 5690);
    assert_eq!(config.address_family(), AddressFamily::Ipv4);
    assert_eq!(config.log_format(), LogFormat::Json);
    assert_eq!(config.block_size(), 1024);
}

#[rstest]
fn configuration_file_values_are_applied(mut harness: Harness) {
    harness.write_config("listen_port = 5700\nblock_size = 256\nlog_filter = \"debug\"\n");
    let config = harness.load();

    assert_eq!(config.listen_port(), 5700);
    assert_eq!(config.block_size(), 256);
    assert_eq!(config.log_filter(), "debug");
}

#[rstest]
fn command_line_overrides_configuration_file(mut harness: Harness) {
    harness.write_config("listen_port = 5700\n");
    harness.push_args(&["--listen-port", "5800"]);
    let config = harness.load();

    assert_eq!(config.listen_port(), 5800);
}

#[rstest]
fn unknown_flags_fail_to_load(mut harness: Harness) {
    harness.push_args(&["--no-such-flag"]);
    assert!(Config::load_from_iter(harness.args.clone()).is_err());
}
