//! Process entry point tying bootstrap to the event loop.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;

use crate::StructuredHealthReporter;
use crate::bootstrap::{BootstrapError, ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::engine::OfflineEngine;
use crate::health::HealthReporter;

const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");

/// Runs the console using the production collaborators.
#[must_use]
pub fn run_console() -> ExitCode {
    let reporter = Arc::new(StructuredHealthReporter::new());
    run_console_with(&SystemConfigLoader, reporter, &mut io::stderr())
}

/// Runs the console with injected collaborators.
///
/// Configuration that fails to parse prints its usage message to `stderr`
/// and exits successfully. Any other startup failure exits with a failure
/// code without entering the event loop.
pub fn run_console_with<W>(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    stderr: &mut W,
) -> ExitCode
where
    W: Write + ?Sized,
{
    let console = match bootstrap_with(loader, reporter) {
        Ok(console) => console,
        Err(BootstrapError::Configuration { source }) => {
            report(stderr, &format!("fleet-console: {source}"));
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            report(stderr, &format!("fleet-console: {error}"));
            return ExitCode::FAILURE;
        }
    };
    if let Err(error) = console.register_interrupt() {
        report(stderr, &format!("fleet-console: {error}"));
        return ExitCode::FAILURE;
    }

    let engine = OfflineEngine::new(console.config().block_size());
    info!(
        target: PROCESS_TARGET,
        local = %console.local_addr(),
        "console listening"
    );
    match console.serve(engine, io::stdin(), io::stdout()) {
        Ok(termination) => {
            info!(target: PROCESS_TARGET, termination = ?termination, "console stopped");
            ExitCode::SUCCESS
        }
        Err(error) => {
            report(stderr, &format!("fleet-console: {error}"));
            ExitCode::FAILURE
        }
    }
}

fn report<W>(stderr: &mut W, message: &str)
where
    W: Write + ?Sized,
{
    // Nothing useful remains to be done when stderr itself is gone.
    let _ = writeln!(stderr, "{}", message.trim_end()).and_then(|()| stderr.flush());
}
