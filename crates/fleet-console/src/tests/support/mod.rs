//! Test harness utilities for the console behavioural suites.

mod config_loader;
mod engine;
mod io;
mod reporter;
mod timeline;
mod world;

pub use config_loader::{FailingConfigLoader, LoopbackConfigLoader};
pub use engine::{EngineLog, RecordingEngine};
pub use io::{ScriptedPoller, ScriptedSocket, SharedOutput};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use timeline::Timeline;
pub use world::{CommandWorld, peer, sample_device};
