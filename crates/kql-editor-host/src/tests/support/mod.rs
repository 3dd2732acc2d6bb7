//! Shared fixtures and recording doubles for controller tests.

mod recording_connection;
mod recording_host;
mod world;

pub use recording_connection::{ConnectionEvent, RecordingConnectionFactory};
pub use recording_host::{HostEvent, RecordingHost};
pub use world::TestWorld;

use camino::{Utf8Path, Utf8PathBuf};

use crate::resolver::PathProbe;

/// Probe over a simulated filesystem defined by an explicit path list.
#[derive(Debug, Default, Clone)]
pub struct SimulatedFileSystem {
    existing: Vec<Utf8PathBuf>,
}

impl SimulatedFileSystem {
    /// Marks one more path as existing.
    pub fn add(&mut self, path: impl Into<Utf8PathBuf>) {
        self.existing.push(path.into());
    }
}

impl PathProbe for SimulatedFileSystem {
    fn exists(&self, path: &Utf8Path) -> bool {
        self.existing.iter().any(|known| known == path)
    }
}
