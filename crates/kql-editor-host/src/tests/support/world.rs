//! Scenario world wiring settings, simulated filesystem, and doubles.

use camino::Utf8PathBuf;

use kql_editor_config::Settings;

use crate::activation::{ControllerState, activate, deactivate};
use crate::resolver::{Platform, SearchRoots};

use super::{RecordingConnectionFactory, RecordingHost, SimulatedFileSystem};

/// Everything a behaviour scenario manipulates and asserts against.
pub struct TestWorld {
    /// Settings snapshot fed to activation.
    pub settings: Settings,
    /// Candidate search roots.
    pub roots: SearchRoots,
    /// Simulated filesystem the resolver probes.
    pub filesystem: SimulatedFileSystem,
    /// Recording editor host.
    pub host: RecordingHost,
    /// Recording connection factory.
    pub factory: RecordingConnectionFactory,
    /// Controller state after the last activate/deactivate call.
    pub state: Option<ControllerState>,
}

impl TestWorld {
    /// Fresh world: default settings, fixed roots, empty filesystem.
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            roots: SearchRoots {
                bundle_dir: Utf8PathBuf::from("/ext/kql"),
                home_dir: Some(Utf8PathBuf::from("/home/dev")),
            },
            filesystem: SimulatedFileSystem::default(),
            host: RecordingHost::new(),
            factory: RecordingConnectionFactory::new(),
            state: None,
        }
    }

    /// The user-global candidate path on the simulated filesystem.
    pub fn global_install_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from("/home/dev/.cargo/bin/kql-lsp")
    }

    /// Runs activation against the world's current configuration.
    ///
    /// The platform is pinned so the simulated paths stay valid regardless
    /// of the machine the tests run on.
    pub fn activate(&mut self) {
        let state = activate(
            &self.settings,
            &self.roots,
            Platform::Other,
            &self.filesystem,
            &self.factory,
            &mut self.host,
        );
        self.state = Some(state);
    }

    /// Runs deactivation on whatever state the last activation produced.
    pub fn deactivate(&mut self) {
        if let Some(state) = self.state.take() {
            self.state = Some(deactivate(state));
        }
    }
}
