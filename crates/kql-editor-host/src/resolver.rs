//! Server binary resolution across the candidate location table.
//!
//! When no explicit path is configured, the resolver probes a fixed, ordered
//! list of filesystem locations and picks the first that exists. Order
//! encodes precedence: a development build beats the bundled server, which
//! beats a user-global `cargo install`. A non-empty override skips the table
//! entirely and is returned verbatim; the activation controller performs the
//! single uniform existence check on whatever was picked.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use kql_editor_config::SERVER_BINARY;

const RESOLVER_TARGET: &str = "kql_editor_host::resolver";

/// Filesystem existence probe, injectable so tests can simulate layouts.
pub trait PathProbe {
    /// Whether a path exists on the (possibly simulated) filesystem.
    fn exists(&self, path: &Utf8Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemProbe;

impl PathProbe for FileSystemProbe {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.as_std_path().exists()
    }
}

/// Host platform, as far as executable naming is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Executables carry an `.exe` extension.
    Windows,
    /// Executables are extension-less.
    Other,
}

impl Platform {
    /// Returns the platform the process is running on.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Other
        }
    }
}

/// Base directories the candidate table is anchored to.
#[derive(Debug, Clone)]
pub struct SearchRoots {
    /// Installation directory of the editor integration bundle.
    pub bundle_dir: Utf8PathBuf,
    /// The user's home directory, when one is known.
    pub home_dir: Option<Utf8PathBuf>,
}

impl SearchRoots {
    /// Builds roots for the given bundle directory, discovering the home
    /// directory from the environment.
    #[must_use]
    pub fn discover(bundle_dir: impl Into<Utf8PathBuf>) -> Self {
        let home_dir = dirs::home_dir().and_then(|path| Utf8PathBuf::from_path_buf(path).ok());
        Self {
            bundle_dir: bundle_dir.into(),
            home_dir,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum CandidateBase {
    Bundle,
    Home,
}

#[derive(Debug, Clone, Copy)]
struct CandidateSpec {
    base: CandidateBase,
    dir: &'static str,
}

/// Ordered candidate directories; earlier rows win.
const CANDIDATE_DIRS: &[CandidateSpec] = &[
    // Development build output inside the bundled server workspace.
    CandidateSpec {
        base: CandidateBase::Bundle,
        dir: "server/target/debug",
    },
    // Server shipped alongside the packaged integration.
    CandidateSpec {
        base: CandidateBase::Bundle,
        dir: "bin",
    },
    // User-global cargo tool install.
    CandidateSpec {
        base: CandidateBase::Home,
        dir: ".cargo/bin",
    },
];

fn binary_name(platform: Platform) -> String {
    match platform {
        Platform::Windows => format!("{SERVER_BINARY}.exe"),
        Platform::Other => SERVER_BINARY.to_string(),
    }
}

/// Expands the candidate table into concrete paths for the given roots and
/// platform, in precedence order.
#[must_use]
pub fn candidate_paths(roots: &SearchRoots, platform: Platform) -> Vec<Utf8PathBuf> {
    let name = binary_name(platform);
    CANDIDATE_DIRS
        .iter()
        .filter_map(|spec| {
            let base = match spec.base {
                CandidateBase::Bundle => Some(&roots.bundle_dir),
                CandidateBase::Home => roots.home_dir.as_ref(),
            }?;
            Some(base.join(spec.dir).join(&name))
        })
        .collect()
}

/// Determines the server executable path, or `None` when no usable server
/// exists.
///
/// A non-empty `override_path` is returned verbatim without probing; the
/// caller validates existence once, uniformly, for both the override and the
/// fallback cases. Otherwise the first candidate the probe reports as
/// existing wins. Executability is deliberately not checked here; a
/// non-executable pick surfaces as a launch failure at spawn time.
#[must_use]
pub fn resolve(
    override_path: &str,
    roots: &SearchRoots,
    platform: Platform,
    probe: &dyn PathProbe,
) -> Option<Utf8PathBuf> {
    if !override_path.is_empty() {
        debug!(
            target: RESOLVER_TARGET,
            path = override_path,
            "using configured server path"
        );
        return Some(Utf8PathBuf::from(override_path));
    }

    let found = candidate_paths(roots, platform)
        .into_iter()
        .find(|candidate| probe.exists(candidate));

    match &found {
        Some(path) => debug!(
            target: RESOLVER_TARGET,
            path = %path,
            "resolved server from candidate list"
        ),
        None => debug!(
            target: RESOLVER_TARGET,
            "no server binary found in any candidate location"
        ),
    }

    found
}
