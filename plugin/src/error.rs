//! Error types for module loading.

use std::path::PathBuf;

use snafu::Snafu;

/// Result type for loader operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal loading and registration failures.
///
/// A module that merely has nothing to offer is not an error; those cases
/// flow through [`crate::loader::SkipReason`]. Everything here means the
/// module (or its packaging) is broken and must be fixed by its author.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The dynamic loader could not open the module at all.
    #[snafu(display("failed to open module '{}': {reason}", path.display()))]
    ModuleOpen { path: PathBuf, reason: String },

    /// The module exported the discovery symbol but returned a null
    /// collection pointer from it.
    #[snafu(display("module '{}' returned a null kernel collection", path.display()))]
    NullCollection { path: PathBuf },

    /// The module's collection failed validation against the host registry.
    #[snafu(display("module '{}' failed kernel registration: {source}", path.display()))]
    Registration { path: PathBuf, source: tessel_kernel::Error },
}
