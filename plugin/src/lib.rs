//! Dynamic kernel-module discovery and registration.
//!
//! Third parties ship kernels as shared objects; this crate locates a
//! module's discovery symbol, obtains its [`KernelCollection`] and merges it
//! into the host's [`KernelRegistry`](tessel_kernel::KernelRegistry) without
//! any a priori knowledge of the module's internals. Loading runs during the
//! runtime's single-threaded initialization phase, before the registry is
//! exposed to the dispatcher.
//!
//! The dlopen-backed path is Linux-only; everywhere else it compiles to a
//! logging no-op. The loader itself is generic over the [`ModuleHost`]
//! capability, so tests drive it with an in-memory fake host.

pub mod error;
pub mod export;
pub mod host;
pub mod loader;


pub use error::*;
pub use host::{ModuleHost, RawSymbol};
pub use loader::{DISCOVERY_SYMBOL, DiscoveryFn, Loaded, ModuleLoader, SkipReason, load_and_register};
// Re-exported so `export_kernel_collection!` works from a module crate that
// only depends on `tessel_plugin`.
pub use tessel_kernel::KernelCollection;

#[cfg(target_os = "linux")]
pub use host::DlHost;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
