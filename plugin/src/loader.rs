//! Kernel-module loading and the load-and-register pipeline.
//!
//! A kernel module is any shared object exporting the discovery symbol: a
//! zero-argument C function returning a reference to the module's
//! [`KernelCollection`]. Modules without the symbol are unrelated libraries
//! and are silently skipped, so a batch load over a plugin directory is
//! resilient to whatever else lives there.

use std::path::Path;

use snafu::{ResultExt, ensure};
use tessel_kernel::{KernelCollection, KernelRegistry};

use crate::error::{NullCollectionSnafu, RegistrationSnafu, Result};
use crate::host::ModuleHost;

/// Name of the C-linkage discovery symbol a kernel module must export.
///
/// The host exposes its own built-in collection under the same name (see
/// [`crate::export_kernel_collection`]), so tooling can introspect host and
/// module through one mechanism.
pub const DISCOVERY_SYMBOL: &str = "tsl_kernel_collection";

/// Signature of the discovery symbol.
pub type DiscoveryFn = unsafe extern "C" fn() -> *const KernelCollection;

/// Expected reasons a module contributes no kernels. Logged and ignored;
/// never fails the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The module does not export the discovery symbol.
    NoRegistrationSymbol,
    /// Dynamic kernel modules are not supported on this target.
    UnsupportedPlatform,
}

/// Outcome of loading one module.
#[derive(Debug)]
pub enum Loaded<'a> {
    /// The module's kernel collection, borrowed for the loader's lifetime.
    Collection(&'a KernelCollection),
    Skipped(SkipReason),
}

/// Loads kernel modules through a [`ModuleHost`] and keeps every
/// kernel-providing module open for the remaining process lifetime.
///
/// There is no unload protocol: collection references returned by [`load`]
/// point into module images this loader owns, which is why the deployed
/// runtime keeps one process-wide loader (see [`load_and_register`]).
///
/// [`load`]: ModuleLoader::load
pub struct ModuleLoader<H: ModuleHost> {
    host: H,
    /// Opened kernel-providing modules. Never closed.
    modules: Vec<H::Module>,
}

impl<H: ModuleHost> ModuleLoader<H> {
    pub fn new(host: H) -> Self {
        Self { host, modules: Vec::new() }
    }

    /// Open the module at `path` and obtain its kernel collection.
    ///
    /// A missing discovery symbol is not an error: the module is closed
    /// again and reported as [`SkipReason::NoRegistrationSymbol`]. A present
    /// symbol commits the module to the protocol, so a null collection is a
    /// fatal packaging bug.
    pub fn load(&mut self, path: &Path) -> Result<Loaded<'_>> {
        let module = self.host.open(path)?;

        let Some(raw) = self.host.resolve(&module, DISCOVERY_SYMBOL) else {
            tracing::debug!(
                module.path = %path.display(),
                symbol = DISCOVERY_SYMBOL,
                "no kernel registration symbol in module; skipping"
            );
            return Ok(Loaded::Skipped(SkipReason::NoRegistrationSymbol));
        };

        // SAFETY: `raw` is the module's discovery symbol, which both sides
        // compile against `DiscoveryFn`; the layout revision of what it
        // returns is checked at merge time via the collection's ABI tag.
        let discover: DiscoveryFn = unsafe { std::mem::transmute(raw) };
        let collection = unsafe { discover() };
        ensure!(!collection.is_null(), NullCollectionSnafu { path });

        self.modules.push(module);
        // SAFETY: non-null, and it points into a module image that stays
        // mapped for as long as this loader holds the handle pushed above.
        let collection = unsafe { &*collection };

        tracing::debug!(
            module.path = %path.display(),
            kernel.count = collection.variant_count(),
            "loaded kernel collection from module"
        );
        Ok(Loaded::Collection(collection))
    }

    /// Load `path` and merge any kernels it exposes into `registry`.
    ///
    /// One-shot, append-only pipeline per module: a skip returns without
    /// touching the registry, a merge failure is propagated as a fatal
    /// configuration error and inserts nothing.
    pub fn load_and_register(&mut self, path: &Path, registry: &mut KernelRegistry) -> Result<()> {
        match self.load(path)? {
            Loaded::Skipped(_) => Ok(()),
            Loaded::Collection(collection) => {
                registry.merge(collection).context(RegistrationSnafu { path })
            }
        }
    }
}

/// Load the module at `path` through the process-wide loader and merge its
/// kernels into `registry`.
#[cfg(target_os = "linux")]
pub fn load_and_register(path: &Path, registry: &mut KernelRegistry) -> Result<()> {
    use once_cell::sync::Lazy;
    use parking_lot::Mutex;

    use crate::host::DlHost;

    // Process-wide loader; module handles stay valid until process exit.
    static LOADER: Lazy<Mutex<ModuleLoader<DlHost>>> =
        Lazy::new(|| Mutex::new(ModuleLoader::new(DlHost)));

    LOADER.lock().load_and_register(path, registry)
}

/// Dynamic kernel modules are only supported on Linux; on every other target
/// the load path is a no-op that never attempts symbol resolution.
#[cfg(not(target_os = "linux"))]
pub fn load_and_register(path: &Path, _registry: &mut KernelRegistry) -> Result<()> {
    tracing::trace!(
        module.path = %path.display(),
        skip.reason = ?SkipReason::UnsupportedPlatform,
        "dynamic kernel modules are not supported on this target"
    );
    Ok(())
}
