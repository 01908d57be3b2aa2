//! Platform dynamic-loading capability.
//!
//! The loader depends only on this interface, so unit tests can substitute a
//! fake host and the dlopen-backed implementation can stay confined to the
//! platforms that support it.

use std::path::Path;

use crate::error::Result;

/// Raw address of a resolved symbol. Transmuted to the concrete fn type at
/// the call site, like any other symbol pulled out of a shared object.
pub type RawSymbol = *const ();

/// Dynamic-module capability: open a module by path and resolve exported
/// symbols in it. Closing is dropping the module handle.
pub trait ModuleHost {
    /// Opaque handle to one opened module.
    type Module;

    fn open(&self, path: &Path) -> Result<Self::Module>;

    /// Resolve `symbol` to a raw function address, or `None` if the module
    /// does not export it.
    fn resolve(&self, module: &Self::Module, symbol: &str) -> Option<RawSymbol>;
}

/// `dlopen`-backed module host.
#[cfg(target_os = "linux")]
pub struct DlHost;

#[cfg(target_os = "linux")]
impl ModuleHost for DlHost {
    type Module = libloading::Library;

    fn open(&self, path: &Path) -> Result<Self::Module> {
        unsafe { libloading::Library::new(path) }.map_err(|e| crate::error::Error::ModuleOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn resolve(&self, module: &Self::Module, symbol: &str) -> Option<RawSymbol> {
        let mut name = symbol.as_bytes().to_vec();
        name.push(0);
        let sym: libloading::Symbol<'_, unsafe extern "C" fn()> =
            unsafe { module.get(&name) }.ok()?;
        Some(*sym as RawSymbol)
    }
}
