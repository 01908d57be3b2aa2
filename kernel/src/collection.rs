//! Per-module kernel staging collections.

use std::collections::HashMap;

use crate::entry::KernelEntry;
use crate::key::KernelKey;

/// Layout revision of the kernel registration descriptors.
///
/// A collection crosses the dynamic-module boundary as a plain in-memory
/// reference, so host and module must be built by the same toolchain against
/// the same revision of this crate. The version tag is stamped into every
/// collection and checked before a merge, so a stale module fails loudly
/// instead of corrupting the registry. Bump it whenever [`KernelKey`],
/// [`KernelEntry`] or the tag encodings in `tessel_dtype` change shape.
pub const KERNEL_ABI_VERSION: u32 = 1;

/// The kernel set a single module (or the host itself) exposes for
/// registration: `{operator name -> {variant key -> entry}}`.
///
/// Built entirely on the producing side; the host receives it as a read-only
/// reference for the duration of one merge call and never retains or mutates
/// it. The producing module keeps true ownership for the process lifetime.
#[derive(Debug)]
pub struct KernelCollection {
    abi_version: u32,
    kernels: HashMap<String, HashMap<KernelKey, KernelEntry>>,
}

impl Default for KernelCollection {
    fn default() -> Self {
        // Must stamp the current ABI revision like `new` does; a zeroed
        // version tag would make every merge reject the collection as stale.
        Self::new()
    }
}

impl KernelCollection {
    pub fn new() -> Self {
        Self { abi_version: KERNEL_ABI_VERSION, kernels: HashMap::new() }
    }

    /// Build a collection stamped with an arbitrary layout revision, for
    /// tooling that emulates modules built against another revision.
    pub fn with_abi_version(abi_version: u32) -> Self {
        Self { abi_version, kernels: HashMap::new() }
    }

    pub fn abi_version(&self) -> u32 {
        self.abi_version
    }

    /// Stage one kernel variant. Within a collection the last insert for a
    /// given (operator, key) pair wins; conflicts with the host registry are
    /// only checked at merge time.
    pub fn insert(
        &mut self,
        operator: impl Into<String>,
        key: KernelKey,
        entry: KernelEntry,
    ) -> &mut Self {
        self.kernels.entry(operator.into()).or_default().insert(key, entry);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Number of staged variants across all operators.
    pub fn variant_count(&self) -> usize {
        self.kernels.values().map(HashMap::len).sum()
    }

    pub fn operators(&self) -> impl Iterator<Item = &str> {
        self.kernels.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashMap<KernelKey, KernelEntry>)> {
        self.kernels.iter().map(|(name, variants)| (name.as_str(), variants))
    }
}
