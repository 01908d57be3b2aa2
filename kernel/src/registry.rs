//! The process-wide kernel dispatch table and the merge path that extends it.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use snafu::{OptionExt, ensure};

use crate::collection::{KERNEL_ABI_VERSION, KernelCollection};
use crate::entry::KernelEntry;
use crate::error::{AbiMismatchSnafu, DuplicateVariantSnafu, Result, UnknownOperatorSnafu};
use crate::key::KernelKey;

/// Canonical mapping `{operator name -> {variant key -> entry}}` the
/// dispatcher resolves kernels against.
///
/// # Lifecycle
///
/// Built-in kernels are registered first via [`register_builtin`], then
/// external collections are merged in during the single-threaded
/// initialization phase, and only afterwards is the registry exposed for
/// concurrent read access. Entries are write-once: nothing is ever replaced
/// or removed, so the table stays auditable for the process lifetime.
///
/// Tests construct fresh instances with [`KernelRegistry::new`]; the deployed
/// runtime uses the process global behind [`registry`].
///
/// [`register_builtin`]: KernelRegistry::register_builtin
#[derive(Debug, Default)]
pub struct KernelRegistry {
    kernels: HashMap<String, HashMap<KernelKey, KernelEntry>>,
}

impl KernelRegistry {
    pub fn new() -> Self {
        Self { kernels: HashMap::new() }
    }

    /// Register a built-in kernel, declaring the operator if unseen.
    ///
    /// This is the pre-population path the runtime uses before any external
    /// module is merged; it is the only way a new operator name enters the
    /// registry. Entries are write-once here too: re-registering an existing
    /// (operator, key) pair keeps the first entry and logs a warning, since a
    /// double registration means two built-ins claim the same variant.
    pub fn register_builtin(
        &mut self,
        operator: impl Into<String>,
        key: KernelKey,
        entry: KernelEntry,
    ) {
        let operator = operator.into();
        if self.contains(&operator, &key) {
            tracing::warn!(
                kernel.operator = %operator,
                kernel.key = %key,
                "built-in kernel already registered; keeping the first entry"
            );
            return;
        }
        self.kernels.entry(operator).or_default().insert(key, entry);
    }

    /// Look up one kernel variant.
    pub fn get(&self, operator: &str, key: &KernelKey) -> Option<&KernelEntry> {
        self.kernels.get(operator)?.get(key)
    }

    pub fn contains_operator(&self, operator: &str) -> bool {
        self.kernels.contains_key(operator)
    }

    pub fn contains(&self, operator: &str, key: &KernelKey) -> bool {
        self.get(operator, key).is_some()
    }

    /// All registered variants of `operator`, or `None` for an unknown name.
    pub fn variants(&self, operator: &str) -> Option<&HashMap<KernelKey, KernelEntry>> {
        self.kernels.get(operator)
    }

    pub fn operator_count(&self) -> usize {
        self.kernels.len()
    }

    /// Number of registered variants across all operators.
    pub fn variant_count(&self) -> usize {
        self.kernels.values().map(HashMap::len).sum()
    }

    /// Merge an externally supplied collection into the registry.
    ///
    /// Validation runs in a full first pass so a rejected module leaves no
    /// partial state behind:
    ///
    /// 1. the collection's ABI revision must match the host's,
    /// 2. every operator it names must already exist in the registry,
    /// 3. none of its exact variant keys may already be registered —
    ///    silent replacement of a built-in (or previously merged) kernel is
    ///    not supported.
    ///
    /// Only then are the entries inserted. Any violation fails the entire
    /// collection: these are packaging mistakes in the module, to be fixed by
    /// its author rather than handled at runtime.
    pub fn merge(&mut self, collection: &KernelCollection) -> Result<()> {
        ensure!(
            collection.abi_version() == KERNEL_ABI_VERSION,
            AbiMismatchSnafu { module: collection.abi_version(), host: KERNEL_ABI_VERSION }
        );

        for (operator, variants) in collection.iter() {
            let existing =
                self.kernels.get(operator).context(UnknownOperatorSnafu { operator })?;
            for key in variants.keys() {
                ensure!(
                    !existing.contains_key(key),
                    DuplicateVariantSnafu { operator, key: key.clone() }
                );
            }
        }

        for (operator, variants) in collection.iter() {
            // Validated above; every operator is present.
            let Some(slot) = self.kernels.get_mut(operator) else { continue };
            for (key, entry) in variants {
                slot.insert(key.clone(), entry.clone());
                tracing::debug!(kernel.operator = operator, kernel.key = %key, "registered external kernel");
            }
        }

        Ok(())
    }
}

/// Process-wide kernel registry.
///
/// All merges complete during single-threaded initialization before the
/// dispatcher starts reading; the lock makes the global safe to touch from
/// safe Rust, it is not a license for concurrent registration.
static REGISTRY: Lazy<RwLock<KernelRegistry>> = Lazy::new(|| RwLock::new(KernelRegistry::new()));

/// Get the global kernel registry.
pub fn registry() -> &'static RwLock<KernelRegistry> {
    &REGISTRY
}
