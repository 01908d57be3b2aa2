//! Error types for kernel registration.

use snafu::Snafu;

use crate::key::KernelKey;

/// Result type for registration operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while merging a kernel collection into the registry.
///
/// All of these are packaging or versioning mistakes in the module being
/// registered, not transient conditions: they are surfaced to the caller as
/// hard failures and are never retried or silently skipped.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Collection was built against a different descriptor layout revision.
    #[snafu(display("module was built against kernel ABI v{module}, host expects v{host}"))]
    AbiMismatch { module: u32, host: u32 },

    /// Collection names an operator the host never declared.
    #[snafu(display(
        "operator '{operator}' is not known to the host registry; \
         custom kernels can only extend operators the host already defines"
    ))]
    UnknownOperator { operator: String },

    /// Collection carries a variant the registry already holds.
    #[snafu(display(
        "operator '{operator}' already has a kernel registered for {key}; \
         replacing a registered kernel is not supported"
    ))]
    DuplicateVariant { operator: String, key: KernelKey },
}
