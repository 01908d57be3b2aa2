//! Kernel registration data model for the tessel runtime.
//!
//! An operator ("add", "pad", ...) is a named computational unit the
//! dispatcher knows how to call; a kernel is one concrete implementation of
//! it for a specific backend, layout and argument-type signature. This crate
//! owns the identity types ([`KernelKey`], [`KernelEntry`]), the per-module
//! staging shape ([`KernelCollection`]) and the canonical process-wide
//! dispatch table ([`KernelRegistry`]) together with the validating merge
//! that lets external modules extend it.
//!
//! Kernel *execution* lives elsewhere: entries are stored and compared here,
//! never invoked.

pub mod collection;
pub mod entry;
pub mod error;
pub mod key;
pub mod registry;


pub use collection::{KERNEL_ABI_VERSION, KernelCollection};
pub use entry::{KernelEntry, KernelFn, KernelSignature};
pub use error::*;
pub use key::KernelKey;
pub use registry::{KernelRegistry, registry};
