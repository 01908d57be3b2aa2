//! Kernel entry descriptors.

use tessel_dtype::ScalarType;

/// Raw entry point of a compiled kernel.
///
/// Receives the flat buffer-pointer array and its length. Both host and
/// module are compiled against this exact signature; changing it is an ABI
/// break covered by [`crate::collection::KERNEL_ABI_VERSION`].
pub type KernelFn = unsafe extern "C" fn(args: *const *mut u8, n_args: usize);

/// Argument metadata the dispatcher needs to bind a call site to a kernel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelSignature {
    /// Input tensor type tags, in positional order.
    pub inputs: Vec<ScalarType>,
    /// Output tensor type tags, in positional order.
    pub outputs: Vec<ScalarType>,
    /// Scalar attribute type tags (axis, padding value, ...).
    pub attrs: Vec<ScalarType>,
}

/// One registered kernel implementation.
///
/// Opaque to the registry: it is stored, compared and handed to the
/// dispatcher, never invoked here. Once merged the registry owns the entry
/// for the remaining process lifetime; there is no unregistration.
#[derive(Clone)]
pub struct KernelEntry {
    func: KernelFn,
    signature: KernelSignature,
}

impl KernelEntry {
    pub fn new(func: KernelFn, signature: KernelSignature) -> Self {
        Self { func, signature }
    }

    /// Raw entry point, for the dispatcher.
    pub fn func(&self) -> KernelFn {
        self.func
    }

    pub fn signature(&self) -> &KernelSignature {
        &self.signature
    }
}

impl PartialEq for KernelEntry {
    fn eq(&self, other: &Self) -> bool {
        // Entries are identical when they point at the same compiled code
        // with the same declared signature.
        std::ptr::fn_addr_eq(self.func, other.func) && self.signature == other.signature
    }
}

impl Eq for KernelEntry {}

impl std::fmt::Debug for KernelEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelEntry")
            .field("func", &(self.func as *const ()))
            .field("signature", &self.signature)
            .finish()
    }
}
