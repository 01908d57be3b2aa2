//! Collection export surface.
//!
//! A kernel module becomes discoverable by exporting one C-linkage symbol
//! (see [`crate::loader::DISCOVERY_SYMBOL`]) returning its staged
//! [`KernelCollection`](tessel_kernel::KernelCollection). The macro below
//! generates that symbol from a builder function. The host runtime invokes
//! the same macro over its own built-in collection, so the discovery
//! mechanism works symmetrically for host and modules alike.

/// Export a kernel collection under the well-known discovery symbol.
///
/// `$build` is a zero-argument function (or closure) returning the
/// [`KernelCollection`](tessel_kernel::KernelCollection) to expose. It runs
/// once, on the first call to the generated symbol, and the collection then
/// lives for the rest of the process.
///
/// ```ignore
/// fn my_kernels() -> tessel_plugin::KernelCollection {
///     let mut collection = tessel_plugin::KernelCollection::new();
///     // collection.insert("add", key, entry);
///     collection
/// }
///
/// tessel_plugin::export_kernel_collection!(my_kernels);
/// ```
#[macro_export]
macro_rules! export_kernel_collection {
    ($build:expr) => {
        /// Discovery entry point resolved by the host loader.
        #[unsafe(no_mangle)]
        pub extern "C" fn tsl_kernel_collection() -> *const $crate::KernelCollection {
            static COLLECTION: $crate::__private::Lazy<$crate::KernelCollection> =
                $crate::__private::Lazy::new($build);
            ::std::ptr::from_ref(&*COLLECTION)
        }
    };
}
