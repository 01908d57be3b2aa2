//! Kernel variant identity.

use tessel_dtype::{Backend, Layout, ScalarType};

/// Identifies one concrete variant of an operator: the execution backend, the
/// tensor layout it expects, and its positional argument-type signature.
///
/// The operator name itself is the outer registry key, so two operators can
/// share equal `KernelKey`s without colliding. Equality is structural and the
/// key is immutable once built; a collision under one operator means "same
/// kernel variant".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KernelKey {
    backend: Backend,
    layout: Layout,
    signature: Vec<ScalarType>,
}

impl KernelKey {
    pub fn new(backend: Backend, layout: Layout, signature: impl Into<Vec<ScalarType>>) -> Self {
        Self { backend, layout, signature: signature.into() }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Argument type tags in positional order.
    pub fn signature(&self) -> &[ScalarType] {
        &self.signature
    }
}

impl std::fmt::Display for KernelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, [", self.backend, self.layout)?;
        for (i, tag) in self.signature.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tag}")?;
        }
        f.write_str("])")
    }
}
