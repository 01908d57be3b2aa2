use tessel_dtype::{Backend, Layout, ScalarType};

use crate::{Error, KernelCollection, KernelEntry, KernelKey, KernelRegistry, KernelSignature};

unsafe extern "C" fn builtin_add(_args: *const *mut u8, _n_args: usize) {}
unsafe extern "C" fn custom_add(_args: *const *mut u8, _n_args: usize) {}

fn cpu_variant() -> KernelKey {
    KernelKey::new(Backend::Cpu, Layout::Any, vec![ScalarType::Float32, ScalarType::Float32])
}

fn gpu_variant() -> KernelKey {
    KernelKey::new(Backend::Cuda, Layout::Any, vec![ScalarType::Float32, ScalarType::Float32])
}

fn binary_f32() -> KernelSignature {
    KernelSignature {
        inputs: vec![ScalarType::Float32, ScalarType::Float32],
        outputs: vec![ScalarType::Float32],
        attrs: vec![],
    }
}

/// Registry with operator "add" pre-populated with its built-in CPU variant.
fn host_registry() -> KernelRegistry {
    let mut registry = KernelRegistry::new();
    registry.register_builtin("add", cpu_variant(), KernelEntry::new(builtin_add, binary_f32()));
    registry
}

#[test]
fn successful_extension() {
    let mut registry = host_registry();
    let entry = KernelEntry::new(custom_add, binary_f32());

    let mut collection = KernelCollection::new();
    collection.insert("add", gpu_variant(), entry.clone());

    registry.merge(&collection).unwrap();

    // Both the built-in and the external variant resolve.
    assert_eq!(registry.get("add", &cpu_variant()), Some(&KernelEntry::new(builtin_add, binary_f32())));
    assert_eq!(registry.get("add", &gpu_variant()), Some(&entry));
    assert_eq!(registry.variant_count(), 2);
}

#[test]
fn unknown_operator_is_rejected() {
    let mut registry = host_registry();

    let mut collection = KernelCollection::new();
    collection.insert("multiply", gpu_variant(), KernelEntry::new(custom_add, binary_f32()));

    let err = registry.merge(&collection).unwrap_err();
    assert!(matches!(err, Error::UnknownOperator { ref operator } if operator == "multiply"));

    assert_eq!(registry.operator_count(), 1);
    assert_eq!(registry.variant_count(), 1);
}

#[test]
fn duplicate_variant_is_rejected() {
    let mut registry = host_registry();
    let builtin = registry.get("add", &cpu_variant()).cloned().unwrap();

    let mut collection = KernelCollection::new();
    collection.insert("add", cpu_variant(), KernelEntry::new(custom_add, binary_f32()));

    let err = registry.merge(&collection).unwrap_err();
    match err {
        Error::DuplicateVariant { operator, key } => {
            assert_eq!(operator, "add");
            assert_eq!(key, cpu_variant());
        }
        other => panic!("expected DuplicateVariant, got {other:?}"),
    }

    // The built-in entry was not replaced.
    assert_eq!(registry.get("add", &cpu_variant()), Some(&builtin));
    assert_eq!(registry.variant_count(), 1);
}

#[test]
fn rejected_collections_insert_nothing() {
    let mut registry = host_registry();

    // The GPU variant alone would be a valid extension, but it shares the
    // collection with a duplicate of the built-in CPU variant.
    let mut collection = KernelCollection::new();
    collection.insert("add", gpu_variant(), KernelEntry::new(custom_add, binary_f32()));
    collection.insert("add", cpu_variant(), KernelEntry::new(custom_add, binary_f32()));

    assert!(registry.merge(&collection).is_err());

    assert!(!registry.contains("add", &gpu_variant()));
    assert_eq!(registry.variant_count(), 1);
}

#[test]
fn abi_mismatch_is_rejected_before_validation() {
    let mut registry = host_registry();

    // Operator and key are both valid; only the layout revision is stale.
    let mut collection = KernelCollection::with_abi_version(crate::KERNEL_ABI_VERSION + 1);
    collection.insert("add", gpu_variant(), KernelEntry::new(custom_add, binary_f32()));

    let err = registry.merge(&collection).unwrap_err();
    assert!(matches!(err, Error::AbiMismatch { module, host }
        if module == crate::KERNEL_ABI_VERSION + 1 && host == crate::KERNEL_ABI_VERSION));
    assert_eq!(registry.variant_count(), 1);
}

#[test]
fn merge_spans_multiple_operators() {
    let mut registry = host_registry();
    registry.register_builtin("pad", cpu_variant(), KernelEntry::new(builtin_add, binary_f32()));

    let mut collection = KernelCollection::new();
    collection.insert("add", gpu_variant(), KernelEntry::new(custom_add, binary_f32()));
    collection.insert("pad", gpu_variant(), KernelEntry::new(custom_add, binary_f32()));

    registry.merge(&collection).unwrap();
    assert_eq!(registry.variant_count(), 4);
}

#[test]
fn builtin_registration_is_write_once() {
    let mut registry = host_registry();
    let first = registry.get("add", &cpu_variant()).cloned().unwrap();

    registry.register_builtin("add", cpu_variant(), KernelEntry::new(custom_add, binary_f32()));

    assert_eq!(registry.get("add", &cpu_variant()), Some(&first));
    assert_eq!(registry.variant_count(), 1);
}

#[test]
fn default_collection_merges_like_a_new_one() {
    let mut registry = host_registry();

    // `Default` must stamp the current ABI revision; a valid extension
    // staged into a default-constructed collection registers cleanly.
    let mut collection = KernelCollection::default();
    collection.insert("add", gpu_variant(), KernelEntry::new(custom_add, binary_f32()));

    registry.merge(&collection).unwrap();
    assert!(registry.contains("add", &gpu_variant()));
    assert_eq!(registry.variant_count(), 2);
}

#[test]
fn empty_collection_is_a_no_op() {
    let mut registry = host_registry();
    registry.merge(&KernelCollection::new()).unwrap();
    assert_eq!(registry.variant_count(), 1);
}
