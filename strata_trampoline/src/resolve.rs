//! Install-time superclass-implementation resolution.
//!
//! Answers, for a (type, selector) pair, whether an ancestor provides an
//! implementation to forward to and what its recorded signature is. Pure
//! reads against the registry; the installer turns the answer into a table
//! write.

use strata_core::Selector;
use strata_runtime::{MethodEntry, RuntimeType, TypeId, TypeRegistry};

use crate::install::InstallError;

/// Outcome of a successful resolution: the ancestor's entry and the type
/// that defines it.
#[derive(Debug)]
pub(crate) struct SuperResolution {
    pub entry: MethodEntry,
    pub defining_type: TypeId,
}

/// Find the nearest ancestor of `ty` defining `selector` in its own table.
///
/// Fails with [`InstallError::NoSuperClass`] for hierarchy roots and with
/// [`InstallError::NoDynamicallyDispatchedMethodAvailable`] when the walk
/// exhausts the chain. The walk starts at the parent: an entry on `ty`
/// itself is the installer's concern, not an ancestor implementation.
pub(crate) fn resolve_super_implementation(
    registry: &TypeRegistry,
    ty: &RuntimeType,
    selector: Selector,
) -> Result<SuperResolution, InstallError> {
    let Some(parent) = ty.parent() else {
        return Err(InstallError::NoSuperClass {
            type_id: ty.type_id(),
            type_name: ty.name().to_owned(),
            selector,
        });
    };

    let mut cursor = Some(parent);
    while let Some(type_id) = cursor {
        let Some(ancestor) = registry.get(type_id) else {
            break;
        };
        if let Some(entry) = ancestor.own_method(selector) {
            return Ok(SuperResolution {
                entry,
                defining_type: type_id,
            });
        }
        cursor = ancestor.parent();
    }

    Err(InstallError::NoDynamicallyDispatchedMethodAvailable {
        type_id: ty.type_id(),
        type_name: ty.name().to_owned(),
        selector,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::intern;
    use strata_runtime::{MethodSignature, RawImp, TypeEncoding};

    unsafe extern "C" fn probe_imp() {}

    #[test]
    fn test_root_has_no_superclass() {
        let registry = TypeRegistry::new();
        let root = registry.define_type("Root", None).unwrap();
        let err = resolve_super_implementation(&registry, &root, intern("draw", 0)).unwrap_err();
        assert!(matches!(err, InstallError::NoSuperClass { .. }));
    }

    #[test]
    fn test_resolves_nearest_ancestor() {
        let registry = TypeRegistry::new();
        let root = registry.define_type("Root", None).unwrap();
        let mid = registry.define_type("Mid", Some(root.type_id())).unwrap();
        let leaf = registry.define_type("Leaf", Some(mid.type_id())).unwrap();

        let sel = intern("probe", 0);
        let sig = MethodSignature::returning(TypeEncoding::Void);
        unsafe { root.add_method(sel, probe_imp, sig) }.unwrap();

        let resolved = resolve_super_implementation(&registry, &leaf, sel).unwrap();
        assert_eq!(resolved.defining_type, root.type_id());
        assert!(std::ptr::fn_addr_eq(resolved.entry.imp, probe_imp as RawImp));
    }

    #[test]
    fn test_own_entry_does_not_satisfy_resolution() {
        // The walk starts above the requesting type; its own table is
        // invisible here.
        let registry = TypeRegistry::new();
        let root = registry.define_type("Root", None).unwrap();
        let leaf = registry.define_type("Leaf", Some(root.type_id())).unwrap();

        let sel = intern("probe", 0);
        let sig = MethodSignature::returning(TypeEncoding::Void);
        unsafe { leaf.add_method(sel, probe_imp, sig) }.unwrap();

        let err = resolve_super_implementation(&registry, &leaf, sel).unwrap_err();
        assert!(matches!(
            err,
            InstallError::NoDynamicallyDispatchedMethodAvailable { .. }
        ));
    }

    #[test]
    fn test_exhausted_chain_reports_no_method() {
        let registry = TypeRegistry::new();
        let root = registry.define_type("Root", None).unwrap();
        let leaf = registry.define_type("Leaf", Some(root.type_id())).unwrap();

        let err =
            resolve_super_implementation(&registry, &leaf, intern("missing", 0)).unwrap_err();
        match err {
            InstallError::NoDynamicallyDispatchedMethodAvailable {
                type_id,
                type_name,
                selector,
            } => {
                assert_eq!(type_id, leaf.type_id());
                assert_eq!(type_name, "Leaf");
                assert_eq!(selector, intern("missing", 0));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
