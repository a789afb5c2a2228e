//! End-to-end resolution properties over every platform, configuration, and kind.

use bindery_core::{
    resolve, Configuration, Platform, ResolveError, TargetDeclaration, TargetDescriptor,
    TargetKind,
};

fn every_descriptor(project: &str) -> Vec<TargetDescriptor> {
    let mut out = Vec::new();
    for platform in Platform::ALL {
        for configuration in Configuration::ALL {
            out.push(TargetDescriptor::new(platform, configuration, project).unwrap());
        }
    }
    out
}

fn declarations() -> Vec<TargetDeclaration> {
    TargetKind::ALL
        .iter()
        .flat_map(|&kind| {
            [
                TargetDeclaration::new(kind),
                TargetDeclaration::create(kind.as_str(), ["Core", "Engine", "Core"]).unwrap(),
                TargetDeclaration::create(kind.as_str(), ["Versatile"]).unwrap(),
            ]
        })
        .collect()
}

#[test]
fn resolution_is_deterministic() {
    for descriptor in every_descriptor("Versatile") {
        for declaration in declarations() {
            let first = resolve(&descriptor, &declaration).unwrap();
            let second = resolve(&descriptor, &declaration).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.fingerprint(), second.fingerprint());
        }
    }
}

#[test]
fn resolution_is_never_empty() {
    for descriptor in every_descriptor("Versatile") {
        for declaration in declarations() {
            let r = resolve(&descriptor, &declaration).unwrap();
            assert!(!r.binaries.is_empty());
            assert!(!r.modules.is_empty());
            for binary in &r.binaries {
                assert!(!binary.modules.is_empty());
            }
        }
    }
}

#[test]
fn default_module_leads_every_binary() {
    for descriptor in every_descriptor("Versatile") {
        for declaration in declarations() {
            let r = resolve(&descriptor, &declaration).unwrap();
            for binary in &r.binaries {
                assert_eq!(binary.modules[0], "Versatile");
                assert_eq!(binary.default_module(), "Versatile");
            }
        }
    }
}

#[test]
fn dedup_preserves_first_occurrence() {
    let descriptor =
        TargetDescriptor::new(Platform::Win64, Configuration::Development, "Versatile").unwrap();
    let declaration = TargetDeclaration::create("executable", ["A", "B", "A", "C"]).unwrap();

    let r = resolve(&descriptor, &declaration).unwrap();
    assert_eq!(r.binaries.len(), 1);
    assert_eq!(r.binaries[0].modules, vec!["Versatile", "A", "B", "C"]);
    assert_eq!(r.modules, vec!["Versatile", "A", "B", "C"]);
}

#[test]
fn game_target_resolves_to_one_executable() {
    let descriptor =
        TargetDescriptor::new(Platform::Win64, Configuration::Development, "Versatile").unwrap();
    let declaration = TargetDeclaration::new(TargetKind::Executable)
        .add_module("Versatile")
        .unwrap();

    let r = resolve(&descriptor, &declaration).unwrap();
    assert_eq!(r.binaries.len(), 1);
    assert_eq!(r.binaries[0].output_kind, TargetKind::Executable);
    assert_eq!(r.binaries[0].modules, vec!["Versatile"]);
}

#[test]
fn server_target_resolves_to_two_binaries() {
    for descriptor in every_descriptor("Versatile") {
        let declaration = TargetDeclaration::create("server", ["Net"]).unwrap();
        let r = resolve(&descriptor, &declaration).unwrap();
        assert_eq!(r.binaries.len(), 2);
        assert!(r.binaries.iter().all(|b| b.output_kind == TargetKind::Server));
        assert_ne!(r.binaries[0].name, r.binaries[1].name);
    }
}

#[test]
fn single_binary_kinds_resolve_to_one() {
    let descriptor =
        TargetDescriptor::new(Platform::Linux, Configuration::Shipping, "Versatile").unwrap();
    for kind in TargetKind::ALL.into_iter().filter(|k| *k != TargetKind::Server) {
        let r = resolve(&descriptor, &TargetDeclaration::new(kind)).unwrap();
        assert_eq!(r.binaries.len(), 1, "{kind}");
        assert_eq!(r.binaries[0].output_kind, kind);
    }
}

#[test]
fn empty_project_name_is_invalid_descriptor() {
    let err = TargetDescriptor::new(Platform::Win64, Configuration::Debug, "").unwrap_err();
    assert!(matches!(err, ResolveError::InvalidDescriptor { .. }));
}

#[test]
fn unknown_kind_is_invalid_kind() {
    let err = TargetDeclaration::create("screensaver", Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidKind { .. }));
}

#[test]
fn resolves_concurrently() {
    let descriptor =
        TargetDescriptor::new(Platform::Mac, Configuration::Test, "Versatile").unwrap();
    let declaration = TargetDeclaration::create("server", ["A", "B"]).unwrap();
    let expected = resolve(&descriptor, &declaration).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| resolve(&descriptor, &declaration).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
