//! End-to-end bridge sessions over an on-disk content tree.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use voidwake_model::{Definition, ErrorKind};
use voidwake_script::{ContentResolver, Resolved, ScriptBridge, ScriptHost};

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn content_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "content/buildings/shipyard.vcs",
        r#"(BuildingType :name "BLD_SHIPYARD"
                         :description "BLD_SHIPYARD_DESC"
                         :buildcost (* 10.0 Target.HabitableSize)
                         :buildtime 4
                         :location (& (Planet :type (list Ocean Terran))
                                      (OwnedBy :affiliation TheEmpire)))"#,
    );
    write(
        dir.path(),
        "content/policies.vcs",
        r#"(import content.buildings.shipyard)
           (Policy :name "PLC_CENTRALIZATION"
                   :description "PLC_CENTRALIZATION_DESC"
                   :adoptioncost (Statistic Count :condition All))"#,
    );
    dir
}

// =============================================================================
// Import hook
// =============================================================================

#[test]
fn package_module_and_not_found_answers() {
    let dir = content_tree();
    let resolver = ContentResolver::new(dir.path());
    assert_eq!(resolver.resolve("content"), Resolved::Package);
    assert!(matches!(
        resolver.resolve("content.buildings.shipyard"),
        Resolved::Module(_)
    ));
    assert_eq!(resolver.resolve("content.missing"), Resolved::NotFound);
}

#[test]
fn builder_globals_are_preseeded_in_module_namespaces() {
    // The module body uses builders, sources, and enum constants without a
    // single import; loading succeeds only if all groups are seeded.
    let dir = content_tree();
    let host = Rc::new(RefCell::new(ScriptHost::new()));
    let bridge = ScriptBridge::new(Rc::clone(&host), dir.path());
    bridge.load_module("content.buildings.shipyard").unwrap();

    let definitions = bridge.take_definitions();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].name(), "BLD_SHIPYARD");
}

#[test]
fn modules_can_import_each_other() {
    let dir = content_tree();
    let host = Rc::new(RefCell::new(ScriptHost::new()));
    let bridge = ScriptBridge::new(Rc::clone(&host), dir.path());
    bridge.load_module("content.policies").unwrap();

    let names: Vec<String> = bridge
        .take_definitions()
        .iter()
        .map(|definition| definition.name().to_string())
        .collect();
    assert_eq!(names, vec!["BLD_SHIPYARD", "PLC_CENTRALIZATION"]);
}

#[test]
fn unknown_module_maps_to_module_not_found() {
    let dir = content_tree();
    let host = Rc::new(RefCell::new(ScriptHost::new()));
    let bridge = ScriptBridge::new(Rc::clone(&host), dir.path());
    let err = bridge.load_module("content.missing").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ModuleNotFound(_)));
}

// =============================================================================
// Session lifecycle
// =============================================================================

#[test]
fn dropping_a_bridge_removes_exactly_its_own_hook() {
    let dir_a = content_tree();
    let dir_b = content_tree();
    let dir_c = content_tree();
    let host = Rc::new(RefCell::new(ScriptHost::new()));

    let bridge_a = ScriptBridge::new(Rc::clone(&host), dir_a.path());
    let bridge_b = ScriptBridge::new(Rc::clone(&host), dir_b.path());
    let bridge_c = ScriptBridge::new(Rc::clone(&host), dir_c.path());
    let all_ids = host.borrow().resolver_ids();
    assert_eq!(all_ids.len(), 3);

    // Dropping the middle session leaves the outer two in their original
    // relative order.
    drop(bridge_b);
    assert_eq!(
        host.borrow().resolver_ids(),
        vec![all_ids[0], all_ids[2]]
    );

    drop(bridge_a);
    drop(bridge_c);
    assert_eq!(host.borrow().resolver_count(), 0);
}

#[test]
fn loaded_modules_are_tracked_under_the_private_prefix() {
    let dir = content_tree();
    let host = Rc::new(RefCell::new(ScriptHost::new()));
    let bridge = ScriptBridge::new(Rc::clone(&host), dir.path());
    bridge.load_module("content.buildings.shipyard").unwrap();

    let names = host.borrow().module_names();
    assert!(
        names
            .iter()
            .all(|name| name.starts_with(voidwake_script::host::MODULE_PREFIX))
    );
    assert!(names.contains(&"vcs.content.buildings.shipyard".to_string()));
}

#[test]
fn definitions_survive_until_drained() {
    let dir = content_tree();
    let host = Rc::new(RefCell::new(ScriptHost::new()));
    let bridge = ScriptBridge::new(Rc::clone(&host), dir.path());
    bridge.load_module("content.buildings.shipyard").unwrap();

    let first: Vec<Definition> = bridge.take_definitions();
    assert_eq!(first.len(), 1);
    assert!(bridge.take_definitions().is_empty());
}
