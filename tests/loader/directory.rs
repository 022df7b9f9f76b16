//! Whole-directory loads across both surface syntaxes.

use std::fs;
use std::path::Path;

use voidwake_loader::load_directory;
use voidwake_model::ContentRegistry;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

// The same building written in both syntaxes, under different names.
const SHIPYARD_VCT: &str = r#"
    BuildingType
        name = "BLD_SHIPYARD_T"
        description = "BLD_SHIPYARD_DESC"
        buildcost = 10.0 * Target.HabitableSize
        buildtime = 4
        location = Planet type = [Ocean Terran]
"#;

const SHIPYARD_VCS: &str = r#"(BuildingType :name "BLD_SHIPYARD_S"
                                             :description "BLD_SHIPYARD_DESC"
                                             :buildcost (* 10.0 Target.HabitableSize)
                                             :buildtime 4
                                             :location (Planet :type (list Ocean Terran)))"#;

#[test]
fn both_syntaxes_produce_the_same_tree() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "token/shipyard.vct", SHIPYARD_VCT);
    write(dir.path(), "script/shipyard.vcs", SHIPYARD_VCS);

    let mut registry = ContentRegistry::new();
    let report = load_directory(dir.path(), &mut registry).unwrap();
    assert!(report.is_clean(), "failures: {:?}", report.failures);

    let from_tokens = registry.building("BLD_SHIPYARD_T").unwrap();
    let from_script = registry.building("BLD_SHIPYARD_S").unwrap();
    assert_eq!(from_tokens.build_cost, from_script.build_cost);
    assert_eq!(from_tokens.build_time, from_script.build_time);
    assert_eq!(from_tokens.location, from_script.location);
}

#[test]
fn script_modules_may_import_within_the_tree() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "base/yard.vcs",
        r#"(BuildingType :name "BLD_YARD"
                         :description "D"
                         :buildcost 5.0
                         :buildtime 1
                         :location All)"#,
    );
    write(
        dir.path(),
        "extra/more.vcs",
        r#"(import base.yard)
           (Policy :name "PLC_MORE" :description "D" :adoptioncost 2.0)"#,
    );

    let mut registry = ContentRegistry::new();
    let report = load_directory(dir.path(), &mut registry).unwrap();
    assert!(report.is_clean(), "failures: {:?}", report.failures);
    assert!(registry.building("BLD_YARD").is_some());
    assert!(registry.policy("PLC_MORE").is_some());
}

#[test]
fn a_failing_script_does_not_poison_the_rest_of_the_load() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a_bad.vcs", "(NoSuchBuilder :name \"X\")");
    write(dir.path(), "b_good.vct", SHIPYARD_VCT);

    let mut registry = ContentRegistry::new();
    let report = load_directory(dir.path(), &mut registry).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].path.ends_with("a_bad.vcs"));
    assert!(registry.building("BLD_SHIPYARD_T").is_some());
}

#[test]
fn report_counts_cover_every_visited_content_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "one.vct", SHIPYARD_VCT);
    write(dir.path(), "two.vcs", SHIPYARD_VCS);
    write(dir.path(), "notes.txt", "ignored");

    let mut registry = ContentRegistry::new();
    let report = load_directory(dir.path(), &mut registry).unwrap();
    assert_eq!(report.files, 3);
    assert_eq!(report.definitions, 2);
}
