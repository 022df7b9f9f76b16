//! Content-directory loader.
//!
//! Walks a content tree in sorted path order and routes each file by
//! extension: `.vct` through the token-grammar front end, `.vcs` through the
//! script bridge. Individual file failures are logged and recorded without
//! stopping the walk; only a dead script runtime that refuses to restart is
//! fatal. Everything that parses lands in one shared [`ContentRegistry`].

#![warn(missing_docs)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{error, info};
use voidwake_model::{ContentRegistry, Error, Result};
use voidwake_script::{ScriptBridge, ScriptHost};

/// Extension of token-grammar content files.
pub const TOKEN_EXTENSION: &str = "vct";
/// Extension of script content files.
pub const SCRIPT_EXTENSION: &str = "vcs";

/// One file that failed to load.
#[derive(Debug)]
pub struct LoadFailure {
    /// The file that failed.
    pub path: PathBuf,
    /// Why it failed.
    pub error: Error,
}

/// Outcome of a content-directory load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Files visited, unrecognized extensions included.
    pub files: usize,
    /// Definitions deposited into the registry.
    pub definitions: usize,
    /// Files that contributed nothing.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// True when every visited file loaded cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Loads every content file under `root` into `registry`.
///
/// # Errors
/// Returns an error when `root` cannot be walked, or when the script
/// runtime dies and cannot be restarted. Per-file failures are recorded in
/// the report instead.
pub fn load_directory(root: &Path, registry: &mut ContentRegistry) -> Result<LoadReport> {
    let mut files = Vec::new();
    collect_content_files(root, &mut files)?;
    files.sort();

    let host = Rc::new(RefCell::new(ScriptHost::new()));
    let bridge = ScriptBridge::new(Rc::clone(&host), root);

    let mut report = LoadReport::default();
    for path in files {
        report.files += 1;
        let outcome = match extension(&path) {
            Some(TOKEN_EXTENSION) => load_token_file(&path, registry),
            Some(SCRIPT_EXTENSION) => load_script_file(root, &path, &bridge, registry),
            _ => continue,
        };
        match outcome {
            Ok(count) => report.definitions += count,
            Err(err) if err.is_fatal() => {
                error!(file = %path.display(), "script runtime lost, aborting content load");
                return Err(err);
            }
            Err(err) => {
                error!(file = %path.display(), %err, "content file failed to load");
                report.failures.push(LoadFailure { path, error: err });
            }
        }
    }

    info!(
        files = report.files,
        definitions = report.definitions,
        failures = report.failures.len(),
        "content load finished"
    );
    Ok(report)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Collects every regular file under `dir`, recursively. Ordering is left
/// to the caller.
fn collect_content_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_content_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

fn load_token_file(path: &Path, registry: &mut ContentRegistry) -> Result<usize> {
    let source = fs::read_to_string(path)?;
    let definitions = voidwake_grammar::parse_definitions(&source)?;
    let count = definitions.len();
    for definition in definitions {
        registry.insert(definition)?;
    }
    Ok(count)
}

fn load_script_file(
    root: &Path,
    path: &Path,
    bridge: &ScriptBridge,
    registry: &mut ContentRegistry,
) -> Result<usize> {
    let dotted = dotted_name(root, path)
        .ok_or_else(|| Error::script(path.display().to_string(), "path escapes content root"))?;
    bridge.load_module(&dotted)?;
    let definitions = bridge.take_definitions();
    let count = definitions.len();
    for definition in definitions {
        registry.insert(definition)?;
    }
    Ok(count)
}

/// Maps a script file path back to its dotted module name.
fn dotted_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let stem = relative.with_extension("");
    let segments: Vec<&str> = stem
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(segments.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use voidwake_model::ErrorKind;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    const SHIPYARD_VCT: &str = r#"BuildingType
    name = "BLD_SHIPYARD"
    description = "BLD_SHIPYARD_DESC"
    buildcost = 20.0
    buildtime = 4
    location = All
"#;

    const DRYDOCK_VCS: &str = r#"(BuildingType :name "BLD_DRYDOCK"
                                               :description "BLD_DRYDOCK_DESC"
                                               :buildcost 35.0
                                               :buildtime 6
                                               :location All)"#;

    #[test]
    fn loads_both_front_ends_into_one_registry() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "buildings/shipyard.vct", SHIPYARD_VCT);
        write(dir.path(), "buildings/drydock.vcs", DRYDOCK_VCS);

        let mut registry = ContentRegistry::new();
        let report = load_directory(dir.path(), &mut registry).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.files, 2);
        assert_eq!(report.definitions, 2);
        assert!(registry.building("BLD_SHIPYARD").is_some());
        assert!(registry.building("BLD_DRYDOCK").is_some());
    }

    #[test]
    fn unknown_extensions_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "README.md", "not content");
        write(dir.path(), "buildings/shipyard.vct", SHIPYARD_VCT);

        let mut registry = ContentRegistry::new();
        let report = load_directory(dir.path(), &mut registry).unwrap();
        assert_eq!(report.definitions, 1);
    }

    #[test]
    fn one_bad_file_does_not_stop_the_walk() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a_broken.vct", "BuildingType name =");
        write(dir.path(), "b_good.vct", SHIPYARD_VCT);

        let mut registry = ContentRegistry::new();
        let report = load_directory(dir.path(), &mut registry).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.definitions, 1);
        assert!(registry.building("BLD_SHIPYARD").is_some());
    }

    #[test]
    fn duplicate_definitions_are_rejected_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a/shipyard.vct", SHIPYARD_VCT);
        write(dir.path(), "b/shipyard.vct", SHIPYARD_VCT);

        let mut registry = ContentRegistry::new();
        let report = load_directory(dir.path(), &mut registry).unwrap();

        assert_eq!(report.definitions, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error.kind,
            ErrorKind::DuplicateContent(_)
        ));
    }

    #[test]
    fn files_load_in_sorted_path_order() {
        // Two files define the same name; sorted order means the
        // lexicographically first one wins and the second is the duplicate.
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "z_late.vct", SHIPYARD_VCT);
        write(
            dir.path(),
            "a_early.vct",
            &SHIPYARD_VCT.replace("20.0", "99.0"),
        );

        let mut registry = ContentRegistry::new();
        let report = load_directory(dir.path(), &mut registry).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("z_late.vct"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let mut registry = ContentRegistry::new();
        assert!(load_directory(&missing, &mut registry).is_err());
    }
}
