//! Module resolution and execution.
//!
//! Dotted module names map onto the content directory tree: each segment is
//! a directory, except the last, which may be either a directory (a package)
//! or a `.vcs` file (a module). Resolvers are chained on the host; `import`
//! consults the chain and executes whatever it finds.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use voidwake_model::{Error, ErrorKind, Result};

use crate::eval;
use crate::host::{ModuleStatus, ScriptHost};

/// File extension of script modules.
pub const MODULE_EXTENSION: &str = "vcs";

/// A resolver's answer for a dotted module name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// The name is a directory package; register it, execute nothing.
    Package,
    /// The name is a module file to execute.
    Module(PathBuf),
    /// This resolver does not know the name; ask the next one.
    NotFound,
}

/// Resolves dotted module names against one content root directory.
#[derive(Clone, Debug)]
pub struct ContentResolver {
    root: PathBuf,
}

impl ContentResolver {
    /// Creates a resolver rooted at a content directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The content root this resolver searches under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a dotted name onto the directory tree.
    #[must_use]
    pub fn resolve(&self, dotted: &str) -> Resolved {
        let mut path = self.root.clone();
        for segment in dotted.split('.') {
            path.push(segment);
        }
        if path.is_dir() {
            return Resolved::Package;
        }
        path.set_extension(MODULE_EXTENSION);
        if path.is_file() {
            return Resolved::Module(path);
        }
        Resolved::NotFound
    }
}

/// Imports a dotted module name: resolves it through the host's chain and
/// executes the result. Already-registered modules are not re-executed.
///
/// # Errors
/// Returns [`ErrorKind::ModuleNotFound`] when no resolver knows the name,
/// or the module's execution error.
pub fn import(host: &mut ScriptHost, dotted: &str) -> Result<()> {
    if host.module_status(dotted).is_some() {
        return Ok(());
    }
    match host.resolve(dotted) {
        Resolved::NotFound => Err(Error::module_not_found(dotted)),
        Resolved::Package => {
            debug!(module = dotted, "registering package");
            host.register_module(dotted, ModuleStatus::Package);
            Ok(())
        }
        Resolved::Module(path) => exec_module(host, dotted, &path),
    }
}

/// Executes a module file in a fresh environment and registers it.
///
/// The module gets its own namespace seeded with the builder globals; the
/// previously active environment is restored afterwards, error or not.
///
/// # Errors
/// Returns [`ErrorKind::RuntimeDead`] on a dead runtime, a script error
/// naming the cycle on recursive imports, and otherwise the module's read
/// or evaluation error attributed to its file.
pub fn exec_module(host: &mut ScriptHost, dotted: &str, path: &Path) -> Result<()> {
    if !host.is_running() {
        return Err(Error::runtime_dead(format!(
            "cannot execute {dotted}: runtime is dead"
        )));
    }
    host.begin_loading(dotted)?;
    let result = exec_module_inner(host, dotted, path);
    host.finish_loading(dotted);
    result
}

fn exec_module_inner(host: &mut ScriptHost, dotted: &str, path: &Path) -> Result<()> {
    let file = path.display().to_string();
    let source = fs::read_to_string(path)
        .map_err(|err| Error::script(file.clone(), format!("cannot read module: {err}")))?;

    debug!(module = dotted, file = %file, "executing module");
    let previous = host.active_environment();
    let env = host.push_environment();
    host.set_active_environment(env);
    let result = eval::eval_source(host, &file, &source);
    host.set_active_environment(previous);

    match result {
        Ok(()) => {
            host.register_module(dotted, ModuleStatus::Loaded);
            Ok(())
        }
        // Fatal and already-attributed errors pass through untouched.
        Err(err)
            if matches!(
                err.kind,
                ErrorKind::RuntimeDead(_) | ErrorKind::Internal(_) | ErrorKind::Script { .. }
            ) =>
        {
            Err(err)
        }
        Err(err) => Err(Error::script(file, format!("{err}"))),
    }
}
