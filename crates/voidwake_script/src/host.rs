//! Script interpreter state.
//!
//! The host owns everything that outlives a single evaluation: environments,
//! the module table, the import-hook resolver chain, accumulated content
//! definitions, and the running flag. Evaluation itself lives in
//! [`crate::eval`]; module execution in [`crate::modules`].

use std::collections::HashMap;

use tracing::{info, warn};
use voidwake_model::{Definition, Error, Result};

use crate::builders;
use crate::modules::{ContentResolver, Resolved};
use crate::properties::PropertyTable;
use crate::value::Value;

/// Registered modules live under this prefix so script-visible names can
/// never collide with them.
pub const MODULE_PREFIX: &str = "vcs.";

/// Evaluation depth at which a script is declared runaway and the runtime
/// poisoned.
pub const DEPTH_LIMIT: usize = 64;

/// How a registered module entry was produced.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModuleStatus {
    /// A directory package; importable but contributes no forms.
    Package,
    /// A fully executed module file.
    Loaded,
}

/// One binding scope.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a name, replacing any previous binding.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Looks up a name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }
}

/// The embedded script runtime.
#[derive(Debug)]
pub struct ScriptHost {
    running: bool,
    restart_allowed: bool,
    environments: Vec<Environment>,
    active: usize,
    modules: HashMap<String, ModuleStatus>,
    resolvers: Vec<(u64, ContentResolver)>,
    next_resolver_id: u64,
    loading: Vec<String>,
    properties: PropertyTable,
    definitions: Vec<Definition>,
}

impl ScriptHost {
    /// Creates a running host with one global environment.
    #[must_use]
    pub fn new() -> Self {
        let mut global = Environment::new();
        builders::seed_globals(&mut global);
        Self {
            running: true,
            restart_allowed: true,
            environments: vec![global],
            active: 0,
            modules: HashMap::new(),
            resolvers: Vec::new(),
            next_resolver_id: 0,
            loading: Vec::new(),
            properties: PropertyTable::new(),
            definitions: Vec::new(),
        }
    }

    /// Returns true while the runtime is usable.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Marks the runtime dead. Later evaluations fail until a restart.
    pub fn poison(&mut self, detail: &str) {
        warn!(detail, "script runtime poisoned");
        self.running = false;
    }

    /// Discards all interpreter state and starts fresh.
    ///
    /// The resolver chain is deliberately kept: it belongs to the bridges
    /// that registered it, not to the interpreter state being discarded.
    ///
    /// # Errors
    /// Returns [`voidwake_model::ErrorKind::RuntimeDead`] when restarting is
    /// disabled.
    pub fn restart(&mut self) -> Result<()> {
        if !self.restart_allowed {
            return Err(Error::runtime_dead("restart disabled"));
        }
        info!("restarting script runtime");
        let mut global = Environment::new();
        builders::seed_globals(&mut global);
        self.environments = vec![global];
        self.active = 0;
        self.modules.clear();
        self.loading.clear();
        self.definitions.clear();
        self.running = true;
        Ok(())
    }

    /// Forbids restarting; the next death is final. Used when the embedder
    /// cannot tolerate losing already-executed module state.
    pub fn disable_restart(&mut self) {
        self.restart_allowed = false;
    }

    // ------------------------------------------------------------------
    // Environments
    // ------------------------------------------------------------------

    /// Creates a new environment seeded with the builder globals and returns
    /// its id. Does not activate it.
    pub fn push_environment(&mut self) -> usize {
        let mut env = Environment::new();
        builders::seed_globals(&mut env);
        self.environments.push(env);
        self.environments.len() - 1
    }

    /// The currently active environment id.
    #[must_use]
    pub fn active_environment(&self) -> usize {
        self.active
    }

    /// Switches the active environment.
    pub fn set_active_environment(&mut self, id: usize) {
        debug_assert!(id < self.environments.len());
        self.active = id;
    }

    /// Binds a name in the active environment.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.environments[self.active].bind(name, value);
    }

    /// Looks up a name in the active environment.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.environments[self.active].lookup(name)
    }

    // ------------------------------------------------------------------
    // Import-hook resolver chain
    // ------------------------------------------------------------------

    /// Appends a resolver to the chain and returns its registration id.
    pub fn register_resolver(&mut self, resolver: ContentResolver) -> u64 {
        let id = self.next_resolver_id;
        self.next_resolver_id += 1;
        self.resolvers.push((id, resolver));
        id
    }

    /// Removes one resolver by registration id, leaving the rest of the
    /// chain in order.
    pub fn remove_resolver(&mut self, id: u64) {
        self.resolvers.retain(|(entry, _)| *entry != id);
    }

    /// Number of registered resolvers.
    #[must_use]
    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }

    /// Registration ids in chain order.
    #[must_use]
    pub fn resolver_ids(&self) -> Vec<u64> {
        self.resolvers.iter().map(|(id, _)| *id).collect()
    }

    /// Resolves a dotted module name through the chain; the first resolver
    /// with an answer wins.
    #[must_use]
    pub fn resolve(&self, dotted: &str) -> Resolved {
        for (_, resolver) in &self.resolvers {
            match resolver.resolve(dotted) {
                Resolved::NotFound => {}
                answer => return answer,
            }
        }
        Resolved::NotFound
    }

    // ------------------------------------------------------------------
    // Module table
    // ------------------------------------------------------------------

    /// Returns a module's status, if registered. `dotted` is the plain name
    /// without the [`MODULE_PREFIX`].
    #[must_use]
    pub fn module_status(&self, dotted: &str) -> Option<ModuleStatus> {
        self.modules.get(&format!("{MODULE_PREFIX}{dotted}")).copied()
    }

    /// Registers a module under the private prefix.
    pub fn register_module(&mut self, dotted: &str, status: ModuleStatus) {
        self.modules
            .insert(format!("{MODULE_PREFIX}{dotted}"), status);
    }

    /// Registered module keys, prefix included.
    #[must_use]
    pub fn module_names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    /// Pushes a module onto the loading stack.
    ///
    /// # Errors
    /// Returns a script error naming the cycle if the module is already
    /// loading.
    pub fn begin_loading(&mut self, dotted: &str) -> Result<()> {
        if self.loading.iter().any(|entry| entry == dotted) {
            let cycle: Vec<&str> = self
                .loading
                .iter()
                .skip_while(|entry| *entry != dotted)
                .map(String::as_str)
                .collect();
            return Err(Error::script(
                dotted,
                format!("cyclic import: {} -> {dotted}", cycle.join(" -> ")),
            ));
        }
        self.loading.push(dotted.to_string());
        Ok(())
    }

    /// Pops a module from the loading stack.
    pub fn finish_loading(&mut self, dotted: &str) {
        if let Some(pos) = self.loading.iter().position(|entry| entry == dotted) {
            self.loading.remove(pos);
        }
    }

    // ------------------------------------------------------------------
    // Evaluation support
    // ------------------------------------------------------------------

    /// The indexed property table.
    #[must_use]
    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    /// Appends a finished definition.
    pub fn push_definition(&mut self, definition: Definition) {
        self.definitions.push(definition);
    }

    /// Drains every accumulated definition.
    pub fn take_definitions(&mut self) -> Vec<Definition> {
        std::mem::take(&mut self.definitions)
    }
}

impl Default for ScriptHost {
    fn default() -> Self {
        Self::new()
    }
}
