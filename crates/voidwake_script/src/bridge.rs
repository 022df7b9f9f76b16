//! Scoped front-end handle onto a shared script host.
//!
//! A bridge scopes one loading session: on construction it registers a
//! resolver for its content root and switches the host into a fresh isolated
//! environment; on drop it reverses both, removing exactly its own resolver
//! entry and leaving the rest of the chain in order. Bridges nest LIFO.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use tracing::{error, info, warn};
use voidwake_model::{Definition, Result};

use crate::host::ScriptHost;
use crate::modules::{self, ContentResolver};

/// A loading session against a shared [`ScriptHost`].
#[derive(Debug)]
pub struct ScriptBridge {
    host: Rc<RefCell<ScriptHost>>,
    previous_env: usize,
    resolver_id: u64,
}

impl ScriptBridge {
    /// Opens a session: registers a resolver for `root` and switches the
    /// host into a fresh environment.
    pub fn new(host: Rc<RefCell<ScriptHost>>, root: impl AsRef<Path>) -> Self {
        let (previous_env, resolver_id) = {
            let mut host = host.borrow_mut();
            let resolver_id = host.register_resolver(ContentResolver::new(root.as_ref()));
            let previous_env = host.active_environment();
            let env = host.push_environment();
            host.set_active_environment(env);
            (previous_env, resolver_id)
        };
        Self {
            host,
            previous_env,
            resolver_id,
        }
    }

    /// The shared host.
    #[must_use]
    pub fn host(&self) -> &Rc<RefCell<ScriptHost>> {
        &self.host
    }

    /// Imports a dotted module name through this session's host.
    ///
    /// A dead runtime is restarted once before the import; if the restart
    /// itself fails, or the runtime dies again during execution, the fatal
    /// error is returned as-is.
    ///
    /// # Errors
    /// Returns the module's resolution or execution error.
    pub fn load_module(&self, dotted: &str) -> Result<()> {
        let mut host = self.host.borrow_mut();
        if !host.is_running() {
            warn!(module = dotted, "runtime dead before import, restarting");
            match host.restart() {
                Ok(()) => info!("script runtime restarted"),
                Err(err) => {
                    error!(module = dotted, "script runtime restart failed");
                    return Err(err);
                }
            }
        }
        modules::import(&mut host, dotted)
    }

    /// Drains the definitions accumulated so far.
    #[must_use]
    pub fn take_definitions(&self) -> Vec<Definition> {
        self.host.borrow_mut().take_definitions()
    }
}

impl Drop for ScriptBridge {
    fn drop(&mut self) {
        let mut host = self.host.borrow_mut();
        host.set_active_environment(self.previous_env);
        host.remove_resolver(self.resolver_id);
    }
}
