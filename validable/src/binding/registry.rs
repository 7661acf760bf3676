//! Named binding handlers.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use formdom::{Document, NodeId};

use super::handler::{Bindable, BindingHandler, ValidateHandler};
use crate::error::BindError;

/// Name the error label binding is registered under.
pub const VALIDATE: &str = "validate";

static GLOBAL: LazyLock<BindingRegistry> = LazyLock::new(BindingRegistry::new);

/// A table of binding handlers by name.
///
/// Cheap to clone; clones share the same table. Use [`BindingRegistry::global`]
/// for the process-wide table, or create independent registries (in tests,
/// or to host several independent views).
#[derive(Clone, Default)]
pub struct BindingRegistry {
    handlers: Arc<RwLock<HashMap<String, Arc<dyn BindingHandler>>>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static BindingRegistry {
        &GLOBAL
    }

    /// Register `handler` as `name`, replacing any previous handler.
    pub fn register(
        &self,
        name: impl Into<String>,
        handler: impl BindingHandler + 'static,
    ) -> Registration {
        let name = name.into();
        let handler: Arc<dyn BindingHandler> = Arc::new(handler);
        let replaced = self
            .handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(name.clone(), Arc::clone(&handler))
            .is_some();

        if replaced {
            log::debug!("[binding] handler '{name}' replaced");
        } else {
            log::debug!("[binding] handler '{name}' registered");
        }

        Registration {
            registry: self.clone(),
            name,
            handler,
        }
    }

    pub fn handler(&self, name: &str) -> Option<Arc<dyn BindingHandler>> {
        self.handlers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handler(name).is_some()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .handlers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Run the handler registered as `name` on `element`.
    pub fn bind(
        &self,
        name: &str,
        document: &Document,
        element: NodeId,
        value: &dyn Bindable,
    ) -> Result<(), BindError> {
        let handler = self
            .handler(name)
            .ok_or_else(|| BindError::UnknownHandler(name.to_string()))?;
        handler.init(document, element, value)
    }
}

impl std::fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

/// Handle to a registered handler.
///
/// Dropping the handle keeps the handler registered; call
/// [`unregister`](Self::unregister) to remove it.
pub struct Registration {
    registry: BindingRegistry,
    name: String,
    handler: Arc<dyn BindingHandler>,
}

impl Registration {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remove the handler, unless it has been replaced since. Returns whether
    /// anything was removed.
    pub fn unregister(self) -> bool {
        let mut handlers = self
            .registry
            .handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let current = handlers
            .get(&self.name)
            .is_some_and(|handler| Arc::ptr_eq(handler, &self.handler));
        if current {
            handlers.remove(&self.name);
            log::debug!("[binding] handler '{}' unregistered", self.name);
        }
        current
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .finish()
    }
}

/// Install the `validate` binding in the process-wide registry.
pub fn register() -> Registration {
    register_in(BindingRegistry::global())
}

/// Install the `validate` binding in `registry`.
pub fn register_in(registry: &BindingRegistry) -> Registration {
    registry.register(VALIDATE, ValidateHandler::default())
}
