//! Per-language model registry.
//!
//! Models are built lazily on first request and cached by qualified name
//! for the rest of the run. Each name has its own once-cell: concurrent
//! requests for one interface block on a single construction, requests for
//! different interfaces build in parallel. Failures are cached too, so an
//! interface reports its error once.
//!
//! # Thread Safety
//!
//! The name table sits behind a `parking_lot::Mutex` held only for slot
//! lookup; construction runs outside the lock, so a build may request
//! other models from the same registry.

use std::sync::{Arc, OnceLock};

use apigen_diagnostic::ErrorCode;
use apigen_ir::{DeclGraph, DeclId};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::{build_interface, BuildOptions, BuildOutput, Extensions, ModelError};

type Slot = Arc<OnceLock<Result<Arc<BuildOutput>, ModelError>>>;

/// Default upper bound on cached models per registry.
pub const DEFAULT_REGISTRY_CAPACITY: usize = 4096;

/// Lazily-built, cached interface models for one target language.
pub struct ModelRegistry<'g, G: ?Sized> {
    graph: &'g G,
    extensions: Arc<Extensions>,
    options: BuildOptions,
    capacity: usize,
    slots: Mutex<FxHashMap<String, Slot>>,
}

impl<'g, G: DeclGraph + ?Sized> ModelRegistry<'g, G> {
    pub fn new(graph: &'g G, extensions: Arc<Extensions>, options: BuildOptions) -> Self {
        ModelRegistry {
            graph,
            extensions,
            options,
            capacity: DEFAULT_REGISTRY_CAPACITY,
            slots: Mutex::new(FxHashMap::default()),
        }
    }

    /// Limit the number of distinct interfaces this registry will hold.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn lang(&self) -> &str {
        &self.options.lang
    }

    /// The model of `qualified_name`, building it on first access.
    pub fn get(&self, qualified_name: &str) -> Result<Arc<BuildOutput>, ModelError> {
        self.resolve(qualified_name).map(|(output, _)| output)
    }

    /// Build `qualified_name` unless already built.
    ///
    /// Returns `Ok(true)` when this call performed the construction and
    /// `Ok(false)` when a cached model was found.
    pub fn build(&self, qualified_name: &str) -> Result<bool, ModelError> {
        self.resolve(qualified_name).map(|(_, fresh)| fresh)
    }

    /// Whether a successful model for `qualified_name` is cached.
    pub fn is_built(&self, qualified_name: &str) -> bool {
        self.slots
            .lock()
            .get(qualified_name)
            .is_some_and(|slot| matches!(slot.get(), Some(Ok(_))))
    }

    /// Number of interfaces with a slot (built, failed or in progress).
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    /// Drop every cached model. Outstanding `Arc`s stay valid.
    pub fn clear(&self) {
        self.slots.lock().clear();
    }

    fn resolve(&self, qualified_name: &str) -> Result<(Arc<BuildOutput>, bool), ModelError> {
        let (id, slot) = self.slot(qualified_name)?;
        let mut fresh = false;
        let result = slot.get_or_init(|| {
            fresh = true;
            build_interface(self.graph, id, &self.extensions, &self.options).map(Arc::new)
        });
        match result {
            Ok(output) => Ok((Arc::clone(output), fresh)),
            Err(err) => Err(err.clone()),
        }
    }

    fn slot(&self, qualified_name: &str) -> Result<(DeclId, Slot), ModelError> {
        let id = self.graph.lookup(qualified_name).ok_or_else(|| {
            ModelError::registry(
                ErrorCode::E0601,
                qualified_name,
                format!("unknown interface `{qualified_name}`"),
            )
        })?;

        let mut slots = self.slots.lock();
        if let Some(slot) = slots.get(qualified_name) {
            return Ok((id, Arc::clone(slot)));
        }
        if slots.len() >= self.capacity {
            return Err(ModelError::registry(
                ErrorCode::E0602,
                qualified_name,
                format!(
                    "model registry for `{}` is full ({} models)",
                    self.options.lang, self.capacity
                ),
            ));
        }
        let slot = Slot::default();
        slots.insert(qualified_name.to_owned(), Arc::clone(&slot));
        Ok((id, slot))
    }
}
