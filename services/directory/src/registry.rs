//! Custom endpoint registry.
//!
//! Embedders may bind names to value-producing closures at any point; a
//! registered name always wins over a discovered group of the same name and
//! is served as plain text, bypassing discovery entirely. A failing producer
//! degrades only the query that invoked it.

use std::collections::BTreeMap;
use std::sync::RwLock;

type Producer = Box<dyn Fn() -> anyhow::Result<String> + Send + Sync>;

/// Name-keyed registry of custom endpoint producers.
///
/// Producers are synchronous and never invoked while the lock is held
/// across an await point, so a std lock is enough here.
#[derive(Default)]
pub struct CustomEndpointRegistry {
    producers: RwLock<BTreeMap<String, Producer>>,
}

impl CustomEndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name to a producer, replacing any previous binding.
    pub fn register<F>(&self, name: impl Into<String>, producer: F)
    where
        F: Fn() -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.producers
            .write()
            .expect("custom endpoint registry lock poisoned")
            .insert(name.into(), Box::new(producer));
    }

    /// Invoke the producer bound to `name`, if any.
    pub fn produce(&self, name: &str) -> Option<anyhow::Result<String>> {
        let producers = self
            .producers
            .read()
            .expect("custom endpoint registry lock poisoned");
        producers.get(name).map(|producer| producer())
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.producers
            .read()
            .expect("custom endpoint registry lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}
