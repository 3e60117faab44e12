//! Source lookup by (region, category).

use crate::models::{Category, Region};
use crate::sources::SourceAdapter;
use itertools::Itertools;
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered `key -> adapter` tables, one per (region, category).
///
/// Registration order is the default invocation order. Regions need not be
/// symmetric: a key may exist for India and not for Global.
#[derive(Default, Clone)]
pub struct SourceRegistry {
    tables: HashMap<(Region, Category), Vec<Arc<dyn SourceAdapter>>>,
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("tables", &self.tables.len())
            .field("sources", &self.len())
            .finish()
    }
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `adapter` under its descriptor key. Registering a key twice
    /// replaces the earlier adapter in place.
    pub fn register(
        &mut self,
        region: Region,
        category: Category,
        adapter: Arc<dyn SourceAdapter>,
    ) -> &mut Self {
        let table = self.tables.entry((region, category)).or_default();
        match table.iter_mut().find(|a| a.key() == adapter.key()) {
            Some(slot) => *slot = adapter,
            None => table.push(adapter),
        }
        self
    }

    /// Adapters to run for one request.
    ///
    /// An empty `requested` selects every adapter in registration order.
    /// Otherwise the requested keys are returned in the order given, with
    /// duplicates removed and unknown keys ignored.
    pub fn resolve(
        &self,
        region: Region,
        category: Category,
        requested: &[String],
    ) -> Vec<Arc<dyn SourceAdapter>> {
        let Some(table) = self.tables.get(&(region, category)) else {
            return Vec::new();
        };
        if requested.is_empty() {
            return table.clone();
        }
        requested
            .iter()
            .map(|k| k.trim())
            .unique()
            .filter_map(|key| table.iter().find(|a| a.key() == key).cloned())
            .collect()
    }

    /// Registered keys, in registration order.
    pub fn names(&self, region: Region, category: Category) -> Vec<&str> {
        self.tables
            .get(&(region, category))
            .map(|t| t.iter().map(|a| a.key()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
