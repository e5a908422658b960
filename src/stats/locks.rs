use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use super::model::ResourceId;

/// One mutex per resource id, so refreshes of the same resource never
/// interleave within a process.
#[derive(Debug, Default)]
pub struct ResourceLocks {
    locks: Mutex<HashMap<ResourceId, Arc<Mutex<()>>>>,
}

impl ResourceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock_for(&self, resource: ResourceId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(resource).or_default())
    }

    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
