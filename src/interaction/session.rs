//! Scoped pointer subscriptions for running gestures.
//!
//! A drag or resize needs pointer move/up events from the whole surface, not
//! just from the node it started on. Instead of attaching global handlers,
//! a gesture takes a [`ListenerGuard`] from the canvas's
//! [`PointerListeners`] when it starts; the subscription lives exactly as
//! long as the guard.

use super::controller::{GestureOutcome, NodeInteraction};
use crate::types::TableId;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: BTreeMap<u64, TableId>,
}

/// Registry of surface-wide move/up subscriptions.
#[derive(Debug, Clone, Default)]
pub struct PointerListeners {
    inner: Arc<Mutex<Registry>>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, owner: TableId) -> ListenerGuard {
        let mut registry = self.inner.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.active.insert(id, owner);
        trace!(listener = id, table = %owner, "pointer listeners attached");
        ListenerGuard {
            id,
            registry: Arc::clone(&self.inner),
        }
    }

    /// Number of live subscriptions. Zero whenever no gesture is running.
    pub fn active_count(&self) -> usize {
        self.inner.lock().active.len()
    }

    pub fn owners(&self) -> Vec<TableId> {
        self.inner.lock().active.values().copied().collect()
    }
}

/// Releases its subscription on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    registry: Arc<Mutex<Registry>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if self.registry.lock().active.remove(&self.id).is_some() {
            trace!(listener = self.id, "pointer listeners detached");
        }
    }
}

/// A drag or resize in progress on one table.
#[derive(Debug)]
pub struct GestureSession {
    table_id: TableId,
    interaction: NodeInteraction,
    _listener: ListenerGuard,
}

impl GestureSession {
    /// Wrap an interaction that has already begun.
    pub fn start(
        listeners: &PointerListeners,
        table_id: TableId,
        interaction: NodeInteraction,
    ) -> Self {
        debug_assert!(interaction.state().is_active());
        Self {
            table_id,
            interaction,
            _listener: listeners.subscribe(table_id),
        }
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn interaction(&self) -> &NodeInteraction {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut NodeInteraction {
        &mut self.interaction
    }

    /// End the gesture and release the subscription.
    pub fn finish(mut self) -> Option<GestureOutcome> {
        self.interaction.finish()
    }
}
