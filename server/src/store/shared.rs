use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::OnceCell;

use super::{EventStore, SeedPolicy, SnapshotStorage, StoreError};

/// Cloneable handle to the one event store of the process.
///
/// The store only exists once [`SharedEventStore::hydrate`] has completed;
/// until then every access fails with [`StoreError::NotHydrated`].
#[derive(Clone, Default)]
pub struct SharedEventStore {
    cell: Arc<OnceCell<Mutex<EventStore>>>,
}

impl SharedEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the persisted collection exactly once. Returns `false` when the
    /// store was already hydrated, in which case `storage` is dropped unused.
    pub async fn hydrate(&self, storage: Box<dyn SnapshotStorage>, policy: SeedPolicy) -> bool {
        let mut hydrated_here = false;
        self.cell
            .get_or_init(|| {
                hydrated_here = true;
                async move { Mutex::new(EventStore::hydrate(storage, policy)) }
            })
            .await;
        hydrated_here
    }

    pub fn is_hydrated(&self) -> bool {
        self.cell.initialized()
    }

    /// Exclusive access to the store for the duration of one operation.
    pub fn ready(&self) -> Result<MutexGuard<'_, EventStore>, StoreError> {
        let store = self.cell.get().ok_or(StoreError::NotHydrated)?;
        store.lock().map_err(|_| {
            tracing::error!("event store lock poisoned");
            StoreError::Unavailable
        })
    }
}
