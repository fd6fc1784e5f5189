use std::sync::Arc;

use crate::store::SharedEventStore;

#[derive(Clone)]
pub struct AppState {
    pub events: SharedEventStore,
    pub placeholder_creator_id: Arc<str>,
}

impl AppState {
    pub fn new(events: SharedEventStore, placeholder_creator_id: impl Into<Arc<str>>) -> Self {
        Self {
            events,
            placeholder_creator_id: placeholder_creator_id.into(),
        }
    }
}
