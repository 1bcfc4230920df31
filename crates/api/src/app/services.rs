use std::sync::Arc;

use almacen_auth::{InMemorySessionStore, SessionStore, UserDirectory};
use almacen_service::InventoryService;
use almacen_store::InMemoryStore;

/// Everything the handlers need, injected as one `Extension<Arc<_>>`.
pub struct AppServices {
    pub inventory: InventoryService<InMemoryStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub directory: UserDirectory,
}

pub fn build_services(directory: UserDirectory) -> AppServices {
    AppServices {
        inventory: InventoryService::new(InMemoryStore::new()),
        sessions: Arc::new(InMemorySessionStore::new()),
        directory,
    }
}
