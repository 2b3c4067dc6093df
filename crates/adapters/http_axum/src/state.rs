//! Shared application state for axum handlers.

use std::sync::Arc;

use dungeon_app::ports::DungeonRecordRepository;
use dungeon_app::services::dungeon_service::DungeonService;

/// Application state shared across all axum handlers.
///
/// Generic over the record repository to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Dungeon calculation and query service.
    pub dungeon_service: Arc<DungeonService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            dungeon_service: Arc::clone(&self.dungeon_service),
        }
    }
}

impl<R> AppState<R>
where
    R: DungeonRecordRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(dungeon_service: DungeonService<R>) -> Self {
        Self {
            dungeon_service: Arc::new(dungeon_service),
        }
    }
}
