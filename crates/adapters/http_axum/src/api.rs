//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod dungeon;

use axum::Router;
use axum::routing::{get, post};

use dungeon_app::ports::DungeonRecordRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: DungeonRecordRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/dungeon/health", get(dungeon::health))
        .route("/dungeon/calculate", post(dungeon::calculate::<R>))
        // Results
        .route("/dungeon/results", get(dungeon::list::<R>))
        .route("/dungeon/results/{id}", get(dungeon::get::<R>))
        .route(
            "/dungeon/results/dimensions/{rows}/{columns}",
            get(dungeon::by_dimensions::<R>),
        )
        .route(
            "/dungeon/results/result/{result}",
            get(dungeon::by_result::<R>),
        )
        // Stats
        .route(
            "/dungeon/stats/average/{rows}/{columns}",
            get(dungeon::average::<R>),
        )
        .route("/dungeon/stats/count", get(dungeon::count::<R>))
}
