//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use dungeon_app::ports::DungeonRecordRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api`, accepts cross-origin requests from any
/// origin, and includes a [`TraceLayer`] that logs each HTTP request/response
/// at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: DungeonRecordRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use dungeon_app::services::dungeon_service::DungeonService;
    use dungeon_domain::error::DungeonError;
    use dungeon_domain::filter::RecordFilter;
    use dungeon_domain::id::RecordId;
    use dungeon_domain::record::DungeonRecord;
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct InMemoryRecordRepo {
        store: Mutex<Vec<DungeonRecord>>,
    }

    impl InMemoryRecordRepo {
        fn matching(&self, filter: &RecordFilter) -> Vec<DungeonRecord> {
            let store = self.store.lock().unwrap();
            store
                .iter()
                .rev()
                .filter(|record| filter.matches(record))
                .cloned()
                .collect()
        }
    }

    impl DungeonRecordRepository for InMemoryRecordRepo {
        async fn save(&self, record: DungeonRecord) -> Result<DungeonRecord, DungeonError> {
            self.store.lock().unwrap().push(record.clone());
            Ok(record)
        }
        async fn get_by_id(&self, id: RecordId) -> Result<Option<DungeonRecord>, DungeonError> {
            Ok(self.matching(&RecordFilter::all()).into_iter().find(|r| r.id == id))
        }
        async fn get_all(&self) -> Result<Vec<DungeonRecord>, DungeonError> {
            Ok(self.matching(&RecordFilter::all()))
        }
        async fn find_by(&self, filter: RecordFilter) -> Result<Vec<DungeonRecord>, DungeonError> {
            Ok(self.matching(&filter))
        }
        async fn average_minimum_hp(
            &self,
            filter: RecordFilter,
        ) -> Result<Option<f64>, DungeonError> {
            let records = self.matching(&filter);
            if records.is_empty() {
                return Ok(None);
            }
            let total: u64 = records.iter().map(|r| r.minimum_hp.get()).sum();
            #[allow(clippy::cast_precision_loss)]
            Ok(Some(total as f64 / records.len() as f64))
        }
        async fn count(&self, filter: RecordFilter) -> Result<u64, DungeonError> {
            Ok(self.matching(&filter).len() as u64)
        }
    }

    struct FailingRepo;

    impl DungeonRecordRepository for FailingRepo {
        async fn save(&self, _record: DungeonRecord) -> Result<DungeonRecord, DungeonError> {
            Err(DungeonError::Storage("disk full".into()))
        }
        async fn get_by_id(&self, _id: RecordId) -> Result<Option<DungeonRecord>, DungeonError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<DungeonRecord>, DungeonError> {
            Ok(vec![])
        }
        async fn find_by(
            &self,
            _filter: RecordFilter,
        ) -> Result<Vec<DungeonRecord>, DungeonError> {
            Ok(vec![])
        }
        async fn average_minimum_hp(
            &self,
            _filter: RecordFilter,
        ) -> Result<Option<f64>, DungeonError> {
            Ok(None)
        }
        async fn count(&self, _filter: RecordFilter) -> Result<u64, DungeonError> {
            Err(DungeonError::Storage("disk full".into()))
        }
    }

    fn app() -> Router {
        build(AppState::new(DungeonService::new(
            InMemoryRecordRepo::default(),
        )))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn should_report_api_health() {
        let response = app()
            .oneshot(get_request("/api/dungeon/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Dungeon Game API is running");
    }

    #[tokio::test]
    async fn should_allow_cross_origin_requests() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/dungeon/health")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn should_answer_cors_preflight() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/dungeon/calculate")
                    .header("origin", "http://example.com")
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .contains_key("access-control-allow-methods")
        );
    }

    #[tokio::test]
    async fn should_calculate_minimum_hp_for_basic_dungeon() {
        let response = app()
            .oneshot(post_json(
                "/api/dungeon/calculate",
                r#"{"dungeon":[[-3,5],[1,-4]]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["minimumHP"], 4);
        assert_eq!(body["message"], "Success");
        assert!(body["id"].is_string());
    }

    #[tokio::test]
    async fn should_calculate_single_cell_dungeons() {
        for (dungeon, expected) in [("[[-5]]", 6), ("[[10]]", 1), ("[[0]]", 1)] {
            let response = app()
                .oneshot(post_json(
                    "/api/dungeon/calculate",
                    &format!(r#"{{"dungeon":{dungeon}}}"#),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await["minimumHP"], expected);
        }
    }

    #[tokio::test]
    async fn should_reject_empty_body_object() {
        let response = app()
            .oneshot(post_json("/api/dungeon/calculate", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["minimumHP"], 0);
        assert!(body["message"].as_str().unwrap().starts_with("Error: "));
    }

    #[tokio::test]
    async fn should_reject_malformed_json() {
        let response = app()
            .oneshot(post_json("/api/dungeon/calculate", "{invalid json}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_reject_empty_and_ragged_grids() {
        for dungeon in ["[]", "[[]]", "[[1,2],[3]]"] {
            let response = app()
                .oneshot(post_json(
                    "/api/dungeon/calculate",
                    &format!(r#"{{"dungeon":{dungeon}}}"#),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{dungeon}");
        }
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_record() {
        let response = app()
            .oneshot(get_request(&format!(
                "/api/dungeon/results/{}",
                RecordId::new()
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_bad_request_for_invalid_record_id() {
        let response = app()
            .oneshot(get_request("/api/dungeon/results/not-a-uuid"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_reject_invalid_time_range() {
        let response = app()
            .oneshot(get_request("/api/dungeon/results?from=yesterday"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_serve_results_and_stats_after_calculation() {
        let app = app();
        for dungeon in ["[[-5]]", "[[10]]", "[[-3,5],[1,-4]]"] {
            app.clone()
                .oneshot(post_json(
                    "/api/dungeon/calculate",
                    &format!(r#"{{"dungeon":{dungeon}}}"#),
                ))
                .await
                .unwrap();
        }

        let count = body_json(
            app.clone()
                .oneshot(get_request("/api/dungeon/stats/count"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(count, 3);

        let average = body_json(
            app.clone()
                .oneshot(get_request("/api/dungeon/stats/average/1/1"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(average, 3.5);

        let missing = body_json(
            app.clone()
                .oneshot(get_request("/api/dungeon/stats/average/5/5"))
                .await
                .unwrap(),
        )
        .await;
        assert!(missing.is_null());

        let by_dimensions = body_json(
            app.clone()
                .oneshot(get_request("/api/dungeon/results/dimensions/2/2"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(by_dimensions.as_array().unwrap().len(), 1);
        assert_eq!(by_dimensions[0]["dungeon"], serde_json::json!([[-3, 5], [1, -4]]));

        let by_result = body_json(
            app.clone()
                .oneshot(get_request("/api/dungeon/results/result/6"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(by_result.as_array().unwrap().len(), 1);

        let zero = body_json(
            app.clone()
                .oneshot(get_request("/api/dungeon/results/result/0"))
                .await
                .unwrap(),
        )
        .await;
        assert!(zero.as_array().unwrap().is_empty());

        let all = body_json(
            app.oneshot(get_request("/api/dungeon/results"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(all.as_array().unwrap().len(), 3);
        assert_eq!(all[0]["rows"], 2);
    }

    #[tokio::test]
    async fn should_map_storage_failure_to_internal_error() {
        let app = build(AppState::new(DungeonService::new(FailingRepo)));

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/dungeon/calculate",
                r#"{"dungeon":[[1]]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = app
            .oneshot(get_request("/api/dungeon/stats/count"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "internal server error");
    }
}
