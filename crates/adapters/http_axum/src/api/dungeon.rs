//! JSON REST handlers for dungeon calculations and stored results.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use dungeon_app::ports::DungeonRecordRepository;
use dungeon_domain::error::{DungeonError, ValidationError};
use dungeon_domain::id::RecordId;
use dungeon_domain::record::DungeonRecord;
use dungeon_domain::solver::MinHp;
use dungeon_domain::time::{Timestamp, now, parse_rfc3339};

use crate::error::ApiError;
use crate::state::AppState;

const HEALTH_MESSAGE: &str = "Dungeon Game API is running";
const SUCCESS_MESSAGE: &str = "Success";

/// Request body for the calculate endpoint.
#[derive(Deserialize)]
pub struct CalculateRequest {
    pub dungeon: Vec<Vec<i32>>,
}

/// Response body for the calculate endpoint, on success and on rejection.
#[derive(Serialize)]
pub struct CalculateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "minimumHP")]
    pub minimum_hp: u64,
    pub message: String,
}

/// Possible responses from the calculate endpoint.
pub enum CalculateResponse {
    Ok(Json<CalculateBody>),
    BadRequest(Json<CalculateBody>),
}

impl CalculateResponse {
    fn rejected(reason: impl std::fmt::Display) -> Self {
        Self::BadRequest(Json(CalculateBody {
            id: None,
            minimum_hp: 0,
            message: format!("Error: {reason}"),
        }))
    }
}

impl IntoResponse for CalculateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::BadRequest(json) => (StatusCode::BAD_REQUEST, json).into_response(),
        }
    }
}

/// Optional creation-time window for the list endpoint (RFC 3339).
#[derive(Deserialize)]
pub struct ListQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<DungeonRecord>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<DungeonRecord>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/dungeon/health`
pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// `POST /api/dungeon/calculate`
///
/// Unreadable JSON and malformed grids are both answered with `400` and an
/// `Error: …` message.
pub async fn calculate<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<CalculateResponse, ApiError>
where
    R: DungeonRecordRepository + Send + Sync + 'static,
{
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected calculate request body");
            return Ok(CalculateResponse::rejected(rejection.body_text()));
        }
    };

    match state.dungeon_service.calculate_and_save(req.dungeon).await {
        Ok(record) => Ok(CalculateResponse::Ok(Json(CalculateBody {
            id: Some(record.id),
            minimum_hp: record.minimum_hp.get(),
            message: SUCCESS_MESSAGE.to_string(),
        }))),
        Err(DungeonError::Validation(err)) => Ok(CalculateResponse::rejected(err)),
        Err(err) => Err(err.into()),
    }
}

/// `GET /api/dungeon/results?from=&to=`, newest first.
pub async fn list<R>(
    State(state): State<AppState<R>>,
    Query(params): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    R: DungeonRecordRepository + Send + Sync + 'static,
{
    let service = &state.dungeon_service;
    let records = match (params.from.as_deref(), params.to.as_deref()) {
        (None, None) => service.list_results().await?,
        (from, to) => {
            let from = from
                .map(parse_rfc3339)
                .transpose()
                .map_err(DungeonError::from)?
                .unwrap_or(Timestamp::UNIX_EPOCH);
            let to = to
                .map(parse_rfc3339)
                .transpose()
                .map_err(DungeonError::from)?
                .unwrap_or_else(now);
            service.results_between(from, to).await?
        }
    };
    Ok(ListResponse::Ok(Json(records)))
}

/// `GET /api/dungeon/results/{id}`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: DungeonRecordRepository + Send + Sync + 'static,
{
    let record_id = RecordId::from_str(&id)
        .map_err(|_| ApiError::from(DungeonError::from(ValidationError::InvalidId(id))))?;
    let record = state.dungeon_service.get_result(record_id).await?;
    Ok(GetResponse::Ok(Json(record)))
}

/// `GET /api/dungeon/results/dimensions/{rows}/{columns}`
pub async fn by_dimensions<R>(
    State(state): State<AppState<R>>,
    Path((rows, columns)): Path<(usize, usize)>,
) -> Result<ListResponse, ApiError>
where
    R: DungeonRecordRepository + Send + Sync + 'static,
{
    let records = state
        .dungeon_service
        .results_by_dimensions(rows, columns)
        .await?;
    Ok(ListResponse::Ok(Json(records)))
}

/// `GET /api/dungeon/results/result/{result}`
///
/// No record can hold a result of zero, so that lookup is always empty.
pub async fn by_result<R>(
    State(state): State<AppState<R>>,
    Path(result): Path<u64>,
) -> Result<ListResponse, ApiError>
where
    R: DungeonRecordRepository + Send + Sync + 'static,
{
    let records = match MinHp::new(result) {
        Some(minimum_hp) => {
            state
                .dungeon_service
                .results_by_minimum_hp(minimum_hp)
                .await?
        }
        None => Vec::new(),
    };
    Ok(ListResponse::Ok(Json(records)))
}

/// `GET /api/dungeon/stats/average/{rows}/{columns}`
///
/// Answers `null` when no grid of that size was solved.
pub async fn average<R>(
    State(state): State<AppState<R>>,
    Path((rows, columns)): Path<(usize, usize)>,
) -> Result<Json<Option<f64>>, ApiError>
where
    R: DungeonRecordRepository + Send + Sync + 'static,
{
    let average = state
        .dungeon_service
        .average_minimum_hp(rows, columns)
        .await?;
    Ok(Json(average))
}

/// `GET /api/dungeon/stats/count`
pub async fn count<R>(State(state): State<AppState<R>>) -> Result<Json<u64>, ApiError>
where
    R: DungeonRecordRepository + Send + Sync + 'static,
{
    let count = state.dungeon_service.count_results().await?;
    Ok(Json(count))
}
