use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use models::{CreateDraftRequest, Draft, DraftUpdate, UpdateDraftRequest};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Header carrying the owner id.
pub const PEOPLE_HEADER: &str = "X-People";

/// Owner id from `X-People`; `None` when absent or not a base-10 integer.
pub fn people_id(headers: &HeaderMap) -> Option<i64> {
    headers
        .get(PEOPLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
}

fn require_people(headers: &HeaderMap) -> Result<i64, JsonApiError> {
    people_id(headers).ok_or_else(JsonApiError::bad_request)
}

fn context_param(path: Result<Path<String>, PathRejection>) -> Result<String, JsonApiError> {
    path.map(|Path(context)| context).map_err(|e| {
        debug!(error = %e, "rejecting draft path");
        JsonApiError::bad_request()
    })
}

// Bodies are parsed regardless of Content-Type.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, JsonApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejecting draft body");
        JsonApiError::bad_request()
    })
}

/// GET /api/front/drafts
pub async fn list(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Draft>>, JsonApiError> {
    let id = people_id(&headers).ok_or_else(JsonApiError::precondition_failed)?;
    let drafts = state.drafts.list(id).await?;
    Ok(Json(drafts))
}

/// POST /api/front/drafts
pub async fn create(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, JsonApiError> {
    let id = require_people(&headers)?;
    let input: CreateDraftRequest = parse_body(&body)?;
    input.validate().map_err(|e| {
        debug!(error = %e, "rejecting draft body");
        JsonApiError::bad_request()
    })?;

    let draft = Draft::new(id, input, Utc::now());
    state.drafts.create(draft.clone()).await?;
    info!(people_id = id, context = %draft.context, "created draft");
    Ok((StatusCode::CREATED, Json(draft)))
}

/// GET /api/front/drafts/:context
pub async fn get(
    State(state): State<ServerState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Draft>, JsonApiError> {
    let id = require_people(&headers)?;
    let context = context_param(path)?;
    let draft = state.drafts.get(id, &context).await?;
    Ok(Json(draft))
}

/// PUT /api/front/drafts/:context
pub async fn update(
    State(state): State<ServerState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<Draft>, JsonApiError> {
    let id = require_people(&headers)?;
    let context = context_param(path)?;
    let input: UpdateDraftRequest = parse_body(&body)?;

    let updated = state.drafts.update(DraftUpdate::new(id, context, input)).await?;
    info!(people_id = id, context = %updated.context, "updated draft");
    Ok(Json(updated))
}

/// DELETE /api/front/drafts/:context
pub async fn delete(
    State(state): State<ServerState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let id = require_people(&headers)?;
    let context = context_param(path)?;
    state.drafts.delete(id, &context).await?;
    info!(people_id = id, context = %context, "deleted draft");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(v: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(PEOPLE_HEADER, HeaderValue::from_str(v).unwrap());
        h
    }

    #[test]
    fn people_id_parses_signed_integers() {
        assert_eq!(people_id(&headers("42")), Some(42));
        assert_eq!(people_id(&headers("-3")), Some(-3));
        assert_eq!(people_id(&headers("+8")), Some(8));
    }

    #[test]
    fn people_id_rejects_missing_or_garbage() {
        assert_eq!(people_id(&HeaderMap::new()), None);
        assert_eq!(people_id(&headers("abc")), None);
        assert_eq!(people_id(&headers(" 42")), None);
        assert_eq!(people_id(&headers("4.2")), None);
        assert_eq!(people_id(&headers("")), None);
    }
}
