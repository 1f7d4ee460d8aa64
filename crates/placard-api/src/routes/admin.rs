//! # Regulatory Change Review Console
//!
//! `POST /v1/admin/changes` is a single dispatch endpoint driven by an
//! `action` field, mirroring the console UI: one screen, seven buttons.
//!
//! | Action      | Effect                                                  |
//! |-------------|---------------------------------------------------------|
//! | `stats`     | Dashboard counters                                      |
//! | `list`      | Changes in one editorial state (default pending_review) |
//! | `publish`   | Make a change live, stamping the reviewer               |
//! | `reject`    | Decline a change, stamping the reviewer                 |
//! | `unpublish` | Pull a live change back to pending_review               |
//! | `edit`      | Field-masked update of title, summary, action items     |
//! | `create`    | Manually enter a change                                 |
//!
//! Every action requires an account in the configured admin domain;
//! outsiders get 403 even with a valid token.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use placard_alerts::{ImpactLevel, SourceScope};

use crate::auth::{require_admin_domain, OperatorIdentity};
use crate::changes::{ChangeStatus, RegulatoryChange};
use crate::error::AppError;
use crate::state::AppState;

/// Fields the `edit` action may touch. Everything else in the update
/// payload is silently dropped.
const EDITABLE_FIELDS: [&str; 3] = ["title", "summary", "action_items"];

/// Default and ceiling for the `list` action.
const DEFAULT_LIST_LIMIT: usize = 100;

/// Hard cap on `list` responses.
pub const MAX_LIST_LIMIT: usize = 1000;

/// Dispatch request body.
#[derive(Debug, Deserialize)]
pub struct AdminRequest {
    /// Which console action to perform.
    pub action: String,
    /// Target change, for publish / reject / unpublish / edit.
    pub id: Option<Uuid>,
    /// Status filter, for list.
    pub status: Option<String>,
    /// Maximum rows to return, for list. Capped at [`MAX_LIST_LIMIT`].
    pub limit: Option<usize>,
    /// Field-masked updates, for edit.
    pub updates: Option<Map<String, Value>>,
    /// New change payload, for create.
    pub change: Option<CreateChange>,
}

/// Payload for the `create` action.
///
/// Title and summary are required; everything else has a sensible
/// default. A status of `published` must be asked for explicitly.
#[derive(Debug, Deserialize)]
pub struct CreateChange {
    /// Plain-language title.
    pub title: Option<String>,
    /// Plain-language summary.
    pub summary: Option<String>,
    /// Targeting scope; defaults to federal.
    pub scope: Option<SourceScope>,
    /// Citation detail.
    pub source_detail: Option<String>,
    /// Urgency; defaults to awareness.
    pub impact_level: Option<ImpactLevel>,
    /// Initial editorial state; defaults to pending_review.
    pub status: Option<String>,
    /// When the change takes effect.
    pub effective_date: Option<chrono::NaiveDate>,
    /// Concrete steps for the operator.
    pub action_items: Option<Vec<String>>,
    /// Compliance areas touched.
    pub affected_areas: Option<Vec<String>>,
}

/// Response for the `list` action.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Matching changes, newest first.
    pub changes: Vec<RegulatoryChange>,
}

/// Build the admin console router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/admin/changes", post(dispatch))
}

/// `POST /v1/admin/changes` — the console dispatch endpoint.
async fn dispatch(
    State(state): State<AppState>,
    identity: OperatorIdentity,
    Json(request): Json<AdminRequest>,
) -> Result<Response, AppError> {
    require_admin_domain(&identity, &state.config.admin_domain)?;

    match request.action.as_str() {
        "stats" => stats(&state).await,
        "list" => list(&state, request.status.as_deref(), request.limit).await,
        "publish" => publish(&state, &identity, require_id(&request)?).await,
        "reject" => reject(&state, &identity, require_id(&request)?).await,
        "unpublish" => unpublish(&state, require_id(&request)?).await,
        "edit" => edit(&state, require_id(&request)?, request.updates.as_ref()).await,
        "create" => create(&state, &identity, request.change).await,
        other => Err(AppError::BadRequest(format!("unknown action '{other}'"))),
    }
}

fn require_id(request: &AdminRequest) -> Result<Uuid, AppError> {
    request.id.ok_or_else(|| {
        AppError::BadRequest(format!("action '{}' requires an id", request.action))
    })
}

async fn fetch(state: &AppState, id: Uuid) -> Result<RegulatoryChange, AppError> {
    state
        .changes
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("regulatory change {id}")))
}

async fn stats(state: &AppState) -> Result<Response, AppError> {
    let stats = state.changes.stats(Utc::now()).await?;
    Ok(Json(stats).into_response())
}

async fn list(
    state: &AppState,
    filter: Option<&str>,
    limit: Option<usize>,
) -> Result<Response, AppError> {
    let status = match filter {
        None => ChangeStatus::PendingReview,
        Some(raw) => ChangeStatus::parse(raw).ok_or_else(|| {
            AppError::BadRequest(format!(
                "invalid status filter '{raw}'. Valid filters: pending_review, published, rejected"
            ))
        })?,
    };
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
    let mut changes = state.changes.list_by_status(status).await?;
    changes.truncate(limit);
    Ok(Json(ListResponse { changes }).into_response())
}

async fn publish(
    state: &AppState,
    identity: &OperatorIdentity,
    id: Uuid,
) -> Result<Response, AppError> {
    let mut change = fetch(state, id).await?;
    let now = Utc::now();
    change.status = ChangeStatus::Published;
    change.reviewed_by = Some(identity.email.clone());
    change.reviewed_at = Some(now);
    change.published_at = Some(now);
    state.changes.update(&change).await?;
    tracing::info!(id = %id, editor = %identity.email, "regulatory change published");
    Ok(Json(change).into_response())
}

async fn reject(
    state: &AppState,
    identity: &OperatorIdentity,
    id: Uuid,
) -> Result<Response, AppError> {
    let mut change = fetch(state, id).await?;
    change.status = ChangeStatus::Rejected;
    change.reviewed_by = Some(identity.email.clone());
    change.reviewed_at = Some(Utc::now());
    state.changes.update(&change).await?;
    tracing::info!(id = %id, editor = %identity.email, "regulatory change rejected");
    Ok(Json(change).into_response())
}

async fn unpublish(state: &AppState, id: Uuid) -> Result<Response, AppError> {
    let mut change = fetch(state, id).await?;
    change.status = ChangeStatus::PendingReview;
    change.published_at = None;
    state.changes.update(&change).await?;
    tracing::info!(id = %id, "regulatory change unpublished");
    Ok(Json(change).into_response())
}

async fn edit(
    state: &AppState,
    id: Uuid,
    updates: Option<&Map<String, Value>>,
) -> Result<Response, AppError> {
    let updates =
        updates.ok_or_else(|| AppError::BadRequest("action 'edit' requires updates".into()))?;

    let mut change = fetch(state, id).await?;
    let mut applied = 0usize;

    for (field, value) in updates {
        match field.as_str() {
            "title" => {
                change.title = as_string(field, value)?;
                applied += 1;
            }
            "summary" => {
                change.summary = as_string(field, value)?;
                applied += 1;
            }
            "action_items" => {
                change.action_items = as_string_list(field, value)?;
                applied += 1;
            }
            other => {
                // Field mask: unknown fields are dropped, not errors.
                tracing::debug!(field = %other, "ignoring non-editable field in edit payload");
            }
        }
    }

    if applied == 0 {
        return Err(AppError::BadRequest(format!(
            "no editable fields in updates. Editable fields: {}",
            EDITABLE_FIELDS.join(", ")
        )));
    }

    state.changes.update(&change).await?;
    Ok(Json(change).into_response())
}

async fn create(
    state: &AppState,
    identity: &OperatorIdentity,
    payload: Option<CreateChange>,
) -> Result<Response, AppError> {
    let payload =
        payload.ok_or_else(|| AppError::BadRequest("action 'create' requires a change".into()))?;

    let title = non_empty(payload.title, "title")?;
    let summary = non_empty(payload.summary, "summary")?;

    let status = match payload.status.as_deref() {
        None => ChangeStatus::PendingReview,
        Some(raw) => ChangeStatus::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("invalid status '{raw}'")))?,
    };

    let now = Utc::now();
    let mut change = RegulatoryChange {
        id: Uuid::new_v4(),
        title,
        summary,
        scope: payload.scope.unwrap_or(SourceScope::Federal),
        source_detail: payload.source_detail.unwrap_or_default(),
        impact_level: payload.impact_level.unwrap_or(ImpactLevel::Awareness),
        status,
        effective_date: payload.effective_date,
        action_items: payload.action_items.unwrap_or_default(),
        affected_areas: payload.affected_areas.unwrap_or_default(),
        created_at: now,
        reviewed_by: None,
        reviewed_at: None,
        published_at: None,
    };

    // Publishing on create is still a reviewed act.
    if change.status == ChangeStatus::Published {
        change.reviewed_by = Some(identity.email.clone());
        change.reviewed_at = Some(now);
        change.published_at = Some(now);
    }

    state.changes.insert(&change).await?;
    Ok(Json(change).into_response())
}

fn non_empty(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!(
            "action 'create' requires a non-empty {field}"
        ))),
    }
}

fn as_string(field: &str, value: &Value) -> Result<String, AppError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest(format!("field '{field}' must be a string")))
}

fn as_string_list(field: &str, value: &Value) -> Result<Vec<String>, AppError> {
    let items = value
        .as_array()
        .ok_or_else(|| AppError::BadRequest(format!("field '{field}' must be an array")))?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                AppError::BadRequest(format!("field '{field}' must contain only strings"))
            })
        })
        .collect()
}
