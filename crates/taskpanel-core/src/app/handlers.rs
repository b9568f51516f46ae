//! API handlers - HTTP と TaskStore の薄いアダプタ
//!
//! 本文は Content-Type に関わらず JSON として読む。
//! 読めなければ 400、store には触れない。

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ApiError;
use super::state::AppState;
use crate::domain::Task;
use crate::ports::MutationReport;

/// 変更系ルートの応答本文
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

impl StatusBody {
    const ADDED: Self = Self { status: "added" };
    const UPDATED: Self = Self { status: "updated" };
    const DELETED: Self = Self { status: "deleted" };
}

/// GET /api/tasks
pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.store.list().await)
}

/// POST /api/tasks - 一覧を丸ごと置き換える
pub async fn replace_tasks(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StatusBody>, ApiError> {
    // `null` は空の一覧として扱う
    let tasks: Option<Vec<Task>> = parse_body(&body)?;
    let tasks = tasks.unwrap_or_default();
    tasks.iter().for_each(note_schedule);

    let report = state.store.replace_all(tasks).await;
    log_report(&report, None);
    Ok(Json(StatusBody::UPDATED))
}

/// POST /api/tasks/add
pub async fn add_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StatusBody>, ApiError> {
    let task: Task = parse_body(&body)?;
    note_schedule(&task);

    let report = state.store.add(task).await;
    log_report(&report, None);
    Ok(Json(StatusBody::ADDED))
}

/// PUT /api/tasks/{id} - 見つからなくても成功を返す
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<StatusBody>, ApiError> {
    update_by_id(&state, &id, &body).await
}

/// DELETE /api/tasks/{id} - 見つからなくても成功を返す
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<StatusBody> {
    delete_by_id(&state, &id).await
}

/// PUT /api/tasks/add - 静的ルートに隠れる id `add` 宛ての更新
pub async fn update_task_named_add(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StatusBody>, ApiError> {
    update_by_id(&state, ADD_SEGMENT, &body).await
}

/// DELETE /api/tasks/add - 静的ルートに隠れる id `add` 宛ての削除
pub async fn delete_task_named_add(State(state): State<AppState>) -> Json<StatusBody> {
    delete_by_id(&state, ADD_SEGMENT).await
}

/// `/api/tasks/add` の固定セグメント
pub const ADD_SEGMENT: &str = "add";

async fn update_by_id(
    state: &AppState,
    id: &str,
    body: &[u8],
) -> Result<Json<StatusBody>, ApiError> {
    let task: Task = parse_body(body)?;
    note_schedule(&task);

    let report = state.store.update(id, task).await;
    log_report(&report, Some(id));
    Ok(Json(StatusBody::UPDATED))
}

async fn delete_by_id(state: &AppState, id: &str) -> Json<StatusBody> {
    let report = state.store.delete(id).await;
    log_report(&report, Some(id));
    Json(StatusBody::DELETED)
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// 保存の失敗は応答を変えずにログだけ残す
fn log_report(report: &MutationReport, id: Option<&str>) {
    if let Err(e) = &report.saved {
        warn!(
            mutation = ?report.mutation,
            error = %e,
            "tasks changed in memory but were not persisted"
        );
    }
    if let Some(id) = id
        && report.is_noop()
    {
        debug!(mutation = ?report.mutation, id, "no task matched");
    }
}

fn note_schedule(task: &Task) {
    if task.schedule_time().is_none() {
        debug!(id = %task.id, schedule = %task.schedule, "schedule is not HH:MM, storing as-is");
    }
}
