//! Route handlers for the phonebook API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Local;

use crate::config::StorageBackend;
use crate::contacts::{NewPerson, Person, PersonPayload};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Status returned by a successful create.
fn created_status(backend: StorageBackend) -> StatusCode {
    match backend {
        StorageBackend::Memory => StatusCode::OK,
        StorageBackend::Mongo => StatusCode::CREATED,
    }
}

/// Unreadable or non-JSON bodies count as bodies without the required keys.
fn payload_or_empty(payload: Result<Json<PersonPayload>, JsonRejection>) -> PersonPayload {
    match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Request body is not a person object");
            PersonPayload::default()
        }
    }
}

/// Human-readable server time, e.g. `Sat Oct 18 2026 21:04:05 GMT+0200`.
fn server_time() -> String {
    Local::now().format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}

pub async fn info(State(state): State<AppState>) -> Html<String> {
    let now = server_time();
    match state.store.count().await {
        Ok(count) => Html(format!(
            "<h2>Phonebook has info for {} people</h2>\n<h2>{}</h2>\n",
            count, now
        )),
        Err(e) => {
            tracing::warn!(error = %e, "Info page served without a record count");
            Html(format!("<h2>database won't respond</h2>\n<h2>{}</h2>\n", now))
        }
    }
}

pub async fn list_persons(State(state): State<AppState>) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Person>, ApiError> {
    state
        .store
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn create_person(
    State(state): State<AppState>,
    payload: Result<Json<PersonPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let person = NewPerson::try_from(payload_or_empty(payload))?;
    let created = state.store.insert(person).await?;

    tracing::info!(id = %created.id, "Person created");
    Ok((created_status(state.store.backend()), Json(created)).into_response())
}

pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PersonPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = payload_or_empty(payload);

    // The in-memory backend accepts and discards updates.
    if state.store.backend() == StorageBackend::Memory {
        tracing::info!(
            id = %id,
            body = %serde_json::to_string(&payload).unwrap_or_default(),
            "Update ignored by in-memory backend"
        );
        return Ok(StatusCode::CREATED.into_response());
    }

    let person = NewPerson::try_from(payload)?;
    match state.store.update_by_id(&id, person).await? {
        Some(updated) => {
            tracing::info!(id = %updated.id, "Person updated");
            Ok(Json(updated).into_response())
        }
        None => Err(ApiError::UpdateTargetMissing),
    }
}

pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_by_id(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}
