//! HTTP façade over the event store.
//!
//! `GET /events` and `POST /events` keep the bare JSON bodies the browser
//! client already understands. The per-event routes use the standard
//! envelope from `utils::response` and report failures through `AppError`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{error, warn};

use crate::models::{Event, EventDraft};
use crate::state::AppState;
use crate::store::StoreError;
use crate::utils::response::{bare_success, empty_success, plain_error, success};
use crate::utils::AppError;

const MISSING_FIELDS: &str = "Missing required fields";
const INVALID_FIELDS: &str = "Invalid event fields";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Deserialize)]
pub struct ListEventsParams {
    #[serde(rename = "creatorId")]
    pub creator_id: Option<String>,
}

/// Every field optional so absence can be answered with 400 rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateEventBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
}

impl CreateEventBody {
    fn into_draft(self) -> Option<EventDraft> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Some(EventDraft {
            title: present(self.title)?,
            description: present(self.description)?,
            date: present(self.date)?,
            location: present(self.location)?,
            category: present(self.category)?,
        })
    }
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsParams>,
) -> Response {
    let store = match state.events.ready() {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "failed to list events");
            return plain_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR, None);
        }
    };

    let events: Vec<Event> = match params.creator_id {
        Some(creator_id) => store.get_by_creator(&creator_id).into_iter().cloned().collect(),
        None => store.list().to_vec(),
    };

    (StatusCode::OK, Json(events)).into_response()
}

pub async fn create_event(
    State(state): State<AppState>,
    body: Result<Json<CreateEventBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable event body");
            return plain_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR, None);
        }
    };

    let Some(draft) = body.into_draft() else {
        return plain_error(StatusCode::BAD_REQUEST, MISSING_FIELDS, None);
    };

    let result = state
        .events
        .ready()
        .and_then(|mut store| store.create(&draft, &state.placeholder_creator_id));

    match result {
        Ok(_) => bare_success(StatusCode::CREATED),
        Err(StoreError::Validation(v)) => {
            plain_error(StatusCode::BAD_REQUEST, INVALID_FIELDS, Some(v.fields))
        }
        Err(e) => {
            error!(error = %e, "failed to create event");
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR, None)
        }
    }
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let store = state.events.ready()?;
    let event = store
        .get_by_id(&id)
        .cloned()
        .ok_or_else(|| StoreError::NotFound(id))?;

    Ok(success(event, "Event retrieved").into_response())
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<EventDraft>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(draft) = body.map_err(|rejection| AppError::ValidationError {
        message: rejection.body_text(),
        fields: Vec::new(),
    })?;
    let event = state.events.ready()?.update(&id, &draft)?;
    Ok(success(event, "Event updated").into_response())
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let removed = state.events.ready()?.delete(&id);
    let message = if removed {
        "Event deleted"
    } else {
        "Event already absent"
    };
    Ok(empty_success(message).into_response())
}

pub async fn rsvp_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = state.events.ready()?.rsvp(&id)?;
    Ok(success(event, "RSVP recorded").into_response())
}
