//! Axum route handlers for the notes REST API.

use crate::store::{NoteStore, StoreError};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use notes_service_types::*;
use std::sync::Arc;
use std::time::Instant;

pub struct AppState {
    pub store: NoteStore,
    pub start_time: Instant,
}

// POST /notes
pub async fn add_note(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NotePayload>,
) -> (StatusCode, Json<ApiResponse<AddedNote>>) {
    match state.store.add(payload).await {
        Ok(note_id) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok_with_message(
                AddedNote { note_id },
                "note added",
            )),
        ),
        Err(e) => {
            log::error!("Failed to add note: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::fail("failed to add note")),
            )
        }
    }
}

// GET /notes
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<NoteList>>) {
    match state.store.all().await {
        Ok(notes) => (StatusCode::OK, Json(ApiResponse::ok(NoteList { notes }))),
        Err(e) => {
            log::error!("Failed to load notes: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::fail("failed to load notes")),
            )
        }
    }
}

// GET /notes/:id
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(note_id): Path<String>,
) -> (StatusCode, Json<ApiResponse<SingleNote>>) {
    match state.store.find(&note_id).await {
        Ok(note) => (StatusCode::OK, Json(ApiResponse::ok(SingleNote { note }))),
        Err(StoreError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::fail("note not found")),
        ),
        Err(e) => {
            log::error!("Failed to fetch note {}: {}", note_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::fail("failed to load notes")),
            )
        }
    }
}

// PUT /notes/:id
pub async fn edit_note(
    State(state): State<Arc<AppState>>,
    Path(note_id): Path<String>,
    Json(payload): Json<NotePayload>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    match state.store.edit(&note_id, payload).await {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok_message("note updated"))),
        Err(StoreError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::fail("failed to update note: id not found")),
        ),
        Err(e) => {
            log::error!("Failed to update note {}: {}", note_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::fail("failed to update note")),
            )
        }
    }
}

// DELETE /notes/:id
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(note_id): Path<String>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    match state.store.delete(&note_id).await {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok_message("note deleted"))),
        Err(StoreError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::fail("failed to delete note: id not found")),
        ),
        Err(e) => {
            log::error!("Failed to delete note {}: {}", note_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::fail("failed to delete note")),
            )
        }
    }
}

// GET /status
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<ServiceStatus>>) {
    let note_count = state.store.all().await.map(|n| n.len()).unwrap_or(0);

    let status = ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        note_count,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(ApiResponse::ok(status)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_state(dir: &tempfile::TempDir) -> Arc<AppState> {
        Arc::new(AppState {
            store: NoteStore::new(dir.path().join("notes.json")),
            start_time: Instant::now(),
        })
    }

    fn payload(title: &str) -> NotePayload {
        NotePayload {
            title: title.to_string(),
            tags: vec!["x".to_string()],
            body: "b".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_returns_201_and_16_char_id() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        let (code, Json(resp)) = add_note(State(state.clone()), Json(payload("A"))).await;
        assert_eq!(code, StatusCode::CREATED);
        assert_eq!(resp.status, ResponseStatus::Success);

        let note_id = resp.data.unwrap().note_id;
        assert_eq!(note_id.len(), 16);

        let (code, Json(resp)) = list_notes(State(state)).await;
        assert_eq!(code, StatusCode::OK);
        let notes = resp.data.unwrap().notes;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, note_id);
        assert_eq!(notes[0].title, "A");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_404() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        let (code, Json(resp)) = get_note(State(state), Path("zzz".to_string())).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(resp.status, ResponseStatus::Fail);
        assert!(resp.data.is_none());
    }

    #[tokio::test]
    async fn test_edit_unknown_id_is_404_and_store_unchanged() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        add_note(State(state.clone()), Json(payload("A"))).await;
        let (_, Json(before)) = list_notes(State(state.clone())).await;

        let (code, Json(resp)) =
            edit_note(State(state.clone()), Path("zzz".to_string()), Json(payload("B"))).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(resp.status, ResponseStatus::Fail);

        let (_, Json(after)) = list_notes(State(state)).await;
        assert_eq!(before.data.unwrap().notes, after.data.unwrap().notes);
    }

    #[tokio::test]
    async fn test_edit_known_id_updates_title_and_timestamp() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        let (_, Json(resp)) = add_note(State(state.clone()), Json(payload("old title"))).await;
        let note_id = resp.data.unwrap().note_id;

        let (_, Json(resp)) = get_note(State(state.clone()), Path(note_id.clone())).await;
        let original = resp.data.unwrap().note;

        let (code, Json(resp)) = edit_note(
            State(state.clone()),
            Path(note_id.clone()),
            Json(payload("new title")),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(resp.status, ResponseStatus::Success);

        let (_, Json(resp)) = get_note(State(state), Path(note_id)).await;
        let edited = resp.data.unwrap().note;
        assert_eq!(edited.title, "new title");
        assert_eq!(edited.created_at, original.created_at);
        assert!(edited.updated_at >= original.updated_at);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_404() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        let (_, Json(resp)) = add_note(State(state.clone()), Json(payload("A"))).await;
        let note_id = resp.data.unwrap().note_id;

        let (code, Json(resp)) = delete_note(State(state.clone()), Path(note_id.clone())).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(resp.status, ResponseStatus::Success);

        let (code, _) = get_note(State(state), Path(note_id)).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_404() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        let (code, Json(resp)) = delete_note(State(state), Path("zzz".to_string())).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(resp.status, ResponseStatus::Fail);
    }

    #[tokio::test]
    async fn test_status_reports_note_count() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        add_note(State(state.clone()), Json(payload("A"))).await;

        let (code, Json(resp)) = status(State(state)).await;
        assert_eq!(code, StatusCode::OK);

        let data = resp.data.unwrap();
        assert!(data.running);
        assert_eq!(data.note_count, 1);
        assert_eq!(data.version, env!("CARGO_PKG_VERSION"));
    }
}
