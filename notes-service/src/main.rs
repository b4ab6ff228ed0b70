//! Notes Service — flat-file CRUD over HTTP.
//!
//! Persists the whole note collection in a single JSON file and exposes
//! REST endpoints for adding, listing, fetching, editing, and deleting
//! notes.
//!
//! Default: http://127.0.0.1:9105/

mod config;
mod id;
mod routes;
mod store;

use routes::AppState;
use std::sync::Arc;
use std::time::Instant;
use store::NoteStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let port = config::port();
    let notes_file = config::notes_file();

    log::info!("Notes store file: {:?}", notes_file);

    let state = Arc::new(AppState {
        store: NoteStore::new(notes_file),
        start_time: Instant::now(),
    });

    let cors = tower_http::cors::CorsLayer::permissive();

    let app = axum::Router::new()
        .route(
            "/notes",
            axum::routing::post(routes::add_note).get(routes::list_notes),
        )
        .route(
            "/notes/:id",
            axum::routing::get(routes::get_note)
                .put(routes::edit_note)
                .delete(routes::delete_note),
        )
        .route("/status", axum::routing::get(routes::status))
        .with_state(state)
        .layer(cors);

    let addr = format!("127.0.0.1:{}", port);
    log::info!("Notes Service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
