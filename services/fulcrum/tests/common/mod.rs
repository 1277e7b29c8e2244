use fulcrum::app::{AppState, build_router};
use fulcrum::store::memory::InMemoryStore;
use std::sync::Arc;

pub type TestApp = axum::routing::RouterIntoService<axum::body::Body, ()>;

pub fn memory_app() -> TestApp {
    build_router(AppState::new(Arc::new(InMemoryStore::new()))).into_service()
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}
