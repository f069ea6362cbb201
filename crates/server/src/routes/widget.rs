use crate::state::ServerState;
use autoreply::WidgetSettings;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

/// Widget appearance and behaviour for the embed script
pub async fn widget_settings(State(state): State<Arc<ServerState>>) -> Json<WidgetSettings> {
    Json(state.engine.widget.clone())
}
