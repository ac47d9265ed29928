use crate::{
    theme::Theme,
    views::{HistoryContext, HistoryView, Toast},
    AppState,
};

use axum::{extract::State, response::IntoResponse};
use axum_template::RenderHtml;
use chrono::Local;
use serde::Serialize;

pub async fn get_history(State(state): State<AppState>, theme: Theme) -> impl IntoResponse {
    let mut view = HistoryView::default();
    let toasts = view.load(&state.api).await.into_iter().collect();

    RenderHtml(
        "history",
        state.engine,
        HistoryTemplate {
            theme,
            toasts,
            history: view.context(Local::now().naive_local()),
        },
    )
}

#[derive(Serialize)]
struct HistoryTemplate {
    theme: Theme,
    toasts: Vec<Toast>,
    history: HistoryContext,
}
