use crate::{
    routes::render_dashboard,
    shell::Dashboard,
    theme::Theme,
    views::{CancelForm, Confirmation, ScheduledMessagesContext, ScheduledMessagesView, Toast},
    AppState,
};

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_template::RenderHtml;
use serde::Serialize;

pub async fn get_scheduled(State(state): State<AppState>, theme: Theme) -> impl IntoResponse {
    let mut view = ScheduledMessagesView::default();
    let toasts = view.load(&state.api).await.into_iter().collect();
    view.mark_cancelling(state.in_flight.cancelling());

    let scheduled_messages = view.context();

    RenderHtml(
        "scheduled",
        state.engine,
        ScheduledTemplate {
            theme,
            toasts,
            busy: scheduled_messages.is_busy(),
            refresh_to: "/scheduled",
            scheduled_messages,
        },
    )
}

pub async fn get_cancel_confirmation(
    State(state): State<AppState>,
    theme: Theme,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    RenderHtml(
        "confirm-cancel",
        state.engine,
        ConfirmCancelTemplate { theme, id },
    )
}

#[axum_macros::debug_handler]
pub async fn post_cancel(
    State(state): State<AppState>,
    theme: Theme,
    Path(id): Path<i64>,
    Form(form): Form<CancelForm>,
) -> Response {
    let confirmation = Confirmation::from(&form);

    if confirmation == Confirmation::Dismissed {
        return Redirect::to("/").into_response();
    }

    let mut dashboard = Dashboard::new(theme);
    let toasts = dashboard
        .scheduled_messages
        .cancel(&state.api, &state.in_flight, id, confirmation)
        .await;
    dashboard.toasts.extend(toasts);
    dashboard.mount(&state.api).await;

    render_dashboard(state, dashboard).into_response()
}

#[derive(Serialize)]
struct ScheduledTemplate {
    theme: Theme,
    toasts: Vec<Toast>,
    busy: bool,
    refresh_to: &'static str,
    scheduled_messages: ScheduledMessagesContext,
}

#[derive(Serialize)]
struct ConfirmCancelTemplate {
    theme: Theme,
    id: i64,
}
