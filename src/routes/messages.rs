use crate::{
    routes::render_dashboard,
    shell::Dashboard,
    theme::Theme,
    views::{ScheduleForm, ScheduleView, SendNowForm, SendNowView},
    AppState,
};

use axum::{extract::State, response::IntoResponse, Form};

pub async fn post_send_now(
    State(state): State<AppState>,
    theme: Theme,
    Form(form): Form<SendNowForm>,
) -> impl IntoResponse {
    let mut dashboard = Dashboard::new(theme);
    dashboard.send_now = SendNowView::from_form(form);

    let toast = dashboard
        .send_now
        .submit(&state.api, &state.in_flight)
        .await;
    dashboard.toasts.extend(toast);
    dashboard.mount(&state.api).await;

    render_dashboard(state, dashboard)
}

pub async fn post_schedule(
    State(state): State<AppState>,
    theme: Theme,
    Form(form): Form<ScheduleForm>,
) -> impl IntoResponse {
    let mut dashboard = Dashboard::new(theme);
    dashboard.schedule = ScheduleView::from_form(form);

    let toast = dashboard
        .schedule
        .submit(&state.api, &state.in_flight)
        .await;
    dashboard.toasts.extend(toast);
    dashboard.mount(&state.api).await;

    render_dashboard(state, dashboard)
}
