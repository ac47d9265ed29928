use crate::{shell::Dashboard, theme::Theme, AppState};

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Form,
};
use axum_template::RenderHtml;
use chrono::Local;
use http::header;
use serde::Deserialize;

pub async fn get_root(State(state): State<AppState>, theme: Theme) -> impl IntoResponse {
    let mut dashboard = Dashboard::new(theme);
    dashboard.mount(&state.api).await;

    render_dashboard(state, dashboard)
}

pub(crate) fn render_dashboard(state: AppState, mut dashboard: Dashboard) -> impl IntoResponse {
    dashboard.observe(&state.in_flight);

    RenderHtml(
        "dashboard",
        state.engine,
        dashboard.context(Local::now().naive_local()),
    )
}

#[derive(Deserialize)]
pub struct ThemeForm {
    #[serde(default)]
    theme: String,
}

pub async fn post_theme(Form(form): Form<ThemeForm>) -> impl IntoResponse {
    let theme = Theme::from_value(Some(&form.theme));
    log::info!("Theme set to {}", theme.as_str());

    ([(header::SET_COOKIE, theme.set_cookie())], Redirect::to("/"))
}
