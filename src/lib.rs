pub mod api;
pub mod config;
pub mod format;
pub mod in_flight;
pub mod models;
pub mod routes;
pub mod shell;
pub mod theme;
pub mod views;

use crate::{api::ApiClient, config::Config, in_flight::InFlight, routes::*};

use axum::{
    routing::{get, post},
    Router,
};
use axum_template::engine::Engine;
use handlebars::{DirectorySourceOptions, Handlebars};
use tower_http::services::ServeDir;
use url::Url;

type AppEngine = Engine<Handlebars<'static>>;

#[derive(Clone)]
pub struct AppState {
    engine: AppEngine,
    api: ApiClient,
    in_flight: InFlight,
}

pub struct InjectableServices {
    pub api_address: Option<Url>,
}

pub async fn app(config: &Config, services: InjectableServices) -> Router {
    let mut hbs = Handlebars::new();
    hbs.register_templates_directory(
        "templates",
        DirectorySourceOptions {
            tpl_extension: ".hbs".to_string(),
            hidden: false,
            temporary: false,
        },
    )
    .expect("Failed to register templates directory");

    let api_address = services
        .api_address
        .unwrap_or_else(|| config.api_base_url.clone());

    log::info!("Using notification API at {}", api_address);

    Router::new()
        .route("/", get(get_root))
        .route("/send-now", post(post_send_now))
        .route("/schedule", post(post_schedule))
        .route("/scheduled", get(get_scheduled))
        .route(
            "/scheduled/:id/cancel",
            get(get_cancel_confirmation).post(post_cancel),
        )
        .route("/history", get(get_history))
        .route("/theme", post(post_theme))
        .nest_service("/assets", ServeDir::new("assets"))
        .with_state(AppState {
            engine: Engine::from(hbs),
            api: ApiClient::new(&api_address),
            in_flight: InFlight::default(),
        })
}
