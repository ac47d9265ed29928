use fcmdash::{
    app,
    config::{ConfigProvider, EnvVarProvider},
    InjectableServices,
};
use reqwest::{redirect::Policy, Client};
use std::collections::HashMap;
use tokio::net::TcpListener;
use url::Url;
use wiremock::MockServer;

// Nothing listens on port 1, so requests fail at the transport.
const UNREACHABLE_API: &str = "http://127.0.0.1:1/api";

struct TestApp {
    pub address: String,
}

#[allow(dead_code)]
pub fn api_address(mock_api: &MockServer) -> InjectableServices {
    InjectableServices {
        api_address: Some(
            Url::parse(&format!("{}/api", mock_api.uri())).expect("Invalid mock API address"),
        ),
    }
}

#[allow(dead_code)]
pub async fn get(
    path: &str,
    services: InjectableServices,
) -> Result<reqwest::Response, reqwest::Error> {
    let app_address = spawn_app(set_up_services(services)).await.address;

    let client = Client::new();
    let url = format!("{}{}", app_address, path);

    client.get(&url).send().await
}

#[allow(dead_code)]
pub async fn get_with_cookie(
    path: &str,
    cookie: &str,
    services: InjectableServices,
) -> Result<reqwest::Response, reqwest::Error> {
    let app_address = spawn_app(set_up_services(services)).await.address;

    let client = Client::new();
    let url = format!("{}{}", app_address, path);

    client.get(&url).header("Cookie", cookie).send().await
}

/// Posts a form without following redirects, so tests see the 303s.
#[allow(dead_code)]
pub async fn post_form(
    path: &str,
    body: &[(&str, &str)],
    services: InjectableServices,
) -> Result<reqwest::Response, reqwest::Error> {
    let app_address = spawn_app(set_up_services(services)).await.address;

    let client = Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client");
    let url = format!("{}{}", app_address, path);

    client
        .post(&url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(serde_urlencoded::to_string(body).expect("Could not encode form body"))
        .send()
        .await
}

/// Starts one app for tests that send it several requests, returning its address.
#[allow(dead_code)]
pub async fn start_app(services: InjectableServices) -> String {
    spawn_app(set_up_services(services)).await.address
}

#[allow(dead_code)]
pub async fn post_form_to(
    app_address: &str,
    path: &str,
    body: &[(&str, &str)],
) -> Result<reqwest::Response, reqwest::Error> {
    let client = Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client");
    let url = format!("{}{}", app_address, path);

    client
        .post(&url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(serde_urlencoded::to_string(body).expect("Could not encode form body"))
        .send()
        .await
}

fn set_up_services(services: InjectableServices) -> InjectableServices {
    if services.api_address.is_none() {
        return InjectableServices {
            api_address: Some(Url::parse(UNREACHABLE_API).expect("Invalid API address")),
        };
    }

    services
}

async fn spawn_app(services: InjectableServices) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let env_config_provider =
        EnvVarProvider::new(HashMap::new()).expect("Failed to build default config");
    let config = env_config_provider.get_config().clone();

    tokio::spawn(async move {
        axum::serve(listener, app(&config, services).await)
            .await
            .unwrap();
    });

    TestApp { address }
}
