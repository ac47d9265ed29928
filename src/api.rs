use crate::models::{MessageHistory, ScheduleMessageRequest, ScheduledMessage, SendNowRequest};

use axum::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API Error: {status} {status_text}")]
    Status { status: u16, status_text: String },
    #[error("Unable to parse API response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The notification backend as the views see it.
///
/// `ApiClient` talks to the real scheduler over HTTP; tests can provide their
/// own implementation to observe calls without a server.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    async fn send_now(&self, request: &SendNowRequest) -> Result<Value, ApiError>;

    async fn schedule_message(&self, request: &ScheduleMessageRequest)
        -> Result<Value, ApiError>;

    async fn get_scheduled_messages(&self) -> Result<Vec<ScheduledMessage>, ApiError>;

    async fn cancel_message(&self, id: i64) -> Result<Value, ApiError>;

    async fn get_message_history(&self) -> Result<Vec<MessageHistory>, ApiError>;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &Url) -> Self {
        ApiClient {
            client: Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    fn builder(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        log::trace!("{} {}", method, url);

        self.client
            .request(method, url)
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status_text(&response),
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

// The reason phrase the backend sent, which is only kept when it differs from
// the standard one for the code.
fn status_text(response: &Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

#[async_trait]
impl NotificationApi for ApiClient {
    async fn send_now(&self, request: &SendNowRequest) -> Result<Value, ApiError> {
        self.execute(self.builder(Method::POST, "/send-now").json(request))
            .await
    }

    async fn schedule_message(
        &self,
        request: &ScheduleMessageRequest,
    ) -> Result<Value, ApiError> {
        self.execute(self.builder(Method::POST, "/schedule").json(request))
            .await
    }

    async fn get_scheduled_messages(&self) -> Result<Vec<ScheduledMessage>, ApiError> {
        self.execute(self.builder(Method::GET, "/messages")).await
    }

    async fn cancel_message(&self, id: i64) -> Result<Value, ApiError> {
        self.execute(self.builder(Method::DELETE, &format!("/cancel/{}", id)))
            .await
    }

    async fn get_message_history(&self) -> Result<Vec<MessageHistory>, ApiError> {
        self.execute(self.builder(Method::GET, "/history")).await
    }
}
