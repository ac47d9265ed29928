use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{headers::Cookie, TypedHeader};
use serde::Serialize;
use std::convert::Infallible;

pub const THEME_COOKIE: &str = "fcm-dashboard-theme";

const ONE_YEAR_IN_SECONDS: u32 = 31_536_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            Some("dark") => Theme::Dark,
            _ => Theme::System,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn set_cookie(&self) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            THEME_COOKIE,
            self.as_str(),
            ONE_YEAR_IN_SECONDS
        )
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Theme
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = TypedHeader::<Cookie>::from_request_parts(parts, state)
            .await
            .ok();

        Ok(Theme::from_value(
            cookies
                .as_ref()
                .and_then(|TypedHeader(cookies)| cookies.get(THEME_COOKIE)),
        ))
    }
}
