use super::{Toast, ViewState};
use crate::api::NotificationApi;
use crate::in_flight::{InFlight, Operation};
use crate::models::SendNowRequest;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct SendNowForm {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Default)]
pub struct SendNowView {
    pub content: String,
    state: ViewState,
}

#[derive(Debug, Serialize)]
pub struct SendNowContext {
    content: String,
    sending: bool,
}

impl SendNowContext {
    pub fn is_busy(&self) -> bool {
        self.sending
    }
}

impl SendNowView {
    pub fn from_form(form: SendNowForm) -> Self {
        SendNowView {
            content: form.content,
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_loading() && !self.content.trim().is_empty()
    }

    /// Shows the view as sending, for a send started by another request.
    pub fn mark_sending(&mut self) {
        self.state = ViewState::Loading;
    }

    /// Sends the content to every subscriber. Returns no toast when a send is
    /// already in flight; the view is left showing it as sending.
    pub async fn submit<A>(&mut self, api: &A, in_flight: &InFlight) -> Option<Toast>
    where
        A: NotificationApi + ?Sized,
    {
        if self.state.is_loading() {
            return None;
        }

        if !self.can_submit() {
            return Some(Toast::error("Please enter message content"));
        }

        let Some(_sending) = in_flight.begin(Operation::SendNow) else {
            log::warn!("Ignoring send now while another send is in flight");
            self.mark_sending();
            return None;
        };

        self.state = ViewState::Loading;

        let request = SendNowRequest {
            content: self.content.clone(),
        };

        match api.send_now(&request).await {
            Ok(_) => {
                log::info!("Sent message immediately: {}", request.content);
                self.content.clear();
                self.state = ViewState::Loaded;
                Some(Toast::success("Message sent successfully!"))
            }
            Err(err) => {
                log::error!("Send now error: {}", err);
                self.state = ViewState::Error(err.to_string());
                Some(Toast::error("Failed to send message. Please try again."))
            }
        }
    }

    pub fn context(&self) -> SendNowContext {
        SendNowContext {
            content: self.content.clone(),
            sending: self.state.is_loading(),
        }
    }
}
