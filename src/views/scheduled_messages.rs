use super::{Toast, ViewState};
use crate::api::NotificationApi;
use crate::format::format_date;
use crate::in_flight::{InFlight, Operation};
use crate::models::ScheduledMessage;

use serde::{Deserialize, Serialize};

/// The answer to "Are you sure you want to cancel this scheduled message?".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Dismissed,
}

#[derive(Debug, Default, Deserialize)]
pub struct CancelForm {
    pub confirm: Option<String>,
}

impl From<&CancelForm> for Confirmation {
    fn from(form: &CancelForm) -> Self {
        match form.confirm.as_deref() {
            Some("yes") => Confirmation::Accepted,
            _ => Confirmation::Dismissed,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScheduledMessagesView {
    messages: Vec<ScheduledMessage>,
    state: ViewState,
    cancelling: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ScheduledMessagesContext {
    failed: bool,
    messages: Vec<ScheduledMessageEntry>,
}

#[derive(Debug, Serialize)]
pub struct ScheduledMessageEntry {
    id: i64,
    content: String,
    status: String,
    active: bool,
    loop_daily: bool,
    send_time: String,
    start_date: String,
    end_date: Option<String>,
    busy: bool,
}

impl ScheduledMessagesContext {
    pub fn is_busy(&self) -> bool {
        self.messages.iter().any(|message| message.busy)
    }
}

impl ScheduledMessagesView {
    pub fn messages(&self) -> &[ScheduledMessage] {
        &self.messages
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Shows these entries as busy while their cancellation is in flight.
    pub fn mark_cancelling(&mut self, ids: Vec<i64>) {
        self.cancelling = ids;
    }

    pub async fn load<A>(&mut self, api: &A) -> Option<Toast>
    where
        A: NotificationApi + ?Sized,
    {
        self.state = ViewState::Loading;

        match api.get_scheduled_messages().await {
            Ok(messages) => {
                log::trace!("Fetched {} scheduled messages", messages.len());
                self.messages = messages;
                self.state = ViewState::Loaded;
                None
            }
            Err(err) => {
                log::error!("Fetch messages error: {}", err);
                self.state = ViewState::Error(err.to_string());
                Some(Toast::error("Failed to fetch scheduled messages"))
            }
        }
    }

    /// Loads only if nothing has been fetched yet.
    pub async fn mount<A>(&mut self, api: &A) -> Option<Toast>
    where
        A: NotificationApi + ?Sized,
    {
        if self.state.is_idle() {
            self.load(api).await
        } else {
            None
        }
    }

    /// Cancels `id` once the confirmation has been accepted, then reloads the
    /// whole list rather than patching the entry. A cancellation of `id` that
    /// is already in flight is not repeated.
    pub async fn cancel<A>(
        &mut self,
        api: &A,
        in_flight: &InFlight,
        id: i64,
        confirmation: Confirmation,
    ) -> Vec<Toast>
    where
        A: NotificationApi + ?Sized,
    {
        if confirmation == Confirmation::Dismissed {
            return Vec::new();
        }

        let Some(_cancelling) = in_flight.begin(Operation::Cancel(id)) else {
            log::warn!("Ignoring cancel of {} while one is in flight", id);
            return Vec::new();
        };

        match api.cancel_message(id).await {
            Ok(_) => {
                log::info!("Cancelled scheduled message {}", id);
                let mut toasts = vec![Toast::success("Message cancelled successfully")];
                toasts.extend(self.load(api).await);
                toasts
            }
            Err(err) => {
                log::error!("Cancel message {} error: {}", id, err);
                vec![Toast::error("Failed to cancel message")]
            }
        }
    }

    pub fn context(&self) -> ScheduledMessagesContext {
        ScheduledMessagesContext {
            failed: matches!(self.state, ViewState::Error(_)),
            messages: self
                .messages
                .iter()
                .map(|message| ScheduledMessageEntry {
                    id: message.id,
                    content: message.content.clone(),
                    status: message.status.clone(),
                    active: message.is_active(),
                    loop_daily: message.loop_daily,
                    send_time: message.send_time.clone(),
                    start_date: format_date(&message.start_date),
                    end_date: message.end_date.as_deref().map(format_date),
                    busy: self.cancelling.contains(&message.id),
                })
                .collect(),
        }
    }
}
