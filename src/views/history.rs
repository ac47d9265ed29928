use super::{Toast, ViewState};
use crate::api::NotificationApi;
use crate::format::{parse_timestamp, relative_time};
use crate::models::MessageHistory;

use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Default)]
pub struct HistoryView {
    entries: Vec<MessageHistory>,
    state: ViewState,
}

#[derive(Debug, Serialize)]
pub struct HistoryContext {
    failed: bool,
    entries: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    id: i64,
    content: String,
    sent_time: String,
    sent_ago: String,
    success: bool,
}

impl HistoryView {
    pub fn entries(&self) -> &[MessageHistory] {
        &self.entries
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub async fn load<A>(&mut self, api: &A) -> Option<Toast>
    where
        A: NotificationApi + ?Sized,
    {
        self.state = ViewState::Loading;

        match api.get_message_history().await {
            Ok(entries) => {
                log::trace!("Fetched {} history entries", entries.len());
                self.entries = entries;
                self.state = ViewState::Loaded;
                None
            }
            Err(err) => {
                log::error!("Fetch history error: {}", err);
                self.state = ViewState::Error(err.to_string());
                Some(Toast::error("Failed to fetch message history"))
            }
        }
    }

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

    pub fn context(&self, now: NaiveDateTime) -> HistoryContext {
        HistoryContext {
            failed: matches!(self.state, ViewState::Error(_)),
            entries: self
                .entries
                .iter()
                .map(|entry| HistoryEntry {
                    id: entry.id,
                    content: entry.content.clone(),
                    sent_time: entry.sent_time.clone(),
                    sent_ago: parse_timestamp(&entry.sent_time)
                        .map(|sent| relative_time(sent, now))
                        .unwrap_or_else(|| entry.sent_time.clone()),
                    success: entry.is_success(),
                })
                .collect(),
        }
    }
}
