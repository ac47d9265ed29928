use crate::api::NotificationApi;
use crate::in_flight::{InFlight, Operation};
use crate::theme::Theme;
use crate::views::{
    HistoryContext, HistoryView, ScheduleContext, ScheduleView, ScheduledMessagesContext,
    ScheduledMessagesView, SendNowContext, SendNowView, Toast,
};

use chrono::NaiveDateTime;
use serde::Serialize;

/// The four views side by side, plus the toasts raised while driving them.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub theme: Theme,
    pub send_now: SendNowView,
    pub schedule: ScheduleView,
    pub scheduled_messages: ScheduledMessagesView,
    pub history: HistoryView,
    pub toasts: Vec<Toast>,
}

#[derive(Debug, Serialize)]
pub struct DashboardContext {
    theme: Theme,
    busy: bool,
    refresh_to: &'static str,
    toasts: Vec<Toast>,
    send_now: SendNowContext,
    schedule: ScheduleContext,
    scheduled_messages: ScheduledMessagesContext,
    history: HistoryContext,
}

impl Dashboard {
    pub fn new(theme: Theme) -> Self {
        Dashboard {
            theme,
            ..Default::default()
        }
    }

    /// Fetches whichever lists have not been fetched yet. The two lists are
    /// independent, so they load concurrently.
    pub async fn mount<A>(&mut self, api: &A)
    where
        A: NotificationApi + ?Sized,
    {
        let scheduled_messages = &mut self.scheduled_messages;
        let history = &mut self.history;

        let (scheduled_messages_toast, history_toast) =
            tokio::join!(scheduled_messages.mount(api), history.mount(api));

        self.toasts.extend(scheduled_messages_toast);
        self.toasts.extend(history_toast);
    }

    /// Shows the writes other requests still have outstanding.
    pub fn observe(&mut self, in_flight: &InFlight) {
        if in_flight.contains(Operation::SendNow) {
            self.send_now.mark_sending();
        }

        if in_flight.contains(Operation::Schedule) {
            self.schedule.mark_scheduling();
        }

        self.scheduled_messages.mark_cancelling(in_flight.cancelling());
    }

    pub fn context(&self, now: NaiveDateTime) -> DashboardContext {
        let send_now = self.send_now.context();
        let schedule = self.schedule.context();
        let scheduled_messages = self.scheduled_messages.context();

        DashboardContext {
            theme: self.theme,
            busy: send_now.is_busy() || schedule.is_busy() || scheduled_messages.is_busy(),
            refresh_to: "/",
            toasts: self.toasts.clone(),
            send_now,
            schedule,
            scheduled_messages,
            history: self.history.context(now),
        }
    }
}
