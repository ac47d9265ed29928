use super::{Toast, ViewState};
use crate::api::NotificationApi;
use crate::in_flight::{InFlight, Operation};
use crate::models::ScheduleMessageRequest;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_with::{serde_as, NoneAsEmptyString};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ScheduleForm {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub send_time: String,
    #[serde(default)]
    pub start_date: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "checkbox")]
    pub loop_daily: bool,
}

// Browsers omit unchecked checkboxes and send "on" for checked ones.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(value.as_deref(), Some(v) if v != "false" && v != "off"))
}

#[derive(Debug, Default)]
pub struct ScheduleView {
    pub form: ScheduleForm,
    state: ViewState,
}

#[derive(Debug, Serialize)]
pub struct ScheduleContext {
    form: ScheduleForm,
    scheduling: bool,
}

impl ScheduleContext {
    pub fn is_busy(&self) -> bool {
        self.scheduling
    }
}

impl ScheduleForm {
    /// Checks the form the way the scheduler will read it and builds the
    /// request, or names the first field that is wrong.
    pub fn validate(&self) -> Result<ScheduleMessageRequest, &'static str> {
        if self.content.trim().is_empty() {
            return Err("Please enter message content");
        }

        let send_time_pattern = Regex::new(r"^\d{2}:\d{2}$").unwrap();
        if !send_time_pattern.is_match(&self.send_time)
            || NaiveTime::parse_from_str(&self.send_time, "%H:%M").is_err()
        {
            return Err("Please enter a send time as HH:MM");
        }

        if self.start_date.trim().is_empty() {
            return Err("Please choose a start date");
        }

        let start_date = NaiveDate::parse_from_str(&self.start_date, DATE_FORMAT)
            .map_err(|_| "Start date must be YYYY-MM-DD")?;

        if let Some(end_date) = &self.end_date {
            let end_date = NaiveDate::parse_from_str(end_date, DATE_FORMAT)
                .map_err(|_| "End date must be YYYY-MM-DD")?;

            if end_date < start_date {
                return Err("End date cannot be before the start date");
            }
        }

        Ok(ScheduleMessageRequest {
            content: self.content.clone(),
            send_time: self.send_time.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            loop_daily: self.loop_daily,
        })
    }
}

impl ScheduleView {
    pub fn from_form(form: ScheduleForm) -> Self {
        ScheduleView {
            form,
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn mark_scheduling(&mut self) {
        self.state = ViewState::Loading;
    }

    pub async fn submit<A>(&mut self, api: &A, in_flight: &InFlight) -> Option<Toast>
    where
        A: NotificationApi + ?Sized,
    {
        if self.state.is_loading() {
            return None;
        }

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(problem) => return Some(Toast::error(problem)),
        };

        let Some(_scheduling) = in_flight.begin(Operation::Schedule) else {
            log::warn!("Ignoring schedule while another is in flight");
            self.mark_scheduling();
            return None;
        };

        self.state = ViewState::Loading;

        match api.schedule_message(&request).await {
            Ok(acknowledgement) => {
                match acknowledgement.get("id").and_then(Value::as_i64) {
                    Some(id) => log::info!("Scheduled message {} at {}", id, request.send_time),
                    None => log::info!("Scheduled message at {}", request.send_time),
                }

                self.form = ScheduleForm::default();
                self.state = ViewState::Loaded;
                Some(Toast::success("Message scheduled successfully!"))
            }
            Err(err) => {
                log::error!("Schedule message error: {}", err);
                self.state = ViewState::Error(err.to_string());
                Some(Toast::error("Failed to schedule message. Please try again."))
            }
        }
    }

    pub fn context(&self) -> ScheduleContext {
        ScheduleContext {
            form: self.form.clone(),
            scheduling: self.state.is_loading(),
        }
    }
}
