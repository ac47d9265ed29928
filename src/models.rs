use serde::{Deserialize, Deserializer, Serialize};

pub const ACTIVE_STATUS: &str = "active";
pub const SUCCESS_STATUS: &str = "success";

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ScheduledMessage {
    pub id: i64,
    pub content: String,
    pub send_time: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "bool_or_int")]
    pub loop_daily: bool,
    pub status: String,
}

impl ScheduledMessage {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MessageHistory {
    pub id: i64,
    pub content: String,
    pub sent_time: String,
    pub status: String,
}

impl MessageHistory {
    /// Anything other than an exact "success" counts as a failed delivery.
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SendNowRequest {
    pub content: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ScheduleMessageRequest {
    pub content: String,
    pub send_time: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub loop_daily: bool,
}

// SQLite hands BOOLEAN columns back as 0/1, so the scheduler emits integers.
fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrInt {
        Bool(bool),
        Int(i64),
    }

    Ok(match BoolOrInt::deserialize(deserializer)? {
        BoolOrInt::Bool(b) => b,
        BoolOrInt::Int(n) => n != 0,
    })
}
