use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One matter in the portfolio. Loaded once and never mutated.
///
/// `stage` is normally present only while the outcome is not final, but the
/// data does not enforce that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: String,
    pub title: String,
    pub citation: String,
    pub court: String,
    pub judgment_date: NaiveDate,
    pub year: i32,
    pub legal_area: String,
    pub tags: Vec<String>,
    pub is_own_case: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_rating: Option<u8>,
}

impl CaseRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// `POST /api/subscribers` 的請求內容，空欄位直接省略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Body returned by the subscription backend on both the success and the
/// error path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_new_subscription: Option<bool>,
    #[serde(default)]
    pub email_sent: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn is_failure(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}
