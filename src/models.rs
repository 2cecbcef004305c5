use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One logged babysitting session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub hours: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    pub date: Option<String>,
    pub hours: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeleteEntryRequest {
    pub id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddEntryForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub hours: String,
}

#[derive(Debug, Deserialize)]
pub struct RateForm {
    #[serde(default)]
    pub rate: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub date: Option<String>,
}
