//! Client-side state and the actions that drive it.
//!
//! Every mutation goes to the API first and is followed by a full re-fetch;
//! local entries are never patched in place.

use crate::client::HoursApi;
use crate::models::TimeEntry;
use chrono::NaiveDate;
use tracing::{error, warn};

/// Key under which the client keeps its hourly rate.
pub const RATE_STORAGE_KEY: &str = "hourly_rate";

const INVALID_INPUT: &str = "Please enter a valid date and hours";
const ADD_FAILED: &str = "Failed to add entry. Please try again.";
const DELETE_FAILED: &str = "Failed to delete entry. Please try again.";
const INVALID_RATE: &str = "Please enter a valid hourly rate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Raw values of the add form, kept as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub date: String,
    pub hours: String,
}

#[derive(Debug, Clone)]
pub struct ClientState {
    pub entries: Vec<TimeEntry>,
    pub status: LoadStatus,
    pub form: AddForm,
    pub hourly_rate: f64,
    pub pending_delete: Option<i64>,
    pub notice: Option<Notice>,
}

impl ClientState {
    pub fn new(today: NaiveDate, hourly_rate: f64) -> Self {
        Self {
            entries: Vec::new(),
            status: LoadStatus::Loading,
            form: AddForm {
                date: today.to_string(),
                hours: String::new(),
            },
            hourly_rate,
            pending_delete: None,
            notice: None,
        }
    }
}

pub struct Controller<A> {
    api: A,
    state: ClientState,
}

impl<A: HoursApi> Controller<A> {
    pub fn new(api: A, state: ClientState) -> Self {
        Self { api, state }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn into_state(self) -> ClientState {
        self.state
    }

    /// Replaces the entry collection with the server's. On failure the
    /// collection is emptied rather than left stale.
    pub async fn refresh(&mut self) {
        self.state.status = LoadStatus::Loading;
        match self.api.list().await {
            Ok(entries) => {
                self.state.entries = entries;
                self.state.status = LoadStatus::Loaded;
            }
            Err(err) => {
                error!("error fetching entries: {err}");
                self.state.entries.clear();
                self.state.status = LoadStatus::Failed;
            }
        }
    }

    pub async fn add(&mut self, date_input: &str, hours_input: &str) {
        self.state.form = AddForm {
            date: date_input.trim().to_string(),
            hours: hours_input.trim().to_string(),
        };

        let Some((date, hours)) = parse_entry_input(date_input, hours_input) else {
            self.state.notice = Some(Notice::error(INVALID_INPUT));
            return;
        };

        match self.api.create(date, hours).await {
            Ok(()) => {
                self.state.form.hours.clear();
                self.refresh().await;
            }
            Err(err) => {
                error!("error adding entry: {err}");
                self.state.notice = Some(Notice::error(ADD_FAILED));
            }
        }
    }

    /// Pre-fills the add form with a date, e.g. from a day card.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.state.form.date = date.to_string();
    }

    /// Asks for confirmation; nothing is sent until `confirm_delete`.
    pub fn request_delete(&mut self, id: i64) {
        self.state.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.state.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.state.pending_delete.take() else {
            return;
        };

        match self.api.delete(id).await {
            Ok(()) => self.refresh().await,
            Err(err) => {
                error!("error deleting entry {id}: {err}");
                self.state.notice = Some(Notice::error(DELETE_FAILED));
            }
        }
    }

    /// Updates the client-local rate. Returns whether it changed.
    pub fn set_rate(&mut self, input: &str) -> bool {
        match parse_rate(input) {
            Some(rate) => {
                self.state.hourly_rate = rate;
                true
            }
            None => {
                warn!(input, "rejected hourly rate");
                self.state.notice = Some(Notice::error(INVALID_RATE));
                false
            }
        }
    }
}

fn parse_entry_input(date_input: &str, hours_input: &str) -> Option<(NaiveDate, f64)> {
    let date = date_input.trim();
    if date.is_empty() {
        return None;
    }
    let date = date.parse::<NaiveDate>().ok()?;
    let hours = hours_input.trim().parse::<f64>().ok()?;
    (hours.is_finite() && hours > 0.0).then_some((date, hours))
}

/// Accepts a finite, non-negative rate. An empty input clears the rate.
pub fn parse_rate(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Some(0.0);
    }
    input
        .parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite() && *rate >= 0.0)
}
