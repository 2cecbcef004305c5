use crate::controller::{ClientState, LoadStatus, Notice, NoticeLevel};
use crate::models::TimeEntry;
use crate::stats::{day_cards, pay, round_cents, Summary};
use askama::Template;
use chrono::{Datelike, NaiveDate};

const DAY_IDS: [&str; 5] = ["mon", "tue", "wed", "thu", "fri"];

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    notice: Option<NoticeView<'a>>,
    confirm: Option<ConfirmView>,
    day_cards: Vec<DayCardView>,
    form_date: &'a str,
    form_hours: &'a str,
    rate: String,
    weekly_hours: String,
    weekly_pay: String,
    lifetime_hours: String,
    load_failed: bool,
    entries: Vec<EntryRow>,
}

struct NoticeView<'a> {
    kind: &'static str,
    message: &'a str,
}

struct ConfirmView {
    id: i64,
    detail: String,
}

struct DayCardView {
    class: &'static str,
    day_id: &'static str,
    date: NaiveDate,
    name: String,
    day: u32,
    hours: String,
}

struct EntryRow {
    id: i64,
    date: String,
    hours: String,
    pay: Option<String>,
}

/// Renders the whole page for the given state. `today` is the date the week
/// window is built around.
pub fn render_index(state: &ClientState, today: NaiveDate) -> Result<String, askama::Error> {
    let summary = Summary::compute(&state.entries, state.hourly_rate, today);
    IndexTemplate {
        notice: state.notice.as_ref().map(notice_view),
        confirm: confirmation(state),
        day_cards: day_card_views(&state.entries, today),
        form_date: &state.form.date,
        form_hours: &state.form.hours,
        rate: format_rate_input(state.hourly_rate),
        weekly_hours: format_hours(summary.weekly_hours),
        weekly_pay: format_money(summary.weekly_pay),
        lifetime_hours: format_hours(summary.lifetime_hours),
        load_failed: state.status == LoadStatus::Failed,
        entries: state
            .entries
            .iter()
            .map(|entry| entry_row(entry, state.hourly_rate))
            .collect(),
    }
    .render()
}

fn entry_row(entry: &TimeEntry, hourly_rate: f64) -> EntryRow {
    EntryRow {
        id: entry.id,
        date: format_date(entry.date),
        hours: pluralize_hours(entry.hours),
        pay: (hourly_rate > 0.0).then(|| format_money(pay(entry.hours, hourly_rate))),
    }
}

fn day_card_views(entries: &[TimeEntry], today: NaiveDate) -> Vec<DayCardView> {
    day_cards(entries, today)
        .into_iter()
        .zip(DAY_IDS)
        .map(|(card, day_id)| DayCardView {
            class: if card.has_hours() {
                "day-card has-hours"
            } else {
                "day-card"
            },
            day_id,
            date: card.date,
            name: card.date.format("%a").to_string(),
            day: card.date.day(),
            hours: format_hours(card.hours),
        })
        .collect()
}

fn notice_view(notice: &Notice) -> NoticeView<'_> {
    NoticeView {
        kind: match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        },
        message: &notice.message,
    }
}

fn confirmation(state: &ClientState) -> Option<ConfirmView> {
    let id = state.pending_delete?;
    let detail = state
        .entries
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| {
            format!(
                " ({}, {})",
                format_date(entry.date),
                pluralize_hours(entry.hours)
            )
        })
        .unwrap_or_default();
    Some(ConfirmView { id, detail })
}

/// `Mon, Jun 3`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// `1 hour`, `2.5 hours`
pub fn pluralize_hours(hours: f64) -> String {
    let unit = if hours == 1.0 { "hour" } else { "hours" };
    format!("{} {unit}", format_hours(hours))
}

/// Whole numbers print without decimals; fractions are cut to cents.
pub fn format_hours(hours: f64) -> String {
    format!("{}", round_cents(hours))
}

pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

fn format_rate_input(rate: f64) -> String {
    if rate > 0.0 {
        format!("{rate}")
    } else {
        String::new()
    }
}
