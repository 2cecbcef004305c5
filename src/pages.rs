//! Browser-facing routes. Each request loads the current entries through the
//! configured `HoursApi`, applies one controller action and renders the page.

use crate::client::HoursApi;
use crate::controller::{parse_rate, ClientState, Controller, Notice, RATE_STORAGE_KEY};
use crate::errors::AppError;
use crate::models::{AddEntryForm, IndexQuery, RateForm};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

type PageController = Controller<Arc<dyn HoursApi>>;

pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, AppError> {
    let mut ctl = load(&state, &jar).await;
    if let Some(date) = query.date.as_deref().and_then(|d| d.parse::<NaiveDate>().ok()) {
        ctl.select_date(date);
    }
    render(ctl)
}

pub async fn add_entry(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AddEntryForm>,
) -> Result<Html<String>, AppError> {
    let mut ctl = load(&state, &jar).await;
    ctl.add(&form.date, &form.hours).await;
    render(ctl)
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let mut ctl = load(&state, &jar).await;
    ctl.request_delete(id);
    render(ctl)
}

/// Only reachable from the confirmation form.
pub async fn delete_entry(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let mut ctl = load(&state, &jar).await;
    ctl.request_delete(id);
    ctl.confirm_delete().await;
    render(ctl)
}

pub async fn save_rate(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RateForm>,
) -> Result<(CookieJar, Html<String>), AppError> {
    let mut ctl = load(&state, &jar).await;
    if !ctl.set_rate(&form.rate) {
        return Ok((jar, render(ctl)?));
    }

    let rate = ctl.state().hourly_rate;
    let cookie = Cookie::build((RATE_STORAGE_KEY, rate.to_string()))
        .path("/")
        .permanent();
    let mut view = ctl.into_state();
    view.notice = Some(Notice::info("Hourly rate saved"));
    Ok((jar.add(cookie), Html(render_index(&view, today())?)))
}

async fn load(state: &AppState, jar: &CookieJar) -> PageController {
    let rate = jar
        .get(RATE_STORAGE_KEY)
        .and_then(|cookie| parse_rate(cookie.value()))
        .unwrap_or(0.0);
    let mut ctl = Controller::new(Arc::clone(&state.api), ClientState::new(today(), rate));
    ctl.refresh().await;
    ctl
}

fn render(ctl: PageController) -> Result<Html<String>, AppError> {
    Ok(Html(render_index(ctl.state(), today())?))
}

/// The week shown on the page is built around the server's local date.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use crate::app::router;
    use crate::client::HoursApi;
    use crate::errors::ClientError;
    use crate::models::TimeEntry;
    use crate::state::AppState;
    use crate::storage::HoursStore;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use chrono::{Datelike, Local, NaiveDate};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> (Router, HoursStore) {
        let store = HoursStore::open_in_memory().unwrap();
        (router(AppState::local(store.clone())), store)
    }

    fn form(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn page(response: axum::response::Response) -> String {
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn index_renders_empty_state() {
        let (app, _store) = app();
        let html = page(app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap()).await;
        assert!(html.contains("No entries yet."));
        assert_eq!(html.matches("class=\"day-card").count(), 5);
    }

    #[tokio::test]
    async fn add_form_creates_entry_and_rerenders() {
        let (app, store) = app();
        let html = page(app.oneshot(form("/entries", "date=2024-06-03&hours=4")).await.unwrap()).await;

        assert!(html.contains("Mon, Jun 3"));
        assert!(html.contains("4 hours"));
        assert!(html.contains(r#"value="2024-06-03""#));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_add_keeps_inputs_and_warns() {
        let (app, store) = app();
        let html = page(app.oneshot(form("/entries", "date=2024-06-03&hours=0")).await.unwrap()).await;

        assert!(html.contains("Please enter a valid date and hours"));
        assert!(html.contains(r#"name="hours" type="number" step="0.25" min="0" value="0""#));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_asks_before_removing() {
        let (app, store) = app();
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let id = store.insert(day, 4.0).await.unwrap();

        let uri = format!("/entries/{id}/delete");
        let html = page(
            app.clone()
                .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
                .await
                .unwrap(),
        )
        .await;
        assert!(html.contains("Delete this entry?"));
        assert_eq!(store.list().await.unwrap().len(), 1);

        let html = page(app.oneshot(form(&uri, "")).await.unwrap()).await;
        assert!(html.contains("No entries yet."));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn day_card_link_prefills_date() {
        let (app, _store) = app();
        let html = page(
            app.oneshot(Request::get("/?date=2024-06-07").body(Body::empty()).unwrap())
                .await
                .unwrap(),
        )
        .await;
        assert!(html.contains(r#"name="date" type="date" value="2024-06-07""#));
    }

    #[tokio::test]
    async fn rate_is_stored_in_cookie_and_used_for_pay() {
        let (app, store) = app();
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        store.insert(day, 2.5).await.unwrap();

        let response = app.clone().oneshot(form("/rate", "rate=12")).await.unwrap();
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert!(cookie.starts_with("hourly_rate=12"));
        let html = page(response).await;
        assert!(html.contains("$30.00"));
        assert!(html.contains("Hourly rate saved"));

        let html = page(
            app.oneshot(
                Request::get("/")
                    .header(header::COOKIE, "hourly_rate=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
        )
        .await;
        assert!(html.contains("$25.00"));
    }

    #[tokio::test]
    async fn brace_text_in_add_form_stays_in_its_field() {
        let (app, store) = app();
        let html = page(
            app.oneshot(form("/entries", "date=%7B%7BFORM_HOURS%7D%7D&hours=SECRET"))
                .await
                .unwrap(),
        )
        .await;

        assert!(html.contains(r#"name="date" type="date" value="{{FORM_HOURS}}""#));
        assert!(html.contains(r#"name="hours" type="number" step="0.25" min="0" value="SECRET""#));
        assert_eq!(html.matches("SECRET").count(), 1);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn week_is_built_around_server_local_date() {
        let (app, _store) = app();
        let today = Local::now().date_naive();
        let monday = today - chrono::Duration::days(today.weekday().num_days_from_monday() as i64);

        let html = page(app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap()).await;
        assert!(html.contains(&format!(r#"id="day-mon" href="/?date={monday}""#)));
    }

    struct Unreachable;

    #[async_trait]
    impl HoursApi for Unreachable {
        async fn list(&self) -> Result<Vec<TimeEntry>, ClientError> {
            Err(ClientError::Status {
                status: 500,
                body: "down".into(),
            })
        }

        async fn create(&self, _date: NaiveDate, _hours: f64) -> Result<(), ClientError> {
            Err(ClientError::Status {
                status: 500,
                body: "down".into(),
            })
        }

        async fn delete(&self, _id: i64) -> Result<(), ClientError> {
            Err(ClientError::Status {
                status: 500,
                body: "down".into(),
            })
        }
    }

    #[tokio::test]
    async fn unreachable_api_renders_placeholder_and_zero_summary() {
        let store = HoursStore::open_in_memory().unwrap();
        let app = router(AppState::new(store, Arc::new(Unreachable)));

        let html = page(app.clone().oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap()).await;
        assert!(html.contains("Unable to load entries."));
        assert!(html.contains(r#"<span id="weeklyHours" class="value">0h</span>"#));

        let html = page(app.oneshot(form("/entries", "date=2024-06-03&hours=3")).await.unwrap()).await;
        assert!(html.contains("Failed to add entry. Please try again."));
        assert!(html.contains(r#"value="3""#));
    }
}
