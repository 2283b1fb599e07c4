use appointment_backend::{
    api::{extractors::admin::ADMIN_PASSWORD_HEADER, router::create_router},
    config::Config,
    domain::{
        models::{
            appointment::{Appointment, AppointmentFilter, AppointmentStatus},
            notification::{Notification, NotificationKind},
            opening_hours::OpeningHoursTable,
            slot::Slot,
        },
        ports::{AppointmentRepository, Clock, Notifier},
    },
    error::AppError,
    infra::repositories::sqlite_appointment_repo::SqliteAppointmentRepo,
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_PASSWORD: &str = "test-secret";
pub const OPERATOR_EMAIL: &str = "operator@example.com";

/// Wednesday 2025-12-10 10:00 local time.
pub fn default_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 10).unwrap().and_hms_opt(10, 0, 0).unwrap()
}

pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

#[allow(dead_code)]
impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

/// Captures every notification intent instead of sending mail.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn of_kind(&self, kind: NotificationKind) -> Vec<Notification> {
        self.all().into_iter().filter(|n| n.kind == kind).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, notification: &Notification) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }

    fn dispatch(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

/// Reports every slot as free so only the storage constraint can stop a double booking.
pub struct BlindPrecheckRepo {
    inner: Arc<dyn AppointmentRepository>,
}

#[async_trait]
impl AppointmentRepository for BlindPrecheckRepo {
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        self.inner.create(appointment).await
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, AppError> {
        self.inner.find_by_id(id).await
    }
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        self.inner.list_by_date(date).await
    }
    async fn find_active_by_slot(&self, _date: NaiveDate, _slot: &Slot) -> Result<Vec<Appointment>, AppError> {
        Ok(Vec::new())
    }
    async fn list(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError> {
        self.inner.list(filter).await
    }
    async fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<Option<Appointment>, AppError> {
        self.inner.update_status(id, status).await
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.inner.delete(id).await
    }
}

#[derive(Default)]
pub struct TestOptions {
    pub blind_precheck: bool,
    pub notifier: Option<Arc<dyn Notifier>>,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub clock: Arc<FixedClock>,
    pub notifier: Arc<RecordingNotifier>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_options(TestOptions::default()).await
    }

    pub async fn with_options(options: TestOptions) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            mail_from_alias: "default".to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
            admin_notification_email: OPERATOR_EMAIL.to_string(),
            app_base_url: "http://localhost:3000".to_string(),
            opening_hours: OpeningHoursTable::default(),
        };

        let sqlite_repo: Arc<dyn AppointmentRepository> = Arc::new(SqliteAppointmentRepo::new(pool.clone()));
        let repo: Arc<dyn AppointmentRepository> = if options.blind_precheck {
            Arc::new(BlindPrecheckRepo { inner: sqlite_repo })
        } else {
            sqlite_repo
        };

        let clock = Arc::new(FixedClock::new(default_now()));
        let recorder = Arc::new(RecordingNotifier::default());
        let notifier: Arc<dyn Notifier> = match options.notifier {
            Some(notifier) => notifier,
            None => recorder.clone(),
        };

        let state = Arc::new(AppState::new(config, repo, notifier, clock.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            clock,
            notifier: recorder,
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.router.clone().oneshot(
            Request::builder().method("POST").uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())).unwrap()
        ).await.unwrap()
    }

    pub async fn admin_get(&self, uri: &str) -> Response {
        self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri)
                .header(ADMIN_PASSWORD_HEADER, ADMIN_PASSWORD)
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    pub async fn admin_post(&self, uri: &str, body: Value) -> Response {
        self.router.clone().oneshot(
            Request::builder().method("POST").uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .header(ADMIN_PASSWORD_HEADER, ADMIN_PASSWORD)
                .body(Body::from(body.to_string())).unwrap()
        ).await.unwrap()
    }

    /// Books a slot and returns the created appointment id; panics unless the booking succeeds.
    pub async fn book_ok(&self, date: &str, slot: &str, name: &str) -> String {
        let res = self.post("/api/book", booking_payload(date, slot, name)).await;
        assert_eq!(res.status(), axum::http::StatusCode::CREATED, "booking {date} {slot} failed");
        let body = parse_body(res).await;
        body["appointment"]["id"].as_str().unwrap().to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub fn booking_payload(date: &str, slot: &str, name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "phone": "06 1234 5678",
        "date": date,
        "slot": slot,
        "message": "See you then"
    })
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
