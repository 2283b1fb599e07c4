use crate::domain::models::opening_hours::OpeningHoursTable;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub mail_from_alias: String,
    pub admin_password: String,
    pub admin_notification_email: String,
    pub app_base_url: String,
    pub opening_hours: OpeningHoursTable,
}

impl Config {
    pub fn from_env() -> Self {
        let opening_hours = match env::var("OPENING_HOURS") {
            Ok(raw) => OpeningHoursTable::from_json(&raw)
                .unwrap_or_else(|e| panic!("OPENING_HOURS is invalid: {}", e)),
            Err(_) => OpeningHoursTable::default(),
        };

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            mail_from_alias: env::var("MAIL_FROM_ALIAS").unwrap_or_else(|_| "default".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            admin_notification_email: env::var("ADMIN_NOTIFICATION_EMAIL").unwrap_or_else(|_| "admin@localhost".to_string()),
            app_base_url: env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            opening_hours,
        }
    }
}
