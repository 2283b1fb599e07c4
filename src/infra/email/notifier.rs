use crate::domain::models::notification::{Notification, NotificationKind};
use crate::domain::ports::{EmailService, Notifier};
use crate::domain::services::calendar::generate_ics;
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::{error, info, info_span, warn, Instrument};

const ICS_FILENAME: &str = "appointment.ics";

pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("admin_notification.html", include_str!("../../templates/admin_notification.html")),
        ("confirmation.html", include_str!("../../templates/confirmation.html")),
        ("rejection.html", include_str!("../../templates/rejection.html")),
    ])?;
    Ok(tera)
}

pub struct RenderedEmail {
    pub subject: &'static str,
    pub html_body: String,
    pub ics: Option<String>,
}

/// Renders notifications with tera and hands them to an `EmailService`.
#[derive(Clone)]
pub struct EmailNotifier {
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
    base_url: String,
}

impl EmailNotifier {
    pub fn new(email_service: Arc<dyn EmailService>, templates: Arc<Tera>, base_url: String) -> Self {
        Self {
            email_service,
            templates,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn render(&self, notification: &Notification) -> Result<RenderedEmail, AppError> {
        let appointment = &notification.appointment;

        let mut ctx = Context::new();
        ctx.insert("name", &appointment.name);
        ctx.insert("email", &appointment.email);
        ctx.insert("phone", &appointment.phone);
        ctx.insert("date", &appointment.date.format("%d-%m-%Y").to_string());
        ctx.insert("slot", &appointment.slot.to_string());
        ctx.insert("message", &appointment.message);
        ctx.insert("link", &self.base_url);
        ctx.insert("admin_link", &format!("{}/admin", self.base_url));

        let (template, subject) = match notification.kind {
            NotificationKind::AdminNotify => ("admin_notification.html", "New appointment request"),
            NotificationKind::Confirm => ("confirmation.html", "Your appointment is confirmed"),
            NotificationKind::Reject => ("rejection.html", "Your appointment request"),
        };

        let html_body = self
            .templates
            .render(template, &ctx)
            .map_err(|e| AppError::Internal(format!("Template render error: {}", e)))?;

        let ics = match notification.kind {
            NotificationKind::Confirm => {
                let ics = generate_ics(appointment, "Appointment");
                if ics.is_none() {
                    warn!(appointment_id = %appointment.id, "slot has no local time, sending without calendar file");
                }
                ics
            }
            _ => None,
        };

        Ok(RenderedEmail { subject, html_body, ics })
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn deliver(&self, notification: &Notification) -> Result<(), AppError> {
        let email = self.render(notification)?;
        self.email_service
            .send(
                &notification.recipient,
                email.subject,
                &email.html_body,
                email.ics.as_ref().map(|_| ICS_FILENAME),
                email.ics.as_deref().map(str::as_bytes),
            )
            .await?;
        info!(to = %notification.recipient, "notification delivered");
        Ok(())
    }

    fn dispatch(&self, notification: Notification) {
        let span = info_span!(
            "notification",
            kind = %notification.kind,
            appointment_id = %notification.appointment.id
        );
        let notifier = self.clone();
        tokio::spawn(
            async move {
                if let Err(e) = notifier.deliver(&notification).await {
                    error!("notification failed: {}", e);
                }
            }
            .instrument(span),
        );
    }
}
