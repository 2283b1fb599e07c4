use crate::domain::models::appointment::BookingRequest;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

/// Missing text fields deserialize as empty so they fail field validation
/// instead of being rejected by the JSON extractor.
#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default, alias = "time")]
    pub slot: String,
    pub message: Option<String>,
}

impl From<CreateAppointmentRequest> for BookingRequest {
    fn from(req: CreateAppointmentRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            date: req.date,
            slot: req.slot,
            message: req.message,
        }
    }
}

#[derive(Deserialize)]
pub struct AdminAuthRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct AppointmentsQuery {
    pub status: Option<String>,
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct AppointmentIdRequest {
    pub id: String,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum TestEmailKind {
    Confirm,
    Reject,
}

#[derive(Deserialize)]
pub struct TestEmailRequest {
    #[serde(rename = "type")]
    pub kind: TestEmailKind,
    pub email: String,
}
