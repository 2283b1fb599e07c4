use crate::domain::models::{
    opening_hours::OpeningHoursTable,
    slot::{minutes_of_day, Slot, SLOT_MINUTES},
};
use crate::domain::services::slots::generate_slots;
use crate::error::{AppError, Field};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

const NAME_MIN_CHARS: usize = 2;
const PHONE_MIN_DIGITS: usize = 10;
const MESSAGE_MAX_CHARS: usize = 500;

static EMAIL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Contact fields after trimming and normalization, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// Checks name, email, phone and message in that order; the first failing field wins.
pub fn validate_contact(
    name: &str,
    email: &str,
    phone: Option<&str>,
    message: Option<&str>,
) -> Result<ContactDetails, AppError> {
    let name = name.trim();
    if name.chars().count() < NAME_MIN_CHARS {
        return Err(AppError::Validation(Field::Name));
    }

    let email = email.trim().to_lowercase();
    if !EMAIL_FORMAT.is_match(&email) {
        return Err(AppError::Validation(Field::Email));
    }

    let phone = non_empty(phone);
    if let Some(phone) = phone
        && !is_valid_phone(phone)
    {
        return Err(AppError::Validation(Field::Phone));
    }

    let message = non_empty(message);
    if let Some(message) = message
        && message.chars().count() > MESSAGE_MAX_CHARS
    {
        return Err(AppError::Validation(Field::Message));
    }

    Ok(ContactDetails {
        name: name.to_string(),
        email,
        phone: phone.map(str::to_string),
        message: message.map(str::to_string),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn is_valid_phone(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'));
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    allowed && digits >= PHONE_MIN_DIGITS
}

/// Parses a `YYYY-MM-DD` date and rejects past dates and closed weekdays.
pub fn validate_date(raw: &str, today: NaiveDate, table: &OpeningHoursTable) -> Result<NaiveDate, AppError> {
    let date = parse_date(raw)?;
    if date < today {
        return Err(AppError::PastDate);
    }
    if table.hours_on(date).is_none() {
        return Err(AppError::ClosedDay);
    }
    Ok(date)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let raw = raw.trim();
    if raw.len() != 10 {
        return Err(AppError::InvalidDate);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| AppError::InvalidDate)
}

/// Validates a slot for `date` against the opening hours and the current local time.
///
/// Checks run in a fixed order and the first failure is reported: format, closed day,
/// opening window bounds, duration, elapsed (today only), grid membership.
pub fn validate_slot(
    date: NaiveDate,
    raw: &str,
    now: NaiveDateTime,
    table: &OpeningHoursTable,
) -> Result<Slot, AppError> {
    let slot: Slot = raw.parse()?;

    let window = table.hours_on(date).ok_or(AppError::ClosedDay)?;

    if slot.start() < window.open || slot.end() > window.close {
        return Err(AppError::OutsideHours);
    }

    if slot.duration_minutes() != SLOT_MINUTES as i64 {
        return Err(AppError::InvalidDuration);
    }

    if date == now.date() && minutes_of_day(slot.start()) <= minutes_of_day(now.time()) {
        return Err(AppError::SlotElapsed);
    }

    if !generate_slots(window.open, window.close).contains(&slot) {
        return Err(AppError::UnknownSlot);
    }

    Ok(slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> OpeningHoursTable {
        OpeningHoursTable::default()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    // Wednesday 2025-12-10, 10:00
    fn now() -> NaiveDateTime {
        date("2025-12-10").and_hms_opt(10, 0, 0).unwrap()
    }

    #[test]
    fn contact_is_normalized() {
        let contact = validate_contact(
            "  Alice  ",
            "  Alice@Example.COM ",
            Some("  +31 (0)6-1234-5678 "),
            Some("   "),
        )
        .unwrap();
        assert_eq!(contact.name, "Alice");
        assert_eq!(contact.email, "alice@example.com");
        assert_eq!(contact.phone.as_deref(), Some("+31 (0)6-1234-5678"));
        assert_eq!(contact.message, None);
    }

    #[test]
    fn short_phone_is_rejected() {
        let err = validate_contact("Alice", "a@b.co", Some("123"), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(Field::Phone)));
    }

    #[test]
    fn phone_with_letters_is_rejected() {
        let err = validate_contact("Alice", "a@b.co", Some("0612345678x"), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(Field::Phone)));
    }

    #[test]
    fn blank_phone_counts_as_absent() {
        let contact = validate_contact("Alice", "a@b.co", Some("   "), None).unwrap();
        assert_eq!(contact.phone, None);
    }

    #[test]
    fn first_failing_field_wins() {
        let err = validate_contact("A", "not-an-email", Some("1"), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(Field::Name)));
        let err = validate_contact("Al", "not-an-email", Some("1"), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(Field::Email)));
    }

    #[test]
    fn message_limit_counts_characters() {
        let at_limit = "é".repeat(500);
        assert!(validate_contact("Alice", "a@b.co", None, Some(&at_limit)).is_ok());
        let over = "x".repeat(501);
        let err = validate_contact("Alice", "a@b.co", None, Some(&over)).unwrap_err();
        assert!(matches!(err, AppError::Validation(Field::Message)));
    }

    #[test]
    fn sunday_is_closed() {
        let err = validate_date("2025-12-14", now().date(), &table()).unwrap_err();
        assert!(matches!(err, AppError::ClosedDay));
    }

    #[test]
    fn past_and_garbage_dates() {
        assert!(matches!(validate_date("2025-12-09", now().date(), &table()), Err(AppError::PastDate)));
        assert!(matches!(validate_date("2025-13-01", now().date(), &table()), Err(AppError::InvalidDate)));
        assert!(matches!(validate_date("2025-12-1", now().date(), &table()), Err(AppError::InvalidDate)));
        assert!(matches!(validate_date("", now().date(), &table()), Err(AppError::InvalidDate)));
    }

    #[test]
    fn today_is_a_valid_date() {
        assert_eq!(validate_date("2025-12-10", now().date(), &table()).unwrap(), now().date());
    }

    #[test]
    fn slot_checks_run_in_order() {
        let monday = date("2025-12-15");
        let sunday = date("2025-12-14");
        let t = table();
        assert!(matches!(validate_slot(monday, "9:00-9:30", now(), &t), Err(AppError::MalformedSlot)));
        assert!(matches!(validate_slot(sunday, "09:00-09:30", now(), &t), Err(AppError::ClosedDay)));
        assert!(matches!(validate_slot(monday, "08:30-09:00", now(), &t), Err(AppError::OutsideHours)));
        assert!(matches!(validate_slot(monday, "14:30-15:00", now(), &t), Err(AppError::OutsideHours)));
        assert!(matches!(validate_slot(monday, "09:00-10:00", now(), &t), Err(AppError::InvalidDuration)));
        assert!(matches!(validate_slot(monday, "09:30-09:00", now(), &t), Err(AppError::InvalidDuration)));
        assert!(matches!(validate_slot(monday, "09:15-09:45", now(), &t), Err(AppError::UnknownSlot)));
        assert!(validate_slot(monday, "09:00-09:30", now(), &t).is_ok());
    }

    #[test]
    fn elapsed_slots_today_are_rejected() {
        let today = now().date();
        let t = table();
        assert!(matches!(validate_slot(today, "09:30-10:00", now(), &t), Err(AppError::SlotElapsed)));
        assert!(matches!(validate_slot(today, "10:00-10:30", now(), &t), Err(AppError::SlotElapsed)));
        assert!(validate_slot(today, "10:30-11:00", now(), &t).is_ok());
    }

    #[test]
    fn every_generated_slot_validates() {
        let t = table();
        for day in ["2025-12-15", "2025-12-16", "2025-12-17", "2025-12-18", "2025-12-19", "2025-12-20"] {
            let d = date(day);
            let window = t.hours_on(d).unwrap();
            for slot in generate_slots(window.open, window.close) {
                assert!(validate_slot(d, &slot.to_string(), now(), &t).is_ok(), "{day} {slot}");
            }
        }
    }
}
