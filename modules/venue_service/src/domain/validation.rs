//! Input validation for bookings and editable content

use crate::contract::{
    BookingSubmission, EventDraft, EventType, FaqDraft, ServiceDetailDraft, TestimonialDraft,
    VenueError,
};
use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum phone length accepted by the booking form
pub const MIN_PHONE_LEN: usize = 10;

static EMAIL_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Booking fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_date: NaiveDate,
    pub event_type: EventType,
    pub guest_count: Option<u32>,
    pub message: Option<String>,
}

/// Check a public booking submission.
///
/// Required: name, email, phone, eventDate, eventType (non-empty after trim).
/// Optional fields never cause a rejection.
pub fn validate_booking(submission: &BookingSubmission) -> Result<ValidBooking, VenueError> {
    let name = required("name", &submission.name)?;
    let email = required("email", &submission.email)?;
    let phone = required("phone", &submission.phone)?;
    let event_date = required("eventDate", &submission.event_date)?;
    let event_type = required("eventType", &submission.event_type)?;

    if !is_valid_email(&email) {
        return Err(VenueError::validation(format!(
            "email '{}' is not a valid address",
            email
        )));
    }

    if phone.chars().count() < MIN_PHONE_LEN {
        return Err(VenueError::validation(format!(
            "phone must have at least {} characters",
            MIN_PHONE_LEN
        )));
    }

    let event_date = parse_event_date(&event_date)?;
    let event_type = event_type
        .to_ascii_lowercase()
        .parse::<EventType>()
        .map_err(VenueError::validation)?;

    Ok(ValidBooking {
        name,
        email: email.to_ascii_lowercase(),
        phone,
        event_date,
        event_type,
        guest_count: submission.guest_count.as_ref().and_then(coerce_guest_count),
        message: optional_text(&submission.message),
    })
}

fn required(field: &str, value: &Option<String>) -> Result<String, VenueError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(VenueError::validation(format!(
            "required field missing: {}",
            field
        ))),
    }
}

/// Trimmed text, `None` when blank
pub fn optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Loose `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    match EMAIL_RE.as_ref() {
        Ok(re) => re.is_match(email),
        Err(_) => false,
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part kept)
pub fn parse_event_date(raw: &str) -> Result<NaiveDate, VenueError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| VenueError::validation(format!("eventDate '{}' is not a valid date", raw)))
}

/// Number or numeric string to a positive count; anything else is dropped
pub fn coerce_guest_count(value: &serde_json::Value) -> Option<u32> {
    let n = match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    u32::try_from(n).ok().filter(|n| *n > 0)
}

pub fn validate_event(draft: &EventDraft) -> Result<(), VenueError> {
    if draft.title.trim().is_empty() {
        return Err(VenueError::validation("event title cannot be empty"));
    }
    Ok(())
}

pub fn validate_faq(draft: &FaqDraft) -> Result<(), VenueError> {
    if draft.question.trim().is_empty() || draft.answer.trim().is_empty() {
        return Err(VenueError::validation(
            "FAQ entries need both a question and an answer",
        ));
    }
    Ok(())
}

pub fn validate_testimonial(draft: &TestimonialDraft) -> Result<(), VenueError> {
    if draft.author.trim().is_empty() || draft.quote.trim().is_empty() {
        return Err(VenueError::validation(
            "testimonials need an author and a quote",
        ));
    }
    if !(1..=5).contains(&draft.rating) {
        return Err(VenueError::validation(format!(
            "rating must be between 1 and 5, got {}",
            draft.rating
        )));
    }
    Ok(())
}

pub fn validate_service_detail(draft: &ServiceDetailDraft) -> Result<(), VenueError> {
    if draft.name.trim().is_empty() {
        return Err(VenueError::validation("service name cannot be empty"));
    }
    Ok(())
}
