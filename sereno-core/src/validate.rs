use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;
use crate::models::BookingRequest;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]{8,}$").unwrap());

/// Validates a booking request field by field before any store access.
/// Each failure carries the offending field name so the client can correct
/// the form in place.
pub fn booking_request(req: &BookingRequest) -> Result<(), Error> {
    let name = req.client_name.trim();
    if name.is_empty() {
        return Err(Error::validation("client_name", "Name is required"));
    }
    if name.len() < 2 {
        return Err(Error::validation(
            "client_name",
            "Name must be at least 2 characters",
        ));
    }
    if !NAME_RE.is_match(&req.client_name) {
        return Err(Error::validation(
            "client_name",
            "Name should contain only letters and spaces",
        ));
    }

    if req.email.trim().is_empty() {
        return Err(Error::validation("email", "Email is required"));
    }
    if !EMAIL_RE.is_match(&req.email) {
        return Err(Error::validation("email", "Please enter a valid email"));
    }

    if req.phone.trim().is_empty() {
        return Err(Error::validation("phone", "Phone is required"));
    }
    if !PHONE_RE.is_match(&req.phone) {
        return Err(Error::validation(
            "phone",
            "Please enter a valid phone number",
        ));
    }

    if req.reservation_id <= 0 {
        return Err(Error::validation("reservation_id", "Invalid reservation ID"));
    }
    if req.service_id <= 0 {
        return Err(Error::validation("service_id", "Invalid service ID"));
    }
    if req.date.is_empty() {
        return Err(Error::validation("date", "Date is required"));
    }
    if req.time_slot.is_empty() {
        return Err(Error::validation("time_slot", "Time slot is required"));
    }

    Ok(())
}
