use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{BookingStatus, EmploymentStatus, Gender};

use super::require_text;

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// A registration for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: uuid::Uuid,
    pub event_id: uuid::Uuid,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub location: String,
    pub gender: Gender,
    pub education_background: String,
    pub employment_status: EmploymentStatus,
    pub expectation: String,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
}

/// The public registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub location: String,
    pub gender: Gender,
    pub education_background: String,
    pub employment_status: EmploymentStatus,
    #[serde(default)]
    pub expectation: String,
}

impl BookingForm {
    /// ## Summary
    /// Checks required fields, the email shape and the mobile number.
    ///
    /// ## Errors
    /// Returns `ValidationError` naming the first offending field.
    pub fn validate(&self) -> CoreResult<()> {
        require_text("fullName", &self.full_name)?;
        require_text("email", &self.email)?;
        require_text("mobileNumber", &self.mobile_number)?;
        require_text("location", &self.location)?;
        require_text("educationBackground", &self.education_background)?;

        if !is_plausible_email(&normalize_email(&self.email)) {
            return Err(CoreError::ValidationError(
                "email is not a valid address".to_string(),
            ));
        }
        if !is_plausible_phone(&self.mobile_number) {
            return Err(CoreError::ValidationError(format!(
                "mobileNumber must contain {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits"
            )));
        }
        Ok(())
    }
}

/// Trims and lower-cases an address so one person maps to one registration key.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

fn is_plausible_phone(number: &str) -> bool {
    let trimmed = number.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' => {}
            _ => return false,
        }
    }
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// A booking ready to be stored: normalized form fields plus its initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub event_id: uuid::Uuid,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub location: String,
    pub gender: Gender,
    pub education_background: String,
    pub employment_status: EmploymentStatus,
    pub expectation: String,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
}

impl NewBooking {
    /// A pending booking for `event_id` created at `now`.
    #[must_use]
    pub fn pending(event_id: uuid::Uuid, form: BookingForm, now: DateTime<Utc>) -> Self {
        Self {
            event_id,
            full_name: form.full_name.trim().to_string(),
            email: normalize_email(&form.email),
            mobile_number: form.mobile_number.trim().to_string(),
            location: form.location.trim().to_string(),
            gender: form.gender,
            education_background: form.education_background.trim().to_string(),
            employment_status: form.employment_status,
            expectation: form.expectation.trim().to_string(),
            status: BookingStatus::Pending,
            booking_date: now,
        }
    }

    /// Materializes the stored record under `id`.
    #[must_use]
    pub fn into_booking(self, id: uuid::Uuid) -> Booking {
        Booking {
            id,
            event_id: self.event_id,
            full_name: self.full_name,
            email: self.email,
            mobile_number: self.mobile_number,
            location: self.location,
            gender: self.gender,
            education_background: self.education_background,
            employment_status: self.employment_status,
            expectation: self.expectation,
            status: self.status,
            booking_date: self.booking_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BookingForm {
        BookingForm {
            full_name: "Amaka Eze".to_string(),
            email: "  Amaka.Eze@Example.ORG ".to_string(),
            mobile_number: "+234 (803) 555-0101".to_string(),
            location: "Enugu".to_string(),
            gender: Gender::Female,
            education_background: "BSc".to_string(),
            employment_status: EmploymentStatus::Unemployed,
            expectation: " Learn ".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_pending_booking_normalizes_email() {
        let now = Utc::now();
        let event_id = uuid::Uuid::now_v7();
        let booking = NewBooking::pending(event_id, form(), now);
        assert_eq!(booking.email, "amaka.eze@example.org");
        assert_eq!(booking.expectation, "Learn");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.booking_date, now);
        assert_eq!(booking.event_id, event_id);
    }

    #[test]
    fn test_bad_emails_are_rejected() {
        for email in ["no-at-sign", "@example.org", "a@", "a@b@c", "a b@example.org"] {
            let bad = BookingForm {
                email: email.to_string(),
                ..form()
            };
            assert!(bad.validate().is_err(), "{email} should be rejected");
        }
    }

    #[test]
    fn test_phone_digit_bounds() {
        for (number, ok) in [
            ("0803555", true),
            ("080355", false),
            ("+1 202-555-0147", true),
            ("1234567890123456", false),
            ("0803-555-01x", false),
        ] {
            let candidate = BookingForm {
                mobile_number: number.to_string(),
                ..form()
            };
            assert_eq!(candidate.validate().is_ok(), ok, "{number}");
        }
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let blank = BookingForm {
            location: String::new(),
            ..form()
        };
        let err = blank.validate().unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(m) if m.contains("location")));
    }
}
