use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::slot::{VisitSlot, VisitTime};
use crate::models::{BookingFormInput, DocumentType, FieldErrors, VisitBookingRequest};
use crate::services::slots;

/// Sentinel the project dropdown submits when no project is chosen.
pub const PROJECT_NONE: &str = "__none__";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is well-formed")
});

fn within(s: &str, min: usize, max: usize) -> bool {
    let n = s.chars().count();
    n >= min && n <= max
}

/// Check every field of `input` against the booking rules and produce a
/// normalized request. All offending fields are reported in one pass, keyed
/// by field name; `today` pins the calendar day for date eligibility.
pub fn validate(
    input: &BookingFormInput,
    today: NaiveDate,
) -> Result<VisitBookingRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    let first_name = input.first_name.trim();
    if !within(first_name, 2, 80) {
        errors.insert("first_name", "First name must have between 2 and 80 characters.".into());
    }

    let last_name = input.last_name.trim();
    if !within(last_name, 2, 80) {
        errors.insert("last_name", "Last name must have between 2 and 80 characters.".into());
    }

    let document_type = DocumentType::parse(input.document_type.trim());
    if document_type.is_none() {
        errors.insert("document_type", "Document type must be BI or PASSAPORTE.".into());
    }

    let document_number = input.document_number.trim();
    if !within(document_number, 4, 40) {
        errors.insert(
            "document_number",
            "Document number must have between 4 and 40 characters.".into(),
        );
    }

    let phone_primary = input.phone_primary.trim();
    if !within(phone_primary, 6, 30) {
        errors.insert(
            "phone_primary",
            "Primary phone must have between 6 and 30 characters.".into(),
        );
    }

    let phone_alt = match input.phone_alt.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if !within(s, 1, 30) => {
            errors.insert("phone_alt", "Alternate phone must have at most 30 characters.".into());
            None
        }
        Some(s) => Some(s.to_string()),
    };

    let email = input.email.trim();
    if !within(email, 1, 120) || !EMAIL_REGEX.is_match(email) {
        errors.insert(
            "email",
            "Enter a valid email address with at most 120 characters.".into(),
        );
    }

    let project_name = match input.project_name.as_deref().map(str::trim) {
        None | Some("") | Some(PROJECT_NONE) => None,
        Some(s) if !within(s, 1, 120) => {
            errors.insert("project_name", "Project name must have at most 120 characters.".into());
            None
        }
        Some(s) => Some(s.to_string()),
    };

    let visit_date = parse_visit_date(input.visit_date.trim(), today, &mut errors);

    let visit_time = VisitTime::parse(input.visit_time.trim());
    if visit_time.is_none() {
        errors.insert("visit_time", "Visit time must be 10:00 or 15:00.".into());
    }

    // A `None` in any of the three parsed values always comes with a
    // recorded error, so the success arm never loses information.
    match (document_type, visit_date, visit_time) {
        (Some(document_type), Some(date), Some(time)) if errors.is_empty() => {
            Ok(VisitBookingRequest {
                project_name,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                document_type,
                document_number: document_number.to_string(),
                phone_primary: phone_primary.to_string(),
                phone_alt,
                email: email.to_string(),
                slot: VisitSlot::new(date, time),
            })
        }
        _ => Err(errors),
    }
}

fn parse_visit_date(
    raw: &str,
    today: NaiveDate,
    errors: &mut FieldErrors,
) -> Option<NaiveDate> {
    if raw.is_empty() {
        errors.insert("visit_date", "Choose a visit date.".into());
        return None;
    }
    let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            errors.insert("visit_date", "Visit date must use the YYYY-MM-DD format.".into());
            return None;
        }
    };
    if !slots::is_eligible_on(date, today) {
        errors.insert(
            "visit_date",
            "Visits take place on Wednesdays and Fridays only, from today onwards.".into(),
        );
        return None;
    }
    Some(date)
}
