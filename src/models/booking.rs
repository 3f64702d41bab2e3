use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::slot::VisitSlot;

/// Identity document kinds accepted on the visit form. Wire spellings are
/// part of the booking RPC contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DocumentType {
    #[serde(rename = "BI")]
    Bi,
    #[serde(rename = "PASSAPORTE")]
    Passport,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Bi => "BI",
            DocumentType::Passport => "PASSAPORTE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BI" => Some(DocumentType::Bi),
            "PASSAPORTE" => Some(DocumentType::Passport),
            _ => None,
        }
    }
}

/// Raw visit form fields exactly as submitted. Everything arrives as text;
/// the validator is the only component that turns this into a
/// `VisitBookingRequest`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingFormInput {
    pub project_name: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub document_type: String,
    pub document_number: String,
    pub phone_primary: String,
    pub phone_alt: Option<String>,
    pub email: String,
    pub visit_date: String,
    pub visit_time: String,
}

/// A validated, normalized booking ready for submission. Field values are
/// trimmed and optional fields collapse to `None` when blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitBookingRequest {
    pub project_name: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub phone_primary: String,
    pub phone_alt: Option<String>,
    pub email: String,
    pub slot: VisitSlot,
}

/// Field name to human-readable problem, ordered for stable display.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Closed set of submission outcomes consumed by the form controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Accepted { booking_id: String },
    Rejected { reason: RejectReason, message: String },
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The slot already holds its maximum of confirmed bookings.
    SlotFull,
    /// The backend refused the (date, time) pair as ineligible.
    InvalidSlot,
    /// Deployment is missing booking backend credentials.
    BackendUnconfigured,
    /// Anything the classifier could not attribute; message passes through.
    Unknown,
}

/// What became of the confirmation email for an accepted booking. Never an
/// error type: notification failure does not affect the booking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationResult {
    pub sent: bool,
    pub error: Option<String>,
}

impl NotificationResult {
    pub fn delivered() -> Self {
        Self { sent: true, error: None }
    }

    /// Notifications are disabled; nothing was attempted.
    pub fn skipped() -> Self {
        Self { sent: false, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { sent: false, error: Some(error.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_round_trip() {
        assert_eq!(DocumentType::parse("BI"), Some(DocumentType::Bi));
        assert_eq!(DocumentType::parse("PASSAPORTE"), Some(DocumentType::Passport));
        assert_eq!(DocumentType::Bi.as_str(), "BI");
        assert_eq!(DocumentType::Passport.as_str(), "PASSAPORTE");
        assert_eq!(DocumentType::parse("bi"), None);
        assert_eq!(DocumentType::parse("CC"), None);
    }

    #[test]
    fn test_form_input_tolerates_missing_fields() {
        let input: BookingFormInput = serde_json::from_str(r#"{"first_name":"Ana"}"#).unwrap();
        assert_eq!(input.first_name, "Ana");
        assert_eq!(input.last_name, "");
        assert_eq!(input.visit_date, "");
        assert_eq!(input.project_name, None);
        assert_eq!(input.phone_alt, None);
    }

    #[test]
    fn test_reject_reason_wire_names() {
        let as_json = |r: RejectReason| serde_json::to_string(&r).unwrap();
        assert_eq!(as_json(RejectReason::SlotFull), r#""slot_full""#);
        assert_eq!(as_json(RejectReason::InvalidSlot), r#""invalid_slot""#);
        assert_eq!(as_json(RejectReason::BackendUnconfigured), r#""backend_unconfigured""#);
        assert_eq!(as_json(RejectReason::Unknown), r#""unknown""#);
    }

    #[test]
    fn test_notification_result_constructors() {
        assert_eq!(NotificationResult::delivered(), NotificationResult { sent: true, error: None });
        assert_eq!(NotificationResult::skipped(), NotificationResult { sent: false, error: None });
        let failed = NotificationResult::failed("timeout");
        assert!(!failed.sent);
        assert_eq!(failed.error.as_deref(), Some("timeout"));
    }
}
