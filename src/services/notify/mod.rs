pub mod emailjs;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{NotificationResult, VisitBookingRequest};

/// Month names for the long date used by the email template, e.g.
/// "18 de fevereiro de 2026".
const MONTHS_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho",
    "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];

pub fn format_visit_date_pt(date: NaiveDate) -> String {
    let month = MONTHS_PT[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

/// Template parameters for the visit confirmation email. Field names match
/// the template contract exactly.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VisitConfirmation {
    pub to_email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub project_name: String,
    pub visit_date: String,
    pub visit_time: String,
    pub booking_id: String,
    pub phone_primary: String,
    pub phone_alt: String,
    pub document_type: String,
    pub document_number: String,
}

impl VisitConfirmation {
    /// Assemble the template payload for an accepted booking, applying the
    /// template's placeholder defaults for absent optional fields.
    pub fn for_booking(request: &VisitBookingRequest, booking_id: &str) -> Self {
        Self {
            to_email: request.email.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            full_name: format!("{} {}", request.first_name, request.last_name),
            project_name: request
                .project_name
                .clone()
                .unwrap_or_else(|| "Não indicado".to_string()),
            visit_date: format_visit_date_pt(request.slot.date),
            visit_time: request.slot.time.email_label().to_string(),
            booking_id: booking_id.to_string(),
            phone_primary: request.phone_primary.clone(),
            phone_alt: request.phone_alt.clone().unwrap_or_else(|| "-".to_string()),
            document_type: request.document_type.as_str().to_string(),
            document_number: request.document_number.clone(),
        }
    }
}

/// Best-effort confirmation channel for accepted bookings. Implementations
/// report delivery through `NotificationResult` and never fail outward.
#[async_trait]
pub trait ConfirmationMailer: Send + Sync {
    async fn send(&self, confirmation: &VisitConfirmation) -> NotificationResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slot::{VisitSlot, VisitTime};
    use crate::models::DocumentType;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn test_request() -> VisitBookingRequest {
        VisitBookingRequest {
            project_name: None,
            first_name: "Ana".to_string(),
            last_name: "Santos".to_string(),
            document_type: DocumentType::Passport,
            document_number: "N1234567".to_string(),
            phone_primary: "+244 923 000 111".to_string(),
            phone_alt: None,
            email: "ana.santos@example.com".to_string(),
            slot: VisitSlot::new(d("2026-02-18"), VisitTime::Morning),
        }
    }

    #[test]
    fn test_portuguese_long_date() {
        assert_eq!(format_visit_date_pt(d("2026-02-18")), "18 de fevereiro de 2026");
        assert_eq!(format_visit_date_pt(d("2025-03-05")), "5 de março de 2025");
        assert_eq!(format_visit_date_pt(d("2025-12-31")), "31 de dezembro de 2025");
    }

    #[test]
    fn test_confirmation_applies_template_defaults() {
        let confirmation = VisitConfirmation::for_booking(&test_request(), "XYZ");
        assert_eq!(confirmation.project_name, "Não indicado");
        assert_eq!(confirmation.phone_alt, "-");
        assert_eq!(confirmation.full_name, "Ana Santos");
        assert_eq!(confirmation.visit_date, "18 de fevereiro de 2026");
        assert_eq!(confirmation.visit_time, "10h00");
        assert_eq!(confirmation.booking_id, "XYZ");
        assert_eq!(confirmation.document_type, "PASSAPORTE");
    }

    #[test]
    fn test_confirmation_keeps_provided_optionals() {
        let mut request = test_request();
        request.project_name = Some("Urbanização KK5800".to_string());
        request.phone_alt = Some("923 111 222".to_string());
        request.slot = VisitSlot::new(d("2026-02-20"), VisitTime::Afternoon);

        let confirmation = VisitConfirmation::for_booking(&request, "XYZ");
        assert_eq!(confirmation.project_name, "Urbanização KK5800");
        assert_eq!(confirmation.phone_alt, "923 111 222");
        assert_eq!(confirmation.visit_time, "15h00");
    }
}
