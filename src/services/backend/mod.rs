pub mod supabase;

use async_trait::async_trait;

use crate::models::{BookingOutcome, RejectReason, VisitBookingRequest};
use crate::services::slots::SLOT_CAPACITY;

/// Remote store for visit bookings. The implementation is the sole
/// authority on slot capacity and slot eligibility; callers only
/// pre-filter advisorily.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// Submit one booking. Exactly one network attempt; no retry and no
    /// idempotency key. Returns the backend-assigned booking id.
    async fn create_visit_booking(
        &self,
        request: &VisitBookingRequest,
    ) -> Result<String, BackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Deployment-time fault: backend credentials are missing.
    #[error("{0}")]
    NotConfigured(String),

    /// Error raised by the booking procedure itself. The text follows the
    /// backend's wording contract and is classified by substring.
    #[error("{0}")]
    Rpc(String),

    #[error("booking request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Collapse a backend call result into the closed outcome set consumed by
/// the form controller. An accepted booking must carry a non-empty id.
pub fn outcome_from_backend(result: Result<String, BackendError>) -> BookingOutcome {
    match result {
        Ok(id) => {
            let id = id.trim();
            if id.is_empty() {
                BookingOutcome::Rejected {
                    reason: RejectReason::Unknown,
                    message: "Unexpected response from the booking backend.".to_string(),
                }
            } else {
                BookingOutcome::Accepted { booking_id: id.to_string() }
            }
        }
        Err(BackendError::NotConfigured(message)) => {
            BookingOutcome::Rejected { reason: RejectReason::BackendUnconfigured, message }
        }
        Err(err) => classify_backend_message(&err.to_string()),
    }
}

/// Substring contract with the backend, matched case-insensitively:
/// `slot_full` and `invalid_slot` come from the booking procedure's RAISE
/// messages, the missing-variable wording from older browser deployments.
/// Kept deliberately narrow; widening it needs backend coordination.
pub fn classify_backend_message(message: &str) -> BookingOutcome {
    let lowered = message.to_lowercase();

    if lowered.contains("slot_full") {
        return BookingOutcome::Rejected {
            reason: RejectReason::SlotFull,
            message: format!(
                "This time slot already has its maximum of {SLOT_CAPACITY} confirmed bookings. \
                 Please pick a different slot."
            ),
        };
    }

    if lowered.contains("invalid_slot") {
        return BookingOutcome::Rejected {
            reason: RejectReason::InvalidSlot,
            message: "Date/time does not match an eligible Wednesday/Friday 10h or 15h window. \
                      Please pick a slot from the calendar."
                .to_string(),
        };
    }

    if lowered.contains("missing environment variable vite_supabase_") {
        return BookingOutcome::Rejected {
            reason: RejectReason::BackendUnconfigured,
            message: "The booking backend is not configured. Set SUPABASE_URL and \
                      SUPABASE_ANON_KEY and restart the service."
                .to_string(),
        };
    }

    BookingOutcome::Rejected { reason: RejectReason::Unknown, message: message.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(outcome: BookingOutcome) -> RejectReason {
        match outcome {
            BookingOutcome::Rejected { reason, .. } => reason,
            BookingOutcome::Accepted { .. } => panic!("expected a rejection"),
        }
    }

    #[test]
    fn test_classifies_slot_full() {
        let outcome = classify_backend_message("ERROR: slot_full exceeded");
        assert_eq!(reason_of(outcome.clone()), RejectReason::SlotFull);
        match outcome {
            BookingOutcome::Rejected { message, .. } => {
                assert!(message.contains("maximum of 10"));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_classifies_invalid_slot() {
        let outcome = classify_backend_message("invalid_slot: weekday mismatch");
        assert_eq!(reason_of(outcome), RejectReason::InvalidSlot);
    }

    #[test]
    fn test_classifies_legacy_missing_variable_wording() {
        let outcome = classify_backend_message("Missing environment variable VITE_SUPABASE_URL");
        assert_eq!(reason_of(outcome), RejectReason::BackendUnconfigured);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(reason_of(classify_backend_message("SLOT_FULL")), RejectReason::SlotFull);
        assert_eq!(reason_of(classify_backend_message("Invalid_Slot")), RejectReason::InvalidSlot);
    }

    #[test]
    fn test_unknown_messages_pass_through_verbatim() {
        let outcome = classify_backend_message("deadlock detected");
        match outcome {
            BookingOutcome::Rejected { reason, message } => {
                assert_eq!(reason, RejectReason::Unknown);
                assert_eq!(message, "deadlock detected");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_non_empty_id_is_accepted() {
        let outcome = outcome_from_backend(Ok("b1a2c3".to_string()));
        assert_eq!(outcome, BookingOutcome::Accepted { booking_id: "b1a2c3".to_string() });
    }

    #[test]
    fn test_empty_id_is_not_accepted() {
        let outcome = outcome_from_backend(Ok("  ".to_string()));
        assert_eq!(reason_of(outcome), RejectReason::Unknown);
    }

    #[test]
    fn test_not_configured_maps_structurally() {
        let outcome =
            outcome_from_backend(Err(BackendError::NotConfigured("no credentials".to_string())));
        match outcome {
            BookingOutcome::Rejected { reason, message } => {
                assert_eq!(reason, RejectReason::BackendUnconfigured);
                assert_eq!(message, "no credentials");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_rpc_error_goes_through_classifier() {
        let outcome = outcome_from_backend(Err(BackendError::Rpc("slot_full".to_string())));
        assert_eq!(reason_of(outcome), RejectReason::SlotFull);
    }
}
