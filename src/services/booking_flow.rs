use chrono::NaiveDate;

use crate::models::{BookingFormInput, BookingOutcome, FieldErrors, RejectReason};
use crate::services::backend::{outcome_from_backend, BookingBackend};
use crate::services::notify::{ConfirmationMailer, VisitConfirmation};
use crate::services::{slots, validator};

/// Lifecycle of one form instance. `Succeeded` and `Failed` are
/// transitional: `submit` always settles back to `Idle` before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// What one submission cycle produced, ready for user display.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowFeedback {
    /// Per-field problems; fields stay as typed for inline correction.
    Invalid(FieldErrors),
    /// The backend rejected the booking; fields stay as typed.
    Rejected { reason: RejectReason, message: String },
    /// Booking confirmed; identifying fields were cleared.
    Confirmed { booking_id: String, email_sent: bool, message: String },
    /// Another submission on this form instance has not settled yet.
    Busy,
}

/// Drives one visit booking form through validate, submit and notify.
pub struct BookingFlow {
    pub input: BookingFormInput,
    phase: FormPhase,
    errors: FieldErrors,
    feedback: Option<FlowFeedback>,
}

impl BookingFlow {
    pub fn new() -> Self {
        Self::with_input(BookingFormInput::default())
    }

    pub fn with_input(input: BookingFormInput) -> Self {
        Self { input, phase: FormPhase::Idle, errors: FieldErrors::new(), feedback: None }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Field problems from the most recent cycle, for inline display.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn last_feedback(&self) -> Option<&FlowFeedback> {
        self.feedback.as_ref()
    }

    /// Run one full submission cycle against the current field values.
    pub async fn submit(
        &mut self,
        backend: &dyn BookingBackend,
        mailer: &dyn ConfirmationMailer,
    ) -> FlowFeedback {
        self.submit_with_today(backend, mailer, slots::local_today()).await
    }

    /// Same as `submit` with the calendar day pinned.
    pub async fn submit_with_today(
        &mut self,
        backend: &dyn BookingBackend,
        mailer: &dyn ConfirmationMailer,
        today: NaiveDate,
    ) -> FlowFeedback {
        if self.phase != FormPhase::Idle {
            // An earlier submission has not settled, e.g. its future was
            // dropped mid-flight. Refuse rather than double-submit.
            return FlowFeedback::Busy;
        }

        self.phase = FormPhase::Validating;
        let request = match validator::validate(&self.input, today) {
            Ok(request) => request,
            Err(errors) => {
                self.phase = FormPhase::Idle;
                return self.settle(FlowFeedback::Invalid(errors));
            }
        };
        self.errors.clear();

        self.phase = FormPhase::Submitting;
        let outcome = outcome_from_backend(backend.create_visit_booking(&request).await);

        match outcome {
            BookingOutcome::Accepted { booking_id } => {
                self.phase = FormPhase::Succeeded;

                // The booking is already confirmed; the email is awaited only
                // so its fate can be reported alongside the confirmation.
                let confirmation = VisitConfirmation::for_booking(&request, &booking_id);
                let notification = mailer.send(&confirmation).await;
                if let Some(error) = &notification.error {
                    tracing::warn!(error = %error, booking_id = %booking_id, "confirmation email failed");
                }

                self.clear_identifying_fields();
                self.phase = FormPhase::Idle;

                let message = if notification.sent {
                    "Booking confirmed. A confirmation email is on its way.".to_string()
                } else {
                    format!("Booking confirmed. Reference code: {booking_id}.")
                };
                self.settle(FlowFeedback::Confirmed {
                    booking_id,
                    email_sent: notification.sent,
                    message,
                })
            }
            BookingOutcome::Rejected { reason, message } => {
                self.phase = FormPhase::Failed;
                tracing::info!(reason = ?reason, "visit booking rejected");
                self.phase = FormPhase::Idle;
                self.settle(FlowFeedback::Rejected { reason, message })
            }
        }
    }

    /// Record the cycle's feedback (and field errors, when present) on the
    /// flow before handing it back.
    fn settle(&mut self, feedback: FlowFeedback) -> FlowFeedback {
        if let FlowFeedback::Invalid(errors) = &feedback {
            self.errors = errors.clone();
        }
        self.feedback = Some(feedback.clone());
        feedback
    }

    /// Drop what identifies the visitor; keep project, document type and
    /// the chosen slot so a follow-up booking starts from the same
    /// selection.
    fn clear_identifying_fields(&mut self) {
        self.input.first_name.clear();
        self.input.last_name.clear();
        self.input.document_number.clear();
        self.input.phone_primary.clear();
        self.input.phone_alt = None;
        self.input.email.clear();
    }
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}
