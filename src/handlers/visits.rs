use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::slot::{date_label, VisitTime};
use crate::models::{BookingFormInput, RejectReason};
use crate::services::booking_flow::{BookingFlow, FlowFeedback};
use crate::services::slots;
use crate::services::validator::PROJECT_NONE;
use crate::state::AppState;

/// How many upcoming dates the calendar widget is offered.
const CALENDAR_DATES: usize = 12;

/// Project choices shown in the dropdown. Advisory catalogue; the
/// validator accepts any free-text project name.
const PROJECT_OPTIONS: [(&str, &str); 2] = [
    (PROJECT_NONE, "Nenhum"),
    ("Urbanização KK5800", "Urbanização KK5800"),
];

#[derive(Debug, Deserialize)]
pub struct OptionsQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct VisitOptionsResponse {
    pub dates: Vec<ChoiceOption>,
    pub visit_times: Vec<VisitTime>,
    pub projects: Vec<ChoiceOption>,
    pub slot_capacity: u32,
}

/// Catalogue for the booking form: upcoming bookable dates, the times
/// available for an optionally supplied date, and project choices.
pub async fn get_options(Query(query): Query<OptionsQuery>) -> Json<VisitOptionsResponse> {
    let today = slots::local_today();

    let dates = slots::upcoming_visit_dates(CALENDAR_DATES)
        .into_iter()
        .map(|d| ChoiceOption {
            value: d.format("%Y-%m-%d").to_string(),
            label: date_label(d),
        })
        .collect();

    // With no date chosen the full time set is advertised; an unparseable
    // date behaves like an ineligible one and empties the time selector.
    let visit_times = match query.date.as_deref().map(str::trim) {
        None | Some("") => VisitTime::ALL.to_vec(),
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => slots::available_times(date, today),
            Err(_) => Vec::new(),
        },
    };

    let projects = PROJECT_OPTIONS
        .iter()
        .map(|(value, label)| ChoiceOption {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect();

    Json(VisitOptionsResponse {
        dates,
        visit_times,
        projects,
        slot_capacity: slots::SLOT_CAPACITY,
    })
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking_id: String,
    pub email_sent: bool,
    pub message: String,
}

/// Accept one visit booking form submission and drive it through the full
/// validate, submit and notify cycle.
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(input): Json<BookingFormInput>,
) -> Result<Json<BookingResponse>, AppError> {
    let mut flow = BookingFlow::with_input(input);

    match flow.submit(state.backend.as_ref(), state.mailer.as_ref()).await {
        FlowFeedback::Confirmed { booking_id, email_sent, message } => {
            tracing::info!(booking_id = %booking_id, email_sent, "visit booking confirmed");
            Ok(Json(BookingResponse { booking_id, email_sent, message }))
        }
        FlowFeedback::Invalid(fields) => Err(AppError::Validation(fields)),
        FlowFeedback::Rejected { reason, message } => Err(AppError::Booking { reason, message }),
        // A fresh flow per request cannot be busy; kept for totality.
        FlowFeedback::Busy => Err(AppError::Booking {
            reason: RejectReason::Unknown,
            message: "A submission is already in progress.".to_string(),
        }),
    }
}
