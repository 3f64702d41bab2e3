pub mod booking;
pub mod slot;

pub use booking::{
    BookingFormInput, BookingOutcome, DocumentType, FieldErrors, NotificationResult, RejectReason,
    VisitBookingRequest,
};
pub use slot::{VisitSlot, VisitTime};
