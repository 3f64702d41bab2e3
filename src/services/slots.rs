use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

use crate::models::slot::VisitTime;

/// Confirmed bookings the backend allows per slot. Quoted in user-facing
/// copy only; the count itself is enforced server-side.
pub const SLOT_CAPACITY: u32 = 10;

/// Forward-scan ceiling for `next_eligible_dates`. Keeps the scan bounded
/// even when the requested count can never be reached.
const SCAN_HORIZON_DAYS: u64 = 366;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn is_visit_weekday(d: NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Wed | Weekday::Fri)
}

/// A date is bookable when it falls on a visit weekday and is not before
/// `today`. Day granularity: today stays eligible for its whole duration.
pub fn is_eligible_on(d: NaiveDate, today: NaiveDate) -> bool {
    is_visit_weekday(d) && d >= today
}

pub fn is_eligible_date(d: NaiveDate) -> bool {
    is_eligible_on(d, local_today())
}

/// The next `count` bookable dates scanning forward from `from`, inclusive.
pub fn next_eligible_dates(from: NaiveDate, count: usize, today: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count.min(SCAN_HORIZON_DAYS as usize));
    for offset in 0..SCAN_HORIZON_DAYS {
        if dates.len() >= count {
            break;
        }
        match from.checked_add_days(Days::new(offset)) {
            Some(day) if is_eligible_on(day, today) => dates.push(day),
            Some(_) => {}
            None => break,
        }
    }
    dates
}

/// Dates offered to the calendar widget, starting from today.
pub fn upcoming_visit_dates(count: usize) -> Vec<NaiveDate> {
    let today = local_today();
    next_eligible_dates(today, count, today)
}

/// Times offered for `d`: the full set when the date is bookable, empty
/// otherwise. Advisory, for greying out controls; submission re-validates.
pub fn available_times(d: NaiveDate, today: NaiveDate) -> Vec<VisitTime> {
    if is_eligible_on(d, today) {
        VisitTime::ALL.to_vec()
    } else {
        Vec::new()
    }
}
