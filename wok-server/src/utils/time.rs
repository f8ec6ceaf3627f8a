//! Time helpers

use chrono::{FixedOffset, Local, NaiveDate, Offset};

/// Today's calendar date and UTC offset in the restaurant's local zone.
///
/// Revenue rollups group served orders by local day, not UTC day.
pub fn local_today() -> (NaiveDate, FixedOffset) {
    let now = Local::now();
    (now.date_naive(), now.offset().fix())
}
