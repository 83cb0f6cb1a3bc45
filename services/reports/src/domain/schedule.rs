use chrono::{DateTime, Duration, Months, Utc};

use lori_domain::report::ReportFrequency;

/// Next due date for a report processed at `now`.
///
/// Adds one day, seven days, or one calendar month to `now`. Monthly steps
/// clamp to the last day of the target month (Jan 31 → Feb 29 in a leap
/// year, Feb 28 otherwise). `None` only when the result leaves chrono's range.
pub fn next_report_date(frequency: ReportFrequency, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match frequency {
        ReportFrequency::Daily => now.checked_add_signed(Duration::days(1)),
        ReportFrequency::Weekly => now.checked_add_signed(Duration::days(7)),
        ReportFrequency::Monthly => now.checked_add_months(Months::new(1)),
    }
}
