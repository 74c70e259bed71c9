use time::OffsetDateTime;

/// Current instant in UTC.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Today's date in UTC, used as the upper bound for dates of birth.
pub fn today_utc() -> time::Date {
    OffsetDateTime::now_utc().date()
}
