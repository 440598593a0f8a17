use time::OffsetDateTime;

pub fn current_time() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
