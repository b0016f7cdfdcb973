use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Timestamp layout used for the `dtime` prefix.
pub(crate) const ENTRY_TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Current time in the local offset, or UTC when the offset is unavailable.
pub(crate) fn now() -> OffsetDateTime {
    let utc = OffsetDateTime::now_utc();
    UtcOffset::current_local_offset().map_or(utc, |offset| utc.to_offset(offset))
}

pub(crate) fn format(moment: OffsetDateTime) -> String {
    moment
        .format(ENTRY_TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| "1970-01-01 00:00:00".to_owned())
}
