/// Formats a booking reference for a calendar date and a per-date sequence
/// number: `BK-<YYYYMMDD>-<NNN>`. The sequence is zero-padded to 3 digits
/// but not truncated beyond that.
pub fn booking_reference(date: &str, sequence: i64) -> String {
    // The date may arrive as a datetime string; keep the date part only.
    let date_only = date.split_whitespace().next().unwrap_or(date);
    format!("BK-{}-{:03}", date_only.replace('-', ""), sequence)
}
