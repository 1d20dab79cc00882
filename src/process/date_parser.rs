use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Timelike, Utc};

/// Time of day used when the sheet has a date but no time.
pub const DEFAULT_TIME: &str = "12:00:00";

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    MissingDate,
    Unparseable(String),
}

/// Outcome of reading a checkpoint timestamp from the sheet's date/time cells.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckpointTime {
    Parsed(DateTime<Utc>),
    Fallback(FallbackReason),
}

impl CheckpointTime {
    pub fn from_fields(date: Option<&str>, time: Option<&str>) -> Self {
        let date = match date.map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => return CheckpointTime::Fallback(FallbackReason::MissingDate),
        };

        let mut stamp = match time.map(str::trim) {
            Some(t) if !t.is_empty() => format!("{}T{}", date, t),
            _ => format!("{}T{}", date, DEFAULT_TIME),
        };
        if !stamp.contains('Z') && !stamp.contains('+') {
            stamp.push('Z');
        }

        match parse_timestamp(&stamp) {
            Some(dt) => CheckpointTime::Parsed(dt),
            None => CheckpointTime::Fallback(FallbackReason::Unparseable(stamp)),
        }
    }

    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            CheckpointTime::Parsed(dt) => *dt,
            CheckpointTime::Fallback(_) => now,
        }
    }
}

/// ISO-8601 UTC timestamp for a checkpoint. Never fails: anything missing or
/// unparseable becomes the current instant.
pub fn format_date_time(date: Option<&str>, time: Option<&str>) -> String {
    let checkpoint = CheckpointTime::from_fields(date, time);
    if let CheckpointTime::Fallback(reason) = &checkpoint {
        tracing::warn!(?reason, "checkpoint time falls back to now");
    }
    to_iso(checkpoint.resolve(Utc::now()))
}

pub fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` followed by `Z` or a numeric offset.
/// Leap seconds (`:60`) are rejected.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    parse_with_offset(s).filter(|dt| dt.nanosecond() < 1_000_000_000)
}

fn parse_with_offset(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let (local, offset) = split_offset(s)?;
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(local, fmt).ok())?;

    naive
        .and_local_timezone(offset)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Splits a trailing `Z` or `±HH:MM` / `±HHMM` offset off the timestamp.
fn split_offset(s: &str) -> Option<(&str, FixedOffset)> {
    if let Some(local) = s.strip_suffix('Z') {
        return Some((local, FixedOffset::east_opt(0)?));
    }

    let t = s.find('T')?;
    let idx = s[t..].rfind(|c: char| c == '+' || c == '-').map(|i| i + t)?;
    let (local, zone) = s.split_at(idx);
    let sign = if zone.starts_with('-') { -1 } else { 1 };
    let digits: String = zone[1..].chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[0..2].parse().ok()?;
    let minutes: i32 = digits[2..4].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).map(|o| (local, o))
}
