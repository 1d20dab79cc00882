use serde::Serialize;
use std::fmt;

/// Coarse status buckets understood by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tag {
    Delivered,
    InTransit,
    Exception,
    OutForDelivery,
    ReadyForPickup,
    InfoReceived,
    Unknown,
}

/// Known status phrases, matched after lower-casing and trimming.
static STATUS_TAGS: &[(&str, Tag)] = &[
    ("delivered", Tag::Delivered),
    ("delivery", Tag::Delivered),
    ("shipped", Tag::InTransit),
    ("in transit", Tag::InTransit),
    ("transit", Tag::InTransit),
    ("dispatched", Tag::InTransit),
    ("pending", Tag::InfoReceived),
    ("processing", Tag::InfoReceived),
    ("exception", Tag::Exception),
    ("failed", Tag::Exception),
    ("out for delivery", Tag::OutForDelivery),
    ("ready for pickup", Tag::ReadyForPickup),
    ("picked up", Tag::ReadyForPickup),
];

impl Tag {
    /// Empty or missing status is `Unknown`; any other unrecognised phrase is
    /// `InfoReceived`.
    pub fn from_status(status: Option<&str>) -> Tag {
        let status = match status {
            Some(s) if !s.is_empty() => s,
            _ => return Tag::Unknown,
        };

        let key = status.to_lowercase();
        let key = key.trim();
        STATUS_TAGS
            .iter()
            .find(|(phrase, _)| *phrase == key)
            .map(|(_, tag)| *tag)
            .unwrap_or(Tag::InfoReceived)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Delivered => "Delivered",
            Tag::InTransit => "InTransit",
            Tag::Exception => "Exception",
            Tag::OutForDelivery => "OutForDelivery",
            Tag::ReadyForPickup => "ReadyForPickup",
            Tag::InfoReceived => "InfoReceived",
            Tag::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
