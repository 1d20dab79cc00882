// src/tracking/mod.rs

use crate::process::{format_date_time, MatchedRow, Tag};
use serde::Serialize;

pub const CARRIER_SLUG: &str = "custom-carrier";

#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub meta: Meta,
    pub data: TrackingData,
}

#[derive(Debug, Serialize)]
pub struct Meta {
    pub code: u16,
}

#[derive(Debug, Serialize)]
pub struct TrackingData {
    pub tracking: Tracking,
}

#[derive(Debug, Serialize)]
pub struct Tracking {
    pub id: String,
    pub tracking_number: String,
    pub tag: Tag,
    pub subtag: String,
    pub origin_country: Option<String>,
    pub destination_country: Option<String>,
    pub checkpoints: Vec<Checkpoint>,
}

#[derive(Debug, Serialize)]
pub struct Checkpoint {
    pub slug: &'static str,
    pub city: String,
    pub message: String,
    pub checkpoint_time: String,
    pub country: Option<String>,
    pub tag: Tag,
    pub subtag: String,
    pub raw_message: String,
}

/// Non-empty cell for `column`, if the sheet has one.
fn cell<'a>(row: &'a MatchedRow, column: &str) -> Option<&'a str> {
    row.get(column).map(String::as_str).filter(|v| !v.is_empty())
}

impl Tracking {
    /// Builds the aggregator's tracking record from a matched sheet row. Always
    /// exactly one checkpoint.
    pub fn from_row(row: &MatchedRow, tracking_number: &str) -> Self {
        let id = cell(row, "TrackingID").unwrap_or(tracking_number).to_string();
        let status = cell(row, "Status");
        let location = cell(row, "Location");

        let tag = Tag::from_status(status);
        let subtag = status.unwrap_or("Unknown").to_string();

        let checkpoint = Checkpoint {
            slug: CARRIER_SLUG,
            city: location.unwrap_or("Unknown").to_string(),
            message: status.unwrap_or("Status unknown").to_string(),
            checkpoint_time: format_date_time(cell(row, "Date"), cell(row, "Time")),
            country: None,
            tag,
            subtag: subtag.clone(),
            raw_message: format!(
                "Location: {}, Status: {}",
                location.unwrap_or("Unknown"),
                status.unwrap_or("Unknown")
            ),
        };

        Self {
            id: id.clone(),
            tracking_number: id,
            tag,
            subtag,
            origin_country: None,
            destination_country: None,
            checkpoints: vec![checkpoint],
        }
    }
}

impl TrackingResponse {
    pub fn ok(tracking: Tracking) -> Self {
        Self {
            meta: Meta { code: 200 },
            data: TrackingData { tracking },
        }
    }
}
