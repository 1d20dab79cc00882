// src/server/mod.rs

pub mod routes;

use crate::{
    error::LookupError,
    fetch::fetch_sheet_csv,
    process::SheetTable,
    tracking::{Tracking, TrackingResponse},
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// One inbound webhook call, shaped like a serverless HTTP event.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    #[serde(rename = "httpMethod")]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Value,
}

impl WebhookResponse {
    pub fn from_error(err: &LookupError) -> Self {
        Self {
            status_code: err.status_code(),
            body: err.to_body(),
        }
    }
}

/// Only `POST` with a JSON body carrying a non-empty `tracking_number` string
/// gets through.
pub fn validate(request: &WebhookRequest) -> Result<String, LookupError> {
    if request.http_method != "POST" {
        return Err(LookupError::MethodNotAllowed);
    }

    let body: Value = request
        .body
        .as_deref()
        .and_then(|b| serde_json::from_str(b).ok())
        .ok_or(LookupError::InvalidBody)?;

    match body.get("tracking_number").and_then(Value::as_str) {
        Some(n) if !n.is_empty() => Ok(n.to_string()),
        _ => Err(LookupError::InvalidBody),
    }
}

/// Fetch the sheet at `sheet_url`, find `tracking_number` and build the
/// aggregator response.
#[instrument(level = "info", skip(client), fields(url = %sheet_url))]
pub async fn lookup_tracking(
    client: &Client,
    sheet_url: &Url,
    tracking_number: &str,
) -> Result<TrackingResponse, LookupError> {
    info!("fetching sheet");
    let csv = fetch_sheet_csv(client, sheet_url).await?;
    debug!(
        preview = %csv.chars().take(200).collect::<String>(),
        "sheet data received"
    );

    let table = SheetTable::parse(&csv);
    let row = match table.find(tracking_number) {
        Some(row) => row,
        None => {
            warn!("tracking number not found");
            return Err(LookupError::NotFound);
        }
    };
    debug!(?row, "found tracking data");

    Ok(TrackingResponse::ok(Tracking::from_row(&row, tracking_number)))
}

/// The adapter itself: a shared HTTP client plus the sheet it reads.
#[derive(Debug, Clone)]
pub struct Webhook {
    client: Client,
    sheet_url: Url,
}

impl Webhook {
    pub fn new(client: Client, sheet_url: Url) -> Self {
        Self { client, sheet_url }
    }

    /// Never fails: every error becomes a status code and JSON body.
    pub async fn handle(&self, request: WebhookRequest) -> WebhookResponse {
        match self.respond(&request).await {
            Ok(body) => {
                debug!(%body, "sending response");
                WebhookResponse {
                    status_code: 200,
                    body,
                }
            }
            Err(err) => {
                match &err {
                    LookupError::UpstreamFetch(_) | LookupError::Internal(_) => {
                        error!(error = %err, "lookup failed")
                    }
                    _ => debug!(error = %err, "request rejected"),
                }
                WebhookResponse::from_error(&err)
            }
        }
    }

    async fn respond(&self, request: &WebhookRequest) -> Result<Value, LookupError> {
        let tracking_number = validate(request)?;
        info!(%tracking_number, "looking up tracking number");

        let response = lookup_tracking(&self.client, &self.sheet_url, &tracking_number).await?;
        Ok(serde_json::to_value(response)?)
    }
}
