// src/server/routes.rs

use super::{Webhook, WebhookRequest};
use std::{convert::Infallible, sync::Arc};
use warp::{
    http::{Method, StatusCode},
    hyper::body::Bytes,
    reject::Rejection,
    reply::Reply,
    Filter,
};

pub const SERVICE_NAME: &str = "trackhook";

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME
    })))
}

async fn handle_webhook(
    method: Method,
    body: Bytes,
    webhook: Arc<Webhook>,
) -> Result<impl Reply, Rejection> {
    let request = WebhookRequest {
        http_method: method.as_str().to_string(),
        body: String::from_utf8(body.to_vec())
            .ok()
            .filter(|b| !b.is_empty()),
    };

    let response = webhook.handle(request).await;
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Ok(warp::reply::with_status(
        warp::reply::json(&response.body),
        status,
    ))
}

fn with_webhook(
    webhook: Arc<Webhook>,
) -> impl Filter<Extract = (Arc<Webhook>,), Error = Infallible> + Clone {
    warp::any().map(move || webhook.clone())
}

/// `GET /health`, plus the webhook on `/webhook` and `/` for every method so
/// that wrong methods get the JSON 405 rather than warp's default rejection.
pub fn routes(
    webhook: Arc<Webhook>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(health_check);

    let hook_path = warp::path("webhook")
        .and(warp::path::end())
        .or(warp::path::end())
        .unify();

    let hook = hook_path
        .and(warp::method())
        .and(warp::body::bytes())
        .and(with_webhook(webhook))
        .and_then(handle_webhook);

    health.or(hook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;
    use serde_json::{json, Value};
    use std::io::Write;
    use tempfile::NamedTempFile;
    use url::Url;

    fn fixture() -> (NamedTempFile, Arc<Webhook>) {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            "TrackingID,Status,Location,Date,Time\nABC123,Out for delivery,Berlin,2024-02-02,08:15:00\n"
        )
        .unwrap();
        let url = Url::from_file_path(tmp.path()).unwrap();
        (tmp, Arc::new(Webhook::new(Client::new(), url)))
    }

    #[tokio::test]
    async fn test_health_check() {
        let (_tmp, hook) = fixture();
        let resp = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&routes(hook))
            .await;

        assert_eq!(resp.status(), 200);
        let body: Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_webhook_post() {
        let (_tmp, hook) = fixture();
        let resp = warp::test::request()
            .method("POST")
            .path("/webhook")
            .body(r#"{"tracking_number":"ABC123"}"#)
            .reply(&routes(hook))
            .await;

        assert_eq!(resp.status(), 200);
        let body: Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["data"]["tracking"]["tag"], "OutForDelivery");
        assert_eq!(
            body["data"]["tracking"]["checkpoints"][0]["checkpoint_time"],
            "2024-02-02T08:15:00Z"
        );
    }

    #[tokio::test]
    async fn test_webhook_root_path_and_wrong_method() {
        let (_tmp, hook) = fixture();
        let filter = routes(hook);

        let resp = warp::test::request()
            .method("POST")
            .path("/")
            .body(r#"{"tracking_number":"NOPE"}"#)
            .reply(&filter)
            .await;
        assert_eq!(resp.status(), 404);

        let resp = warp::test::request()
            .method("GET")
            .path("/webhook")
            .reply(&filter)
            .await;
        assert_eq!(resp.status(), 405);
        let body: Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body, json!({ "error": "Method Not Allowed" }));
    }

    #[tokio::test]
    async fn test_webhook_missing_body() {
        let (_tmp, hook) = fixture();
        let resp = warp::test::request()
            .method("POST")
            .path("/webhook")
            .reply(&routes(hook))
            .await;
        assert_eq!(resp.status(), 400);
    }
}
