// src/fetch/mod.rs

use crate::error::LookupError;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use tokio::fs;
use tracing::debug;
use url::Url;

/// Fetches the raw CSV text of the sheet at `url`.
///
/// `http(s)` URLs cost exactly one GET; there is no retry and no caching.
/// `file` URLs are read from disk, which is how local runs and tests point
/// the adapter at a fixture. Any failure becomes `LookupError::UpstreamFetch`.
pub async fn fetch_sheet_csv(client: &Client, url: &Url) -> Result<String, LookupError> {
    let result = match url.scheme() {
        "http" | "https" => get_text(client, url).await,
        "file" => read_local(url).await,
        other => Err(anyhow!("unsupported sheet URL scheme: {}", other)),
    };

    result.map_err(|e| LookupError::UpstreamFetch(format!("{:#}", e)))
}

async fn get_text(client: &Client, url: &Url) -> Result<String> {
    debug!(%url, "GET sheet");
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status from {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))
}

async fn read_local(url: &Url) -> Result<String> {
    let path = url
        .to_file_path()
        .map_err(|_| anyhow!("invalid file URL {}", url))?;
    debug!(path = %path.display(), "reading local sheet");
    fs::read_to_string(&path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_file_url() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, "TrackingID,Status\nABC123,Delivered\n")?;
        let url = Url::from_file_path(tmp.path()).unwrap();

        let text = fetch_sheet_csv(&Client::new(), &url).await.unwrap();
        assert_eq!(text, "TrackingID,Status\nABC123,Delivered\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_is_upstream_error() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("missing.csv")).unwrap();

        let err = fetch_sheet_csv(&Client::new(), &url).await.unwrap_err();
        assert!(matches!(err, LookupError::UpstreamFetch(_)));
    }

    #[tokio::test]
    async fn test_refused_connection_is_upstream_error() {
        // grab a free port, then release it so nothing is listening
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = Url::parse(&format!("http://127.0.0.1:{}/sheet.csv", port)).unwrap();

        let err = fetch_sheet_csv(&Client::new(), &url).await.unwrap_err();
        match err {
            LookupError::UpstreamFetch(cause) => assert!(cause.contains("GET")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_is_upstream_error() {
        use warp::{http::StatusCode, Filter};

        let unavailable = warp::any()
            .map(|| warp::reply::with_status("unavailable", StatusCode::SERVICE_UNAVAILABLE));
        let (addr, server) = warp::serve(unavailable).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        let url = Url::parse(&format!("http://{}/sheet.csv", addr)).unwrap();
        match fetch_sheet_csv(&Client::new(), &url).await.unwrap_err() {
            LookupError::UpstreamFetch(cause) => {
                assert!(cause.contains("Non-success status"));
                assert!(cause.contains("503"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let url = Url::parse("ftp://example.com/sheet.csv").unwrap();
        let err = fetch_sheet_csv(&Client::new(), &url).await.unwrap_err();
        assert_eq!(
            err,
            LookupError::UpstreamFetch("unsupported sheet URL scheme: ftp".into())
        );
    }
}
