use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::transport::Transport;
use crate::error::TransportError;

/// Content type for the write body. A `text/plain` POST is a CORS "simple
/// request", so browsers and proxies in front of the endpoint never issue a
/// preflight `OPTIONS` for it. The endpoint does not answer preflights.
pub const SIMPLE_REQUEST_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// [`Transport`] over a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client. `timeout` of `None` leaves requests unbounded.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(format!("sheetsync/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_decode() {
        TransportError::MalformedBody(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: String) -> Result<String, TransportError> {
        tracing::debug!(request = %describe_as_curl("POST", url, &[], Some(&body)), "Write request");
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, SIMPLE_REQUEST_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        tracing::debug!(status = %resp.status(), "Write response");
        resp.text().await.map_err(map_reqwest_error)
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        tracing::debug!(request = %describe_as_curl("GET", url, query, None), "Read request");
        let mut req = self.client.get(url);
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = req.send().await.map_err(map_reqwest_error)?;
        tracing::debug!(status = %resp.status(), "Read response");
        resp.text().await.map_err(map_reqwest_error)
    }
}

/// Render a request as an equivalent `curl` command line for debug logs.
///
/// The `key` query parameter and the `key` field of a body are masked.
pub fn describe_as_curl(method: &str, url: &str, query: &[(&str, &str)], body: Option<&str>) -> String {
    let mut url_for_log = url.to_string();
    if !query.is_empty() {
        let query_string = query
            .iter()
            .map(|(k, v)| {
                let shown = if *k == "key" { "***" } else { *v };
                format!("{}={}", urlencoding::encode(k), urlencoding::encode(shown))
            })
            .collect::<Vec<String>>()
            .join("&");
        url_for_log = format!("{}?{}", url_for_log, query_string);
    }

    let mut parts = vec![
        "curl".to_string(),
        "-L".to_string(),
        format!("-X {}", method),
        format!("'{}'", url_for_log),
    ];
    if let Some(body) = body {
        parts.push(format!("-H 'Content-Type: {}'", SIMPLE_REQUEST_CONTENT_TYPE));
        let shown = mask_body_key(body);
        parts.push(format!("-d '{}'", shown.replace('\'', "'\\''")));
    }
    parts.join(" ")
}

fn mask_body_key(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(mut obj)) if obj.contains_key("key") => {
            obj.insert("key".into(), serde_json::Value::from("***"));
            serde_json::Value::Object(obj).to_string()
        }
        _ => body.to_string(),
    }
}
