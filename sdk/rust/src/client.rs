use std::collections::BTreeMap;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

pub type Error = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: String,
    pub origin: String,
    pub hostname: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadersReport {
    pub client: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl HeadersReport {
    /// Look up a received header, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlowReport {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

pub struct OriginClient {
    client: Client,
    origin_url: String,
}

impl OriginClient {
    pub fn new(origin_url: &str) -> Self {
        Self::with_client(Client::new(), origin_url)
    }

    /// Use a preconfigured client (proxy settings, timeouts).
    pub fn with_client(client: Client, origin_url: &str) -> Self {
        Self {
            client,
            origin_url: origin_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /`
    pub async fn status(&self) -> Result<StatusReport, Error> {
        let resp = self.get("/").await?;
        expect_json(resp, StatusCode::OK).await
    }

    /// `GET /headers`, sending the extra headers given.
    pub async fn headers(&self, extra: &[(&str, &str)]) -> Result<HeadersReport, Error> {
        let mut req = self.client.get(format!("{}/headers", self.origin_url));
        for (name, value) in extra {
            req = req.header(*name, *value);
        }
        let resp = req.send().await?;
        expect_json(resp, StatusCode::OK).await
    }

    /// `GET /slow`; takes as long as the origin's configured delay.
    pub async fn slow(&self) -> Result<SlowReport, Error> {
        let resp = self.get("/slow").await?;
        expect_json(resp, StatusCode::OK).await
    }

    /// `GET /error`; succeeds only when the origin answers with its 500.
    pub async fn error(&self) -> Result<ErrorDetail, Error> {
        let resp = self.get("/error").await?;
        expect_json(resp, StatusCode::INTERNAL_SERVER_ERROR).await
    }

    /// Plain GET against any path.
    pub async fn get(&self, path: &str) -> Result<Response, reqwest::Error> {
        self.client
            .get(format!("{}{}", self.origin_url, path))
            .send()
            .await
    }
}

async fn expect_json<T: serde::de::DeserializeOwned>(
    resp: Response,
    expected: StatusCode,
) -> Result<T, Error> {
    let status = resp.status();
    let text = resp.text().await?;

    if status != expected {
        return Err(format!("Origin returned status {}: {}", status, text).into());
    }

    Ok(serde_json::from_str(&text)?)
}
