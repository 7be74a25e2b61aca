use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, Response};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("admin call failed with status {status}: {msg}")]
    Admin { status: u8, msg: String },
    #[error("history field is not valid base64")]
    Decode,
}

/// One served request, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub query_raw: String,
    pub body_raw: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct StatusReply {
    status: u8,
    #[serde(default)]
    msg: String,
}

#[derive(Debug, Deserialize)]
struct HistoryReply {
    #[serde(rename = "histroy")]
    history: Vec<HistoryItem>,
}

#[derive(Debug, Deserialize)]
struct HistoryItem {
    #[serde(rename = "queryRaw")]
    query_raw: String,
    #[serde(rename = "bodyRaw")]
    body_raw: String,
}

#[derive(Clone)]
pub struct MockClient {
    client: Client,
    base_url: String,
    admin_prefix: String,
    identity_header: String,
    region: Option<String>,
}

impl MockClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_prefix: "/internal".to_string(),
            identity_header: "Mock-From".to_string(),
            region: None,
        }
    }

    /// Act on (and call into) the region named `key` instead of the caller address.
    pub fn with_region(mut self, key: &str) -> Self {
        self.region = Some(key.to_string());
        self
    }

    /// For servers configured with a non-default `admin.path_prefix`.
    pub fn with_admin_prefix(mut self, prefix: &str) -> Self {
        self.admin_prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    /// For servers configured with a non-default `region.identity_header`.
    pub fn with_identity_header(mut self, name: &str) -> Self {
        self.identity_header = name.to_string();
        self
    }

    /// Register a route. `script` is plain text; it is base64 encoded here.
    pub async fn add(&self, method: &str, path: &str, script: &str) -> Result<(), SdkError> {
        let cmd = STANDARD.encode(script);
        let res = self
            .admin("add", &[("method", method), ("path", path), ("cmd", cmd.as_str())])
            .await?;
        expect_success(res).await
    }

    pub async fn remove(&self, method: &str, path: &str) -> Result<(), SdkError> {
        let res = self
            .admin("remove", &[("method", method), ("path", path)])
            .await?;
        expect_success(res).await
    }

    pub async fn remove_all(&self) -> Result<(), SdkError> {
        let res = self.admin("removeAll", &[]).await?;
        expect_success(res).await
    }

    pub async fn history(&self, method: &str, path: &str) -> Result<Vec<HistoryRecord>, SdkError> {
        let res = self
            .admin("histroy", &[("method", method), ("path", path)])
            .await?;
        let text = res.text().await?;

        if let Ok(reply) = serde_json::from_str::<HistoryReply>(&text) {
            return reply
                .history
                .into_iter()
                .map(|item| {
                    let query = STANDARD.decode(item.query_raw).map_err(|_| SdkError::Decode)?;
                    let body_raw = STANDARD.decode(item.body_raw).map_err(|_| SdkError::Decode)?;
                    Ok(HistoryRecord {
                        query_raw: String::from_utf8_lossy(&query).into_owned(),
                        body_raw,
                    })
                })
                .collect();
        }
        Err(admin_error(&text))
    }

    pub async fn clear_history(&self, method: &str, path: &str) -> Result<(), SdkError> {
        let res = self
            .admin("clearHistroy", &[("method", method), ("path", path)])
            .await?;
        expect_success(res).await
    }

    /// Plain request to a mocked route, carrying the region header if set.
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.region {
            Some(region) => builder.header(self.identity_header.as_str(), region),
            None => builder,
        }
    }

    async fn admin(&self, operation: &str, form: &[(&str, &str)]) -> Result<Response, reqwest::Error> {
        let path = format!("{}/{}", self.admin_prefix, operation);
        self.request(reqwest::Method::POST, &path).form(form).send().await
    }
}

async fn expect_success(res: Response) -> Result<(), SdkError> {
    let text = res.text().await?;
    match serde_json::from_str::<StatusReply>(&text) {
        Ok(reply) if reply.status == 0 => Ok(()),
        _ => Err(admin_error(&text)),
    }
}

fn admin_error(text: &str) -> SdkError {
    match serde_json::from_str::<StatusReply>(text) {
        Ok(reply) => SdkError::Admin {
            status: reply.status,
            msg: reply.msg,
        },
        Err(_) => SdkError::Admin {
            status: u8::MAX,
            msg: text.to_string(),
        },
    }
}
