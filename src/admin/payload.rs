//! JSON envelopes and error mapping for admin replies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::script::ScriptError;

/// `{"status":n,"msg":"..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReply {
    pub status: u8,
    pub msg: String,
}

impl StatusReply {
    pub fn success() -> Self {
        Self {
            status: 0,
            msg: "success".to_string(),
        }
    }
}

/// `{"status":0,"histroy":[...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryReply {
    pub status: u8,
    #[serde(rename = "histroy")]
    pub history: Vec<HistoryItem>,
}

/// One history entry, both fields base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(rename = "queryRaw")]
    pub query_raw: String,
    #[serde(rename = "bodyRaw")]
    pub body_raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("param invalid")]
    InvalidParameter,
    #[error("{0}")]
    InvalidScript(#[from] ScriptError),
    #[error("route not exist")]
    RouteNotExist,
    #[error("history not exist")]
    HistoryNotExist,
}

impl AdminError {
    pub fn status(&self) -> u8 {
        match self {
            AdminError::InvalidParameter | AdminError::InvalidScript(_) => 1,
            AdminError::RouteNotExist => 2,
            AdminError::HistoryNotExist => 3,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let body = StatusReply {
            status: self.status(),
            msg: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_reply_wire_names() {
        let reply = HistoryReply {
            status: 0,
            history: vec![HistoryItem {
                query_raw: "YT0x".into(),
                body_raw: "".into(),
            }],
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": 0, "histroy": [{"queryRaw": "YT0x", "bodyRaw": ""}]})
        );
    }

    #[test]
    fn error_statuses() {
        assert_eq!(AdminError::InvalidParameter.status(), 1);
        assert_eq!(AdminError::InvalidScript(ScriptError::Code).status(), 1);
        assert_eq!(AdminError::RouteNotExist.status(), 2);
        assert_eq!(AdminError::HistoryNotExist.status(), 3);
        assert_eq!(
            AdminError::InvalidScript(ScriptError::Code).to_string(),
            "cmd res_code format error"
        );
    }

    #[tokio::test]
    async fn error_renders_as_bad_request() {
        let response = AdminError::RouteNotExist.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let reply: StatusReply = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            reply,
            StatusReply {
                status: 2,
                msg: "route not exist".into()
            }
        );
    }
}
