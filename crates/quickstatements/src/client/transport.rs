//! Transport interface for submitting batches.
//!
//! This crate produces the request and interprets the response; moving bytes
//! over the network is left to a [`Transport`] implementation supplied by
//! the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::config::Credentials;
use crate::error::TransportError;

/// Form fields for the QuickStatements `api.php` import action.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub action: &'static str,
    pub submit: u8,
    pub format: &'static str,
    pub site: String,
    /// 0 disables merging of CREATE with the following LAST lines.
    pub compress: u8,
    pub username: String,
    pub token: String,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batchname: Option<String>,
}

impl Submission {
    pub fn new(
        payload: String,
        batch_name: &str,
        site: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            action: "import",
            submit: 1,
            format: crate::FORMAT_VERSION,
            site: site.into(),
            compress: 0,
            username: credentials.username,
            token: credentials.token,
            data: payload,
            batchname: (!batch_name.is_empty()).then(|| batch_name.to_string()),
        }
    }
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("action", &self.action)
            .field("site", &self.site)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("batchname", &self.batchname)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Batch id as returned by the service, which may send a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BatchId {
    Number(u64),
    Text(String),
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchId::Number(n) => write!(f, "{n}"),
            BatchId::Text(s) => f.write_str(s),
        }
    }
}

/// Raw response body of an import request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchResponse {
    pub status: String,
    #[serde(default)]
    pub batch_id: Option<BatchId>,
}

impl BatchResponse {
    /// Parses a JSON response body.
    pub fn from_json(body: &str) -> Result<Self, TransportError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Interprets the response, resolving the batch URL against `base_url`.
    pub fn into_result(self, base_url: &str) -> Result<BatchResult, TransportError> {
        if self.status != "OK" {
            warn!(status = %self.status, "batch rejected by remote");
            return Err(TransportError::Rejected {
                status: self.status,
            });
        }
        let batch_id = self.batch_id.ok_or(TransportError::MissingBatchId)?.to_string();
        let batch_url = format!("{}/#/batch/{}", base_url.trim_end_matches('/'), batch_id);
        Ok(BatchResult {
            batch_id,
            batch_url,
        })
    }
}

/// A successfully started batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub batch_id: String,
    pub batch_url: String,
}

/// Sends a submission to a QuickStatements instance.
pub trait Transport {
    fn submit(&self, endpoint: &str, submission: &Submission) -> Result<BatchResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_fields() {
        let submission = Submission::new(
            "CREATE".to_string(),
            "my batch",
            "wikidata",
            Credentials::new("user", "secret"),
        );
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["action"], "import");
        assert_eq!(json["submit"], 1);
        assert_eq!(json["format"], "v1");
        assert_eq!(json["compress"], 0);
        assert_eq!(json["data"], "CREATE");
        assert_eq!(json["batchname"], "my batch");
        assert!(!format!("{submission:?}").contains("secret"));
    }

    #[test]
    fn test_unnamed_submission_omits_batchname() {
        let submission = Submission::new(String::new(), "", "wikidata", Credentials::new("u", "t"));
        let json = serde_json::to_value(&submission).unwrap();
        assert!(json.get("batchname").is_none());
    }

    #[test]
    fn test_response_ok() {
        let response = BatchResponse::from_json(r#"{"status":"OK","batch_id":12345}"#).unwrap();
        let result = response.into_result("https://quickstatements.toolforge.org/").unwrap();
        assert_eq!(result.batch_id, "12345");
        assert_eq!(
            result.batch_url,
            "https://quickstatements.toolforge.org/#/batch/12345"
        );

        let text_id = BatchResponse::from_json(r#"{"status":"OK","batch_id":"77"}"#).unwrap();
        assert_eq!(text_id.batch_id, Some(BatchId::Text("77".to_string())));
    }

    #[test]
    fn test_response_rejected() {
        let response = BatchResponse::from_json(r#"{"status":"No such user"}"#).unwrap();
        assert!(matches!(
            response.into_result("https://x"),
            Err(TransportError::Rejected { status }) if status == "No such user"
        ));
    }

    #[test]
    fn test_response_missing_id() {
        let response = BatchResponse::from_json(r#"{"status":"OK"}"#).unwrap();
        assert!(matches!(
            response.into_result("https://x"),
            Err(TransportError::MissingBatchId)
        ));
    }

    #[test]
    fn test_response_malformed() {
        assert!(matches!(
            BatchResponse::from_json("<html>"),
            Err(TransportError::MalformedResponse(_))
        ));
    }
}
