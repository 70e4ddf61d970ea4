//! Shared plumbing for HTTP-backed providers
//!
//! All remote backends speak JSON over HTTP. The helpers here enforce the
//! common contract: the transport must succeed, and a usable answer must be
//! `Content-Type: application/json`. Backend-specific error codes are mapped
//! by the individual adapters.

pub mod neutrino;
pub mod udger;
pub mod user_agent_api;

pub use neutrino::NeutrinoApiCom;
pub use udger::UdgerCom;
pub use user_agent_api::UserAgentApiCom;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::error::ParseError;

/// Builds the client every HTTP provider uses.
pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("ua-chain")
        .build()
        .expect("Failed to create HTTP client")
}

/// Response body with the metadata the adapters need after the connection
/// is done with.
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

pub(crate) async fn read_response(response: Response) -> Result<RawResponse, ParseError> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await?;

    Ok(RawResponse {
        status,
        content_type,
        body,
    })
}

/// Parses the body as JSON, failing when the backend did not declare
/// `application/json`. A charset suffix is tolerated.
pub(crate) fn json_body(url: &str, response: &RawResponse) -> Result<Value, ParseError> {
    let is_json = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("application/json"));

    if !is_json {
        return Err(ParseError::InvalidResponse {
            url: url.to_string(),
            reason: format!(
                "expected \"application/json\", got {:?}",
                response.content_type
            ),
        });
    }

    serde_json::from_str(&response.body).map_err(|e| ParseError::InvalidResponse {
        url: url.to_string(),
        reason: format!("body is not valid JSON: {e}"),
    })
}
