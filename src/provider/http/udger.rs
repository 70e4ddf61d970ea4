//! udger.com API adapter
//!
//! The backend reports its state through a numeric `flag` field:
//! 3 = no match, 4 = bad access key, 6 = quota exhausted, other values
//! above 3 are protocol errors.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::ParseError;
use crate::filter::{Field, Group, PlaceholderFilter};
use crate::model::UserAgent;
use crate::provider::http::{build_client, json_body, read_response};
use crate::provider::traits::Provider;
use crate::provider::types::{
    BotCapabilities, DetectionCapabilities, DeviceCapabilities, NamedWithVersion,
};

/// Default base URL for the udger.com API
const DEFAULT_BASE_URL: &str = "http://api.udger.com";

const CAPABILITIES: DetectionCapabilities = DetectionCapabilities {
    browser: NamedWithVersion {
        name: true,
        version: true,
    },
    rendering_engine: NamedWithVersion {
        name: true,
        version: false,
    },
    operating_system: NamedWithVersion {
        name: true,
        version: false,
    },
    device: DeviceCapabilities {
        model: false,
        brand: false,
        device_type: true,
        is_mobile: false,
        is_touch: false,
    },
    bot: BotCapabilities {
        is_bot: true,
        name: false,
        bot_type: false,
    },
};

static FILTER: LazyLock<PlaceholderFilter> = LazyLock::new(|| {
    PlaceholderFilter::builder()
        .general(&[r"^unknown$"])
        .build()
        .expect("Failed to compile placeholder patterns")
});

/// Detection section of the backend response.
#[derive(Debug, Clone, Default, Deserialize)]
struct UdgerInfo {
    #[serde(rename = "type")]
    ua_type: Option<String>,
    ua_family: Option<String>,
    ua_ver: Option<String>,
    ua_engine: Option<String>,
    os_family: Option<String>,
    device_name: Option<String>,
}

/// HTTP provider for udger.com
pub struct UdgerCom {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl UdgerCom {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a provider against a custom base URL (primarily for tests).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        UdgerCom {
            client: build_client(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn fetch(&self, user_agent: &str) -> Result<Value, ParseError> {
        let url = format!("{}/parse", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[("accesskey", self.api_key.as_str()), ("uastrig", user_agent)])
            .send()
            .await?;

        let response = read_response(response).await?;

        if response.status != reqwest::StatusCode::OK {
            warn!("udger.com returned status {}: {}", response.status, url);
            return Err(ParseError::InvalidResponse {
                url,
                reason: format!("unexpected status: {}", response.status),
            });
        }

        let content = json_body(&url, &response)?;

        match content.get("flag").and_then(Value::as_i64) {
            Some(3) => return Err(ParseError::NoResult(user_agent.to_string())),
            Some(4) => return Err(ParseError::InvalidCredentials { provider: "UdgerCom" }),
            Some(6) => return Err(ParseError::LimitExceeded { provider: "UdgerCom" }),
            Some(flag) if flag > 3 => {
                return Err(ParseError::InvalidResponse {
                    url,
                    reason: format!("backend reported error flag {flag}"),
                });
            }
            _ => {}
        }

        if content.get("info").map(Value::is_object) != Some(true) {
            return Err(ParseError::InvalidResponse {
                url,
                reason: "\"info\" section is missing".to_string(),
            });
        }

        Ok(content)
    }

    fn is_bot(info: &UdgerInfo) -> bool {
        info.ua_type.as_deref() == Some("Robot")
    }

    fn hydrate_bot(result: &mut UserAgent, info: &UdgerInfo) {
        let bot = result.bot_mut();
        bot.set_is_bot(Some(true));
        bot.set_name(FILTER.real(info.ua_family.as_deref(), None));
    }

    fn hydrate_client(result: &mut UserAgent, info: &UdgerInfo) {
        let browser = result.browser_mut();
        browser.set_name(FILTER.real(
            info.ua_family.as_deref(),
            Some((Group::Browser, Field::Name)),
        ));
        browser
            .version_mut()
            .set_complete(FILTER.real(info.ua_ver.as_deref(), None));

        result
            .rendering_engine_mut()
            .set_name(FILTER.real(info.ua_engine.as_deref(), None));

        result
            .operating_system_mut()
            .set_name(FILTER.real(info.os_family.as_deref(), None));

        result
            .device_mut()
            .set_device_type(FILTER.real(info.device_name.as_deref(), None));
    }
}

#[async_trait::async_trait]
impl Provider for UdgerCom {
    fn name(&self) -> &'static str {
        "UdgerCom"
    }

    fn homepage(&self) -> &'static str {
        "https://udger.com/"
    }

    fn capabilities(&self) -> DetectionCapabilities {
        CAPABILITIES
    }

    async fn parse(
        &self,
        user_agent: &str,
        _headers: &HashMap<String, String>,
    ) -> Result<UserAgent, ParseError> {
        // an empty user agent makes no sense for a remote lookup
        if user_agent.is_empty() {
            return Err(ParseError::NoResult(user_agent.to_string()));
        }

        let content = self.fetch(user_agent).await?;

        let info: UdgerInfo =
            serde_json::from_value(content["info"].clone()).unwrap_or_default();

        let mut result = UserAgent::new(self.name(), self.version());
        result.set_provider_result_raw(content);

        if Self::is_bot(&info) {
            Self::hydrate_bot(&mut result, &info);
            return Ok(result);
        }

        Self::hydrate_client(&mut result, &info);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    async fn provider(server: &Server) -> UdgerCom {
        UdgerCom::with_base_url("test-key", &server.url())
    }

    #[tokio::test]
    async fn parse_hydrates_browser_result() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/parse")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "flag": 1,
                    "info": {
                        "type": "Browser",
                        "ua_family": "Firefox",
                        "ua_ver": "3.0.1",
                        "ua_engine": "Gecko",
                        "os_family": "Windows",
                        "device_name": "Personal computer"
                    }
                }"#,
            )
            .create_async()
            .await;

        let result = provider(&server)
            .await
            .parse("A real user agent...", &HashMap::new())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.provider_name(), Some("UdgerCom"));
        assert_eq!(result.browser().name(), Some("Firefox"));
        assert_eq!(result.browser().version().major(), Some(3));
        assert_eq!(result.browser().version().complete(), Some("3.0.1"));
        assert_eq!(result.rendering_engine().name(), Some("Gecko"));
        assert_eq!(result.operating_system().name(), Some("Windows"));
        assert_eq!(result.device().device_type(), Some("Personal computer"));
        assert!(!result.is_bot());
    }

    #[tokio::test]
    async fn placeholder_values_become_none() {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/parse")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "flag": 1,
                    "info": {
                        "ua_family": "unknown",
                        "os_family": "Windows"
                    }
                }"#,
            )
            .create_async()
            .await;

        let result = provider(&server)
            .await
            .parse("A real user agent...", &HashMap::new())
            .await
            .unwrap();

        assert_eq!(result.browser().name(), None);
        assert_eq!(result.operating_system().name(), Some("Windows"));
    }

    #[tokio::test]
    async fn robot_results_populate_only_the_bot() {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/parse")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "flag": 1,
                    "info": {
                        "type": "Robot",
                        "ua_family": "Googlebot"
                    }
                }"#,
            )
            .create_async()
            .await;

        let result = provider(&server)
            .await
            .parse("A real user agent...", &HashMap::new())
            .await
            .unwrap();

        assert!(result.is_bot());
        assert_eq!(result.bot().name(), Some("Googlebot"));
        assert_eq!(result.browser().name(), None);
        assert_eq!(result.operating_system().name(), None);
    }

    #[tokio::test]
    async fn flag_3_means_no_result() {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/parse")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"flag": 3}"#)
            .create_async()
            .await;

        let err = provider(&server)
            .await
            .parse("A real user agent...", &HashMap::new())
            .await
            .unwrap_err();

        assert!(err.is_no_result());
    }

    #[tokio::test]
    async fn flag_4_means_invalid_credentials() {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/parse")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"flag": 4}"#)
            .create_async()
            .await;

        let err = provider(&server)
            .await
            .parse("A real user agent...", &HashMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ParseError::InvalidCredentials { .. }));
    }

    #[tokio::test]
    async fn flag_6_means_limit_exceeded() {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/parse")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"flag": 6}"#)
            .create_async()
            .await;

        let err = provider(&server)
            .await
            .parse("A real user agent...", &HashMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ParseError::LimitExceeded { .. }));
    }

    #[tokio::test]
    async fn other_error_flags_are_invalid_responses() {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/parse")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"flag": 5}"#)
            .create_async()
            .await;

        let err = provider(&server)
            .await
            .parse("A real user agent...", &HashMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ParseError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn non_json_response_is_an_invalid_response() {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/parse")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html></html>")
            .create_async()
            .await;

        let err = provider(&server)
            .await
            .parse("A real user agent...", &HashMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ParseError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn missing_info_section_is_an_invalid_response() {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/parse")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"flag": 1}"#)
            .create_async()
            .await;

        let err = provider(&server)
            .await
            .parse("A real user agent...", &HashMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ParseError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn empty_user_agent_skips_the_request() {
        let mut server = Server::new_async().await;

        let mock = server.mock("POST", "/parse").expect(0).create_async().await;

        let err = provider(&server)
            .await
            .parse("", &HashMap::new())
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(err.is_no_result());
    }
}
