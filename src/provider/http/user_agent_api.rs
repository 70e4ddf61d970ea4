//! useragentapi.com API adapter
//!
//! Credentials travel in the URL path: `GET /{apiKey}/{encoded user agent}`.
//! Errors come back as string codes in an `error.code` field.

use std::collections::HashMap;
use std::sync::LazyLock;

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::ParseError;
use crate::filter::PlaceholderFilter;
use crate::model::UserAgent;
use crate::provider::http::{build_client, json_body, read_response};
use crate::provider::traits::Provider;
use crate::provider::types::{
    BotCapabilities, DetectionCapabilities, DeviceCapabilities, NamedWithVersion,
};

/// Default base URL for the useragentapi.com API
const DEFAULT_BASE_URL: &str = "https://useragentapi.com/api/v3/json";

const CAPABILITIES: DetectionCapabilities = DetectionCapabilities {
    browser: NamedWithVersion {
        name: true,
        version: true,
    },
    rendering_engine: NamedWithVersion {
        name: true,
        version: true,
    },
    operating_system: NamedWithVersion {
        name: false,
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
        name: true,
        bot_type: false,
    },
};

// the backend has no known placeholder sentinels
static FILTER: LazyLock<PlaceholderFilter> = LazyLock::new(PlaceholderFilter::default);

#[derive(Debug, Clone, Default, Deserialize)]
struct ApiData {
    platform_name: Option<String>,
    platform_type: Option<String>,
    browser_name: Option<String>,
    browser_version: Option<String>,
    engine_name: Option<String>,
    engine_version: Option<String>,
}

/// HTTP provider for useragentapi.com
pub struct UserAgentApiCom {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl UserAgentApiCom {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a provider against a custom base URL (primarily for tests).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        UserAgentApiCom {
            client: build_client(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn request_url(&self, user_agent: &str) -> Result<Url, ParseError> {
        let invalid_base = |reason: String| ParseError::InvalidResponse {
            url: self.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid_base(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| invalid_base("base URL cannot carry path segments".to_string()))?
            .push(&self.api_key)
            .push(user_agent);

        Ok(url)
    }

    fn error_code(content: &Value) -> Option<&str> {
        content
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(Value::as_str)
    }

    async fn fetch(&self, user_agent: &str) -> Result<Value, ParseError> {
        let url = self.request_url(user_agent)?;

        let response = self.client.get(url.clone()).send().await?;
        let response = read_response(response).await?;

        // the backend wraps rejections in a 400 with an error code
        if response.status == reqwest::StatusCode::BAD_REQUEST {
            let content: Value = serde_json::from_str(&response.body).unwrap_or(Value::Null);

            match Self::error_code(&content) {
                Some("key_invalid") => {
                    return Err(ParseError::InvalidCredentials {
                        provider: "UserAgentApiCom",
                    });
                }
                Some("useragent_invalid") => {
                    return Err(ParseError::InvalidResponse {
                        url: url.to_string(),
                        reason: format!("user agent is invalid \"{user_agent}\""),
                    });
                }
                _ => {}
            }
        }

        if response.status != reqwest::StatusCode::OK {
            warn!(
                "useragentapi.com returned status {}: {}",
                response.status, url
            );
            return Err(ParseError::InvalidResponse {
                url: url.to_string(),
                reason: format!("unexpected status: {}", response.status),
            });
        }

        let content = json_body(url.as_str(), &response)?;

        if Self::error_code(&content) == Some("useragent_not_found") {
            return Err(ParseError::NoResult(user_agent.to_string()));
        }

        match content.get("data") {
            Some(data) if data.is_object() => Ok(data.clone()),
            _ => Err(ParseError::InvalidResponse {
                url: url.to_string(),
                reason: "\"data\" section is missing".to_string(),
            }),
        }
    }

    fn is_bot(data: &ApiData) -> bool {
        data.platform_type.as_deref() == Some("Bot")
    }

    fn hydrate_bot(result: &mut UserAgent, data: &ApiData) {
        let bot = result.bot_mut();
        bot.set_is_bot(Some(true));
        bot.set_name(FILTER.real(data.platform_name.as_deref(), None));
    }

    fn hydrate_client(result: &mut UserAgent, data: &ApiData) {
        let browser = result.browser_mut();
        browser.set_name(FILTER.real(data.browser_name.as_deref(), None));
        browser
            .version_mut()
            .set_complete(FILTER.real(data.browser_version.as_deref(), None));

        let engine = result.rendering_engine_mut();
        engine.set_name(FILTER.real(data.engine_name.as_deref(), None));
        engine
            .version_mut()
            .set_complete(FILTER.real(data.engine_version.as_deref(), None));

        result
            .device_mut()
            .set_device_type(FILTER.real(data.platform_type.as_deref(), None));
    }
}

#[async_trait::async_trait]
impl Provider for UserAgentApiCom {
    fn name(&self) -> &'static str {
        "UserAgentApiCom"
    }

    fn homepage(&self) -> &'static str {
        "http://useragentapi.com/"
    }

    fn capabilities(&self) -> DetectionCapabilities {
        CAPABILITIES
    }

    async fn parse(
        &self,
        user_agent: &str,
        _headers: &HashMap<String, String>,
    ) -> Result<UserAgent, ParseError> {
        if user_agent.is_empty() {
            return Err(ParseError::NoResult(user_agent.to_string()));
        }

        let data_raw = self.fetch(user_agent).await?;

        let data: ApiData = serde_json::from_value(data_raw.clone()).unwrap_or_default();

        let mut result = UserAgent::new(self.name(), self.version());
        result.set_provider_result_raw(data_raw);

        if Self::is_bot(&data) {
            Self::hydrate_bot(&mut result, &data);
            return Ok(result);
        }

        Self::hydrate_client(&mut result, &data);

        Ok(result)
    }
}
