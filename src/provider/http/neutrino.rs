//! neutrinoapi.com UA-lookup adapter
//!
//! Credentials are a user/key pair sent in the form body. Errors come back
//! either as plain HTTP statuses (403 for rejected credentials) or as a
//! numeric `api_error` field in an otherwise valid JSON body.

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

/// Default base URL for the neutrinoapi.com API
const DEFAULT_BASE_URL: &str = "https://neutrinoapi.com";

const CAPABILITIES: DetectionCapabilities = DetectionCapabilities {
    browser: NamedWithVersion {
        name: true,
        version: true,
    },
    rendering_engine: NamedWithVersion {
        name: false,
        version: false,
    },
    operating_system: NamedWithVersion {
        name: true,
        version: true,
    },
    device: DeviceCapabilities {
        model: true,
        brand: true,
        device_type: true,
        is_mobile: true,
        is_touch: false,
    },
    bot: BotCapabilities {
        is_bot: true,
        name: true,
        bot_type: false,
    },
};

static FILTER: LazyLock<PlaceholderFilter> = LazyLock::new(|| {
    PlaceholderFilter::builder()
        .general(&[r"^unknown$"])
        .scoped(
            Group::Device,
            Field::Brand,
            &[r"^Generic$", r"^generic web browser$"],
        )
        .scoped(
            Group::Device,
            Field::Model,
            &[
                r"^Android",
                r"^Windows Phone",
                r"^Windows Mobile",
                r"^Firefox",
                r"^Generic",
                r"^Tablet on Android$",
                r"^Tablet$",
            ],
        )
        .build()
        .expect("Failed to compile placeholder patterns")
});

#[derive(Debug, Clone, Default, Deserialize)]
struct NeutrinoData {
    #[serde(rename = "type")]
    ua_type: Option<String>,
    browser_name: Option<String>,
    version: Option<String>,
    operating_system_family: Option<String>,
    operating_system_version: Option<String>,
    mobile_model: Option<String>,
    mobile_brand: Option<String>,
    is_mobile: Option<bool>,
}

/// HTTP provider for the neutrinoapi.com UA lookup
pub struct NeutrinoApiCom {
    client: reqwest::Client,
    base_url: String,
    api_user: String,
    api_key: String,
}

impl NeutrinoApiCom {
    pub fn new(api_user: &str, api_key: &str) -> Self {
        Self::with_base_url(api_user, api_key, DEFAULT_BASE_URL)
    }

    /// Creates a provider against a custom base URL (primarily for tests).
    pub fn with_base_url(api_user: &str, api_key: &str, base_url: &str) -> Self {
        NeutrinoApiCom {
            client: build_client(),
            base_url: base_url.to_string(),
            api_user: api_user.to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn fetch(&self, user_agent: &str) -> Result<Value, ParseError> {
        let url = format!("{}/ua-lookup", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("user-id", self.api_user.as_str()),
                ("api-key", self.api_key.as_str()),
                ("output-format", "json"),
                ("output-case", "snake"),
                ("ua", user_agent),
            ])
            .send()
            .await?;

        let response = read_response(response).await?;

        if response.status == reqwest::StatusCode::FORBIDDEN {
            return Err(ParseError::InvalidCredentials {
                provider: "NeutrinoApiCom",
            });
        }

        if response.status != reqwest::StatusCode::OK {
            warn!(
                "neutrinoapi.com returned status {}: {}",
                response.status, url
            );
            return Err(ParseError::InvalidResponse {
                url,
                reason: format!("unexpected status: {}", response.status),
            });
        }

        let content = json_body(&url, &response)?;

        match content.get("api_error").and_then(Value::as_i64) {
            Some(2) => {
                return Err(ParseError::LimitExceeded {
                    provider: "NeutrinoApiCom",
                });
            }
            Some(code) => {
                let message = content
                    .get("api_error_msg")
                    .and_then(Value::as_str)
                    .unwrap_or("");
                return Err(ParseError::InvalidResponse {
                    url,
                    reason: format!("backend reported api_error {code}: {message}"),
                });
            }
            None => {}
        }

        if !content.is_object() {
            return Err(ParseError::InvalidResponse {
                url,
                reason: "response body carries no data".to_string(),
            });
        }

        Ok(content)
    }

    fn is_bot(data: &NeutrinoData) -> bool {
        data.ua_type.as_deref() == Some("robot")
    }

    fn hydrate_bot(result: &mut UserAgent, data: &NeutrinoData) {
        let bot = result.bot_mut();
        bot.set_is_bot(Some(true));
        bot.set_name(FILTER.real(data.browser_name.as_deref(), None));
    }

    fn hydrate_client(result: &mut UserAgent, data: &NeutrinoData) {
        let browser = result.browser_mut();
        browser.set_name(FILTER.real(data.browser_name.as_deref(), None));
        browser
            .version_mut()
            .set_complete(FILTER.real(data.version.as_deref(), None));

        let os = result.operating_system_mut();
        os.set_name(FILTER.real(data.operating_system_family.as_deref(), None));
        os.version_mut()
            .set_complete(FILTER.real(data.operating_system_version.as_deref(), None));

        let device = result.device_mut();
        device.set_model(FILTER.real(
            data.mobile_model.as_deref(),
            Some((Group::Device, Field::Model)),
        ));
        device.set_brand(FILTER.real(
            data.mobile_brand.as_deref(),
            Some((Group::Device, Field::Brand)),
        ));
        device.set_device_type(FILTER.real(
            data.ua_type.as_deref(),
            Some((Group::Device, Field::Type)),
        ));

        if data.is_mobile == Some(true) {
            device.set_is_mobile(Some(true));
        }
    }
}

#[async_trait::async_trait]
impl Provider for NeutrinoApiCom {
    fn name(&self) -> &'static str {
        "NeutrinoApiCom"
    }

    fn homepage(&self) -> &'static str {
        "https://www.neutrinoapi.com/"
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

        let content = self.fetch(user_agent).await?;

        let data: NeutrinoData = serde_json::from_value(content.clone()).unwrap_or_default();

        // the backend answers every lookup; "unknown" is its way of
        // saying it found nothing
        if data.ua_type.as_deref() == Some("unknown") {
            return Err(ParseError::NoResult(user_agent.to_string()));
        }

        let mut result = UserAgent::new(self.name(), self.version());
        result.set_provider_result_raw(content);

        if Self::is_bot(&data) {
            Self::hydrate_bot(&mut result, &data);
            return Ok(result);
        }

        Self::hydrate_client(&mut result, &data);

        Ok(result)
    }
}
