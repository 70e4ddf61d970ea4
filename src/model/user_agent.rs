use serde_json::{Value, json};

use crate::model::bot::Bot;
use crate::model::browser::Browser;
use crate::model::device::Device;
use crate::model::operating_system::OperatingSystem;
use crate::model::rendering_engine::RenderingEngine;

/// Aggregate result of one parse call.
///
/// Owns exactly one of each sub-entity. Providers populate it once during
/// hydration; afterwards consumers only read. A bot result and a client
/// result are mutually exclusive: when a backend reports a bot, browser,
/// engine, OS and device stay empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserAgent {
    provider_name: Option<String>,
    provider_version: Option<String>,

    browser: Browser,
    rendering_engine: RenderingEngine,
    operating_system: OperatingSystem,
    device: Device,
    bot: Bot,

    /// Opaque raw backend payload, kept for diagnostics only.
    provider_result_raw: Value,
}

impl UserAgent {
    pub fn new(provider_name: &str, provider_version: Option<String>) -> Self {
        UserAgent {
            provider_name: Some(provider_name.to_string()),
            provider_version,
            provider_result_raw: Value::Null,
            ..Default::default()
        }
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider_name.as_deref()
    }

    pub fn provider_version(&self) -> Option<&str> {
        self.provider_version.as_deref()
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn rendering_engine(&self) -> &RenderingEngine {
        &self.rendering_engine
    }

    pub fn operating_system(&self) -> &OperatingSystem {
        &self.operating_system
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    pub fn provider_result_raw(&self) -> &Value {
        &self.provider_result_raw
    }

    /// True iff the backend positively detected a bot. `None` and
    /// `Some(false)` both resolve to false.
    pub fn is_bot(&self) -> bool {
        self.bot.is_bot() == Some(true)
    }

    /// True iff the backend positively detected a mobile device.
    pub fn is_mobile(&self) -> bool {
        self.device.is_mobile() == Some(true)
    }

    /// Canonical nested mapping of the normalized result.
    ///
    /// The raw backend payload is excluded unless explicitly requested; it is
    /// only meant for debugging.
    pub fn to_value(&self, include_result_raw: bool) -> Value {
        let mut data = json!({
            "browser": self.browser,
            "renderingEngine": self.rendering_engine,
            "operatingSystem": self.operating_system,
            "device": self.device,
            "bot": self.bot,
        });

        if include_result_raw {
            data["providerResultRaw"] = self.provider_result_raw.clone();
        }

        data
    }

    pub fn browser_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }

    pub fn rendering_engine_mut(&mut self) -> &mut RenderingEngine {
        &mut self.rendering_engine
    }

    pub fn operating_system_mut(&mut self) -> &mut OperatingSystem {
        &mut self.operating_system
    }

    pub fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }

    pub fn bot_mut(&mut self) -> &mut Bot {
        &mut self.bot
    }

    pub fn set_provider_result_raw(&mut self, raw: Value) {
        self.provider_result_raw = raw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_bot_requires_a_positive_detection() {
        let mut result = UserAgent::new("Test", None);
        assert!(!result.is_bot());

        result.bot_mut().set_is_bot(Some(false));
        assert!(!result.is_bot());

        result.bot_mut().set_is_bot(Some(true));
        assert!(result.is_bot());
    }

    #[test]
    fn is_mobile_requires_a_positive_detection() {
        let mut result = UserAgent::new("Test", None);
        assert!(!result.is_mobile());

        result.device_mut().set_is_mobile(Some(false));
        assert!(!result.is_mobile());

        result.device_mut().set_is_mobile(Some(true));
        assert!(result.is_mobile());
    }

    #[test]
    fn to_value_produces_the_canonical_mapping() {
        let mut result = UserAgent::new("Test", Some("1.0".to_string()));
        result.browser_mut().set_name(Some("Firefox"));
        result.browser_mut().version_mut().set_complete(Some("3.0.1"));
        result.device_mut().set_device_type(Some("tablet"));
        result.device_mut().set_is_touch(Some(true));

        assert_eq!(
            result.to_value(false),
            json!({
                "browser": {
                    "name": "Firefox",
                    "version": {
                        "major": 3,
                        "minor": 0,
                        "patch": 1,
                        "alias": null,
                        "complete": "3.0.1",
                    },
                },
                "renderingEngine": {
                    "name": null,
                    "version": {
                        "major": null,
                        "minor": null,
                        "patch": null,
                        "alias": null,
                        "complete": null,
                    },
                },
                "operatingSystem": {
                    "name": null,
                    "version": {
                        "major": null,
                        "minor": null,
                        "patch": null,
                        "alias": null,
                        "complete": null,
                    },
                },
                "device": {
                    "model": null,
                    "brand": null,
                    "type": "tablet",
                    "isMobile": null,
                    "isTouch": true,
                },
                "bot": {
                    "isBot": null,
                    "name": null,
                    "type": null,
                },
            })
        );
    }

    #[test]
    fn raw_payload_only_appears_on_request() {
        let mut result = UserAgent::new("Test", None);
        result.set_provider_result_raw(json!({"ua_family": "Firefox"}));

        assert!(result.to_value(false).get("providerResultRaw").is_none());
        assert_eq!(
            result.to_value(true)["providerResultRaw"],
            json!({"ua_family": "Firefox"})
        );
    }

    #[test]
    fn raw_payload_key_is_present_even_when_empty() {
        let result = UserAgent::new("Test", None);

        let data = result.to_value(true);
        assert!(data.get("providerResultRaw").is_some());
        assert_eq!(data["providerResultRaw"], Value::Null);
    }
}
