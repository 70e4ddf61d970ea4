//! Adapter for the woothee detection library
//!
//! Woothee never returns missing fields; it fills everything with the
//! sentinel `UNKNOWN` (and the category `misc`), so the placeholder table
//! does the real work here. Crawlers are reported as the `crawler` category.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::json;
use woothee::parser::Parser;

use crate::error::ParseError;
use crate::filter::{Field, Group, PlaceholderFilter};
use crate::model::UserAgent;
use crate::provider::traits::Provider;
use crate::provider::types::{
    BotCapabilities, DetectionCapabilities, DeviceCapabilities, NamedWithVersion,
};

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

static FILTER: LazyLock<PlaceholderFilter> = LazyLock::new(|| {
    PlaceholderFilter::builder()
        .general(&[r"^UNKNOWN$"])
        .scoped(Group::Device, Field::Type, &[r"^misc$"])
        .scoped(Group::Bot, Field::Name, &[r"^misc crawler$"])
        .build()
        .expect("Failed to compile placeholder patterns")
});

/// Owned snapshot of one woothee classification.
#[derive(Debug, Clone, Default)]
struct WootheeRaw {
    name: String,
    category: String,
    os: String,
    os_version: String,
    browser_type: String,
    version: String,
    vendor: String,
}

/// Library-backed provider wrapping the `woothee` crate.
///
/// Holds a per-instance parser handle; share a provider across concurrent
/// calls only because the wrapped parser is stateless.
pub struct Woothee {
    parser: Parser,
}

impl Woothee {
    pub fn new() -> Self {
        Woothee {
            parser: Parser::new(),
        }
    }

    fn classify(&self, user_agent: &str) -> Option<WootheeRaw> {
        self.parser.parse(user_agent).map(|result| WootheeRaw {
            name: result.name.to_string(),
            category: result.category.to_string(),
            os: result.os.to_string(),
            os_version: result.os_version.to_string(),
            browser_type: result.browser_type.to_string(),
            version: result.version.to_string(),
            vendor: result.vendor.to_string(),
        })
    }

    /// Anything usable in there? Either a real browser name or a real
    /// category.
    fn has_result(raw: &WootheeRaw) -> bool {
        FILTER.is_real(Some(&raw.name), None)
            || FILTER.is_real(Some(&raw.category), Some((Group::Device, Field::Type)))
    }

    fn is_bot(raw: &WootheeRaw) -> bool {
        raw.category == "crawler"
    }

    fn hydrate_bot(result: &mut UserAgent, raw: &WootheeRaw) {
        let bot = result.bot_mut();
        bot.set_is_bot(Some(true));
        bot.set_name(FILTER.real(Some(&raw.name), Some((Group::Bot, Field::Name))));
    }

    fn hydrate_client(result: &mut UserAgent, raw: &WootheeRaw) {
        let browser = result.browser_mut();
        browser.set_name(FILTER.real(Some(&raw.name), None));
        browser
            .version_mut()
            .set_complete(FILTER.real(Some(&raw.version), None));

        result.device_mut().set_device_type(FILTER.real(
            Some(&raw.category),
            Some((Group::Device, Field::Type)),
        ));
    }
}

impl Default for Woothee {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Provider for Woothee {
    fn name(&self) -> &'static str {
        "Woothee"
    }

    fn homepage(&self) -> &'static str {
        "https://github.com/woothee/woothee-rust"
    }

    fn capabilities(&self) -> DetectionCapabilities {
        CAPABILITIES
    }

    async fn parse(
        &self,
        user_agent: &str,
        _headers: &HashMap<String, String>,
    ) -> Result<UserAgent, ParseError> {
        let raw = self
            .classify(user_agent)
            .ok_or_else(|| ParseError::NoResult(user_agent.to_string()))?;

        if !Self::has_result(&raw) {
            return Err(ParseError::NoResult(user_agent.to_string()));
        }

        let mut result = UserAgent::new(self.name(), self.version());
        result.set_provider_result_raw(json!({
            "name": raw.name,
            "category": raw.category,
            "os": raw.os,
            "os_version": raw.os_version,
            "browser_type": raw.browser_type,
            "version": raw.version,
            "vendor": raw.vendor,
        }));

        if Self::is_bot(&raw) {
            Self::hydrate_bot(&mut result, &raw);
            return Ok(result);
        }

        Self::hydrate_client(&mut result, &raw);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.85 Safari/537.36";
    const GOOGLEBOT_UA: &str =
        "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

    #[tokio::test]
    async fn parse_hydrates_browser_result() {
        let provider = Woothee::new();

        let result = provider.parse(CHROME_UA, &HashMap::new()).await.unwrap();

        assert_eq!(result.provider_name(), Some("Woothee"));
        assert_eq!(result.browser().name(), Some("Chrome"));
        assert_eq!(result.browser().version().major(), Some(90));
        assert_eq!(result.browser().version().complete(), Some("90.0.4430.85"));
        assert_eq!(result.device().device_type(), Some("pc"));
        assert!(!result.is_bot());
    }

    #[tokio::test]
    async fn crawlers_populate_only_the_bot() {
        let provider = Woothee::new();

        let result = provider
            .parse(GOOGLEBOT_UA, &HashMap::new())
            .await
            .unwrap();

        assert!(result.is_bot());
        assert_eq!(result.bot().name(), Some("Googlebot"));
        assert_eq!(result.browser().name(), None);
        assert_eq!(result.device().device_type(), None);
    }

    #[tokio::test]
    async fn unusable_agents_mean_no_result() {
        let provider = Woothee::new();

        let err = provider.parse("-", &HashMap::new()).await.unwrap_err();

        assert!(err.is_no_result());
    }

    #[tokio::test]
    async fn raw_payload_carries_the_full_classification() {
        let provider = Woothee::new();

        let result = provider.parse(CHROME_UA, &HashMap::new()).await.unwrap();

        assert_eq!(result.provider_result_raw()["name"], "Chrome");
        assert_eq!(result.provider_result_raw()["category"], "pc");
    }
}
