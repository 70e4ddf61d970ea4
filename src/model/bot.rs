use serde::Serialize;

/// Detected bot/crawler.
///
/// `is_bot` is tri-state: `None` means the backend said nothing about bots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    is_bot: Option<bool>,
    name: Option<String>,
    #[serde(rename = "type")]
    bot_type: Option<String>,
}

impl Bot {
    pub fn is_bot(&self) -> Option<bool> {
        self.is_bot
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn bot_type(&self) -> Option<&str> {
        self.bot_type.as_deref()
    }

    pub fn set_is_bot(&mut self, is_bot: Option<bool>) {
        self.is_bot = is_bot;
    }

    pub fn set_name(&mut self, name: Option<&str>) {
        self.name = name.map(str::to_string);
    }

    pub fn set_bot_type(&mut self, bot_type: Option<&str>) {
        self.bot_type = bot_type.map(str::to_string);
    }
}
