//! Common types for providers

/// Which fields a provider can ever populate.
///
/// Purely descriptive metadata (useful when picking a chain order); nothing
/// enforces it at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionCapabilities {
    pub browser: NamedWithVersion,
    pub rendering_engine: NamedWithVersion,
    pub operating_system: NamedWithVersion,
    pub device: DeviceCapabilities,
    pub bot: BotCapabilities,
}

/// Capabilities of a name-plus-version entity (browser, engine, OS).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamedWithVersion {
    pub name: bool,
    pub version: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub model: bool,
    pub brand: bool,
    pub device_type: bool,
    pub is_mobile: bool,
    pub is_touch: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BotCapabilities {
    pub is_bot: bool,
    pub name: bool,
    pub bot_type: bool,
}
