use serde::Serialize;

/// Detected device.
///
/// `is_mobile` and `is_touch` are tri-state: `None` means "unknown", which is
/// distinct from a detected `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    model: Option<String>,
    brand: Option<String>,
    #[serde(rename = "type")]
    device_type: Option<String>,
    is_mobile: Option<bool>,
    is_touch: Option<bool>,
}

impl Device {
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn device_type(&self) -> Option<&str> {
        self.device_type.as_deref()
    }

    pub fn is_mobile(&self) -> Option<bool> {
        self.is_mobile
    }

    pub fn is_touch(&self) -> Option<bool> {
        self.is_touch
    }

    pub fn set_model(&mut self, model: Option<&str>) {
        self.model = model.map(str::to_string);
    }

    pub fn set_brand(&mut self, brand: Option<&str>) {
        self.brand = brand.map(str::to_string);
    }

    pub fn set_device_type(&mut self, device_type: Option<&str>) {
        self.device_type = device_type.map(str::to_string);
    }

    pub fn set_is_mobile(&mut self, is_mobile: Option<bool>) {
        self.is_mobile = is_mobile;
    }

    pub fn set_is_touch(&mut self, is_touch: Option<bool>) {
        self.is_touch = is_touch;
    }
}
