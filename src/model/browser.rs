use serde::Serialize;

use crate::model::version::Version;

/// Detected browser: a name plus its version.
///
/// The version container always exists; the fields inside may all be `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Browser {
    name: Option<String>,
    version: Version,
}

impl Browser {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn set_name(&mut self, name: Option<&str>) {
        self.name = name.map(str::to_string);
    }

    pub fn version_mut(&mut self) -> &mut Version {
        &mut self.version
    }
}
