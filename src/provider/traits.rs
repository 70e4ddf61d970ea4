//! Provider trait: the contract every detection backend adapter fulfills

use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;

use crate::error::ParseError;
use crate::model::UserAgent;
use crate::provider::types::DetectionCapabilities;

/// One detection backend behind a uniform parse contract.
///
/// Adapters map the backend's raw output into the canonical [`UserAgent`],
/// filtering out the backend's placeholder sentinels along the way. When the
/// filtered output carries no real signal in any field, `parse` fails with
/// [`ParseError::NoResult`] so a chain can move on to the next provider.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Name of the provider
    fn name(&self) -> &'static str;

    /// Homepage of the wrapped backend
    fn homepage(&self) -> &'static str;

    /// Version of the wrapped backend, when known
    fn version(&self) -> Option<String> {
        None
    }

    /// Which fields this provider can ever populate
    fn capabilities(&self) -> DetectionCapabilities;

    /// Parse one user agent string
    ///
    /// # Arguments
    /// * `user_agent` - The raw user agent string
    /// * `headers` - Additional request headers, for backends that use them
    ///
    /// # Returns
    /// * `Ok(UserAgent)` - Normalized result with at least one real field
    /// * `Err(ParseError)` - `NoResult` when the backend had no usable answer,
    ///   any other variant for transport, credentials or quota failures
    async fn parse(
        &self,
        user_agent: &str,
        headers: &HashMap<String, String>,
    ) -> Result<UserAgent, ParseError>;
}
