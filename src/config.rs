//! Bridge configuration.

use serde::Deserialize;

/// Controls how the bridge treats decoded payloads that break a shape rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Reject payloads that break a shape rule (default: true).
    ///
    /// When false, violations are logged as warnings and the payload is
    /// forwarded to the chart library unchanged.
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_strict() -> bool {
    true
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl BridgeConfig {
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}
