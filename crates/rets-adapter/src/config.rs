//! Adapter configuration.

use std::fmt;

use rets_dmql::ConditionPolicy;

/// Default repository name.
pub const DEFAULT_NAME: &str = "default";

/// Default RETS login URL.
pub const DEFAULT_URL: &str = "http://127.0.0.1:6103/rets/login";

/// Adapter configuration.
///
/// The login coordinates are what an invoker is built with; the adapter itself
/// only reads `name`, `url` and `policy`.
#[derive(Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Repository name, used to label log output.
    pub name: String,

    /// RETS login URL.
    pub url: String,

    /// RETS account name.
    pub username: String,

    /// RETS account password.
    pub password: String,

    /// Which condition kinds are translated to DMQL.
    pub policy: ConditionPolicy,
}

impl AdapterConfig {
    /// Create a new configuration for the given login URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            url: url.into(),
            username: String::new(),
            password: String::new(),
            policy: ConditionPolicy::default(),
        }
    }

    /// Set the repository name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the account credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the condition policy.
    pub fn with_policy(mut self, policy: ConditionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdapterConfig::default();
        assert_eq!(config.name, DEFAULT_NAME);
        assert_eq!(config.url, DEFAULT_URL);
        assert!(config.username.is_empty());
        assert_eq!(config.policy, ConditionPolicy::Comparisons);
    }

    #[test]
    fn test_config_builder() {
        let config = AdapterConfig::new("http://example.com/rets/login")
            .with_name("mls")
            .with_credentials("mc", "p@$$")
            .with_policy(ConditionPolicy::RangeOnly);

        assert_eq!(config.name, "mls");
        assert_eq!(config.url, "http://example.com/rets/login");
        assert_eq!(config.username, "mc");
        assert_eq!(config.password, "p@$$");
        assert_eq!(config.policy, ConditionPolicy::RangeOnly);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = AdapterConfig::default().with_credentials("mc", "p@$$");
        let debug = format!("{:?}", config);
        assert!(debug.contains("mc"));
        assert!(!debug.contains("p@$$"));
    }
}
