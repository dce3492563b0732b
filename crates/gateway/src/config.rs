use std::time::Duration;

/// Connection settings for `HttpAuthGateway`.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: TimeoutConfig,
}

/// Per-call ceilings, each independently configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            read_timeout_secs: 30,
            write_timeout_secs: 30,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: configs::DEFAULT_BASE_URL.to_string(),
            timeout: TimeoutConfig::default(),
        }
    }
}

impl From<&configs::ApiConfig> for GatewayConfig {
    fn from(api: &configs::ApiConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            timeout: TimeoutConfig {
                connect_timeout_secs: api.connect_timeout_secs,
                read_timeout_secs: api.read_timeout_secs,
                write_timeout_secs: api.write_timeout_secs,
            },
        }
    }
}

impl GatewayConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.write_timeout_secs)
    }

    /// Upper bound for a whole request. reqwest has no write timeout, so the
    /// write ceiling is enforced through this total.
    pub fn request_timeout(&self) -> Duration {
        self.connect_timeout() + self.write_timeout() + self.read_timeout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_symmetric() {
        let cfg = GatewayConfig::default();
        assert_eq!(cfg.connect_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.read_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.write_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(90));
    }

    #[test]
    fn built_from_app_config() {
        let api = configs::ApiConfig {
            base_url: "https://auth.example.com/".into(),
            connect_timeout_secs: 1,
            read_timeout_secs: 2,
            write_timeout_secs: 3,
        };
        let cfg = GatewayConfig::from(&api);
        assert_eq!(cfg.base_url, "https://auth.example.com/");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(6));
    }
}
