//! Rate Limiting Middleware using GCRA Algorithm
//!
//! Per-IP rate limiting for the prediction routes using tower_governor.
//! Uses the Generic Cell Rate Algorithm (GCRA) for efficient,
//! accurate rate enforcement without background processes.

use governor::middleware::StateInformationMiddleware;
use serde::Deserialize;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Type alias for the governor config with default settings
/// StateInformationMiddleware is used when use_headers() is called to add X-RateLimit-* headers
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
///
/// Off unless a deployment turns it on.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Whether prediction routes are rate limited
    pub enabled: bool,
    /// Seconds between quota replenishments (tower_governor's `per_second`)
    pub per_second: u64,
    /// Burst size (max requests that can be made immediately)
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            per_second: 1,  // Replenish 1 per second
            burst_size: 20, // Allow a form-submission burst
        }
    }
}

impl RateLimitConfig {
    /// Create a strict config for shared deployments
    pub fn strict() -> Self {
        Self {
            enabled: true,
            per_second: 2, // One request every 2 seconds
            burst_size: 5,
        }
    }

    /// Default quota, switched on
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

/// Create a rate limiting governor config
///
/// Returns `None` when limiting is disabled or the quota is zero.
/// Uses PeerIpKeyExtractor, so the service must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()` for IP extraction.
///
/// Adds X-RateLimit-* headers to responses for quota visibility.
pub fn create_governor_config(config: &RateLimitConfig) -> Option<Arc<DefaultGovernorConfig>> {
    if !config.enabled {
        return None;
    }

    GovernorConfigBuilder::default()
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .use_headers() // Adds X-RateLimit-After, X-RateLimit-Limit, X-RateLimit-Remaining
        .finish()
        .map(Arc::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.per_second, 1);
        assert_eq!(config.burst_size, 20);
    }

    #[test]
    fn test_strict_config() {
        let config = RateLimitConfig::strict();
        assert_eq!(config.per_second, 2);
        assert_eq!(config.burst_size, 5);
    }

    #[test]
    fn test_create_governor_config() {
        assert!(create_governor_config(&RateLimitConfig::default()).is_none());
        assert!(create_governor_config(&RateLimitConfig::enabled()).is_some());
        assert!(create_governor_config(&RateLimitConfig::strict()).is_some());
    }

    #[test]
    fn test_zero_burst_is_rejected() {
        let config = RateLimitConfig {
            burst_size: 0,
            ..RateLimitConfig::enabled()
        };
        assert!(create_governor_config(&config).is_none());
    }
}
