//! Per-host request throttling.
//!
//! Every HTTP request an adapter makes goes through [`PolitenessPolicy::wait`]
//! first. The policy is a `governor` keyed rate limiter with one cell per
//! `per_host_delay`, keyed by host name, so consecutive page fetches against
//! one site are spaced out while different sites proceed independently.

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;
use url::Url;

#[derive(Clone)]
pub struct PolitenessPolicy {
    limiter: Option<Arc<DefaultKeyedRateLimiter<String>>>,
    per_host_delay: Duration,
}

impl std::fmt::Debug for PolitenessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolitenessPolicy")
            .field("per_host_delay", &self.per_host_delay)
            .finish()
    }
}

impl PolitenessPolicy {
    /// One request per `per_host_delay` per host. A zero delay disables
    /// throttling.
    pub fn new(per_host_delay: Duration) -> Self {
        let limiter = Quota::with_period(per_host_delay).map(|q| Arc::new(RateLimiter::keyed(q)));
        Self {
            limiter,
            per_host_delay,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn per_host_delay(&self) -> Duration {
        self.per_host_delay
    }

    /// Wait until a request to `url`'s host is allowed.
    pub async fn wait(&self, url: &Url) {
        let Some(limiter) = &self.limiter else {
            return;
        };
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
        trace!(%host, "waiting for politeness slot");
        limiter.until_key_ready(&host).await;
    }
}

impl Default for PolitenessPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_same_host_is_spaced() {
        let policy = PolitenessPolicy::new(Duration::from_millis(150));
        let url = Url::parse("https://news.example.com/page/1").unwrap();
        let start = Instant::now();
        policy.wait(&url).await;
        policy.wait(&url).await;
        assert!(start.elapsed() >= Duration::from_millis(120));
    }

    #[tokio::test]
    async fn test_different_hosts_do_not_block_each_other() {
        let policy = PolitenessPolicy::new(Duration::from_secs(5));
        let a = Url::parse("https://a.example.com/").unwrap();
        let b = Url::parse("https://b.example.com/").unwrap();
        let start = Instant::now();
        policy.wait(&a).await;
        policy.wait(&b).await;
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_zero_delay_disables_throttle() {
        let policy = PolitenessPolicy::disabled();
        let url = Url::parse("https://news.example.com/").unwrap();
        let start = Instant::now();
        for _ in 0..10 {
            policy.wait(&url).await;
        }
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(policy.per_host_delay(), Duration::ZERO);
    }
}
