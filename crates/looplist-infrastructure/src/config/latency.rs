use std::time::Duration;

/// Artificial delays applied to service calls, mirroring a remote backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyConfig {
    /// Listing a user's loops, also the dashboard stats built from them
    pub list: Duration,

    /// Fetching one loop, also its heatmap
    pub get: Duration,

    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,

    /// Checking in a single day
    pub day_status: Duration,

    /// Loading the public feed
    pub public_feed: Duration,

    pub cheer: Duration,
    pub clone: Duration,

    /// Login and registration
    pub auth: Duration,

    pub profile: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(500),
            get: Duration::from_millis(300),
            create: Duration::from_millis(800),
            update: Duration::from_millis(500),
            delete: Duration::from_millis(500),
            day_status: Duration::from_millis(300),
            public_feed: Duration::from_millis(800),
            cheer: Duration::from_millis(300),
            clone: Duration::from_millis(800),
            auth: Duration::from_millis(800),
            profile: Duration::from_millis(500),
        }
    }
}

impl LatencyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// No delays at all, for tests and batch runs
    pub fn none() -> Self {
        Self {
            list: Duration::ZERO,
            get: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
            day_status: Duration::ZERO,
            public_feed: Duration::ZERO,
            cheer: Duration::ZERO,
            clone: Duration::ZERO,
            auth: Duration::ZERO,
            profile: Duration::ZERO,
        }
    }

    pub fn with_list(mut self, duration: Duration) -> Self {
        self.list = duration;
        self
    }

    pub fn with_get(mut self, duration: Duration) -> Self {
        self.get = duration;
        self
    }

    pub fn with_create(mut self, duration: Duration) -> Self {
        self.create = duration;
        self
    }

    pub fn with_update(mut self, duration: Duration) -> Self {
        self.update = duration;
        self
    }

    pub fn with_delete(mut self, duration: Duration) -> Self {
        self.delete = duration;
        self
    }

    pub fn with_day_status(mut self, duration: Duration) -> Self {
        self.day_status = duration;
        self
    }

    pub fn with_public_feed(mut self, duration: Duration) -> Self {
        self.public_feed = duration;
        self
    }

    pub fn with_cheer(mut self, duration: Duration) -> Self {
        self.cheer = duration;
        self
    }

    pub fn with_clone(mut self, duration: Duration) -> Self {
        self.clone = duration;
        self
    }

    pub fn with_auth(mut self, duration: Duration) -> Self {
        self.auth = duration;
        self
    }

    pub fn with_profile(mut self, duration: Duration) -> Self {
        self.profile = duration;
        self
    }

    /// True when every delay is zero
    pub fn is_disabled(&self) -> bool {
        *self == Self::none()
    }
}

/// Sleep for `duration`, skipping the timer entirely when it is zero.
pub async fn simulate_latency(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_latency_values() {
        let config = LatencyConfig::default();
        assert_eq!(config.list, Duration::from_millis(500));
        assert_eq!(config.get, Duration::from_millis(300));
        assert_eq!(config.create, Duration::from_millis(800));
        assert_eq!(config.day_status, Duration::from_millis(300));
        assert_eq!(config.public_feed, Duration::from_millis(800));
        assert_eq!(config.clone, Duration::from_millis(800));
        assert!(!config.is_disabled());
    }

    #[test]
    fn test_none_disables_everything() {
        assert!(LatencyConfig::none().is_disabled());
    }

    #[test]
    fn test_builder_pattern() {
        let config = LatencyConfig::none()
            .with_create(Duration::from_millis(10))
            .with_cheer(Duration::from_millis(5));

        assert_eq!(config.create, Duration::from_millis(10));
        assert_eq!(config.cheer, Duration::from_millis(5));
        assert_eq!(config.get, Duration::ZERO);
        assert!(!config.is_disabled());
    }

    #[tokio::test]
    async fn test_simulate_latency_waits() {
        let start = std::time::Instant::now();
        simulate_latency(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
