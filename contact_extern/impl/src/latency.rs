use std::time::Duration;

use rand::Rng;

/// Artificial delay standing in for a network round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    pub base: Duration,
    /// Upper bound of a uniformly distributed delay added to `base`.
    pub jitter: Duration,
}

impl Latency {
    pub const NONE: Self = Self::fixed(Duration::ZERO);

    pub const fn fixed(base: Duration) -> Self {
        Self {
            base,
            jitter: Duration::ZERO,
        }
    }

    pub fn sample(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.base;
        }
        let jitter = rand::thread_rng().gen_range(Duration::ZERO..=self.jitter);
        self.base + jitter
    }

    pub async fn wait(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_latency_has_no_jitter() {
        let latency = Latency::fixed(Duration::from_millis(300));
        assert_eq!(latency.sample(), Duration::from_millis(300));
    }

    #[test]
    fn sample_stays_within_bounds() {
        let latency = Latency {
            base: Duration::from_millis(300),
            jitter: Duration::from_millis(200),
        };
        for _ in 0..100 {
            let delay = latency.sample();
            assert!(delay >= Duration::from_millis(300), "{delay:?}");
            assert!(delay <= Duration::from_millis(500), "{delay:?}");
        }
    }
}
