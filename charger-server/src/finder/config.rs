//! Finder configuration.

use std::str::FromStr;
use std::time::Duration;

/// Where to put the driver when no position fix can be had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionFallback {
    /// The corridor's fixed reference point.
    #[default]
    Fixed,
    /// Interpolated along the corridor from direction and range.
    Estimated,
}

/// What synthetic data looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyntheticSource {
    /// A handful of sites just ahead of the driver.
    #[default]
    Nearby,
    /// One site per corridor waypoint still ahead. Falls back to
    /// [`SyntheticSource::Nearby`] when none of them is in reach.
    Waypoints,
}

impl SyntheticSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyntheticSource::Nearby => "nearby",
            SyntheticSource::Waypoints => "waypoints",
        }
    }
}

impl FromStr for SyntheticSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearby" => Ok(SyntheticSource::Nearby),
            "waypoints" => Ok(SyntheticSource::Waypoints),
            other => Err(format!("unknown synthetic source: {other}")),
        }
    }
}

/// Timeouts, cooldown and fallback sizing for [`super::ChargerFinder`].
#[derive(Debug, Clone, PartialEq)]
pub struct FinderConfig {
    /// Longest wait for a device position fix.
    pub location_timeout: Duration,

    /// Longest wait for the charger directory.
    pub remote_timeout: Duration,

    /// Minimum gap between successful directory calls.
    pub cooldown: Duration,

    /// Chargers generated when falling back to synthetic data.
    pub synthetic_count: usize,

    pub synthetic_source: SyntheticSource,

    pub position_fallback: PositionFallback,
}

impl FinderConfig {
    pub fn with_location_timeout(mut self, timeout: Duration) -> Self {
        self.location_timeout = timeout;
        self
    }

    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_synthetic_count(mut self, n: usize) -> Self {
        self.synthetic_count = n;
        self
    }

    pub fn with_synthetic_source(mut self, source: SyntheticSource) -> Self {
        self.synthetic_source = source;
        self
    }

    pub fn with_position_fallback(mut self, fallback: PositionFallback) -> Self {
        self.position_fallback = fallback;
        self
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            location_timeout: Duration::from_secs(8),
            remote_timeout: Duration::from_secs(10),
            cooldown: Duration::from_secs(10),
            synthetic_count: 5,
            synthetic_source: SyntheticSource::Nearby,
            position_fallback: PositionFallback::Fixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = FinderConfig::default();
        assert_eq!(config.location_timeout, Duration::from_secs(8));
        assert_eq!(config.remote_timeout, Duration::from_secs(10));
        assert_eq!(config.cooldown, Duration::from_secs(10));
        assert_eq!(config.synthetic_count, 5);
        assert_eq!(config.synthetic_source, SyntheticSource::Nearby);
        assert_eq!(config.position_fallback, PositionFallback::Fixed);
    }

    #[test]
    fn parse_synthetic_source() {
        assert_eq!("waypoints".parse(), Ok(SyntheticSource::Waypoints));
        assert_eq!(" Nearby ".parse(), Ok(SyntheticSource::Nearby));
        assert!("everywhere".parse::<SyntheticSource>().is_err());
    }
}
