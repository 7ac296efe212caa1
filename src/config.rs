//! Pacing policy configuration.
//!
//! A [`PacingConfig`] describes a set of limiter rules and whether the
//! assembled limiter is wrapped for thread safety. The default policy
//! matches the quota the API provider enforces: 2 requests per second and
//! 30 per 60 seconds, each with a 5% safety margin.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{PacedError, Result};
use crate::limiter::{Any, BoxedLimiter, ConstantRate, LeakyBucket, Synced, Unlimited, Windowed};

/// A complete pacing policy for one API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Limiter rules, OR-combined when there is more than one
    #[serde(default)]
    pub rules: Vec<RuleConfig>,

    /// Wrap the assembled limiter for use from multiple threads
    #[serde(default = "default_synced")]
    pub synced: bool,
}

/// A single limiter rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Minimum spacing between requests
    ConstantRate {
        /// Requests per second
        rate: f64,
        /// Safety margin in [0, 1)
        #[serde(default)]
        margin: f64,
    },
    /// Bounded request count per fixed window
    Windowed {
        /// Requests per window
        max: u32,
        /// Window length in seconds
        window: f64,
        /// Safety margin in [0, 1)
        #[serde(default)]
        margin: f64,
    },
    /// Continuously draining burst budget
    LeakyBucket {
        /// Drain rate in units per second
        rate: f64,
        /// Bucket capacity
        burst: f64,
        /// Safety margin in [0, 1)
        #[serde(default)]
        margin: f64,
    },
}

fn default_synced() -> bool {
    true
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                RuleConfig::ConstantRate {
                    rate: 2.0,
                    margin: 0.05,
                },
                RuleConfig::Windowed {
                    max: 30,
                    window: 60.0,
                    margin: 0.05,
                },
            ],
            synced: true,
        }
    }
}

impl PacingConfig {
    /// Load a pacing policy from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a pacing policy from YAML.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).map_err(|e| PacedError::Config(e.to_string()))
    }

    /// Validate every rule and assemble the limiter.
    ///
    /// No rules yields an [`Unlimited`] limiter; multiple rules are
    /// OR-combined, so the shortest rule wait wins.
    pub fn build(&self) -> Result<BoxedLimiter> {
        let mut children: Vec<BoxedLimiter> = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            children.push(rule.build()?);
        }

        let mut limiter: BoxedLimiter = match children.len() {
            0 => Box::new(Unlimited),
            1 => children.remove(0),
            _ => Box::new(Any::from_children(children)),
        };
        if self.synced {
            limiter = Box::new(Synced::new(limiter));
        }

        debug!(
            rules = self.rules.len(),
            synced = self.synced,
            "Assembled pacing limiter"
        );
        Ok(limiter)
    }
}

impl RuleConfig {
    fn build(&self) -> Result<BoxedLimiter> {
        Ok(match *self {
            RuleConfig::ConstantRate { rate, margin } => Box::new(ConstantRate::new(rate, margin)?),
            RuleConfig::Windowed {
                max,
                window,
                margin,
            } => Box::new(Windowed::new(max, window, margin)?),
            RuleConfig::LeakyBucket {
                rate,
                burst,
                margin,
            } => Box::new(LeakyBucket::new(rate, burst, margin)?),
        })
    }
}
