//! Plan configuration: topic pool, schedule length, batch quota and
//! shuffle seed. Loaded from an optional TOML file; every field falls
//! back to the built-in defaults.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{PlanError, PlanResult};
use crate::models::{Tier, Topic};

/// Students drawn from each tier per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Quota {
    #[serde(default = "default_high")]
    pub high: usize,
    #[serde(default = "default_mid")]
    pub mid: usize,
    #[serde(default = "default_low")]
    pub low: usize,
}

fn default_high() -> usize {
    1
}
fn default_mid() -> usize {
    2
}
fn default_low() -> usize {
    1
}

impl Default for Quota {
    fn default() -> Self {
        Self {
            high: default_high(),
            mid: default_mid(),
            low: default_low(),
        }
    }
}

impl Quota {
    pub fn for_tier(&self, tier: Tier) -> usize {
        match tier {
            Tier::High => self.high,
            Tier::Mid => self.mid,
            Tier::Low => self.low,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.high + self.mid + self.low
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_weeks")]
    pub weeks: u32,

    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub quota: Quota,

    #[serde(default = "default_topics")]
    pub topics: Vec<Topic>,
}

fn default_weeks() -> u32 {
    5
}

fn default_topics() -> Vec<Topic> {
    [
        (
            "Python Data Types and Variables",
            "Lists, Tuples, Sets, Dictionaries",
        ),
        (
            "Control Flow in Python",
            "Conditional statements (if-else), loops (for, while)",
        ),
        (
            "Functions in Python",
            "Defining and calling functions, arguments, return values",
        ),
        (
            "File Handling in Python",
            "Reading and writing files (open(), read(), write())",
        ),
        ("Exception Handling", "try, except, finally"),
        ("Higher-Order Functions", "map(), filter(), reduce()"),
        ("Object-Oriented Programming (OOP)", "OOP concepts"),
    ]
    .into_iter()
    .map(|(name, description)| Topic {
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            weeks: default_weeks(),
            seed: None,
            quota: Quota::default(),
            topics: default_topics(),
        }
    }
}

impl PlanConfig {
    /// Loads the config at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> PlanResult<Self> {
        let Some(path) = path else {
            debug!("no plan config given, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            PlanError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            PlanError::Config(reason) => PlanError::Config(format!("{}: {reason}", path.display())),
            other => other,
        })?;
        info!(
            path = %path.display(),
            topics = config.topics.len(),
            weeks = config.weeks,
            "loaded plan config"
        );
        Ok(config)
    }

    pub fn from_toml(content: &str) -> PlanResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| PlanError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides on top of file values.
    pub fn with_overrides(mut self, weeks: Option<u32>, seed: Option<u64>) -> PlanResult<Self> {
        if let Some(weeks) = weeks {
            self.weeks = weeks;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> PlanResult<()> {
        if self.weeks == 0 {
            return Err(PlanError::Config("weeks must be at least 1".into()));
        }

        if self.quota.batch_size() == 0 {
            return Err(PlanError::Config(
                "quota must draw at least one student per batch".into(),
            ));
        }

        let mut seen = HashSet::new();
        for topic in &self.topics {
            if topic.name.trim().is_empty() {
                return Err(PlanError::Config("topic names must not be empty".into()));
            }
            if !seen.insert(topic.name.as_str()) {
                return Err(PlanError::Config(format!(
                    "duplicate topic '{}' in pool",
                    topic.name
                )));
            }
        }

        Ok(())
    }
}
