use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub score: i64,
}

/// Performance bucket derived from a score. Declaration order is the
/// order tiers are drawn into a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Mid,
    Low,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Mid, Tier::Low];

    pub fn label(self) -> &'static str {
        match self {
            Tier::High => ">35",
            Tier::Mid => "25-35",
            Tier::Low => "<=25",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TieredStudent {
    pub name: String,
    pub score: i64,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Batch {
    /// 1-based, assigned in creation order.
    pub number: usize,
    pub members: Vec<TieredStudent>,
}

impl Batch {
    pub fn label(&self) -> String {
        format!("Batch {}", self.number)
    }

    pub fn count(&self, tier: Tier) -> usize {
        self.members.iter().filter(|m| m.tier == tier).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekAssignment {
    pub week: u32,
    /// Indexed by batch position (batch number - 1).
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WeeklyGrid {
    pub weeks: Vec<WeekAssignment>,
}

impl WeeklyGrid {
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub fn topic_for(&self, week: u32, batch_number: usize) -> Option<&Topic> {
        let assignment = self.weeks.iter().find(|w| w.week == week)?;
        assignment.topics.get(batch_number.checked_sub(1)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub name: String,
    pub batch: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TierSummary {
    pub tier: Tier,
    pub count: usize,
    pub avg_score: f64,
}
