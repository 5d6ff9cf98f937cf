/// Errors raised while building a batch plan.
///
/// Every variant is terminal for the run: a plan is either complete or
/// not produced at all.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Malformed or missing roster field. `row` is the 1-based data row,
    /// or 0 when the header itself is at fault.
    #[error("invalid roster row {row}: {reason}")]
    Validation { row: usize, reason: String },

    #[error("week {week}: {topics} topics cannot cover {batches} batches without repeating")]
    Capacity {
        week: u32,
        topics: usize,
        batches: usize,
    },

    #[error("no weekly topic assigned to batch {batch}")]
    InternalConsistency { batch: usize },

    #[error("invalid plan configuration: {0}")]
    Config(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type PlanResult<T> = std::result::Result<T, PlanError>;
