use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{PlanError, PlanResult};
use crate::models::{Batch, Topic, WeekAssignment, WeeklyGrid};

/// Position in the topic pool. Scoped to one run: callers start from
/// `TopicCursor::default()` and get the advanced cursor back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicCursor {
    position: usize,
}

impl TopicCursor {
    pub fn position(&self) -> usize {
        self.position
    }

    fn next_index(&mut self, pool_len: usize) -> usize {
        let index = self.position % pool_len;
        self.position = (index + 1) % pool_len;
        index
    }
}

/// Assigns a topic to every (week, batch) pair, cycling through `pool`.
///
/// The cursor is shared across weeks. Within a week a topic already
/// handed out is skipped; skipped topics stay in the cycle.
pub fn assign_topics(
    batches: &[Batch],
    pool: &[Topic],
    weeks: u32,
    mut cursor: TopicCursor,
) -> PlanResult<(WeeklyGrid, TopicCursor)> {
    if batches.is_empty() || weeks == 0 {
        return Ok((WeeklyGrid::default(), cursor));
    }

    if pool.len() < batches.len() {
        warn!(
            topics = pool.len(),
            batches = batches.len(),
            "topic pool too small for weekly rotation"
        );
        return Err(PlanError::Capacity {
            week: 1,
            topics: pool.len(),
            batches: batches.len(),
        });
    }

    let mut grid = WeeklyGrid::default();

    for week in 1..=weeks {
        let mut used = HashSet::with_capacity(batches.len());
        let mut topics = Vec::with_capacity(batches.len());

        for batch in batches {
            let index = draw_unused(&mut cursor, pool.len(), &used).ok_or(PlanError::Capacity {
                week,
                topics: pool.len(),
                batches: batches.len(),
            })?;
            used.insert(index);
            debug!(week, batch = batch.number, topic = %pool[index].name, "assigned topic");
            topics.push(pool[index].clone());
        }

        grid.weeks.push(WeekAssignment { week, topics });
    }

    Ok((grid, cursor))
}

/// Advances `cursor` to the next topic not in `used`, trying at most
/// `pool_len` candidates.
fn draw_unused(cursor: &mut TopicCursor, pool_len: usize, used: &HashSet<usize>) -> Option<usize> {
    (0..pool_len)
        .map(|_| cursor.next_index(pool_len))
        .find(|index| !used.contains(index))
}
