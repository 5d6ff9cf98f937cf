use serde::Serialize;
use tracing::{debug, info};

use crate::batching;
use crate::config::PlanConfig;
use crate::error::PlanResult;
use crate::models::{Batch, OutputRow, Student, TieredStudent, WeeklyGrid};
use crate::output;
use crate::rotation::{self, TopicCursor};
use crate::tiers;

/// A complete run: the categorized roster, its batches, the weekly grid
/// and the flattened rows.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub weeks: u32,
    pub students: Vec<TieredStudent>,
    pub batches: Vec<Batch>,
    pub grid: WeeklyGrid,
    pub rows: Vec<OutputRow>,
}

pub fn run(students: &[Student], config: &PlanConfig) -> PlanResult<Plan> {
    let tiered = tiers::categorize(students);
    let batches = batching::build_batches(&tiered, &config.quota, config.seed)?;
    info!(
        students = tiered.len(),
        batches = batches.len(),
        seeded = config.seed.is_some(),
        "built batches"
    );

    let (grid, cursor) = rotation::assign_topics(
        &batches,
        &config.topics,
        config.weeks,
        TopicCursor::default(),
    )?;
    debug!(cursor = cursor.position(), "topic rotation finished");
    let rows = output::compose_rows(&batches, &grid)?;
    info!(weeks = grid.week_count(), rows = rows.len(), "assigned weekly topics");

    Ok(Plan {
        weeks: config.weeks,
        students: tiered,
        batches,
        grid,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use crate::models::Topic;

    fn roster(count: usize) -> Vec<Student> {
        (0..count)
            .map(|i| Student {
                name: format!("Scholar {i}"),
                score: [12, 30, 33, 48][i % 4],
            })
            .collect()
    }

    #[test]
    fn empty_roster_is_not_an_error() {
        let plan = run(&[], &PlanConfig::default()).unwrap();
        assert!(plan.batches.is_empty());
        assert!(plan.rows.is_empty());
        assert_eq!(plan.grid.week_count(), 0);
    }

    #[test]
    fn rows_match_roster_and_grid() {
        let students = roster(13);
        let plan = run(&students, &PlanConfig::default()).unwrap();

        assert_eq!(plan.rows.len(), students.len());
        assert_eq!(plan.grid.week_count(), 5);

        for row in &plan.rows {
            let number: usize = row.batch.trim_start_matches("Batch ").parse().unwrap();
            for (k, topic) in row.topics.iter().enumerate() {
                let expected = plan.grid.topic_for(k as u32 + 1, number).unwrap();
                assert_eq!(topic, &expected.name);
            }
        }
    }

    #[test]
    fn identical_input_and_seed_give_identical_output() {
        let students = roster(21);
        let config = PlanConfig {
            seed: Some(2026),
            ..PlanConfig::default()
        };

        let render = |plan: &Plan| {
            let mut buffer = Vec::new();
            output::write_csv(&mut buffer, &plan.rows, plan.weeks as usize).unwrap();
            buffer
        };

        let first = run(&students, &config).unwrap();
        let second = run(&students, &config).unwrap();
        assert_eq!(render(&first), render(&second));
    }

    #[test]
    fn too_many_batches_for_pool_fails_whole_run() {
        let students = roster(12);
        let config = PlanConfig {
            topics: vec![
                Topic {
                    name: "Only".to_string(),
                    description: String::new(),
                },
                Topic {
                    name: "Two".to_string(),
                    description: String::new(),
                },
            ],
            ..PlanConfig::default()
        };

        let err = run(&students, &config).unwrap_err();
        assert!(matches!(err, PlanError::Capacity { .. }));
    }
}
