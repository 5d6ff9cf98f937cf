use std::io::Write;

use crate::error::{PlanError, PlanResult};
use crate::models::{Batch, OutputRow, WeeklyGrid};

/// Flattens batches and the weekly grid into one row per student, in
/// batch order then member order.
pub fn compose_rows(batches: &[Batch], grid: &WeeklyGrid) -> PlanResult<Vec<OutputRow>> {
    let mut rows = Vec::new();

    for batch in batches {
        let topics = grid
            .weeks
            .iter()
            .map(|week| {
                grid.topic_for(week.week, batch.number)
                    .map(|topic| topic.name.clone())
                    .ok_or(PlanError::InternalConsistency {
                        batch: batch.number,
                    })
            })
            .collect::<PlanResult<Vec<String>>>()?;

        if topics.is_empty() {
            return Err(PlanError::InternalConsistency {
                batch: batch.number,
            });
        }

        for member in &batch.members {
            rows.push(OutputRow {
                name: member.name.clone(),
                batch: batch.label(),
                topics: topics.clone(),
            });
        }
    }

    Ok(rows)
}

pub fn header(weeks: usize) -> Vec<String> {
    let mut columns = vec!["Name".to_string(), "Batch".to_string()];
    columns.extend((1..=weeks).map(|week| format!("Week {week} Topic")));
    columns
}

pub fn write_csv<W: Write>(writer: W, rows: &[OutputRow], weeks: usize) -> PlanResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header(weeks))?;

    for row in rows {
        let mut record = Vec::with_capacity(2 + row.topics.len());
        record.push(row.name.as_str());
        record.push(row.batch.as_str());
        record.extend(row.topics.iter().map(String::as_str));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
