use std::fs::File;
use std::io::Read;
use std::num::IntErrorKind;
use std::path::Path;

use crate::error::{PlanError, PlanResult};
use crate::models::Student;

const NAME_COLUMN: &str = "name";
const SCORE_COLUMNS: [&str; 2] = ["marks", "score"];

/// A roster line before validation. Fields are `None` when the cell is
/// absent or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterRecord {
    pub name: Option<String>,
    pub score: Option<String>,
}

pub fn load_csv(path: &Path) -> PlanResult<Vec<Student>> {
    let file = File::open(path)?;
    parse_csv(file)
}

pub fn parse_csv<R: Read>(input: R) -> PlanResult<Vec<Student>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    read_records(reader).and_then(|records| validate(&records))
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> PlanResult<Vec<RosterRecord>> {
    let headers = reader.headers()?.clone();
    let find = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
    };

    let name_idx = find(NAME_COLUMN);
    let score_idx = SCORE_COLUMNS.iter().find_map(|&c| find(c));

    let (Some(name_idx), Some(score_idx)) = (name_idx, score_idx) else {
        return Err(PlanError::Validation {
            row: 0,
            reason: "roster must contain 'Name' and 'Marks' columns".to_string(),
        });
    };

    let cell = |record: &csv::StringRecord, idx: usize| {
        record
            .get(idx)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(RosterRecord {
            name: cell(&record, name_idx),
            score: cell(&record, score_idx),
        });
    }

    Ok(records)
}

/// Turns raw records into students, failing on the first bad row.
pub fn validate(records: &[RosterRecord]) -> PlanResult<Vec<Student>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| -> PlanResult<Student> {
            let row = i + 1;
            let name = record
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| PlanError::Validation {
                    row,
                    reason: "missing name".to_string(),
                })?;
            let raw_score = record.score.as_deref().map(str::trim).ok_or_else(|| {
                PlanError::Validation {
                    row,
                    reason: format!("missing marks for {name}"),
                }
            })?;
            let score = raw_score.parse::<i64>().map_err(|e| {
                let reason = match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => format!(
                        "marks '{raw_score}' for {name} is outside the supported range {}..={}",
                        i64::MIN,
                        i64::MAX
                    ),
                    _ => format!("marks '{raw_score}' for {name} is not an integer"),
                };
                PlanError::Validation { row, reason }
            })?;

            Ok(Student {
                name: name.to_string(),
                score,
            })
        })
        .collect()
}
