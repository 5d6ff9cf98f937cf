use std::fmt::Write;

use crate::pipeline::Plan;
use crate::tiers;

pub fn build_report(source: Option<&str>, plan: &Plan, seed: Option<u64>) -> String {
    let summaries = tiers::summarize(&plan.students);

    let mut output = String::new();
    let source_label = source.unwrap_or("uploaded roster");
    let seed_label = seed
        .map(|s| format!("seed {s}"))
        .unwrap_or_else(|| "input order".to_string());

    let _ = writeln!(output, "# Batch Topic Rotation Plan");
    let _ = writeln!(
        output,
        "Generated for {} ({} students, {} weeks, {})",
        source_label,
        plan.students.len(),
        plan.weeks,
        seed_label
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Tier Mix");

    if plan.students.is_empty() {
        let _ = writeln!(output, "No students in this roster.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {:?} ({}): {} students (avg marks {:.1})",
                summary.tier,
                summary.tier.label(),
                summary.count,
                summary.avg_score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Batches");

    if plan.batches.is_empty() {
        let _ = writeln!(output, "No batches formed.");
    } else {
        for batch in plan.batches.iter() {
            let members: Vec<String> = batch
                .members
                .iter()
                .map(|m| format!("{} ({}, {:?})", m.name, m.score, m.tier))
                .collect();
            let _ = writeln!(output, "- {}: {}", batch.label(), members.join(", "));
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Weekly Topics");

    if plan.grid.weeks.is_empty() {
        let _ = writeln!(output, "No topics assigned.");
    } else {
        let _ = write!(output, "| Week |");
        for batch in plan.batches.iter() {
            let _ = write!(output, " {} |", batch.label());
        }
        let _ = writeln!(output);
        let _ = write!(output, "|---|");
        for _ in plan.batches.iter() {
            let _ = write!(output, "---|");
        }
        let _ = writeln!(output);

        for week in plan.grid.weeks.iter() {
            let _ = write!(output, "| {} |", week.week);
            for topic in week.topics.iter() {
                let _ = write!(output, " {} |", topic.name);
            }
            let _ = writeln!(output);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;
    use crate::models::Student;
    use crate::pipeline;

    #[test]
    fn report_lists_tiers_batches_and_weeks() {
        let students = vec![
            Student {
                name: "Avery Lee".to_string(),
                score: 40,
            },
            Student {
                name: "Jules Moreno".to_string(),
                score: 30,
            },
            Student {
                name: "Kiara Patel".to_string(),
                score: 12,
            },
        ];
        let config = PlanConfig {
            weeks: 2,
            ..PlanConfig::default()
        };
        let plan = pipeline::run(&students, &config).unwrap();
        let report = build_report(Some("roster.csv"), &plan, None);

        assert!(report.starts_with("# Batch Topic Rotation Plan\n"));
        assert!(report.contains("Generated for roster.csv (3 students, 2 weeks, input order)"));
        assert!(report.contains("- High (>35): 1 students (avg marks 40.0)"));
        assert!(report.contains("- Batch 1: Avery Lee (40, High), Jules Moreno (30, Mid), Kiara Patel (12, Low)"));
        assert!(report.contains("| 1 | Python Data Types and Variables |"));
        assert!(report.contains("| 2 | Control Flow in Python |"));
    }

    #[test]
    fn empty_plan_has_placeholders() {
        let plan = pipeline::run(&[], &PlanConfig::default()).unwrap();
        let report = build_report(None, &plan, Some(7));

        assert!(report.contains("uploaded roster (0 students, 5 weeks, seed 7)"));
        assert!(report.contains("No students in this roster."));
        assert!(report.contains("No batches formed."));
        assert!(report.contains("No topics assigned."));
    }
}
