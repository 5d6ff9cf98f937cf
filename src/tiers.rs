use crate::models::{Student, Tier, TierSummary, TieredStudent};

pub fn tier_for_score(score: i64) -> Tier {
    match score {
        i64::MIN..=25 => Tier::Low,
        26..=35 => Tier::Mid,
        _ => Tier::High,
    }
}

pub fn categorize(students: &[Student]) -> Vec<TieredStudent> {
    students
        .iter()
        .map(|student| TieredStudent {
            name: student.name.clone(),
            score: student.score,
            tier: tier_for_score(student.score),
        })
        .collect()
}

/// Splits a categorized roster into per-tier sequences, preserving input order.
pub fn partition(students: &[TieredStudent]) -> [Vec<TieredStudent>; 3] {
    let mut high = Vec::new();
    let mut mid = Vec::new();
    let mut low = Vec::new();

    for student in students {
        match student.tier {
            Tier::High => high.push(student.clone()),
            Tier::Mid => mid.push(student.clone()),
            Tier::Low => low.push(student.clone()),
        }
    }

    [high, mid, low]
}

pub fn summarize(students: &[TieredStudent]) -> Vec<TierSummary> {
    Tier::ALL
        .iter()
        .map(|&tier| {
            let (count, total) = students
                .iter()
                .filter(|s| s.tier == tier)
                .fold((0usize, 0i128), |(count, total), s| {
                    (count + 1, total + i128::from(s.score))
                });
            TierSummary {
                tier,
                count,
                avg_score: if count == 0 {
                    0.0
                } else {
                    total as f64 / count as f64
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, score: i64) -> Student {
        Student {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn boundaries_are_closed_on_upper_edge() {
        assert_eq!(tier_for_score(25), Tier::Low);
        assert_eq!(tier_for_score(26), Tier::Mid);
        assert_eq!(tier_for_score(35), Tier::Mid);
        assert_eq!(tier_for_score(36), Tier::High);
    }

    #[test]
    fn every_score_maps_to_a_tier() {
        assert_eq!(tier_for_score(i64::MIN), Tier::Low);
        assert_eq!(tier_for_score(-4), Tier::Low);
        assert_eq!(tier_for_score(0), Tier::Low);
        assert_eq!(tier_for_score(250), Tier::High);
        assert_eq!(tier_for_score(i64::MAX), Tier::High);
    }

    #[test]
    fn categorize_keeps_roster_order() {
        let roster = vec![student("Avery", 40), student("Jules", 10), student("Kiara", 30)];
        let tiered = categorize(&roster);

        let names: Vec<&str> = tiered.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Avery", "Jules", "Kiara"]);
        assert_eq!(tiered[0].tier, Tier::High);
        assert_eq!(tiered[1].tier, Tier::Low);
        assert_eq!(tiered[2].tier, Tier::Mid);
    }

    #[test]
    fn partition_splits_by_tier_in_order() {
        let tiered = categorize(&[
            student("m1", 30),
            student("h1", 90),
            student("m2", 28),
            student("l1", 3),
        ]);
        let [high, mid, low] = partition(&tiered);

        assert_eq!(high.len(), 1);
        assert_eq!(mid.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), ["m1", "m2"]);
        assert_eq!(low[0].name, "l1");
    }

    #[test]
    fn summary_averages_per_tier() {
        let tiered = categorize(&[student("a", 40), student("b", 50), student("c", 20)]);
        let summaries = summarize(&tiered);

        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].tier, Tier::High);
        assert_eq!(summaries[0].count, 2);
        assert!((summaries[0].avg_score - 45.0).abs() < 0.001);
        assert_eq!(summaries[1].count, 0);
        assert_eq!(summaries[1].avg_score, 0.0);
        assert_eq!(summaries[2].count, 1);
    }

    #[test]
    fn summary_handles_extreme_scores() {
        let tiered = categorize(&[
            student("a", i64::MAX),
            student("b", i64::MAX),
            student("c", i64::MIN),
            student("d", i64::MIN),
        ]);
        let summaries = summarize(&tiered);

        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[0].avg_score, i64::MAX as f64);
        assert_eq!(summaries[2].count, 2);
        assert_eq!(summaries[2].avg_score, i64::MIN as f64);
    }
}
