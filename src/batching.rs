use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::config::Quota;
use crate::error::{PlanError, PlanResult};
use crate::models::{Batch, Tier, TieredStudent};
use crate::tiers;

/// Partitions a categorized roster into batches of the given tier quota.
///
/// Each tier is consumed through its own cursor, in input order or in a
/// seeded shuffle. A batch takes up to `quota` students from each tier in
/// `Tier::ALL` order, skipping exhausted tiers; the last batch may be
/// short. Empty batches are never emitted.
pub fn build_batches(
    students: &[TieredStudent],
    quota: &Quota,
    seed: Option<u64>,
) -> PlanResult<Vec<Batch>> {
    let mut pools = tiers::partition(students);

    for (tier, pool) in Tier::ALL.iter().zip(pools.iter()) {
        if quota.for_tier(*tier) == 0 && !pool.is_empty() {
            return Err(PlanError::Config(format!(
                "quota for tier {} is zero but {} students fall in it",
                tier.label(),
                pool.len()
            )));
        }
    }

    if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        for pool in pools.iter_mut() {
            pool.shuffle(&mut rng);
        }
    }

    let mut cursors = [0usize; 3];
    let mut batches = Vec::new();

    while cursors.iter().zip(pools.iter()).any(|(c, p)| *c < p.len()) {
        let mut members = Vec::new();

        for (i, tier) in Tier::ALL.iter().enumerate() {
            let remaining = pools[i].len() - cursors[i];
            let take = quota.for_tier(*tier).min(remaining);
            members.extend_from_slice(&pools[i][cursors[i]..cursors[i] + take]);
            cursors[i] += take;
        }

        if members.is_empty() {
            break;
        }

        let number = batches.len() + 1;
        debug!(batch = number, size = members.len(), "formed batch");
        batches.push(Batch { number, members });
    }

    Ok(batches)
}
