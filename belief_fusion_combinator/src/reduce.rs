//! Reduction strategies over batches of belief systems.
//!
//! All strategies take the systems by slice and never mutate them; an empty
//! batch reduces to `None`. An optional limit restricts every strategy to
//! the first N systems before anything else happens; a limit beyond the
//! batch length means "all of them".

use belief_fusion_core::BeliefSystem;

fn limited(systems: &[BeliefSystem], limit: Option<usize>) -> &[BeliefSystem] {
    match limit {
        Some(n) => &systems[..n.min(systems.len())],
        None => systems,
    }
}

/// Left fold under Dempster's rule: the first system seeds the accumulator
/// and every following system is combined into it in order.
pub fn combine_all(systems: &[BeliefSystem], limit: Option<usize>) -> Option<BeliefSystem> {
    let (first, rest) = limited(systems, limit).split_first()?;
    let mut combined = first.clone();
    for system in rest {
        combined = combined.combine(system);
    }
    Some(combined)
}

/// Averaging reduction: the first system anchors the call and the remainder
/// of the batch, selected by position, feeds it. Equal-valued duplicates in
/// the batch are distinct sources and all of them count.
pub fn combine_all_lns(systems: &[BeliefSystem], limit: Option<usize>) -> Option<BeliefSystem> {
    let (anchor, batch) = limited(systems, limit).split_first()?;
    Some(anchor.combine_lns_cr(batch))
}

/// Binary-tree reduction under Dempster's rule: each round combines adjacent
/// pairs and carries an odd trailing system forward unmodified; rounds
/// repeat until one system remains.
///
/// This is not interchangeable with [`combine_all`]: conflict is divided
/// out per step, so the pairing order is observable whenever an intermediate
/// step carries conflict mass. At total conflict the two visibly split; an
/// empty intermediate re-enters the next round as pure ignorance.
pub fn combine_pairwise_tree(
    systems: &[BeliefSystem],
    limit: Option<usize>,
) -> Option<BeliefSystem> {
    let considered = limited(systems, limit);
    if considered.is_empty() {
        return None;
    }

    let mut round = considered.to_vec();
    while round.len() > 1 {
        let mut next = Vec::with_capacity(round.len() / 2 + 1);
        let mut index = 0;
        while index < round.len() {
            if index + 1 < round.len() {
                next.push(round[index].combine(&round[index + 1]));
                index += 2;
            } else {
                // Odd trailing system carries forward to the next round.
                next.push(round[index].clone());
                index += 1;
            }
        }
        round = next;
    }
    round.into_iter().next()
}
