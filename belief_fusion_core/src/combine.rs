//belief_fusion_core/combine.rs
//! Combination rules: Dempster's normalized rule, the Smets open-world
//! variant, and the averaging multi-source rule.

use crate::belief::{Belief, FocalKind, IGNORANCE_LABEL};
use crate::system::BeliefSystem;

// ---------------------------------------------------------------------------
// Focal-element intersection
// ---------------------------------------------------------------------------

impl FocalKind {
    /// Meet (set intersection) of two focal elements: ignorance behaves as
    /// the universal set and distinct ordinary hypotheses are disjoint;
    /// anything meeting the empty set stays empty.
    pub fn meet(&self, other: &FocalKind) -> FocalKind {
        match (self, other) {
            (FocalKind::EmptySet, _) | (_, FocalKind::EmptySet) => FocalKind::EmptySet,
            (FocalKind::Ignorance, FocalKind::Ignorance) => FocalKind::Ignorance,
            (FocalKind::Ignorance, survivor) => survivor.clone(),
            (survivor, FocalKind::Ignorance) => survivor.clone(),
            (FocalKind::Ordinary(a), FocalKind::Ordinary(b)) if a == b => {
                FocalKind::Ordinary(a.clone())
            }
            _ => FocalKind::EmptySet,
        }
    }
}

impl Belief {
    /// Pairwise intersection product: the meet of the two focal elements,
    /// carrying the product of the two weights. The surviving side names the
    /// result; ties go to the right operand.
    pub fn intersect(&self, other: &Belief) -> Belief {
        let kind = self.kind.meet(&other.kind);
        let display_name = match &kind {
            FocalKind::Ordinary(_) if other.is_ignorance() => self.display_name.clone(),
            FocalKind::Ordinary(_) => other.display_name.clone(),
            _ => None,
        };
        Belief {
            kind,
            display_name,
            weight: self.weight * other.weight,
        }
    }
}

// Full pairwise product matrix. Pairs with an empty-set operand contribute
// nothing to a combination and are skipped here; `Belief::intersect` itself
// stays total so product tables can render every cell.
fn product_matrix(left: &BeliefSystem, right: &BeliefSystem) -> Vec<Belief> {
    let mut products = Vec::new();
    for b1 in left.beliefs() {
        for b2 in right.beliefs() {
            if b1.is_empty_set() || b2.is_empty_set() {
                continue;
            }
            products.push(b1.intersect(b2));
        }
    }
    products
}

// Total conflict mass in a product matrix.
fn conflict_mass(products: &[Belief]) -> f64 {
    products
        .iter()
        .filter(|b| b.is_empty_set())
        .map(|b| b.weight)
        .sum()
}

// Sum each surviving focal element's products into `meta`, in first-seen
// order, dividing every total by `divisor`.
fn fold_products(meta: &mut BeliefSystem, products: &[Belief], divisor: f64) {
    for product in products {
        if product.is_empty_set() {
            continue;
        }
        if meta.beliefs().iter().any(|b| b.kind() == product.kind()) {
            continue;
        }
        let total: f64 = products
            .iter()
            .filter(|b| b.kind() == product.kind())
            .map(|b| b.weight)
            .sum();
        meta.push(Belief {
            kind: product.kind.clone(),
            display_name: product.display_name.clone(),
            weight: total / divisor,
        });
    }
}

// Meta history: the operand's past snapshots first, then the prepared
// operand itself, all as deep values.
fn chain_history(meta: &mut BeliefSystem, operand: &BeliefSystem, prepared: BeliefSystem) {
    for past in operand.history() {
        meta.push_history(past.snapshot());
    }
    meta.push_history(prepared);
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

impl BeliefSystem {
    /// Dempster's rule of combination.
    ///
    /// Both operands are prepared as deep working copies; the originals are
    /// untouched. Every surviving intersection product is summed per focal
    /// element and renormalized by the complement of the conflict mass,
    /// provided that mass lies strictly between 0 and 1. Total conflict
    /// leaves an empty matrix. The result is named `<self>+<other>` and
    /// carries deep snapshots of both operands and their histories.
    pub fn combine(&self, other: &BeliefSystem) -> BeliefSystem {
        let left = self.prepared();
        let right = other.prepared();
        let products = product_matrix(&left, &right);

        let conflict = conflict_mass(&products);
        let divisor = if conflict > 0.0 && conflict < 1.0 {
            1.0 - conflict
        } else {
            1.0
        };

        let mut meta = BeliefSystem::new(format!("{}+{}", left.name, right.name));
        fold_products(&mut meta, &products, divisor);

        chain_history(&mut meta, self, left);
        chain_history(&mut meta, other, right);
        meta
    }

    /// Smets' open-world rule: same product matrix as [`combine`], but the
    /// conflict mass is kept instead of renormalized away, parked on an
    /// explicit ignorance record appended after the surviving elements. The
    /// record is appended even when the conflict is zero, so the result can
    /// carry two ignorance records.
    ///
    /// [`combine`]: BeliefSystem::combine
    pub fn combine_smets(&self, other: &BeliefSystem) -> BeliefSystem {
        let left = self.prepared();
        let right = other.prepared();
        let products = product_matrix(&left, &right);

        let conflict = conflict_mass(&products);
        let mut meta = BeliefSystem::new(format!("{}+{}", left.name, right.name));
        fold_products(&mut meta, &products, 1.0);
        meta.push(Belief::new(IGNORANCE_LABEL, conflict));
        meta.normalise();

        chain_history(&mut meta, self, left);
        chain_history(&mut meta, other, right);
        meta
    }

    /// Averaging multi-source rule over this system and a batch of others.
    ///
    /// The non-zero records of all prepared operands are grouped by focal
    /// element in first-seen order; the iteration order is part of the
    /// contract. Each group combines through its commonality (the weakest
    /// support any source lends the element) and its reliability (the mean
    /// of the commonality-scaled weights): each original weight is scaled
    /// by the reliability and the sum is divided back out by it, with a
    /// zero reliability pinning the group to 0.
    /// The result is normalised and then prepared. It is named after all
    /// operands joined with `+` and carries deep snapshots of every
    /// operand; only the anchor's own history is chained in.
    pub fn combine_lns_cr(&self, others: &[BeliefSystem]) -> BeliefSystem {
        let anchor = self.prepared();
        let batch: Vec<BeliefSystem> = others.iter().map(|o| o.prepared()).collect();

        let mut groups: Vec<(FocalKind, Vec<Belief>)> = Vec::new();
        for system in std::iter::once(&anchor).chain(batch.iter()) {
            for belief in system.beliefs() {
                if belief.weight == 0.0 {
                    continue;
                }
                match groups.iter_mut().find(|(kind, _)| *kind == *belief.kind()) {
                    Some((_, members)) => members.push(belief.clone()),
                    None => groups.push((belief.kind().clone(), vec![belief.clone()])),
                }
            }
        }

        let name = std::iter::once(self.name.as_str())
            .chain(others.iter().map(|o| o.name.as_str()))
            .collect::<Vec<_>>()
            .join("+");
        let mut meta = BeliefSystem::new(name);

        for (kind, members) in groups {
            let commonality = members
                .iter()
                .map(|b| b.weight)
                .fold(f64::INFINITY, f64::min);
            let reliability = members
                .iter()
                .map(|b| b.weight * commonality)
                .sum::<f64>()
                / members.len() as f64;
            let combined = if reliability != 0.0 {
                members
                    .iter()
                    .map(|b| b.weight * reliability)
                    .sum::<f64>()
                    / reliability
            } else {
                0.0
            };
            meta.push(Belief {
                kind,
                display_name: members.first().and_then(|b| b.display_name.clone()),
                weight: combined,
            });
        }

        meta.normalise();
        meta.prepare();

        chain_history(&mut meta, self, anchor);
        for prepared in batch {
            meta.push_history(prepared);
        }
        meta
    }
}
