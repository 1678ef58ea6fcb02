//! Belief systems: named mass matrices over a frame of discernment.
//!
//! Responsibilities:
//! - hold one source's mass records and keep them well formed
//!   (`prepare` / `normalise`)
//! - derive discernment frames, alone and merged with another system
//! - measure squared distance and history-graded fuzzy membership
//! - carry deep snapshots of every operand consumed by a combination
//!
//! Non-goals:
//! - no combination rules here (see `combine`)
//! - no IO and no parsing beyond what `Belief::from_record` already does

use std::cell::Cell;
use std::fmt;

use crate::belief::{Belief, IGNORANCE_LABEL};

/// Tolerance for sum-of-mass checks on prepared systems.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-12;

/// Cached extrema of the squared distances between a system and its
/// combination history.
#[derive(Clone, Copy, Debug)]
struct DeltaBounds {
    min: f64,
    max: f64,
}

/// A named set of mass records, plus the history of combinations that
/// produced it.
#[derive(Clone, Debug)]
pub struct BeliefSystem {
    /// Source name; combined systems join their operands' names with `+`.
    pub name: String,
    matrix: Vec<Belief>,
    history: Vec<BeliefSystem>,
    // Lazily computed from `history`; cleared by the single append path.
    delta_bounds: Cell<Option<DeltaBounds>>,
}

impl BeliefSystem {
    pub fn new(name: impl Into<String>) -> BeliefSystem {
        BeliefSystem::from_beliefs(name, Vec::new())
    }

    pub fn from_beliefs(name: impl Into<String>, beliefs: Vec<Belief>) -> BeliefSystem {
        BeliefSystem {
            name: name.into(),
            matrix: beliefs,
            history: Vec::new(),
            delta_bounds: Cell::new(None),
        }
    }

    /// Append one mass record.
    pub fn push(&mut self, belief: Belief) {
        self.matrix.push(belief);
    }

    /// All mass records, in insertion order.
    pub fn beliefs(&self) -> &[Belief] {
        &self.matrix
    }

    /// Records with a non-empty focal element, ordered by group then label.
    /// This is the canonical printed and stored form of the matrix.
    pub fn ordered_records(&self) -> Vec<&Belief> {
        let mut records: Vec<&Belief> = self
            .matrix
            .iter()
            .filter(|b| !b.label().is_empty())
            .collect();
        records.sort_by(|a, b| a.record_key().cmp(&b.record_key()));
        records
    }

    /// Sum of all masses currently in the matrix.
    pub fn total_mass(&self) -> f64 {
        self.matrix.iter().map(|b| b.weight).sum()
    }

    /// Deep snapshots of every operand consumed by past combinations.
    pub fn history(&self) -> &[BeliefSystem] {
        &self.history
    }

    /// Deep value snapshot: name and matrix only, empty history.
    pub fn snapshot(&self) -> BeliefSystem {
        BeliefSystem {
            name: self.name.clone(),
            matrix: self.matrix.clone(),
            history: Vec::new(),
            delta_bounds: Cell::new(None),
        }
    }

    /// Deep, prepared working copy of this system.
    pub fn prepared(&self) -> BeliefSystem {
        let mut copy = self.snapshot();
        copy.prepare();
        copy
    }

    // The only path that grows the history. Keeping it unique is what makes
    // the cached delta bounds safe to hand out.
    pub(crate) fn push_history(&mut self, snapshot: BeliefSystem) {
        self.history.push(snapshot);
        self.delta_bounds.set(None);
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Frame of discernment: the ordinary, non-empty focal elements, ordered
    /// by group then label. Ignorance and empty-set records are not part of
    /// the frame.
    pub fn discernment_frame(&self) -> Vec<&str> {
        let mut frame: Vec<&Belief> = self
            .matrix
            .iter()
            .filter(|b| b.is_ordinary() && !b.label().is_empty())
            .collect();
        frame.sort_by(|a, b| a.record_key().cmp(&b.record_key()));
        frame.into_iter().map(|b| b.label()).collect()
    }

    /// Union frame: this system's frame, extended with any of `other`'s
    /// elements not already present, in first-seen order and without
    /// duplicates from the extension.
    pub fn combined_frame<'a>(&'a self, other: &'a BeliefSystem) -> Vec<&'a str> {
        let mut frame = self.discernment_frame();
        for label in other.discernment_frame() {
            if !frame.contains(&label) {
                frame.push(label);
            }
        }
        frame
    }

    /// Weight of the first record matching `label`, or 0 when absent.
    pub fn weight_of(&self, label: &str) -> f64 {
        self.matrix
            .iter()
            .find(|b| b.label() == label)
            .map(|b| b.weight)
            .unwrap_or(0.0)
    }

    // -----------------------------------------------------------------------
    // Well-formedness
    // -----------------------------------------------------------------------

    /// Top up an under-committed matrix: when no ignorance record exists and
    /// the total mass is strictly below 1, append an ignorance record
    /// carrying the remainder. A matrix already at or above 1, or one that
    /// already holds an ignorance record, is left untouched.
    pub fn prepare(&mut self) {
        if self.matrix.iter().any(|b| b.is_ignorance()) {
            return;
        }
        let sum = self.total_mass();
        if sum < 1.0 {
            self.matrix.push(Belief::new(IGNORANCE_LABEL, 1.0 - sum));
        }
    }

    /// Scale every weight down by the total mass, but only when the total
    /// exceeds 1. Under-committed matrices are `prepare`'s business.
    pub fn normalise(&mut self) {
        let sum = self.total_mass();
        if sum > 1.0 {
            for belief in &mut self.matrix {
                belief.weight /= sum;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Distance and membership
    // -----------------------------------------------------------------------

    /// Squared distance between two systems: the sum over the union frame of
    /// squared weight differences, with 0 for elements a side lacks.
    pub fn compare(&self, other: &BeliefSystem) -> f64 {
        self.combined_frame(other)
            .iter()
            .map(|label| {
                let delta = self.weight_of(label) - other.weight_of(label);
                delta * delta
            })
            .sum()
    }

    /// Smallest squared distance between this system and any entry of its
    /// combination history; 0 when the history is empty.
    ///
    /// Bounds are cached on first read and refreshed when the history grows.
    /// Weight edits between reads are not tracked; read after mutating.
    pub fn delta_squared_min(&self) -> f64 {
        self.delta_bounds().min
    }

    /// Largest squared distance between this system and any entry of its
    /// combination history; 0 when the history is empty.
    pub fn delta_squared_max(&self) -> f64 {
        self.delta_bounds().max
    }

    /// Membership grade of this system against `other`'s history spread.
    ///
    /// Distances below `other.delta_squared_min()` grade 0 and distances
    /// above `other.delta_squared_max()` grade 1; in between, the grade is
    /// the distance divided by the spread of the bounds. The quotient is
    /// deliberately not offset by the minimum bound. With an empty or
    /// single-entry history the bounds collapse and the quotient degenerates;
    /// grading only makes sense against a combined system.
    pub fn fuzzy_membership(&self, other: &BeliefSystem) -> f64 {
        let delta_squared = self.compare(other);
        if delta_squared < other.delta_squared_min() {
            0.0
        } else if delta_squared > other.delta_squared_max() {
            1.0
        } else {
            delta_squared / (other.delta_squared_max() - other.delta_squared_min())
        }
    }

    fn delta_bounds(&self) -> DeltaBounds {
        if let Some(bounds) = self.delta_bounds.get() {
            return bounds;
        }
        let mut bounds = DeltaBounds { min: 0.0, max: 0.0 };
        for (index, past) in self.history.iter().enumerate() {
            let delta = self.compare(past);
            if index == 0 {
                bounds = DeltaBounds {
                    min: delta,
                    max: delta,
                };
            } else {
                bounds.min = bounds.min.min(delta);
                bounds.max = bounds.max.max(delta);
            }
        }
        self.delta_bounds.set(Some(bounds));
        bounds
    }
}

/// The canonical flat table form: one ordered record per line.
impl fmt::Display for BeliefSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for belief in self.ordered_records() {
            writeln!(f, "{}", belief)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, label: &str) -> BeliefSystem {
        BeliefSystem::from_beliefs(name, vec![Belief::new(label, 1.0)])
    }

    #[test]
    fn delta_bounds_refresh_when_the_history_grows() {
        let mut combined = source("meta", "x");
        combined.push_history(source("agree", "x"));
        assert_eq!(combined.delta_squared_max(), 0.0);

        // The read above primed the cache; the append has to clear it.
        combined.push_history(source("clash", "y"));
        assert_eq!(combined.delta_squared_min(), 0.0);
        assert!((combined.delta_squared_max() - 2.0).abs() < 1e-12);
    }
}
