pub mod belief;
pub mod combine;
pub mod system;

pub use belief::{Belief, FocalKind, EMPTY_SET_LABEL, IGNORANCE_LABEL};
pub use system::{BeliefSystem, WEIGHT_SUM_TOLERANCE};
