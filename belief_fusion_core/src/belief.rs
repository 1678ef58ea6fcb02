use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved label for the ignorance mass: belief committed to "any
/// hypothesis" rather than to a specific one.
pub const IGNORANCE_LABEL: &str = "Pheta";

/// Reserved label for the empty set: conflict mass produced when two
/// sources back disjoint hypotheses.
pub const EMPTY_SET_LABEL: &str = "Phy";

// ---------------------------------------------------------------------------
// Focal elements
// ---------------------------------------------------------------------------

/// Classification of a focal element.
///
/// Every mass record points at exactly one of these. The reserved labels
/// above never appear as `Ordinary` values; construction always routes them
/// to their dedicated variants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocalKind {
    /// A single named hypothesis from the frame of discernment.
    Ordinary(String),
    /// The whole frame: mass not committed to any particular hypothesis.
    Ignorance,
    /// The empty set, carrying conflict mass.
    EmptySet,
}

impl FocalKind {
    /// Classify a serialized label. Reserved names map to their variants,
    /// anything else is an ordinary hypothesis.
    pub fn from_label(label: impl Into<String>) -> FocalKind {
        let label = label.into();
        match label.as_str() {
            IGNORANCE_LABEL => FocalKind::Ignorance,
            EMPTY_SET_LABEL => FocalKind::EmptySet,
            _ => FocalKind::Ordinary(label),
        }
    }

    /// Serialized label of this focal element.
    pub fn label(&self) -> &str {
        match self {
            FocalKind::Ordinary(label) => label,
            FocalKind::Ignorance => IGNORANCE_LABEL,
            FocalKind::EmptySet => EMPTY_SET_LABEL,
        }
    }

    /// Sort group for printed and stored records: ordinary hypotheses first,
    /// then ignorance, then the empty set.
    pub fn order_group(&self) -> u8 {
        match self {
            FocalKind::Ordinary(_) => 0,
            FocalKind::Ignorance => 1,
            FocalKind::EmptySet => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Mass records
// ---------------------------------------------------------------------------

/// One mass record: a focal element and the weight assigned to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Belief {
    pub(crate) kind: FocalKind,
    pub(crate) display_name: Option<String>,
    /// Mass assigned to the focal element, nominally in `[0, 1]`. Weights
    /// may be rescaled in place; focal-element identity never changes.
    pub weight: f64,
}

impl Belief {
    /// Belief in a labelled focal element. Reserved labels classify
    /// themselves; see [`FocalKind::from_label`].
    pub fn new(label: impl Into<String>, weight: f64) -> Belief {
        Belief {
            kind: FocalKind::from_label(label),
            display_name: None,
            weight,
        }
    }

    /// Belief with an explicit display name on top of the focal label.
    pub fn named(
        display_name: impl Into<String>,
        label: impl Into<String>,
        weight: f64,
    ) -> Belief {
        Belief {
            kind: FocalKind::from_label(label),
            display_name: Some(display_name.into()),
            weight,
        }
    }

    /// Belief in an already-classified focal element.
    pub fn from_kind(kind: FocalKind, weight: f64) -> Belief {
        Belief {
            kind,
            display_name: None,
            weight,
        }
    }

    /// Parse one flat record line: `<label><TAB><weight>`, with `;` accepted
    /// as a fallback delimiter. A line with no delimiter degrades to an
    /// unset, zero-weight record; an unparseable weight degrades to 0.
    pub fn from_record(line: &str) -> Belief {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let delimiter = if line.contains('\t') {
            '\t'
        } else if line.contains(';') {
            ';'
        } else {
            return Belief::new("", 0.0);
        };
        let mut fields = line.split(delimiter);
        let label = fields.next().unwrap_or("");
        let weight = fields
            .next()
            .and_then(|field| field.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        Belief::new(label, weight)
    }

    pub fn kind(&self) -> &FocalKind {
        &self.kind
    }

    #[inline]
    pub fn label(&self) -> &str {
        self.kind.label()
    }

    /// Display name, falling back to the focal-element label when unset.
    pub fn display_name(&self) -> &str {
        match &self.display_name {
            Some(name) => name,
            None => self.kind.label(),
        }
    }

    #[inline]
    pub fn is_ordinary(&self) -> bool {
        matches!(self.kind, FocalKind::Ordinary(_))
    }

    #[inline]
    pub fn is_ignorance(&self) -> bool {
        matches!(self.kind, FocalKind::Ignorance)
    }

    #[inline]
    pub fn is_empty_set(&self) -> bool {
        matches!(self.kind, FocalKind::EmptySet)
    }

    /// Composite ordering key for printed and stored records.
    pub fn record_key(&self) -> (u8, &str) {
        (self.kind.order_group(), self.kind.label())
    }

    /// Mass-function form, `m(<label>)=<weight>`, used by product tables.
    pub fn mass_string(&self) -> String {
        format!("m({})={}", self.label(), self.weight)
    }
}

/// Flat record form, `<label><TAB><weight>`. This is the stored file format.
impl fmt::Display for Belief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.label(), self.weight)
    }
}
