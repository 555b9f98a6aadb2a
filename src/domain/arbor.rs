//! Arbor identity: which branching structure a value belongs to

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a neuron arbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArborKind {
    Axon,
    Basal,
    Apical,
}

/// One arbor of a morphology. Basal dendrites carry their list index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArborId {
    pub kind: ArborKind,
    pub index: Option<usize>,
}

impl ArborId {
    pub fn axon() -> Self {
        Self {
            kind: ArborKind::Axon,
            index: None,
        }
    }

    pub fn basal(index: usize) -> Self {
        Self {
            kind: ArborKind::Basal,
            index: Some(index),
        }
    }

    pub fn apical() -> Self {
        Self {
            kind: ArborKind::Apical,
            index: None,
        }
    }

    /// Human-readable label used on chart axes, e.g. `Basal Dendrite 2`.
    pub fn label(&self) -> String {
        match (self.kind, self.index) {
            (ArborKind::Axon, _) => "Axon".to_string(),
            (ArborKind::Basal, Some(i)) => format!("Basal Dendrite {i}"),
            (ArborKind::Basal, None) => "Basal Dendrite".to_string(),
            (ArborKind::Apical, _) => "Apical Dendrite".to_string(),
        }
    }

    /// Tag used in file names, e.g. `basal-dendrite-2`.
    pub fn tag(&self) -> String {
        match (self.kind, self.index) {
            (ArborKind::Axon, _) => "axon".to_string(),
            (ArborKind::Basal, Some(i)) => format!("basal-dendrite-{i}"),
            (ArborKind::Basal, None) => "basal-dendrite".to_string(),
            (ArborKind::Apical, _) => "apical-dendrite".to_string(),
        }
    }
}

impl fmt::Display for ArborId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
