use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors from parsing definition values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DefinitionError {
    #[error("unknown placement mode: {value:?}")]
    UnknownPlacementMode { value: String },

    #[error("unknown replica mode: {value:?}")]
    UnknownReplicaMode { value: String },

    #[error("unknown unit: {symbol:?}")]
    UnknownUnit { symbol: String },
}

/// Solid combination performed when folding a boolean component into its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOp {
    Union,
    Subtract,
    Intersect,
}

impl BooleanOp {
    /// Verb used in assembly logs.
    pub fn verb(self) -> &'static str {
        match self {
            BooleanOp::Union => "adding",
            BooleanOp::Subtract => "subtracting",
            BooleanOp::Intersect => "intersecting",
        }
    }
}

/// How a primitive takes part in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlacementMode {
    /// Placed directly under its mother.
    Alone,
    /// Seed solid of a boolean composition.
    BooleanRoot,
    /// Folded into the root named by its mother.
    BooleanComponent(BooleanOp),
}

impl PlacementMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PlacementMode::Alone => "alone",
            PlacementMode::BooleanRoot => "boolean-root",
            PlacementMode::BooleanComponent(BooleanOp::Union) => "union",
            PlacementMode::BooleanComponent(BooleanOp::Subtract) => "subtract",
            PlacementMode::BooleanComponent(BooleanOp::Intersect) => "intersect",
        }
    }

    pub fn boolean_op(self) -> Option<BooleanOp> {
        match self {
            PlacementMode::BooleanComponent(op) => Some(op),
            _ => None,
        }
    }

    pub fn is_boolean(self) -> bool {
        !matches!(self, PlacementMode::Alone)
    }
}

impl FromStr for PlacementMode {
    type Err = DefinitionError;

    /// Accepts the long names and the short command keys (`A`, `B`, `add`, `sub`, `inter`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alone" | "A" => Ok(PlacementMode::Alone),
            "boolean-root" | "B" => Ok(PlacementMode::BooleanRoot),
            "union" | "add" => Ok(PlacementMode::BooleanComponent(BooleanOp::Union)),
            "subtract" | "sub" => Ok(PlacementMode::BooleanComponent(BooleanOp::Subtract)),
            "intersect" | "inter" => Ok(PlacementMode::BooleanComponent(BooleanOp::Intersect)),
            other => Err(DefinitionError::UnknownPlacementMode {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PlacementMode {
    type Error = DefinitionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlacementMode> for String {
    fn from(mode: PlacementMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replica arrangement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReplicaMode {
    /// Copies translated by a fixed shift per index.
    Linear,
    /// Copies rotated by a fixed per-axis angle step per index.
    Rotational,
}

impl ReplicaMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplicaMode::Linear => "linear",
            ReplicaMode::Rotational => "rotational",
        }
    }
}

impl FromStr for ReplicaMode {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" | "lin" => Ok(ReplicaMode::Linear),
            "rotational" | "rot" => Ok(ReplicaMode::Rotational),
            other => Err(DefinitionError::UnknownReplicaMode {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ReplicaMode {
    type Error = DefinitionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReplicaMode> for String {
    fn from(mode: ReplicaMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for ReplicaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
