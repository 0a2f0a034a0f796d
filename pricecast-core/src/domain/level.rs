//! Support and resistance levels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelKind {
    Support,
    Resistance,
}

/// A clustered price zone. `strength` counts the pivots merged into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: LevelKind,
    pub strength: u32,
}

impl Level {
    pub fn new(price: f64, kind: LevelKind) -> Self {
        Self {
            price,
            kind,
            strength: 1,
        }
    }

    pub fn is_support(&self) -> bool {
        self.kind == LevelKind::Support
    }

    pub fn is_resistance(&self) -> bool {
        self.kind == LevelKind::Resistance
    }
}
