//! Built-in catalogs for the two playable archetypes

use crate::catalog::AnimationCatalog;
use crate::loader::load_catalog_from_str;
use stance_core::{Result, StanceError};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const KNIGHT_TOML: &str = include_str!("../assets/knight.anim.toml");
const ROBOT_TOML: &str = include_str!("../assets/robot.anim.toml");

/// A character archetype with a shipped clip table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    Knight,
    Robot,
}

impl Archetype {
    pub const ALL: [Archetype; 2] = [Archetype::Knight, Archetype::Robot];

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Knight => "knight",
            Archetype::Robot => "robot",
        }
    }

    /// Raw TOML source of the shipped catalog.
    pub fn source(self) -> &'static str {
        match self {
            Archetype::Knight => KNIGHT_TOML,
            Archetype::Robot => ROBOT_TOML,
        }
    }

    /// Parse and validate the shipped catalog.
    pub fn catalog(self) -> Result<AnimationCatalog> {
        load_catalog_from_str(self.source(), &format!("builtin:{}", self.name()))
    }

    /// The shipped catalog, ready to hand to several animators.
    pub fn shared_catalog(self) -> Result<Arc<AnimationCatalog>> {
        self.catalog().map(Arc::new)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Archetype {
    type Err = StanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "knight" => Ok(Archetype::Knight),
            "robot" => Ok(Archetype::Robot),
            other => Err(StanceError::ParseError(format!(
                "unknown archetype '{}'; valid values: knight, robot",
                other
            ))),
        }
    }
}
