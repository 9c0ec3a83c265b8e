//! Small world-facing structs shared across the workspace.

use serde::{Deserialize, Serialize};

use crate::enums::{Humidity, Temperature};

/// A block position in the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// East-west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return this position shifted by the given deltas, saturating at the
    /// coordinate limits.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }
}

/// A stack of items produced by a hive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item key in the host registry (for example `apiary.combHoney`).
    pub item: String,
    /// Number of items in the stack.
    pub count: u32,
}

impl ItemStack {
    /// Create a stack of `count` items.
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }

    /// Whether both stacks hold the same item, ignoring counts.
    pub fn is_item_equal(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

/// Climate description of a biome, used for suitability listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biome {
    /// Display name of the biome.
    pub name: String,
    /// Temperature class of the biome.
    pub temperature: Temperature,
    /// Humidity class of the biome.
    pub humidity: Humidity,
}

impl Biome {
    /// Create a biome descriptor.
    pub fn new(name: impl Into<String>, temperature: Temperature, humidity: Humidity) -> Self {
        Self {
            name: name.into(),
            temperature,
            humidity,
        }
    }
}
