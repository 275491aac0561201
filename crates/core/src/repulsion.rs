//! Letter repulsion used by the reactive header effect.

use serde::{Deserialize, Serialize};

use crate::geometry::{Offset, Point};

/// Push letters away from the pointer.
///
/// A letter whose center lies within `radius` of the pointer is moved along
/// the pointer→letter direction by `max_offset * (radius - distance) / radius`.
/// Letters at or beyond `radius` stay put.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Repulsion {
    pub radius: f64,
    pub max_offset: f64,
}

impl Default for Repulsion {
    fn default() -> Self {
        Self {
            radius: 100.0,
            max_offset: 15.0,
        }
    }
}

impl Repulsion {
    pub fn new(radius: f64, max_offset: f64) -> Self {
        Self { radius, max_offset }
    }

    pub fn displacement(&self, pointer: Point, center: Point) -> Offset {
        let dx = pointer.x - center.x;
        let dy = pointer.y - center.y;

        // Squared distance first; most letters are out of range.
        let distance_sq = dx * dx + dy * dy;
        if distance_sq >= self.radius * self.radius {
            return Offset::ZERO;
        }

        let distance = distance_sq.sqrt();
        let factor = (self.radius - distance) / self.radius;

        if distance == 0.0 {
            // No direction to push along: lift the letter straight up.
            return Offset::new(0.0, -self.max_offset);
        }

        Offset::new(
            (dx / distance) * -self.max_offset * factor,
            (dy / distance) * -self.max_offset * factor,
        )
    }
}
